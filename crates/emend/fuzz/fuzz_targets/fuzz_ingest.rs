//! Fuzz target for document ingestion.
//!
//! This fuzzer tests that reading arbitrary bytes as a document:
//! 1. Never panics
//! 2. Always yields text the engine can analyze

#![no_main]

use emend::document::read_document;
use emend::Emend;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".txt") {
        if temp_file.write_all(data).is_ok() {
            let ingested = read_document(temp_file.path());
            let _ = Emend::new().analyze_text("doc_001", &ingested.text);
        }
    }
});
