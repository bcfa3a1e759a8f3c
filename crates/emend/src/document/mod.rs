//! Documents under review and how their text is ingested.

pub mod demo;
mod document;
mod source;

pub use document::{Document, DocumentId};
pub use source::{read_document, DocumentSource, Ingested};
