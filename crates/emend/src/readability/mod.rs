//! Readability metrics for raw text.
//!
//! Counts words, sentences and syllables with simple lexical heuristics and
//! combines them into a Flesch-Kincaid Reading Ease score. Everything here is
//! a pure function of the input text.

mod flesch;

pub use flesch::{
    calculate_readability, count_syllables, ReadabilityMetrics, ReadingLevel, TextStatistics,
};
