//! `ngram_core` — in-memory n-gram index for wildcard substring search.
//!
//! This crate is a pure in-process data structure: no I/O, no threads, no
//! persistence. Hosts plug in their record handles and a value-extraction
//! capability; the index answers "which stored records contain these literal
//! runs, in order" without scanning every value.
//!
//! Modules:
//! - `ngram` — inverted index, pattern decomposition and matching

pub mod ngram;

pub use ngram::{
    parse_index_config, AsBytes, IndexConfig, IndexStats, NgramError, NgramIndex, Pattern,
    ValueExtractor, VerifyPolicy,
};
