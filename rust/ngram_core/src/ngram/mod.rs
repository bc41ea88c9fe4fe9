//! In-memory n-gram index for wildcard substring search.
//!
//! Records are `(identity, value)` handles owned by the host. Every window of
//! a value up to `N` bytes long is hashed into a posting table per window
//! length; a query splits on the wildcard, looks up the covering grams of each
//! literal run, intersects their posting lists and verifies the survivors.
//!
//! # Architecture
//!
//! - **config** — Index configuration (gram size, wildcard, verification)
//! - **extract** — Value-extraction capability supplied by the host
//! - **gram** — Rolling hash and gram extraction
//! - **pattern** — Split a pattern into literal segments and covering grams
//! - **posting** — Posting list operations using Roaring bitmaps
//! - **matcher** — In-order segment verification
//! - **index** — Storage, posting tables and search
//! - **error** — Error types

pub mod config;
pub mod error;
pub mod extract;
pub mod gram;
pub mod index;
pub mod matcher;
pub mod pattern;
pub mod posting;

// Re-export key types for convenience.
pub use config::{parse_index_config, IndexConfig, VerifyPolicy};
pub use error::{NgramError, Result};
pub use extract::{AsBytes, ValueExtractor};
pub use index::{IndexStats, NgramIndex};
pub use pattern::Pattern;
