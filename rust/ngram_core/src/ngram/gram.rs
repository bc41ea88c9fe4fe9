//! Gram hashing and extraction from byte content.

use ahash::AHashSet;

/// Seed of the multiplicative rolling hash.
pub const HASH_SEED: u64 = 5381;

/// Hash a byte window: `hash = hash * 33 + byte`, seeded with [`HASH_SEED`].
///
/// Width is fixed at 64 bits regardless of the target's word size.
#[inline]
pub fn hash_gram(bytes: &[u8]) -> u64 {
    bytes.iter().fold(HASH_SEED, |hash, &b| step(hash, b))
}

#[inline]
fn step(hash: u64, byte: u8) -> u64 {
    hash.wrapping_mul(33).wrapping_add(u64::from(byte))
}

/// A gram key: window length plus the hash of its bytes.
///
/// `len` selects the posting table (`len - 1`), `hash` the list within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gram {
    pub len: usize,
    pub hash: u64,
}

impl Gram {
    /// Key for the given window.
    pub fn of(window: &[u8]) -> Self {
        Gram {
            len: window.len(),
            hash: hash_gram(window),
        }
    }

    /// Index of the posting table this gram lives in.
    #[inline]
    pub fn table(&self) -> usize {
        self.len - 1
    }
}

/// Extract the unique gram keys of `content` for every length `1..=n`.
///
/// Every window `content[pos..pos + len]` with `len <= n` contributes one key.
/// Keys are deduplicated, so a value repeating a window (or producing two
/// colliding windows) yields that key once. Order is unspecified.
pub fn extract_grams(content: &[u8], n: usize) -> Vec<Gram> {
    let mut seen = AHashSet::new();
    for pos in 0..content.len() {
        let max_len = n.min(content.len() - pos);
        let mut hash = HASH_SEED;
        // Extend the window one byte at a time; each prefix is itself a gram.
        for (offset, &byte) in content[pos..pos + max_len].iter().enumerate() {
            hash = step(hash, byte);
            seen.insert(Gram {
                len: offset + 1,
                hash,
            });
        }
    }

    seen.into_iter().collect()
}
