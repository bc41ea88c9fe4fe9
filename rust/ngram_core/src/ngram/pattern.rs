//! Pattern decomposition: literal segments and their covering grams.
//!
//! A pattern is split on the wildcard byte into literal segments. Each
//! segment of length `s` is covered by windows of length `l = min(s, n)`
//! starting at 0 and stepping by `l`, with the last window pinned to end at
//! `s` (it may overlap its predecessor).

use super::gram::Gram;

/// A decomposed query pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern<'p> {
    /// Literal segments in pattern order.
    pub segments: Vec<&'p [u8]>,
    /// Covering grams of all segments, sorted and deduplicated.
    pub grams: Vec<Gram>,
}

impl<'p> Pattern<'p> {
    /// Decompose `pattern` for an index of gram size `n`.
    pub fn parse(pattern: &'p [u8], wildcard: u8, n: usize) -> Self {
        let segments = split_segments(pattern, wildcard);
        let mut grams = Vec::new();
        for segment in &segments {
            grams.extend(
                covering_windows(segment.len(), n)
                    .into_iter()
                    .map(|(pos, len)| Gram::of(&segment[pos..pos + len])),
            );
        }
        grams.sort();
        grams.dedup();

        Pattern { segments, grams }
    }

    /// True when no grams could be derived (empty or wildcard-only pattern).
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }
}

/// Split on `wildcard`, dropping the empty runs left by leading, trailing or
/// consecutive wildcards.
pub fn split_segments(pattern: &[u8], wildcard: u8) -> Vec<&[u8]> {
    pattern
        .split(|&b| b == wildcard)
        .filter(|run| !run.is_empty())
        .collect()
}

/// Covering windows `(offset, len)` for a segment of `size` bytes.
///
/// Returns the minimal set of fixed-length windows whose union is the whole
/// segment. Empty for `size == 0` or `n == 0`.
pub fn covering_windows(size: usize, n: usize) -> Vec<(usize, usize)> {
    if size == 0 || n == 0 {
        return Vec::new();
    }

    let len = size.min(n);
    let mut windows = Vec::with_capacity(size.div_ceil(len));
    let mut pos = 0;
    loop {
        windows.push((pos, len));
        let end = pos + len;
        if end == size {
            break;
        }
        pos = end.min(size - len);
    }
    windows
}
