//! Candidate verification against a pattern's literal segments.

use memchr::memmem;

use super::config::VerifyPolicy;

/// Check that every segment occurs in `haystack`, in order and without
/// overlapping. Each segment is searched from a cursor that starts at 0 and
/// moves past the previous match (leftmost match wins).
pub fn segments_in_order<S: AsRef<[u8]>>(haystack: &[u8], segments: &[S]) -> bool {
    let mut cursor = 0;
    for segment in segments {
        let segment = segment.as_ref();
        match memmem::find(&haystack[cursor..], segment) {
            Some(offset) => cursor += offset + segment.len(),
            None => return false,
        }
    }
    true
}

/// Whether candidates for a pattern with `segment_count` segments must be
/// verified under `policy`.
pub fn needs_verification(policy: VerifyPolicy, segment_count: usize) -> bool {
    match policy {
        VerifyPolicy::Always => true,
        VerifyPolicy::MultiSegment => segment_count > 1,
    }
}
