//! Posting list operations using Roaring bitmaps.

use roaring::RoaringBitmap;

/// A posting list: the sequence numbers of records containing a gram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingList {
    pub bitmap: RoaringBitmap,
}

impl PostingList {
    /// Create an empty posting list.
    pub fn new() -> Self {
        PostingList {
            bitmap: RoaringBitmap::new(),
        }
    }

    /// Create a posting list from a Roaring bitmap.
    pub fn from_bitmap(bitmap: RoaringBitmap) -> Self {
        PostingList { bitmap }
    }

    /// Insert a record sequence number. Returns false if already present.
    pub fn insert(&mut self, seq: u32) -> bool {
        self.bitmap.insert(seq)
    }

    /// Remove a record sequence number. Returns false if it was absent.
    pub fn remove(&mut self, seq: u32) -> bool {
        self.bitmap.remove(seq)
    }

    /// Number of records in this posting list.
    pub fn len(&self) -> u64 {
        self.bitmap.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    /// Iterate over sequence numbers in ascending order.
    pub fn iter(&self) -> roaring::bitmap::Iter<'_> {
        self.bitmap.iter()
    }

    /// Convert to a Vec of sequence numbers.
    #[cfg(test)]
    pub fn to_vec(&self) -> Vec<u32> {
        self.bitmap.iter().collect()
    }
}

/// Intersect posting lists (AND operation).
///
/// Lists are folded smallest first and the fold stops as soon as the running
/// intersection is empty. Returns an empty posting list for no input.
pub fn intersect(lists: &[&PostingList]) -> PostingList {
    let mut ordered: Vec<&PostingList> = lists.to_vec();
    ordered.sort_by_key(|list| list.len());

    let Some((first, rest)) = ordered.split_first() else {
        return PostingList::new();
    };

    let mut result = first.bitmap.clone();
    for list in rest {
        if result.is_empty() {
            break;
        }
        result &= &list.bitmap;
    }

    PostingList::from_bitmap(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[u32]) -> PostingList {
        PostingList::from_bitmap(ids.iter().copied().collect())
    }

    #[test]
    fn test_intersect_two_lists() {
        let a = list(&[1, 2, 3]);
        let b = list(&[2, 3, 4]);
        assert_eq!(intersect(&[&a, &b]).to_vec(), vec![2, 3]);
    }

    #[test]
    fn test_intersect_three_lists() {
        let a = list(&[1, 2, 3, 4, 5]);
        let b = list(&[2, 3, 4]);
        let c = list(&[3, 4, 9]);
        assert_eq!(intersect(&[&a, &b, &c]).to_vec(), vec![3, 4]);
    }

    #[test]
    fn test_intersect_with_empty() {
        let a = list(&[1, 2]);
        let b = PostingList::new();
        assert!(intersect(&[&a, &b]).is_empty());
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = list(&[1, 2]);
        let b = list(&[3, 4]);
        let c = list(&[1, 2, 3, 4]);
        assert!(intersect(&[&a, &b, &c]).is_empty());
    }

    #[test]
    fn test_intersect_single_list() {
        let a = list(&[7, 42]);
        assert_eq!(intersect(&[&a]).to_vec(), vec![7, 42]);
    }

    #[test]
    fn test_intersect_empty_input() {
        assert!(intersect(&[]).is_empty());
    }

    #[test]
    fn test_insert_remove() {
        let mut pl = PostingList::new();
        assert!(pl.insert(1));
        assert!(!pl.insert(1));
        assert!(pl.insert(2));
        assert_eq!(pl.len(), 2);
        assert!(pl.bitmap.contains(1));

        assert!(pl.remove(1));
        assert!(!pl.remove(1));
        assert!(!pl.bitmap.contains(1));
        assert_eq!(pl.to_vec(), vec![2]);

        pl.remove(2);
        assert!(pl.is_empty());
    }
}
