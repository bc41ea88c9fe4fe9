//! In-memory n-gram index: record storage, posting tables and search.

use std::borrow::Borrow;
use std::hash::Hash;

use ahash::AHashMap;
use serde::Serialize;

use super::config::IndexConfig;
use super::error::{NgramError, Result};
use super::extract::ValueExtractor;
use super::gram::extract_grams;
use super::matcher::{needs_verification, segments_in_order};
use super::pattern::Pattern;
use super::posting::{intersect, PostingList};

/// A stored record: its value handle plus the sequence number used in
/// posting lists.
#[derive(Debug)]
struct Record<V> {
    seq: u32,
    value: V,
}

/// Counters describing the index contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of stored records.
    pub records: usize,
    pub gram_size: usize,
    /// Number of posting lists per gram length, index `len - 1`.
    pub grams_per_length: Vec<usize>,
    /// Total record entries across all posting lists.
    pub postings: u64,
}

/// Inverted index answering wildcard substring queries over host records.
///
/// `K` is the record identity and `V` the value handle. Both are opaque
/// handles owned by the host: the index keeps clones of them (an id, an
/// `Rc`, a borrowed `&str`, ...) and reads value bytes only through the
/// extractor `E`. The host must keep a value's bytes unchanged while it is
/// stored and delete the record before the handle becomes invalid.
///
/// Every record gets a `u32` sequence number when added. Posting lists hold
/// sequence numbers, so intersection runs over a stable order that does not
/// depend on handle addresses. Numbers are never reused.
#[derive(Debug)]
pub struct NgramIndex<K, V, E> {
    config: IndexConfig,
    extractor: E,
    storage: AHashMap<K, Record<V>>,
    /// Sequence number → identity, for resolving posting hits.
    by_seq: AHashMap<u32, K>,
    /// One table per gram length, `tables[len - 1]`, keyed by gram hash.
    tables: Vec<AHashMap<u64, PostingList>>,
    next_seq: u32,
}

impl<K, V, E> NgramIndex<K, V, E>
where
    K: Hash + Eq + Clone,
    E: ValueExtractor<V>,
{
    /// Create an index over grams of length `1..=gram_size` with default
    /// settings otherwise.
    pub fn new(gram_size: usize, extractor: E) -> Result<Self> {
        Self::with_config(IndexConfig::new(gram_size), extractor)
    }

    /// Create an index from a validated configuration.
    pub fn with_config(config: IndexConfig, extractor: E) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            "NgramIndex: created (gram_size={}, verify={:?}, prune={})",
            config.gram_size,
            config.verify,
            config.prune_empty_postings
        );
        let tables = (0..config.gram_size).map(|_| AHashMap::new()).collect();
        Ok(NgramIndex {
            config,
            extractor,
            storage: AHashMap::new(),
            by_seq: AHashMap::new(),
            tables,
            next_seq: 0,
        })
    }

    /// Add a record. Adding an identity that is already stored is a no-op.
    ///
    /// Fails without touching the index if the value's bytes cannot be
    /// extracted or sequence numbers are exhausted.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        if self.storage.contains_key(&key) {
            tracing::trace!("NgramIndex: add skipped, identity already stored");
            return Ok(());
        }

        let seq = self.next_seq;
        let next_seq = seq.checked_add(1).ok_or(NgramError::SequenceExhausted)?;

        let (byte_len, grams) = {
            let bytes = self.extractor.value_bytes(&value)?;
            (bytes.len(), extract_grams(&bytes, self.config.gram_size))
        };
        for gram in &grams {
            self.tables[gram.table()]
                .entry(gram.hash)
                .or_default()
                .insert(seq);
        }

        self.next_seq = next_seq;
        self.by_seq.insert(seq, key.clone());
        self.storage.insert(key, Record { seq, value });
        tracing::debug!(
            "NgramIndex: added record seq={} ({} bytes, {} grams)",
            seq,
            byte_len,
            grams.len()
        );
        Ok(())
    }

    /// Delete a record. Deleting an identity that is not stored is a no-op.
    ///
    /// The record's grams are regenerated from its current value bytes; if
    /// extraction fails the record stays in place.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(record) = self.storage.get(key) else {
            tracing::trace!("NgramIndex: delete skipped, identity not stored");
            return Ok(());
        };
        let seq = record.seq;
        let grams = {
            let bytes = self.extractor.value_bytes(&record.value)?;
            extract_grams(&bytes, self.config.gram_size)
        };

        let prune = self.config.prune_empty_postings;
        for gram in &grams {
            let table = &mut self.tables[gram.table()];
            let emptied = match table.get_mut(&gram.hash) {
                Some(list) => {
                    list.remove(seq);
                    list.is_empty()
                }
                None => false,
            };
            if prune && emptied {
                table.remove(&gram.hash);
            }
        }

        self.by_seq.remove(&seq);
        self.storage.remove(key);
        tracing::debug!(
            "NgramIndex: deleted record seq={} ({} grams)",
            seq,
            grams.len()
        );
        Ok(())
    }

    /// Search with a pattern handle, extracted through the same capability
    /// as stored values.
    pub fn search<P>(&self, pattern: &P) -> Result<Vec<(&K, &V)>>
    where
        P: ?Sized,
        E: ValueExtractor<P>,
    {
        let bytes = ValueExtractor::<P>::value_bytes(&self.extractor, pattern)?;
        self.search_bytes(&bytes)
    }

    /// Search with raw pattern bytes.
    ///
    /// Returns the records whose value contains every literal segment of the
    /// pattern in order, in ascending sequence (insertion) order. A pattern
    /// without literal bytes (empty, or only wildcards) matches nothing.
    pub fn search_bytes(&self, pattern: &[u8]) -> Result<Vec<(&K, &V)>> {
        let pattern = Pattern::parse(pattern, self.config.wildcard, self.config.gram_size);
        if pattern.is_empty() {
            tracing::trace!("NgramIndex: pattern has no grams, empty result");
            return Ok(Vec::new());
        }

        let mut lists = Vec::with_capacity(pattern.grams.len());
        for gram in &pattern.grams {
            match self.tables[gram.table()].get(&gram.hash) {
                Some(list) => lists.push(list),
                None => {
                    tracing::trace!("NgramIndex: gram len={} not indexed", gram.len);
                    return Ok(Vec::new());
                }
            }
        }

        let candidates = intersect(&lists);
        let verify = needs_verification(self.config.verify, pattern.segments.len());
        tracing::trace!(
            "NgramIndex: {} segments, {} grams, {} candidates, verify={}",
            pattern.segments.len(),
            pattern.grams.len(),
            candidates.len(),
            verify
        );

        let mut results = Vec::with_capacity(candidates.len() as usize);
        for seq in candidates.iter() {
            let Some((key, record)) = self
                .by_seq
                .get(&seq)
                .and_then(|key| self.storage.get(key).map(|record| (key, record)))
            else {
                continue;
            };
            if verify {
                let bytes = self.extractor.value_bytes(&record.value)?;
                if !segments_in_order(&bytes, &pattern.segments) {
                    continue;
                }
            }
            results.push((key, &record.value));
        }

        Ok(results)
    }
}

impl<K, V, E> NgramIndex<K, V, E>
where
    K: Hash + Eq,
{
    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.contains_key(key)
    }

    /// Value handle stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.get(key).map(|record| &record.value)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn gram_size(&self) -> usize {
        self.config.gram_size
    }

    /// Drop every record and posting list. Configuration is kept and
    /// sequence numbers continue from where they were.
    pub fn clear(&mut self) {
        tracing::debug!("NgramIndex: cleared {} records", self.storage.len());
        self.storage.clear();
        self.by_seq.clear();
        for table in &mut self.tables {
            table.clear();
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.storage.len(),
            gram_size: self.config.gram_size,
            grams_per_length: self.tables.iter().map(|table| table.len()).collect(),
            postings: self
                .tables
                .iter()
                .flat_map(|table| table.values())
                .map(|list| list.len())
                .sum(),
        }
    }
}
