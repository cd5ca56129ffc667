use crate::document::FrequencyRecord;
use crate::error::Result;
use crate::storage::FrequencyTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Inverted index: term -> (document ID -> frequency)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvertedIndex {
    index: HashMap<String, BTreeMap<u32, u32>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Build the index from every record of the table, in order
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let records = table.records()?;
        let index = Self::from_records(&records);
        tracing::info!(
            "built index with {} terms from {} records",
            index.len(),
            records.len()
        );
        Ok(index)
    }

    /// Later records overwrite earlier ones for the same (term, doc_id)
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FrequencyRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    pub fn insert(&mut self, record: &FrequencyRecord) {
        self.index
            .entry(record.term.clone())
            .or_default()
            .insert(record.doc_id, record.frequency);
    }

    /// Frequency of `term` under `doc_id`, if recorded
    pub fn get(&self, term: &str, doc_id: u32) -> Option<u32> {
        self.index.get(term)?.get(&doc_id).copied()
    }

    /// Postings of a term, ordered by document ID
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<u32, u32>> {
        self.index.get(term)
    }

    /// Number of distinct document IDs a term appears under
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.index.get(term).map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        let total_postings = self.index.values().map(|v| v.len()).sum::<usize>();
        IndexStats {
            total_terms: self.index.len(),
            total_postings,
            avg_docs_per_term: if self.index.is_empty() {
                0.0
            } else {
                total_postings as f64 / self.index.len() as f64
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_terms: usize,
    pub total_postings: usize,
    pub avg_docs_per_term: f64,
}
