use crate::document::FrequencyRecord;
use crate::error::Result;
use crate::storage::FrequencyTable;
use crate::tokenizer::split_terms;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Size of the candidate document space and the N in `ln(N / df)`
pub const TOTAL_DOCS: u32 = 300;

/// Per-term lookups needed for scoring, loaded once from the table.
///
/// The term frequency for a (term, doc_id) pair is the first matching
/// record in table order, which is what a front-to-back scan finds.
/// Document frequency counts distinct doc IDs over all records.
#[derive(Debug, Default)]
pub struct TermStatistics {
    frequencies: HashMap<String, HashMap<u32, u32>>,
    documents: HashMap<String, HashSet<u32>>,
}

impl TermStatistics {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FrequencyRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            stats
                .frequencies
                .entry(record.term.clone())
                .or_default()
                .entry(record.doc_id)
                .or_insert(record.frequency);
            stats
                .documents
                .entry(record.term.clone())
                .or_default()
                .insert(record.doc_id);
        }
        stats
    }

    pub fn load(table: &FrequencyTable) -> Result<Self> {
        Ok(Self::from_records(&table.records()?))
    }

    /// Term frequency, 0 when the pair was never recorded
    pub fn term_frequency(&self, term: &str, doc_id: u32) -> u32 {
        self.frequencies
            .get(term)
            .and_then(|docs| docs.get(&doc_id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct document IDs the term was recorded under
    pub fn document_frequency(&self, term: &str) -> usize {
        self.documents.get(term).map(HashSet::len).unwrap_or(0)
    }

    /// Summed `tf * ln(TOTAL_DOCS / df)` over the query terms
    pub fn score(&self, query_terms: &[&str], doc_id: u32) -> f64 {
        let mut score = 0.0;
        for term in query_terms {
            let tf = self.term_frequency(term, doc_id);
            let df = self.document_frequency(term);
            if tf > 0 && df > 0 {
                score += tf as f64 * (TOTAL_DOCS as f64 / df as f64).ln();
            }
        }
        score
    }
}

/// Scored search result for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub doc_id: u32,
    pub score: f64,
}

impl ScoredDocument {
    pub fn new(doc_id: u32, score: f64) -> Self {
        Self { doc_id, score }
    }
}

/// Score of every candidate document, IDs 1 through [`TOTAL_DOCS`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores(BTreeMap<u32, f64>);

impl Scores {
    pub fn get(&self, doc_id: u32) -> Option<f64> {
        self.0.get(&doc_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0.iter().map(|(id, score)| (*id, *score))
    }

    /// Documents with a non-zero score
    pub fn matched(&self) -> usize {
        self.0.values().filter(|s| **s > 0.0).count()
    }

    /// All documents sorted by score descending, ties by ID
    pub fn ranked(&self) -> Vec<ScoredDocument> {
        let mut ranked: Vec<ScoredDocument> = self
            .iter()
            .map(|(id, score)| ScoredDocument::new(id, score))
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.doc_id.cmp(&b.doc_id))
        });
        ranked
    }
}

/// Score every candidate document against a whitespace-split query.
/// The query is not normalized.
pub fn score_query(query: &str, stats: &TermStatistics) -> Scores {
    let query_terms: Vec<&str> = split_terms(query).collect();
    Scores(
        (1..=TOTAL_DOCS)
            .map(|doc_id| (doc_id, stats.score(&query_terms, doc_id)))
            .collect(),
    )
}

/// Load the table and score `query` against it
pub fn search(query: &str, table: &FrequencyTable) -> Result<Scores> {
    let stats = TermStatistics::load(table)?;
    Ok(score_query(query, &stats))
}
