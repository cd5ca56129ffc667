use crate::document::load_folder;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::ranking::{score_query, Scores, TermStatistics};
use crate::recorder::{FrequencyRecorder, IdAssignment};
use crate::storage::FrequencyTable;
use crate::tokenizer::Normalizer;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the frequency table
    pub table_path: PathBuf,
    pub id_assignment: IdAssignment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(crate::storage::DEFAULT_TABLE_FILE),
            id_assignment: IdAssignment::default(),
        }
    }
}

impl Config {
    /// Load a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&raw).context("Failed to parse config")?;
        Ok(config)
    }
}

/// Indexing and search over one frequency table
pub struct SearchEngine {
    table: FrequencyTable,
    normalizer: Normalizer,
    recorder: FrequencyRecorder,
}

impl SearchEngine {
    pub fn new(table: FrequencyTable, id_assignment: IdAssignment) -> Self {
        Self {
            table,
            normalizer: Normalizer::new(),
            recorder: FrequencyRecorder::new(id_assignment),
        }
    }

    /// Create an engine over the configured on-disk table
    pub fn open(config: &Config) -> Self {
        Self::new(FrequencyTable::open(&config.table_path), config.id_assignment)
    }

    /// Create an in-memory engine (for testing)
    pub fn in_memory() -> Self {
        Self::new(FrequencyTable::in_memory(), IdAssignment::default())
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut FrequencyTable {
        &mut self.table
    }

    /// Normalize and record one raw document
    pub fn add_document(&mut self, raw: &str) -> Result<usize> {
        let cleaned = self.normalizer.normalize(raw);
        let records = self.recorder.record_document(&cleaned, &mut self.table)?;
        Ok(records.len())
    }

    /// Record every document, then build the index from the whole table
    pub fn index_documents<I, S>(&mut self, documents: I) -> Result<InvertedIndex>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0;
        for doc in documents {
            let recorded = self.add_document(doc.as_ref())?;
            count += 1;
            tracing::debug!("document {} produced {} records", count, recorded);
        }
        tracing::info!("indexed {} documents", count);

        self.build_index()
    }

    /// Index every `.txt` document in a folder
    pub fn index_folder<P: AsRef<Path>>(&mut self, folder: P) -> Result<InvertedIndex> {
        let documents = load_folder(folder)?;
        if documents.is_empty() {
            tracing::warn!("no documents found, index will only reflect existing records");
        }
        self.index_documents(documents)
    }

    /// Rebuild the index from the table as it stands
    pub fn build_index(&self) -> Result<InvertedIndex> {
        InvertedIndex::build(&self.table)
    }

    /// Score documents 1..=300 against the query
    pub fn search(&self, query: &str) -> Result<Scores> {
        let stats = TermStatistics::load(&self.table)?;
        let scores = score_query(query, &stats);
        tracing::info!(
            "query {:?} matched {} documents",
            query,
            scores.matched()
        );
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_index_and_search() -> Result<()> {
        let mut engine = SearchEngine::in_memory();

        let index = engine.index_documents([
            "The monkeys jump on the bed.",
            "Sugar, sugar and more sugar!",
        ])?;

        assert_eq!(index.get("monkeys", 0), Some(1));
        assert_eq!(index.get("Sugar", 0), Some(1));
        assert_eq!(index.get("sugar", 1), Some(2));
        assert_eq!(index.get("the", 0), None);

        let scores = engine.search("sugar")?;
        assert_eq!(scores.len(), 300);
        // "sugar" landed in buckets 1 and 2, "Sugar" is a different term
        assert_eq!(scores.matched(), 2);
        assert_eq!(scores.get(1), scores.get(2));
        assert!(scores.get(1).unwrap() > 0.0);
        Ok(())
    }

    #[test]
    fn test_reindexing_appends() -> Result<()> {
        let mut engine = SearchEngine::in_memory();
        engine.index_documents(["alpha beta"])?;
        engine.index_documents(["alpha beta"])?;

        assert_eq!(engine.table().len()?, 4);
        assert_eq!(engine.build_index()?.stats().total_postings, 2);
        Ok(())
    }

    #[test]
    fn test_empty_collection() -> Result<()> {
        let mut engine = SearchEngine::in_memory();
        let docs: Vec<String> = Vec::new();
        let index = engine.index_documents(docs)?;
        assert!(index.is_empty());
        assert!(engine.table().is_empty()?);
        Ok(())
    }

    #[test]
    fn test_config_defaults() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str(r#"{"id_assignment": "per-document"}"#)?;
        assert_eq!(config.id_assignment, IdAssignment::PerDocument);
        assert_eq!(config.table_path, PathBuf::from("term_and_frequency.txt"));
        Ok(())
    }
}
