// Re-export main components
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod ranking;
pub mod recorder;
pub mod storage;
pub mod tokenizer;

// Re-export commonly used types
pub use document::{load_folder, FrequencyRecord};
pub use engine::{Config, SearchEngine};
pub use error::{Error, Result};
pub use index::{IndexStats, InvertedIndex};
pub use ranking::{search, ScoredDocument, Scores, TermStatistics, TOTAL_DOCS};
pub use recorder::{FrequencyRecorder, IdAssignment, MAX_BUCKET_ID};
pub use storage::FrequencyTable;
pub use tokenizer::Normalizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() -> Result<()> {
        let mut engine = SearchEngine::in_memory();

        let index = engine.index_documents(["Rust is a blazingly fast and memory-efficient language"])?;
        assert_eq!(index.get("Rust", 0), Some(1));
        assert_eq!(index.get("memoryefficient", 3), Some(1));

        let scores = engine.search("fast")?;
        assert_eq!(scores.len(), TOTAL_DOCS as usize);
        assert_eq!(scores.matched(), 1);

        Ok(())
    }
}
