use crate::document::FrequencyRecord;
use crate::error::Result;
use crate::storage::FrequencyTable;
use crate::tokenizer::split_terms;
use serde::{Deserialize, Serialize};

/// Highest bucket ID handed out before the per-token counter wraps to 0
pub const MAX_BUCKET_ID: u32 = 300;

/// How document IDs are assigned to recorded tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdAssignment {
    /// Every token gets its own bucket: 0, 1, .., 300, 0, .. restarting
    /// at 0 for each document. Existing tables and scores depend on this.
    #[default]
    PerToken,
    /// Every document gets a single ID, counting up from 1
    PerDocument,
}

/// Turns cleaned document text into frequency records and appends them
/// to a [`FrequencyTable`].
#[derive(Debug, Clone)]
pub struct FrequencyRecorder {
    assignment: IdAssignment,
    next_document: u32,
}

impl FrequencyRecorder {
    pub fn new(assignment: IdAssignment) -> Self {
        Self {
            assignment,
            next_document: 1,
        }
    }

    /// Compute the records for one document without touching any table.
    ///
    /// One record is produced per token, in order. The frequency is the
    /// number of non-overlapping occurrences of the token inside the whole
    /// cleaned text, so repeated tokens repeat their record with the same count.
    pub fn records_for(&mut self, cleaned: &str) -> Vec<FrequencyRecord> {
        let document_id = match self.assignment {
            IdAssignment::PerToken => None,
            IdAssignment::PerDocument => {
                let id = self.next_document;
                self.next_document += 1;
                Some(id)
            }
        };

        let mut bucket = 0;
        let mut records = Vec::new();
        for term in split_terms(cleaned) {
            let frequency = cleaned.matches(term).count() as u32;
            records.push(FrequencyRecord::new(
                term,
                document_id.unwrap_or(bucket),
                frequency,
            ));

            bucket += 1;
            if bucket > MAX_BUCKET_ID {
                bucket = 0;
            }
        }
        records
    }

    /// Record one document: compute its records, append them, return them
    pub fn record_document(
        &mut self,
        cleaned: &str,
        table: &mut FrequencyTable,
    ) -> Result<Vec<FrequencyRecord>> {
        let records = self.records_for(cleaned);
        table.append(&records)?;
        tracing::debug!("recorded {} terms", records.len());
        Ok(records)
    }
}

impl Default for FrequencyRecorder {
    fn default() -> Self {
        Self::new(IdAssignment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_token_buckets() -> Result<()> {
        let mut recorder = FrequencyRecorder::default();
        let mut table = FrequencyTable::in_memory();

        let records = recorder.record_document("recipe sweet sugar sweet", &mut table)?;

        let lines: Vec<String> = records.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec!["recipe 0 1", "sweet 1 2", "sugar 2 1", "sweet 3 2"]
        );
        assert_eq!(table.lines()?, lines);
        Ok(())
    }

    #[test]
    fn test_buckets_restart_per_document() {
        let mut recorder = FrequencyRecorder::default();
        recorder.records_for("a b c");
        let records = recorder.records_for("x y");
        assert_eq!(records[0].doc_id, 0);
        assert_eq!(records[1].doc_id, 1);
    }

    #[test]
    fn test_bucket_wraparound() {
        let mut recorder = FrequencyRecorder::default();
        let text = (0..305).map(|i| format!("w{i}x")).collect::<Vec<_>>().join(" ");
        let records = recorder.records_for(&text);

        assert_eq!(records[300].doc_id, 300);
        assert_eq!(records[301].doc_id, 0);
        assert_eq!(records[304].doc_id, 3);
        assert!(records.iter().all(|r| r.doc_id <= MAX_BUCKET_ID));
    }

    #[test]
    fn test_frequency_counts_substrings() {
        let mut recorder = FrequencyRecorder::default();
        let records = recorder.records_for("cat concat");
        assert_eq!(records[0], FrequencyRecord::new("cat", 0, 2));
        assert_eq!(records[1], FrequencyRecord::new("concat", 1, 1));
    }

    #[test]
    fn test_per_document_ids() {
        let mut recorder = FrequencyRecorder::new(IdAssignment::PerDocument);
        let first = recorder.records_for("alpha beta");
        let second = recorder.records_for("gamma");

        assert!(first.iter().all(|r| r.doc_id == 1));
        assert_eq!(second[0].doc_id, 2);
    }

    #[test]
    fn test_separator_characters_split_terms() {
        let mut recorder = FrequencyRecorder::default();
        let records = recorder.records_for("red\x1fblue");
        assert_eq!(records[0], FrequencyRecord::new("red", 0, 1));
        assert_eq!(records[1], FrequencyRecord::new("blue", 1, 1));
    }

    #[test]
    fn test_empty_text() {
        let mut recorder = FrequencyRecorder::default();
        assert!(recorder.records_for("").is_empty());
    }
}
