use crate::document::FrequencyRecord;
use crate::error::Result;
use crate::tokenizer::split_terms;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name used when no table path is configured
pub const DEFAULT_TABLE_FILE: &str = "term_and_frequency.txt";

enum Backend {
    File(PathBuf),
    Memory(Vec<String>),
}

/// Append-only frequency table, one `<term> <doc_id> <frequency>` record per line.
///
/// The table is the only persisted artifact. Index building and scoring both
/// read it through [`FrequencyTable::records`], so a malformed line fails
/// both the same way.
pub struct FrequencyTable {
    backend: Backend,
}

impl FrequencyTable {
    /// Open a file-backed table. The file is created on first append;
    /// a missing file reads as an empty table.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            backend: Backend::File(path.as_ref().to_path_buf()),
        }
    }

    /// Create an empty table kept in memory (for testing)
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Vec::new()),
        }
    }

    /// In-memory table seeded with raw lines, which are not validated
    /// until read
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            backend: Backend::Memory(lines.into_iter().map(Into::into).collect()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::File(path) => Some(path),
            Backend::Memory(_) => None,
        }
    }

    /// Append one document's records and flush them
    pub fn append(&mut self, records: &[FrequencyRecord]) -> Result<()> {
        match &mut self.backend {
            Backend::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(&*path)?;
                let mut writer = BufWriter::new(file);
                for record in records {
                    writeln!(writer, "{record}")?;
                }
                writer.flush()?;
            }
            Backend::Memory(lines) => {
                lines.extend(records.iter().map(ToString::to_string));
            }
        }
        Ok(())
    }

    /// Raw lines in table order
    pub fn lines(&self) -> Result<Vec<String>> {
        match &self.backend {
            Backend::File(path) => match File::open(path) {
                Ok(file) => Ok(BufReader::new(file).lines().collect::<io::Result<Vec<String>>>()?),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(lines) => Ok(lines.clone()),
        }
    }

    /// Parse every record in table order. Blank lines are skipped; any other
    /// line that does not parse fails the whole read.
    pub fn records(&self) -> Result<Vec<FrequencyRecord>> {
        let lines = self.lines()?;
        let mut records = Vec::with_capacity(lines.len());

        for (i, line) in lines.iter().enumerate() {
            if split_terms(line).next().is_none() {
                continue;
            }
            records.push(FrequencyRecord::parse_line(line, i + 1)?);
        }

        tracing::debug!("read {} records from frequency table", records.len());
        Ok(records)
    }

    /// Number of stored lines
    pub fn len(&self) -> Result<usize> {
        Ok(self.lines()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Truncate to an empty table. A file-backed table keeps its file.
    pub fn clear(&mut self) -> Result<()> {
        match &mut self.backend {
            Backend::File(path) => {
                File::create(&*path)?;
            }
            Backend::Memory(lines) => lines.clear(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_memory_append_and_read() -> Result<()> {
        let mut table = FrequencyTable::in_memory();
        assert!(table.is_empty()?);

        table.append(&[FrequencyRecord::new("cat", 0, 2)])?;
        table.append(&[FrequencyRecord::new("dog", 1, 1)])?;

        assert_eq!(table.lines()?, vec!["cat 0 2", "dog 1 1"]);
        assert_eq!(table.records()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_blank_lines_skipped() -> Result<()> {
        let table = FrequencyTable::from_lines(["cat 0 2", "", "   ", "dog 0 1"]);
        assert_eq!(table.records()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let table = FrequencyTable::from_lines(["cat 0 2", "dog 0"]);
        match table.records() {
            Err(Error::Format { line, content, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "dog 0");
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_clear() -> Result<()> {
        let mut table = FrequencyTable::from_lines(["cat 0 2"]);
        table.clear()?;
        assert!(table.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_clear_truncates_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("table.txt");
        let mut table = FrequencyTable::open(&path);
        table.append(&[FrequencyRecord::new("cat", 0, 2)])?;

        table.clear()?;
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path)?.len(), 0);
        assert!(table.is_empty()?);
        Ok(())
    }
}
