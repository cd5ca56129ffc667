use crate::error::{Error, Result};
use crate::tokenizer::split_terms;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use walkdir::WalkDir;

/// File name suffix of the files picked up by [`load_folder`]
pub const DOCUMENT_SUFFIX: &str = ".txt";

/// One line of the frequency table: `<term> <doc_id> <frequency>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub term: String,
    pub doc_id: u32,
    pub frequency: u32,
}

impl FrequencyRecord {
    pub fn new(term: impl Into<String>, doc_id: u32, frequency: u32) -> Self {
        Self {
            term: term.into(),
            doc_id,
            frequency,
        }
    }

    /// Parse a table line. `line_no` is 1-based and only used for error reporting.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = split_terms(line).collect();
        let [term, doc_id, frequency] = fields.as_slice() else {
            return Err(Error::format(
                line_no,
                line,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let doc_id = doc_id
            .parse::<u32>()
            .map_err(|e| Error::format(line_no, line, format!("bad document id: {e}")))?;
        let frequency = frequency
            .parse::<u32>()
            .map_err(|e| Error::format(line_no, line, format!("bad frequency: {e}")))?;

        Ok(Self::new(*term, doc_id, frequency))
    }
}

impl FromStr for FrequencyRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_line(s, 1)
    }
}

impl fmt::Display for FrequencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.term, self.doc_id, self.frequency)
    }
}

/// Read the raw text of every `.txt` file directly inside `folder`,
/// ordered by file name.
pub fn load_folder<P: AsRef<Path>>(folder: P) -> Result<Vec<String>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(Error::FolderNotFound(folder.to_path_buf()));
    }

    let mut contents = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .map(Error::Io)
                .unwrap_or_else(|| Error::FolderNotFound(folder.to_path_buf()))
        })?;
        let path = entry.path();
        let is_document = entry
            .file_name()
            .to_string_lossy()
            .ends_with(DOCUMENT_SUFFIX);
        if !entry.file_type().is_file() || !is_document {
            tracing::debug!("skipping {}", path.display());
            continue;
        }

        contents.push(fs::read_to_string(path)?);
    }

    tracing::info!("loaded {} documents from {}", contents.len(), folder.display());
    Ok(contents)
}
