//! Subject list loading from a CSV file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use synoptic_core::{defaults, Error, Result, Subject};

/// Reads the bounded, ordered subject list from a delimited file.
///
/// One designated column holds the subject titles; everything else in
/// the file is ignored. Both failure modes (missing file, missing
/// column) are terminal for the run.
pub struct SubjectReader {
    path: PathBuf,
    column: String,
    limit: usize,
}

impl SubjectReader {
    /// Create a reader with the default column and row limit.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            column: defaults::SUBJECT_COLUMN.to_string(),
            limit: defaults::ROW_LIMIT,
        }
    }

    /// Override the designated subject column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Override the row limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Load the first `limit` subjects, preserving file order.
    pub fn load(&self) -> Result<Vec<Subject>> {
        if !self.path.exists() {
            return Err(Error::SourceNotFound(self.path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let column_index = headers
            .iter()
            .position(|h| h == self.column)
            .ok_or_else(|| {
                Error::SourceSchema(format!(
                    "column '{}' not found in {}",
                    self.column,
                    self.path.display()
                ))
            })?;
        debug!(column = %self.column, column_index, "Resolved subject column");

        let mut subjects = Vec::new();
        for record in reader.records().take(self.limit) {
            let record = record?;
            subjects.push(Subject::new(record.get(column_index).unwrap_or("")));
        }

        info!(
            result_count = subjects.len(),
            path = %self.path.display(),
            "Subjects loaded"
        );
        Ok(subjects)
    }
}
