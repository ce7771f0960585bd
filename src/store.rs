use crate::{Expense, LedgerError};
use csv::{ReaderBuilder, WriterBuilder};
use log::warn;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Append-only log of expenses backed by a header-less CSV file.
///
/// The path is injected at construction; the file is re-opened per call, so
/// every load sees whatever has been appended so far.
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExpenseStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the record as one CSV row and appends it, creating the
    /// file if absent. I/O failures propagate; a single row either lands
    /// whole or not at all, so there is no cleanup path.
    pub fn append(&self, expense: &Expense) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(expense)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads the whole log back in file order. A missing file is an empty
    /// store, not an error. Rows that fail to parse (malformed date,
    /// non-numeric amount, wrong field count, unknown category) are skipped
    /// with a warning naming the row and the reason; a torn final row from
    /// an interrupted append falls out the same way.
    pub fn load_all(&self) -> Result<Vec<Expense>, LedgerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut expenses = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!("skipping unreadable row: {}", err);
                    continue;
                }
            };
            match record.deserialize::<Expense>(None) {
                Ok(expense) => expenses.push(expense),
                Err(err) => warn!("skipping invalid row {:?}: {}", record, err),
            }
        }
        Ok(expenses)
    }
}
