//! Memoized dataset provider
//!
//! Holds the prepared table behind a single-assignment cell. The first call to
//! [`DatasetProvider::table`] reads and prepares the file; later calls return
//! the same table without touching the source again.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::error::DataLoadError;
use super::loader::load_raw_passengers;
use super::model::PassengerTable;
use super::prepare::prepare_passengers;

#[derive(Debug)]
pub struct DatasetProvider {
    source: PathBuf,
    infer_schema_length: usize,
    table: OnceLock<PassengerTable>,
}

impl DatasetProvider {
    pub fn new(source: impl Into<PathBuf>, infer_schema_length: usize) -> Self {
        Self {
            source: source.into(),
            infer_schema_length,
            table: OnceLock::new(),
        }
    }

    /// Wrap an already prepared table.
    pub fn from_table(table: PassengerTable) -> Self {
        Self {
            source: PathBuf::new(),
            infer_schema_length: 0,
            table: OnceLock::from(table),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Get the prepared table, loading it on first access.
    ///
    /// A failed load leaves the cell empty, so a later call retries the read.
    pub fn table(&self) -> Result<&PassengerTable, DataLoadError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let raw = load_raw_passengers(&self.source, self.infer_schema_length)?;
        let prepared = prepare_passengers(&raw)?;
        log::info!(
            "Prepared {} passengers from {}",
            prepared.len(),
            self.source.display()
        );
        Ok(self.table.get_or_init(|| prepared))
    }
}
