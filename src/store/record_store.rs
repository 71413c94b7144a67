//! Record Store
//!
//! Load / append / delete over a single backing file.
//!
//! Every operation is a full cycle: open, read to completion, apply, and
//! for mutations truncate and rewrite. Nothing is cached between calls.

use std::path::Path;

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::record::{check_record_size, Record};

use super::{RecordReader, RecordWriter};

/// How a load ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No backing file yet; the store is empty
    Absent,

    /// Every frame decoded and the file ended on a frame boundary
    Complete,

    /// Reading stopped at a truncated or corrupt frame
    Partial { reason: String },
}

/// Records produced by a load, plus how the load ended
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub records: Vec<Record>,
    pub status: LoadStatus,
}

impl LoadOutcome {
    /// Whether the load stopped early
    pub fn is_partial(&self) -> bool {
        matches!(self.status, LoadStatus::Partial { .. })
    }
}

/// Flat-file store of student records
///
/// ## Concurrency:
/// None. Calls are expected to arrive one at a time from a single caller;
/// two processes mutating the same file will lose writes.
pub struct RecordStore {
    config: Config,
}

impl RecordStore {
    /// Create a store over the configured backing file
    ///
    /// The file itself is not touched until the first operation.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        debug!(path = %config.data_file.display(), "record store opened");
        Ok(Self { config })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    // =========================================================================
    // Caller-facing operations (never fail)
    // =========================================================================

    /// Load every record in stored order
    ///
    /// A missing file is an empty store. A read or decode failure part way
    /// through is logged and the records read before it are returned.
    pub fn load_all(&self) -> Vec<Record> {
        match self.try_load_all() {
            Ok(outcome) => {
                if let LoadStatus::Partial { reason } = &outcome.status {
                    warn!(
                        path = %self.path().display(),
                        recovered = outcome.records.len(),
                        %reason,
                        "store file unreadable past last good record"
                    );
                }
                outcome.records
            }
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "failed to open store file");
                Vec::new()
            }
        }
    }

    /// Append a record and rewrite the file
    ///
    /// Returns `false` if the rewrite failed; the failure is logged.
    pub fn append(&self, record: Record) -> bool {
        let id = record.id;
        match self.append_to(self.load_all(), record) {
            Ok(_) => true,
            Err(e) => {
                error!(path = %self.path().display(), id, error = %e, "failed to save record");
                false
            }
        }
    }

    /// Remove every record with `id` and rewrite the file
    ///
    /// Returns `false` if the rewrite failed. A missing id is not a failure.
    pub fn delete_by_id(&self, id: i32) -> bool {
        match self.delete_from(self.load_all(), id) {
            Ok(_) => true,
            Err(e) => {
                error!(path = %self.path().display(), id, error = %e, "failed to delete record");
                false
            }
        }
    }

    /// All records with `id`, in stored order
    pub fn find_by_id(&self, id: i32) -> Vec<Record> {
        self.load_all()
            .into_iter()
            .filter(|record| record.id == id)
            .collect()
    }

    // =========================================================================
    // Structured variants
    // =========================================================================

    /// Load every record, reporting how the load ended
    ///
    /// Only a failure to open an existing file is an `Err`; problems inside
    /// the file come back as `LoadStatus::Partial`.
    pub fn try_load_all(&self) -> Result<LoadOutcome> {
        let mut reader = match RecordReader::open(self.path())? {
            Some(reader) => reader,
            None => {
                debug!(path = %self.path().display(), "store file absent, treating as empty");
                return Ok(LoadOutcome {
                    records: Vec::new(),
                    status: LoadStatus::Absent,
                });
            }
        };

        let mut records = Vec::new();
        let mut status = LoadStatus::Complete;

        for item in reader.by_ref() {
            match item {
                Ok(record) => records.push(record),
                Err(e) => {
                    status = LoadStatus::Partial {
                        reason: e.to_string(),
                    };
                    break;
                }
            }
        }

        debug!(
            path = %self.path().display(),
            records_read = reader.records_read(),
            "loaded records"
        );
        Ok(LoadOutcome { records, status })
    }

    /// Append a record and rewrite the file
    ///
    /// No duplicate check. Returns the number of records now stored.
    /// Unlike `append`, a damaged file is an error and is left as it is.
    pub fn try_append(&self, record: Record) -> Result<usize> {
        let records = self.load_intact()?;
        self.append_to(records, record)
    }

    /// Remove every record with `id` and rewrite the file
    ///
    /// The rewrite happens even when nothing matched. Returns the number
    /// of records removed. A damaged file is an error and is left as it is.
    pub fn try_delete_by_id(&self, id: i32) -> Result<usize> {
        let records = self.load_intact()?;
        self.delete_from(records, id)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Load every record, refusing a file that did not read to the end
    fn load_intact(&self) -> Result<Vec<Record>> {
        let outcome = self.try_load_all()?;
        match outcome.status {
            LoadStatus::Partial { reason } => Err(RosterError::Corruption(format!(
                "{} unreadable after {} record(s), not rewriting: {}",
                self.path().display(),
                outcome.records.len(),
                reason
            ))),
            LoadStatus::Absent | LoadStatus::Complete => Ok(outcome.records),
        }
    }

    /// Push `record` onto a loaded set and rewrite
    fn append_to(&self, mut records: Vec<Record>, record: Record) -> Result<usize> {
        // Fail before truncating if the new record cannot be framed
        check_record_size(&record)?;

        debug!(id = record.id, existing = records.len(), "appending record");
        records.push(record);

        self.rewrite(&records)?;
        Ok(records.len())
    }

    /// Drop every record with `id` from a loaded set and rewrite
    fn delete_from(&self, mut records: Vec<Record>, id: i32) -> Result<usize> {
        let before = records.len();
        records.retain(|record| record.id != id);
        let removed = before - records.len();

        debug!(id, removed, remaining = records.len(), "deleting records");
        self.rewrite(&records)?;
        Ok(removed)
    }

    /// Truncate the backing file and write `records` in order
    fn rewrite(&self, records: &[Record]) -> Result<()> {
        let mut writer = RecordWriter::create(self.path(), self.config.sync_strategy)?;
        for record in records {
            writer.write(record)?;
        }
        let written = writer.finish()?;

        debug!(path = %self.path().display(), written, "store file rewritten");
        Ok(())
    }
}
