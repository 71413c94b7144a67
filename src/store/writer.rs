//! Record Writer
//!
//! Truncates the backing file and writes a full record set into it.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::Result;
use crate::record::{encode_record, Record};
use crate::RosterError;

/// Writes record frames to a freshly truncated store file
pub struct RecordWriter {
    /// Output file path
    path: PathBuf,
    /// Buffered writer for performance
    writer: BufWriter<File>,
    /// Whether `finish` fsyncs
    sync_strategy: SyncStrategy,
    /// Number of records written
    records_written: u64,
}

impl RecordWriter {
    /// Create (or truncate) the store file
    ///
    /// The previous contents are gone as soon as this returns.
    pub fn create(path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            sync_strategy,
            records_written: 0,
        })
    }

    /// Append one record frame
    pub fn write(&mut self, record: &Record) -> Result<()> {
        let frame = encode_record(record)?;
        self.writer.write_all(&frame)?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush buffered frames and close the file
    ///
    /// Returns the number of records written.
    pub fn finish(self) -> Result<u64> {
        let file = self.writer.into_inner().map_err(|e| {
            RosterError::Io(std::io::Error::new(
                e.error().kind(),
                format!("Failed to flush {}: {}", self.path.display(), e.error()),
            ))
        })?;

        if self.sync_strategy == SyncStrategy::EveryRewrite {
            file.sync_all()?;
        }

        Ok(self.records_written)
    }
}
