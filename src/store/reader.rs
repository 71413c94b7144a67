//! Record Reader
//!
//! Streams records out of the backing file in stored order.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::error::Result;
use crate::record::{read_record, Record};

/// Sequential reader over a store file
pub struct RecordReader {
    /// Buffered file handle, closed on drop
    file: BufReader<File>,
    /// Number of records decoded so far
    records_read: u64,
    /// Set once a read fails; the iterator yields nothing after that
    failed: bool,
}

impl RecordReader {
    /// Open a store file for reading
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(Self {
            file: BufReader::new(file),
            records_read: 0,
            failed: false,
        }))
    }

    /// Read the next record
    ///
    /// `Ok(None)` means the file ended cleanly on a frame boundary.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        match read_record(&mut self.file) {
            Ok(Some(record)) => {
                self.records_read += 1;
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    /// Number of records read so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }
}

impl Iterator for RecordReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.next_record().transpose()
    }
}
