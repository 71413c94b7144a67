//! Store Module
//!
//! Whole-file persistence for the student collection.
//!
//! ## Responsibilities
//! - Stream record frames out of the backing file
//! - Truncate and rewrite the backing file with a full record set
//! - Load / append / delete-by-id, each a complete read-modify-write cycle
//!
//! ## Rewrite Model
//! ```text
//!   load_all()  ──►  Vec<Record>  ──►  push / retain  ──►  truncate + write all
//! ```
//! There is no log and no atomic rename: a crash between truncation and the
//! end of a rewrite loses the file's contents.

mod reader;
mod writer;
mod record_store;

pub use reader::RecordReader;
pub use writer::RecordWriter;
pub use record_store::{LoadOutcome, LoadStatus, RecordStore};
