//! Record Module
//!
//! The student record value type and its on-disk framing.
//!
//! ## Responsibilities
//! - Define the `Record` value object (id, name, gpa)
//! - Validate caller input before it reaches the store
//! - Encode records as self-delimiting frames
//! - Tell a clean end-of-stream apart from a truncated or corrupt frame
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Frame 1                                 │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ Len (4) │ CRC (4) │ Payload (Len)   │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Frame 2                                 │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ Len (4) │ CRC (4) │ Payload (Len)   │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! No header, count or trailer: end-of-stream is the only terminator.

mod entry;
mod codec;

pub use entry::Record;
pub use codec::{check_record_size, encode_record, read_record, HEADER_SIZE, MAX_RECORD_SIZE};
