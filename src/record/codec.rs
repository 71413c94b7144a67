//! Record codec
//!
//! Encoding and decoding of single record frames.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ CRC (4)  │   bincode(Record) payload   │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//! Both header fields are little-endian u32. CRC covers the payload only.

use std::io::{ErrorKind, Read};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, RosterError};
use super::Record;

/// Header size: 4 bytes length + 4 bytes CRC32
pub const HEADER_SIZE: usize = 8;

/// Maximum payload size (1 MB)
pub const MAX_RECORD_SIZE: u32 = 1024 * 1024;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record as one frame
///
/// Format: payload_len (4) + crc32 (4) + payload
pub fn encode_record(record: &Record) -> Result<Bytes> {
    check_record_size(record)?;
    let payload = bincode::serialize(record)?;

    let crc = crc32fast::hash(&payload);

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u32_le(payload.len() as u32);
    frame.put_u32_le(crc);
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

/// Size of a record's frame, without encoding it
///
/// Fails if the payload would exceed `MAX_RECORD_SIZE`.
pub fn check_record_size(record: &Record) -> Result<usize> {
    let payload_len = bincode::serialized_size(record)?;

    if payload_len > MAX_RECORD_SIZE as u64 {
        return Err(RosterError::Serialization(format!(
            "Record {} too large: {} bytes (max {})",
            record.id, payload_len, MAX_RECORD_SIZE
        )));
    }

    Ok(HEADER_SIZE + payload_len as usize)
}

// =============================================================================
// Decoding
// =============================================================================

/// Read the next frame from a stream
///
/// Returns:
/// - `Ok(Some(record))` — a complete, checksummed frame
/// - `Ok(None)` — clean end-of-stream at a frame boundary
/// - `Err(Corruption)` — partial header, short payload, bad length or CRC
/// - `Err(Serialization)` — payload passed the CRC but is not a Record
pub fn read_record<R: Read>(reader: &mut R) -> Result<Option<Record>> {
    let mut header = [0u8; HEADER_SIZE];
    let got = read_up_to(reader, &mut header)?;

    if got == 0 {
        return Ok(None);
    }
    if got < HEADER_SIZE {
        return Err(RosterError::Corruption(format!(
            "Truncated frame header: got {} of {} bytes",
            got, HEADER_SIZE
        )));
    }

    let mut cursor = &header[..];
    let payload_len = cursor.get_u32_le();
    let expected_crc = cursor.get_u32_le();

    if payload_len > MAX_RECORD_SIZE {
        return Err(RosterError::Corruption(format!(
            "Frame length {} exceeds maximum {}",
            payload_len, MAX_RECORD_SIZE
        )));
    }

    let mut payload = vec![0u8; payload_len as usize];
    let got = read_up_to(reader, &mut payload)?;
    if got < payload.len() {
        return Err(RosterError::Corruption(format!(
            "Truncated frame payload: got {} of {} bytes",
            got, payload_len
        )));
    }

    let actual_crc = crc32fast::hash(&payload);
    if actual_crc != expected_crc {
        return Err(RosterError::Corruption(format!(
            "CRC mismatch: expected {:#010x}, got {:#010x}",
            expected_crc, actual_crc
        )));
    }

    let record = bincode::deserialize(&payload)?;
    Ok(Some(record))
}

/// Fill `buf` from the reader, stopping early only at EOF
///
/// Returns the number of bytes read. Unlike `read_exact`, a short count is
/// reported rather than turned into an error so callers can tell "nothing
/// left" from "cut off mid-frame".
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
