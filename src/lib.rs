//! # RosterKV
//!
//! A flat-file store for student records with:
//! - Length-prefixed, CRC32-checked record frames
//! - Whole-file read-modify-write on every mutation
//! - Partial recovery when the file is truncated or damaged
//! - A small CLI front end
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        roster-cli                            │
//! │            (list / add / search / delete / verify)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      RecordStore                             │
//! │          (stateless load → modify → full rewrite)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │RecordReader │          │RecordWriter │
//!   │  (stream)   │          │ (truncate)  │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!                ┌─────────────┐
//!                │ Record codec│
//!                │ (len + crc) │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RosterError, Result};
pub use config::Config;
pub use record::Record;
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of RosterKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
