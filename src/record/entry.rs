//! Record definition
//!
//! A single student entry as stored in the backing file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// A student record
///
/// Records are plain values: the store never mutates one in place, it only
/// adds new ones or drops existing ones by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Student ID (not unique: the store accepts duplicates)
    pub id: i32,

    /// Student name, stored verbatim
    pub name: String,

    /// Grade point average
    pub gpa: f32,
}

impl Record {
    /// Create a new record
    pub fn new(id: i32, name: impl Into<String>, gpa: f32) -> Self {
        Self {
            id,
            name: name.into(),
            gpa,
        }
    }

    /// Build a record from raw text fields
    ///
    /// `id` must be an integer and `gpa` a floating-point number; both are
    /// trimmed first. The name is kept as given.
    pub fn parse(id: &str, name: &str, gpa: &str) -> Result<Self> {
        let id = Self::parse_id(id)?;
        let gpa = gpa.trim().parse::<f32>().map_err(|_| RosterError::InvalidInput {
            field: "gpa",
            value: gpa.to_string(),
        })?;

        Ok(Self::new(id, name, gpa))
    }

    /// Parse a student ID typed by a user
    pub fn parse_id(id: &str) -> Result<i32> {
        id.trim().parse::<i32>().map_err(|_| RosterError::InvalidInput {
            field: "id",
            value: id.to_string(),
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}  {:<24}  {:.2}", self.id, self.name, self.gpa)
    }
}
