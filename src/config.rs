//! Runtime configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::{FIRST_MEMBER_ID, ID};

/// Member file used when none is given.
pub const DEFAULT_DATA_FILE: &str = "user_info.csv";

/// Number of member slots used when none is given.
pub const DEFAULT_CAPACITY: usize = 5;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity is zero or would produce ids wider than the id column.
    #[error("capacity must be between 1 and {max}, got {capacity}")]
    InvalidCapacity {
        /// Requested capacity.
        capacity: usize,
        /// Largest accepted capacity.
        max: usize,
    },
}

/// Resolved settings for one registry session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Member file path.
    pub data_file: PathBuf,
    /// Number of member slots.
    pub capacity: usize,
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCapacity` if `capacity` is zero or so large
    /// that the last slot's id would not fit the id column.
    pub fn new(data_file: impl Into<PathBuf>, capacity: usize) -> Result<Self, ConfigError> {
        let max = max_capacity();
        if capacity == 0 || capacity > max {
            return Err(ConfigError::InvalidCapacity { capacity, max });
        }
        Ok(Self {
            data_file: data_file.into(),
            capacity,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Largest capacity whose ids still fit in the id column.
fn max_capacity() -> usize {
    let largest_id = 10usize.pow(ID.max_len as u32) - 1;
    largest_id - FIRST_MEMBER_ID + 1
}
