//! Record store errors.

use thiserror::Error;

use crate::record::SlotId;

/// Errors from record store operations.
///
/// All of these are recoverable: the store is left unchanged and the caller
/// can report the problem and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Every slot is occupied.
    #[error("store is full ({capacity} members)")]
    Full {
        /// Store capacity.
        capacity: usize,
    },

    /// Slot index past the end of the store.
    #[error("{slot} is out of range (capacity {capacity})")]
    SlotOutOfRange {
        /// Requested slot.
        slot: SlotId,
        /// Store capacity.
        capacity: usize,
    },

    /// Commit target is already taken.
    #[error("{0} is already occupied")]
    SlotOccupied(SlotId),

    /// Value longer than the column allows.
    #[error("{field} is longer than {max_len} bytes")]
    FieldTooLong {
        /// Column name.
        field: &'static str,
        /// Column maximum in bytes.
        max_len: usize,
    },

    /// Blank value for a required column.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Column name.
        field: &'static str,
    },

    /// Value holds a separator or line break and could not be saved.
    #[error("{field} must not contain commas or line breaks")]
    InvalidCharacter {
        /// Column name.
        field: &'static str,
    },

    /// Another occupied slot already has this name.
    #[error("name {0:?} is already registered")]
    DuplicateName(String),

    /// Another occupied slot already has this id.
    #[error("id {0:?} is already in use")]
    DuplicateId(String),
}
