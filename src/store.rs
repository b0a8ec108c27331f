//! Fixed-capacity record store.
//!
//! The store is an ordered sequence of exactly `capacity` [`Record`] slots.
//! Slots never move: registering fills the lowest free slot, withdrawing
//! blanks a slot in place. The member id of a slot is derived from its
//! position (see [`SlotId::member_id`]).
//!
//! ```text
//! slot:   0          1          2     3     4
//!       +----------+----------+-----+-----+-----+
//!       | 1001,A,x | 1002,B,y | ,,  | ,,  | ,,  |
//!       +----------+----------+-----+-----+-----+
//!                               ^ next allocate()
//! ```
//!
//! Non-empty ids and names are unique across the store. Lookups only ever
//! consider occupied slots.

mod error;

pub use error::StoreError;

use std::path::Path;

use tracing::{debug, warn};

use crate::codec::{self, CsvError};
use crate::record::{self, FieldSpec, FieldViolation, Record, SlotId};

/// Fixed-capacity sequence of member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Creates a store of `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: vec![Record::empty(); capacity],
        }
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Returns all slots in storage order, including empty ones.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the record in `slot`, if in range.
    pub fn get(&self, slot: SlotId) -> Option<&Record> {
        self.records.get(slot.index())
    }

    /// Iterates over occupied slots in storage order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (SlotId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_empty())
            .map(|(index, record)| (SlotId::new(index), record))
    }

    /// Returns the number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.iter_occupied().count()
    }

    /// Finds the first occupied slot with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<SlotId> {
        self.iter_occupied()
            .find(|(_, record)| record.name == name)
            .map(|(slot, _)| slot)
    }

    /// Finds the first occupied slot with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<SlotId> {
        self.iter_occupied()
            .find(|(_, record)| record.id == id)
            .map(|(slot, _)| slot)
    }

    /// Returns the lowest free slot without modifying anything.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Full` if every slot is occupied.
    pub fn allocate(&self) -> Result<SlotId, StoreError> {
        self.records
            .iter()
            .position(Record::is_empty)
            .map(SlotId::new)
            .ok_or(StoreError::Full {
                capacity: self.capacity(),
            })
    }

    /// Returns the lowest free slot together with the occupied slot that
    /// already holds its member id.
    ///
    /// Only hand-edited files produce this. While it lasts, every commit into
    /// the lowest free slot fails with `DuplicateId`.
    pub fn id_collision(&self) -> Option<(SlotId, SlotId)> {
        let free = self.allocate().ok()?;
        let holder = self.find_by_id(&free.member_id())?;
        Some((free, holder))
    }

    /// Registers a member into a free slot.
    ///
    /// The id is derived from the slot position. On error nothing changes.
    ///
    /// # Errors
    ///
    /// - `SlotOutOfRange` / `SlotOccupied` if `slot` is not a free slot
    /// - `EmptyField` / `FieldTooLong` / `InvalidCharacter` if a value cannot
    ///   be stored
    /// - `DuplicateName` / `DuplicateId` if another member already has them
    pub fn commit(
        &mut self,
        slot: SlotId,
        name: &str,
        password: &str,
    ) -> Result<&Record, StoreError> {
        let target = self.get(slot).ok_or(StoreError::SlotOutOfRange {
            slot,
            capacity: self.capacity(),
        })?;
        if !target.is_empty() {
            return Err(StoreError::SlotOccupied(slot));
        }

        let id = slot.member_id();
        check_field(&record::ID, &id)?;
        check_field(&record::NAME, name)?;
        check_field(&record::PASSWORD, password)?;

        if self.find_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        if self.find_by_id(&id).is_some() {
            return Err(StoreError::DuplicateId(id));
        }

        let record = &mut self.records[slot.index()];
        *record = Record::new(id, name, password);
        Ok(record)
    }

    /// Blanks a slot, returning it to the free pool.
    ///
    /// Other slots never move. Deleting a free slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SlotOutOfRange` if `slot` is past the end.
    pub fn soft_delete(&mut self, slot: SlotId) -> Result<(), StoreError> {
        let capacity = self.capacity();
        let record = self
            .records
            .get_mut(slot.index())
            .ok_or(StoreError::SlotOutOfRange { slot, capacity })?;
        record.clear();
        Ok(())
    }

    /// Loads the member file into the leading slots.
    ///
    /// A missing file leaves the store as it is. Slots past the last line in
    /// the file keep their current contents. On a parse error the store is
    /// not touched.
    ///
    /// Returns the number of lines read.
    pub fn load_from(&mut self, path: &Path) -> Result<usize, CsvError> {
        let loaded = codec::load(path, self.capacity())?;
        let count = loaded.len();
        for (slot, record) in self.records.iter_mut().zip(loaded) {
            *slot = record;
        }
        debug!(
            path = %path.display(),
            lines = count,
            occupied = self.occupied_count(),
            "loaded member file"
        );
        if let Some((free, holder)) = self.id_collision() {
            warn!(
                path = %path.display(),
                id = %free.member_id(),
                %free,
                %holder,
                "next free slot's id is already taken, registration will fail"
            );
        }
        Ok(count)
    }

    /// Writes every slot to the member file, replacing its contents.
    pub fn save_to(&self, path: &Path) -> Result<(), CsvError> {
        codec::save(path, &self.records)
    }
}

fn check_field(spec: &FieldSpec, value: &str) -> Result<(), StoreError> {
    record::validate_field(spec, value).map_err(|violation| match violation {
        FieldViolation::Empty => StoreError::EmptyField { field: spec.name },
        FieldViolation::TooLong => StoreError::FieldTooLong {
            field: spec.name,
            max_len: spec.max_len,
        },
        FieldViolation::InvalidCharacter => StoreError::InvalidCharacter { field: spec.name },
    })
}
