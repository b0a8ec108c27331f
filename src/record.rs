//! Member record and its field layout.
//!
//! A [`Record`] is one slot of the registry: an identifier, a name and a
//! password, each a bounded text field. The same shape is used on disk, one
//! line per slot:
//!
//! ```text
//! +---------+-----------+---------------+
//! | id (7)  | name (30) | password (15) |   <- max length in bytes
//! +---------+-----------+---------------+
//! 1001,Alice,secret\n
//! ,,\n                                      <- empty slot
//! ```
//!
//! A blank `name` marks the slot as unused. There is no separate flag: the
//! file format depends on empty slots serializing as `,,`.

use std::fmt;

/// First member id handed out; slot `n` gets `FIRST_MEMBER_ID + n`.
pub const FIRST_MEMBER_ID: usize = 1001;

/// Describes one column of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name used in diagnostics.
    pub name: &'static str,
    /// Maximum length in bytes.
    pub max_len: usize,
}

impl FieldSpec {
    const fn new(name: &'static str, max_len: usize) -> Self {
        Self { name, max_len }
    }

    /// Returns true if this is the last column of a line.
    pub fn is_last(&self) -> bool {
        *self == FIELDS[FIELDS.len() - 1]
    }
}

/// Member id column.
pub const ID: FieldSpec = FieldSpec::new("id", 7);
/// Member name column. Blank means the slot is free.
pub const NAME: FieldSpec = FieldSpec::new("name", 30);
/// Password column.
pub const PASSWORD: FieldSpec = FieldSpec::new("password", 15);

/// Columns in on-disk order.
pub const FIELDS: [FieldSpec; 3] = [ID, NAME, PASSWORD];

/// Position of a record within the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Creates a slot id from a zero-based index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based index.
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Returns the member id assigned to whoever registers into this slot.
    ///
    /// Ids are positional, not generational: freeing a slot and registering
    /// again hands out the same id.
    pub fn member_id(&self) -> String {
        (FIRST_MEMBER_ID + self.0).to_string()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// One registry slot.
///
/// Fields are kept exactly as read from disk so that a load/save cycle writes
/// the file back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Member id.
    pub id: String,
    /// Member name; empty for a free slot.
    pub name: String,
    /// Password, compared verbatim at login.
    pub password: String,
}

impl Record {
    /// Creates an occupied record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
        }
    }

    /// Creates an empty (free) record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the slot is free.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Clears every field, freeing the slot.
    pub fn clear(&mut self) {
        self.id.clear();
        self.name.clear();
        self.password.clear();
    }

    /// Returns the column values in on-disk order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.id, &self.name, &self.password]
    }

    /// Builds a record from column values in on-disk order.
    pub fn from_fields([id, name, password]: [String; 3]) -> Self {
        Self { id, name, password }
    }

    /// Returns the password check used by login.
    pub fn password_matches(&self, password: &str) -> bool {
        !self.is_empty() && self.password == password
    }
}

/// Reasons a value cannot be stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// Value is blank.
    Empty,
    /// Value exceeds the column's maximum length.
    TooLong,
    /// Value contains a separator or line break.
    InvalidCharacter,
}

/// Checks that `value` can be written to the `spec` column and read back.
pub fn validate_field(spec: &FieldSpec, value: &str) -> Result<(), FieldViolation> {
    if value.is_empty() {
        return Err(FieldViolation::Empty);
    }
    if value.len() > spec.max_len {
        return Err(FieldViolation::TooLong);
    }
    if value.bytes().any(|b| matches!(b, b',' | b'\n' | b'\r')) {
        return Err(FieldViolation::InvalidCharacter);
    }
    Ok(())
}
