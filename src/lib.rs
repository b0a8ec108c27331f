//! Fixed-capacity membership registry persisted to a strict CSV file.
//!
//! # Modules
//!
//! - [`record`]: member record, column layout, slot ids
//! - [`store`]: fixed-capacity record store with slot reuse
//! - [`codec`]: member file parser and writer
//! - [`session`]: interactive console menus
//! - [`config`]: runtime settings

pub mod codec;
pub mod config;
pub mod record;
pub mod session;
pub mod store;

pub use codec::CsvError;
pub use config::Config;
pub use record::{Record, SlotId};
pub use session::{Console, Session, SessionError};
pub use store::{RecordStore, StoreError};
