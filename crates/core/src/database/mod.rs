//! Configuration database core
//!
//! - [`registry`]: address → {size, owner} catalog
//! - [`table`]: typed accessor bound to one registry entry
//! - [`record`]: fixed-layout record encoding
//! - [`layout`]: marker position, first table address, limits

pub mod error;
pub mod layout;
pub mod record;
pub mod registry;
pub mod table;

pub use error::DatabaseError;
pub use layout::{
    marker_matches, CONFIG_START, CONFIG_VERSION, DATABASE_MAX_SIZE, MARKER_ADDRESS, MARKER_LEN,
    MARKER_MATCH_LEN, MAX_RECORD_SIZE, MAX_TABLES,
};
pub use record::{set_text, text, text_field, Record, RecordReader, RecordWriter, TextTooLong};
pub use registry::{Registration, TableDescriptor, TableOwner, TableRegistry};
pub use table::DatabaseTable;
