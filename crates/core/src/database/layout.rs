//! Storage layout
//!
//! The medium is a flat byte array: a validity marker at a reserved offset,
//! followed by fixed-size records at build-time-assigned addresses.
//!
//! ```text
//! [Marker]        0x0000 - 0x0004  "1.0\0"
//! [Reserved]      0x0004 - 0x0005
//! [Tables]        0x0005 - capacity (see `tables::TableKind::address`)
//! ```

/// Offset of the validity marker
pub const MARKER_ADDRESS: u16 = 0;

/// Format/version stamp written by `StorageDriver::format`
pub const CONFIG_VERSION: [u8; 4] = *b"1.0\0";

/// Bytes reserved for the marker
pub const MARKER_LEN: usize = CONFIG_VERSION.len();

/// Bytes compared by the validity check (the version text, not its NUL)
pub const MARKER_MATCH_LEN: usize = 3;

/// First address available to tables
pub const CONFIG_START: u16 = 5;

/// Default working size of the medium (one 4 KB flash sector)
pub const DATABASE_MAX_SIZE: u32 = 4096;

/// Maximum number of registered tables
pub const MAX_TABLES: usize = 20;

/// Largest record a single table may hold
pub const MAX_RECORD_SIZE: usize = 1024;

/// Whether `bytes` (read from `MARKER_ADDRESS`) carry the expected stamp
pub fn marker_matches(bytes: &[u8]) -> bool {
    bytes.len() >= MARKER_MATCH_LEN
        && bytes[..MARKER_MATCH_LEN] == CONFIG_VERSION[..MARKER_MATCH_LEN]
}
