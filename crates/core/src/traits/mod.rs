//! Platform service traits
//!
//! Trait definitions are pure and carry no feature gates. Implementations that
//! need hardware or a runtime live in the root `confdb` crate.

pub mod storage;
pub mod time;

pub use storage::{range_fits, StorageDriver, StorageError};
pub use time::{MockTime, TimeSource};
