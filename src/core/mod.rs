//! Crate-wide infrastructure
//!
//! Currently the logging macros shared by the platform and database layers.

pub mod logging;
