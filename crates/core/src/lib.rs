//! confdb_core - Pure no_std logic for the confdb configuration database
//!
//! This crate contains the platform-agnostic parts of the store: the table
//! registry, the typed table accessor, record encoding and the compiled-in
//! table layout. It can be tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: Storage and time injected via traits
//!
//! # Modules
//!
//! - [`traits`]: `StorageDriver` and `TimeSource`
//! - [`database`]: Table registry, table accessor, record encoding, layout
//! - [`tables`]: Record types and fixed addresses of the compiled-in tables

#![no_std]

pub mod database;
pub mod tables;
pub mod traits;
