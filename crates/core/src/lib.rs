//! Campus Coffee Core - Shared types library.
//!
//! This crate provides the types shared by all Campus Coffee components:
//! - `api` - The POS REST service
//! - `cli` - Command-line tools for migrations and data management
//! - `integration-tests` - The acceptance test harness
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. The optional `postgres` feature adds `sqlx` encoding
//! for the types that are persisted.
//!
//! # Modules
//!
//! - [`types`] - POS identifiers, kinds, campuses, names and the wire DTO

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
