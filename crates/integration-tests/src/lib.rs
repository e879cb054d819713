//! Acceptance tests for the Campus Coffee POS service.
//!
//! # Running Tests
//!
//! ```bash
//! # Cucumber scenarios (requires Docker)
//! cargo test -p campus-coffee-acceptance --test pos_acceptance
//!
//! # HTTP smoke tests (requires Docker)
//! cargo test -p campus-coffee-acceptance --test pos_smoke -- --ignored
//! ```
//!
//! The harness starts a `PostgreSQL` container once per test process, serves
//! the POS API in-process on a random port and drives it over HTTP. State is
//! reset between scenarios through `PosService::clear`.
//!
//! # Modules
//!
//! - `environment` - container and service lifecycle
//! - `client` - HTTP helpers for `/api/pos`
//! - `table` - Gherkin data table to POS records
//! - `compare` - unordered, field-by-field collection comparison

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod compare;
pub mod environment;
pub mod error;
pub mod table;

pub use client::PosClient;
pub use environment::TestEnvironment;
pub use error::{HarnessError, Result};
