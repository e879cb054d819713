//! Campus Coffee POS service library.
//!
//! The service exposes CRUD operations on points of sale over a JSON REST
//! API backed by `PostgreSQL`. It is split into a library so the router can
//! be embedded in-process by the CLI and the acceptance harness.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::router;
pub use state::AppState;
