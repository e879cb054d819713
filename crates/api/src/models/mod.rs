//! Domain models for the POS service.
//!
//! These types represent validated domain objects. The wire shape lives in
//! `campus_coffee_core::PosDto`; conversions between the two are defined
//! alongside each model.

pub mod pos;

pub use pos::{Pos, PosDraft};
