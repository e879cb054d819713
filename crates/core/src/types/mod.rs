//! Core types for Campus Coffee.
//!
//! This module provides type-safe wrappers for the point-of-sale domain.

pub mod id;
pub mod name;
pub mod pos;

pub use id::*;
pub use name::{PosName, PosNameError};
pub use pos::{CampusType, ParseEnumError, PosDto, PosType};
