//! Business logic services.
//!
//! Services sit between the HTTP routes and the repositories. They own the
//! connection pool, translate repository failures into domain errors and
//! are also driven in-process by the CLI and the acceptance harness.

pub mod pos;

pub use pos::{PosError, PosService};
