//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! cc-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CAMPUS_COFFEE_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! Migrations live in `crates/api/migrations/` and are embedded into the
//! binary.

use campus_coffee_api::db;

use super::{CommandError, connect};

/// Apply all pending POS database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running POS migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("POS migrations complete!");
    pool.close().await;
    Ok(())
}
