//! POS maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! # Delete every POS
//! cc-cli pos clear
//!
//! # Show all stored POS entries
//! cc-cli pos list
//! ```

use campus_coffee_api::services::PosService;

use super::{CommandError, connect};

/// Delete every POS entry.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or the delete fails.
pub async fn clear() -> Result<u64, CommandError> {
    let pool = connect().await?;
    let deleted = PosService::new(pool.clone()).clear().await?;
    pool.close().await;

    tracing::info!("Deleted {deleted} POS entries");
    Ok(deleted)
}

/// Log every stored POS entry, oldest first.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or the query fails.
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;
    let entries = PosService::new(pool.clone()).get_all().await?;
    pool.close().await;

    tracing::info!("{} POS entries", entries.len());
    for pos in &entries {
        tracing::info!(
            "  [{}] {} ({}, {}) {} {}, {} {}",
            pos.id,
            pos.name,
            pos.pos_type,
            pos.campus,
            pos.street,
            pos.house_number,
            pos.postal_code,
            pos.city
        );
    }

    Ok(())
}
