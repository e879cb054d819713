//! POS service.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use campus_coffee_core::PosId;

use crate::db::{PosRepository, RepositoryError};
use crate::models::{Pos, PosDraft};

/// Errors returned by [`PosService`].
#[derive(Debug, Error)]
pub enum PosError {
    /// No POS has the given ID.
    #[error("POS with ID {0} does not exist")]
    NotFound(PosId),

    /// No POS has the given name.
    #[error("POS with name '{0}' does not exist")]
    NameNotFound(String),

    /// Another POS already uses the name.
    #[error("POS with name '{0}' already exists")]
    DuplicateName(String),

    /// Storage failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Service for managing points of sale.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PosService {
    pool: PgPool,
}

impl PosService {
    /// Create a new POS service.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn repo(&self) -> PosRepository<'_> {
        PosRepository::new(&self.pool)
    }

    /// List all POS entries.
    ///
    /// # Errors
    ///
    /// Returns `PosError::Repository` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Pos>, PosError> {
        self.repo().list().await.map_err(PosError::Repository)
    }

    /// Get a POS by ID.
    ///
    /// # Errors
    ///
    /// Returns `PosError::NotFound` if no POS has the ID.
    pub async fn get_by_id(&self, id: PosId) -> Result<Pos, PosError> {
        self.repo()
            .get_by_id(id)
            .await
            .map_err(PosError::Repository)?
            .ok_or(PosError::NotFound(id))
    }

    /// Get a POS by its exact name.
    ///
    /// The name is matched as given; no trimming or case folding happens here.
    ///
    /// # Errors
    ///
    /// Returns `PosError::NameNotFound` if no POS has the name.
    pub async fn get_by_name(&self, name: &str) -> Result<Pos, PosError> {
        self.repo()
            .get_by_name(name)
            .await
            .map_err(PosError::Repository)?
            .ok_or_else(|| PosError::NameNotFound(name.to_owned()))
    }

    /// Create a new POS.
    ///
    /// # Errors
    ///
    /// Returns `PosError::DuplicateName` if the name is taken.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: &PosDraft) -> Result<Pos, PosError> {
        let pos = self
            .repo()
            .create(draft)
            .await
            .map_err(|e| Self::map_write_error(e, draft))?;

        tracing::info!(pos_id = %pos.id, "POS created");
        Ok(pos)
    }

    /// Replace the fields of an existing POS.
    ///
    /// # Errors
    ///
    /// Returns `PosError::NotFound` if no POS has the ID.
    /// Returns `PosError::DuplicateName` if the new name belongs to another POS.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update(&self, id: PosId, draft: &PosDraft) -> Result<Pos, PosError> {
        let pos = self
            .repo()
            .update(id, draft)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => PosError::NotFound(id),
                other => Self::map_write_error(other, draft),
            })?;

        tracing::info!(pos_id = %pos.id, "POS updated");
        Ok(pos)
    }

    /// Delete a POS by ID.
    ///
    /// # Errors
    ///
    /// Returns `PosError::NotFound` if no POS has the ID.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PosId) -> Result<(), PosError> {
        if self.repo().delete(id).await.map_err(PosError::Repository)? {
            tracing::info!(pos_id = %id, "POS deleted");
            Ok(())
        } else {
            Err(PosError::NotFound(id))
        }
    }

    /// Delete every POS.
    ///
    /// Administrative operation with no HTTP route; used by the CLI and to
    /// reset state between acceptance scenarios.
    ///
    /// # Errors
    ///
    /// Returns `PosError::Repository` if the delete fails.
    pub async fn clear(&self) -> Result<u64, PosError> {
        let deleted = self
            .repo()
            .delete_all()
            .await
            .map_err(PosError::Repository)?;

        tracing::info!(deleted, "Cleared all POS entries");
        Ok(deleted)
    }

    fn map_write_error(e: RepositoryError, draft: &PosDraft) -> PosError {
        match e {
            RepositoryError::Conflict => PosError::DuplicateName(draft.name.to_string()),
            other => PosError::Repository(other),
        }
    }
}
