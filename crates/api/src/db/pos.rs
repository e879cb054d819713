//! POS repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use sqlx::PgPool;

use campus_coffee_core::PosId;

use super::RepositoryError;
use crate::models::{Pos, PosDraft};

const POS_COLUMNS: &str = "id, name, description, pos_type, campus, street, house_number, \
                           postal_code, city, created_at, updated_at";

/// Repository for POS database operations.
pub struct PosRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PosRepository<'a> {
    /// Create a new POS repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all POS entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Pos>, RepositoryError> {
        let rows = sqlx::query_as::<_, Pos>(&format!(
            "SELECT {POS_COLUMNS} FROM campus_coffee.pos ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a POS by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PosId) -> Result<Option<Pos>, RepositoryError> {
        let row = sqlx::query_as::<_, Pos>(&format!(
            "SELECT {POS_COLUMNS} FROM campus_coffee.pos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Get a POS by its exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Pos>, RepositoryError> {
        let row = sqlx::query_as::<_, Pos>(&format!(
            "SELECT {POS_COLUMNS} FROM campus_coffee.pos WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a new POS.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, draft: &PosDraft) -> Result<Pos, RepositoryError> {
        sqlx::query_as::<_, Pos>(&format!(
            r"
            INSERT INTO campus_coffee.pos
                (name, description, pos_type, campus, street, house_number, postal_code, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {POS_COLUMNS}
            "
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.pos_type)
        .bind(draft.campus)
        .bind(&draft.street)
        .bind(&draft.house_number)
        .bind(draft.postal_code)
        .bind(&draft.city)
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Replace all client-supplied fields of an existing POS.
    ///
    /// `updated_at` is refreshed; `id` and `created_at` are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no POS has the given ID.
    /// Returns `RepositoryError::Conflict` if the new name belongs to another POS.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: PosId, draft: &PosDraft) -> Result<Pos, RepositoryError> {
        sqlx::query_as::<_, Pos>(&format!(
            r"
            UPDATE campus_coffee.pos
            SET name = $2, description = $3, pos_type = $4, campus = $5,
                street = $6, house_number = $7, postal_code = $8, city = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.pos_type)
        .bind(draft.campus)
        .bind(&draft.street)
        .bind(&draft.house_number)
        .bind(draft.postal_code)
        .bind(&draft.city)
        .fetch_optional(self.pool)
        .await
        .map_err(map_unique_violation)?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a POS by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the POS was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PosId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM campus_coffee.pos WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every POS.
    ///
    /// # Returns
    ///
    /// The number of deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM campus_coffee.pos")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict;
    }
    RepositoryError::Database(e)
}
