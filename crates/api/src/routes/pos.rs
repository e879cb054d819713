//! POS CRUD routes.
//!
//! Bodies are [`PosDto`] JSON documents. Server-managed fields (`id`,
//! `createdAt`, `updatedAt`) are ignored on create; on update a body `id`
//! must match the path.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use campus_coffee_core::{PosDto, PosId};

use crate::error::{AppError, Result};
use crate::models::PosDraft;
use crate::state::AppState;

/// Query parameters for the name filter.
#[derive(Debug, Deserialize)]
pub struct NameFilter {
    pub name: String,
}

/// List all POS entries in insertion order.
///
/// GET /api/pos
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PosDto>>> {
    let entries = state.pos().get_all().await?;
    Ok(Json(entries.into_iter().map(PosDto::from).collect()))
}

/// Get a single POS.
///
/// GET /api/pos/{id}
pub async fn get(
    State(state): State<AppState>,
    id: std::result::Result<Path<PosId>, PathRejection>,
) -> Result<Json<PosDto>> {
    let Path(id) = id?;
    let pos = state.pos().get_by_id(id).await?;
    Ok(Json(pos.into()))
}

/// Find a POS by its exact name.
///
/// GET /api/pos/filter?name=...
pub async fn filter(
    State(state): State<AppState>,
    query: std::result::Result<Query<NameFilter>, QueryRejection>,
) -> Result<Json<PosDto>> {
    let Query(NameFilter { name }) = query?;
    let pos = state.pos().get_by_name(&name).await?;
    Ok(Json(pos.into()))
}

/// Create a POS.
///
/// POST /api/pos
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PosDto>, JsonRejection>,
) -> Result<(StatusCode, Json<PosDto>)> {
    let Json(dto) = payload?;
    let draft = PosDraft::try_from(dto)?;

    let pos = state.pos().create(&draft).await?;
    Ok((StatusCode::CREATED, Json(pos.into())))
}

/// Replace a POS.
///
/// PUT /api/pos/{id}
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<PosId>, PathRejection>,
    payload: std::result::Result<Json<PosDto>, JsonRejection>,
) -> Result<Json<PosDto>> {
    let Path(id) = id?;
    let Json(dto) = payload?;

    if let Some(body_id) = dto.id
        && body_id != id
    {
        return Err(AppError::BadRequest(format!(
            "POS ID in path ({id}) and body ({body_id}) do not match"
        )));
    }

    let draft = PosDraft::try_from(dto)?;
    let pos = state.pos().update(id, &draft).await?;
    Ok(Json(pos.into()))
}

/// Delete a POS.
///
/// DELETE /api/pos/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: std::result::Result<Path<PosId>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    state.pos().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
