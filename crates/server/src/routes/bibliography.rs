use axum::extract::{Path, State};
use axum::Json;
use campus_core::{BibliographyItem, SequenceMove};
use orchestrator::reorder_bibliography;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub moves: Vec<SequenceMove>,
}

#[utoipa::path(
    put,
    path = "/api/chapters/{id}/bibliography/reorder",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Chapter bibliography in final order", body = Vec<BibliographyItem>),
        (status = 400, description = "Duplicate target sequence or invalid move"),
        (status = 404, description = "An item does not exist"),
        (status = 409, description = "Moves span more than one chapter")
    ),
    tag = "bibliography"
)]
pub async fn reorder_chapter_bibliography(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(chapter_id): Path<Uuid>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<BibliographyItem>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let items = reorder_bibliography(&handle, chapter_id, &request.moves).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/chapters/{id}/bibliography",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Live items in display order", body = Vec<BibliographyItem>)
    ),
    tag = "bibliography"
)]
pub async fn list_chapter_bibliography(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(chapter_id): Path<Uuid>,
) -> Result<Json<Vec<BibliographyItem>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let items = handle.bibliography().list_live_by_chapter(chapter_id).await?;
    Ok(Json(items))
}
