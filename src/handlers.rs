use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::photo::{Photo, Viewport};
use crate::wall::{WallError, WallEvent};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    pub image_data: String,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

#[derive(Deserialize)]
pub struct PositionRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize)]
pub struct ProgressRequest {
    pub progress: f64,
}

#[derive(Deserialize)]
pub struct StyleRequest {
    pub prompt: String,
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub photo: Photo,
    pub notification: Option<WallEvent>,
}

fn error_status(error: WallError) -> StatusCode {
    match error {
        WallError::PhotoNotFound(id) => {
            tracing::debug!("No print with id {}", id);
            StatusCode::NOT_FOUND
        }
        WallError::InvalidImage(reason) | WallError::InvalidInput(reason) => {
            tracing::debug!("Rejected request: {}", reason);
            StatusCode::BAD_REQUEST
        }
    }
}

pub async fn list_photos_handler(State(app_state): State<crate::AppState>) -> Json<Vec<Photo>> {
    Json(app_state.wall.photos().await)
}

pub async fn capture_handler(
    State(app_state): State<crate::AppState>,
    Json(payload): Json<CaptureRequest>,
) -> Result<(StatusCode, Json<Photo>), StatusCode> {
    let viewport = payload.viewport.unwrap_or_default();
    // The caption settles in the background.
    let (photo, _caption) = app_state
        .wall
        .capture(payload.image_data, viewport)
        .await
        .map_err(error_status)?;

    tracing::info!("Captured print {}", photo.id);
    Ok((StatusCode::CREATED, Json(photo)))
}

pub async fn update_position_handler(
    State(app_state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PositionRequest>,
) -> Result<Json<Photo>, StatusCode> {
    app_state
        .wall
        .update_position(&id, payload.x, payload.y)
        .await
        .map(Json)
        .map_err(error_status)
}

/// Progress reported by the client can only move forward and is clamped.
pub async fn update_progress_handler(
    State(app_state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProgressRequest>,
) -> Result<Json<Photo>, StatusCode> {
    app_state
        .wall
        .raise_progress(&id, payload.progress)
        .await
        .map(Json)
        .map_err(error_status)
}

pub async fn shake_handler(
    State(app_state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<Json<Photo>, StatusCode> {
    app_state.wall.shake(&id).await.map(Json).map_err(error_status)
}

pub async fn edit_style_handler(
    State(app_state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StyleRequest>,
) -> Result<(StatusCode, Json<Photo>), StatusCode> {
    let _edit = app_state
        .wall
        .edit_style(&id, &payload.prompt)
        .await
        .map_err(error_status)?;

    let photo = app_state
        .wall
        .get(&id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok((StatusCode::ACCEPTED, Json(photo)))
}

pub async fn toggle_share_handler(
    State(app_state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShareResponse>, StatusCode> {
    let outcome = app_state
        .wall
        .toggle_share(&id)
        .await
        .map_err(error_status)?;

    Ok(Json(ShareResponse {
        photo: outcome.photo,
        notification: outcome.notification,
    }))
}

pub async fn delete_photo_handler(
    State(app_state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    app_state.wall.delete(&id).await.map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn gallery_handler(State(app_state): State<crate::AppState>) -> Json<Vec<Photo>> {
    Json(app_state.wall.global_gallery().await)
}
