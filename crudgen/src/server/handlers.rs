//! Request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::error::{CrudgenError, Result};
use crate::request::GenerationPayload;

/// Body of a successful `POST /gerar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub zip_name: String,
}

/// `POST /gerar`
pub async fn generate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerationPayload>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    let Json(payload) = payload.map_err(|e| CrudgenError::Validation(e.body_text()))?;
    let request = payload.into_request()?;
    info!("Generating project for table {}", request.table);

    let published = state.generator.generate(&request).await?;
    Ok(Json(GenerateResponse {
        zip_name: published.archive_name(),
    }))
}

/// `GET /download/{zip_name}`
pub async fn download(
    State(state): State<AppState>,
    Path(zip_name): Path<String>,
) -> Result<Response> {
    let bytes = state.generator.store().open_archive(&zip_name).await?;
    let disposition = format!("attachment; filename=\"{}\"", zip_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
