//! Mapping of library errors onto HTTP responses
//!
//! Clients get a status code and a fixed message; driver and filesystem
//! details only go to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::CrudgenError;

const MISSING_FIELDS: &str = "Todos os campos são obrigatórios";
const NOT_FOUND: &str = "Arquivo não encontrado";
const CONNECTION_FAILED: &str = "Não foi possível conectar ao banco de dados";
const TABLE_NOT_FOUND: &str = "Tabela não encontrada";
const INTERNAL: &str = "Erro interno ao gerar o projeto";

impl CrudgenError {
    /// Status code and client-facing message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                format!("{}: {}", MISSING_FIELDS, fields.join(", ")),
            ),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Connection(_) => (StatusCode::BAD_GATEWAY, CONNECTION_FAILED.to_string()),
            Self::TableNotFound(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                TABLE_NOT_FOUND.to_string(),
            ),
            Self::UnsupportedColumn(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            Self::ArchiveNotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string()),
        }
    }
}

impl IntoResponse for CrudgenError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("{} -> {}", self, status);
        } else {
            warn!("{} -> {}", self, status);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
