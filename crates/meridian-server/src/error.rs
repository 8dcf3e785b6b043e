use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Errores del boundary HTTP.
#[derive(Debug)]
pub enum AppError {
    /// El resolver no encontro configuracion. 404 con body vacio.
    NotFound,

    /// Fallo del resolver upstream. 500.
    Resolver(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Resolver(message) => {
                tracing::error!(%message, "resolver failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message,
                    }),
                )
                    .into_response()
            }
        }
    }
}
