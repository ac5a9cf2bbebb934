use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::render::html::Banner;
use crate::render::poster::PosterError;
use crate::store::StoreError;

/// Failures surfaced to the operator; none of them stop the server
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not reach the ledger store, nothing was saved: {0}")]
    Store(#[from] StoreError),
    #[error("No results or rebuys were entered")]
    EmptySubmission,
    #[error("Could not print the poster: {0}")]
    Poster(#[from] PosterError),
    #[error("Could not export the ledger: {0}")]
    Export(#[from] csv::Error),
}

impl AppError {
    /// Warnings are recoverable by retrying or fixing the input
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Store(_) | AppError::EmptySubmission)
    }

    pub fn banner(&self) -> Banner {
        if self.is_warning() {
            Banner::warning(self.to_string())
        } else {
            Banner::error(self.to_string())
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EmptySubmission => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Poster(_) | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let key = if self.is_warning() { "warning" } else { "error" };
        let mut body = serde_json::Map::new();
        body.insert(key.to_string(), json!(self.to_string()));
        HttpResponse::build(self.status_code())
            .content_type("application/json")
            .json(body)
    }
}
