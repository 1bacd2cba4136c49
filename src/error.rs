use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tourlens_common::TourUrlError;

/// Everything that can go wrong between receiving a tour URL and
/// returning an analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Validation(#[from] TourUrlError),

    #[error("Claude API error: {status}")]
    Upstream { status: u16 },

    #[error("Claude API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response format from AI: {0}")]
    Format(String),
}

impl AnalyzeError {
    pub fn format(err: impl std::fmt::Display) -> Self {
        AnalyzeError::Format(err.to_string())
    }
}

impl ResponseError for AnalyzeError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalyzeError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AnalyzeError::Validation(e) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })),
            _ => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Analysis failed",
                "message": self.to_string()
            })),
        }
    }
}
