//! Crate error type
//!
//! The classifier never fails; these errors come from the collaborators
//! around it (lexicon loading, message ingestion, export, server).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Lexicon file could not be read
    #[error("failed to read lexicon {path}: {source}")]
    LexiconIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Lexicon file is not valid JSON for the expected shape
    #[error("failed to parse lexicon: {0}")]
    LexiconParse(#[from] serde_json::Error),

    /// Lexicon parsed but violates a table rule
    #[error("invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// Message content is empty or whitespace-only
    #[error("message content must not be empty")]
    EmptyMessage,

    /// Reflection missing an emotion, out-of-range rating or short feedback
    #[error("invalid reflection: {0}")]
    InvalidReflection(String),

    /// Export requested with no messages stored
    #[error("no messages to export")]
    NothingToExport,

    /// Listener or serve failure
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl ChatError {
    /// HTTP status for API responses
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::EmptyMessage | ChatError::InvalidReflection(_) => StatusCode::BAD_REQUEST,
            ChatError::NothingToExport => StatusCode::NOT_FOUND,
            ChatError::LexiconIo { .. }
            | ChatError::LexiconParse(_)
            | ChatError::InvalidLexicon(_)
            | ChatError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
