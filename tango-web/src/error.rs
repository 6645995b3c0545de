//! Mapping from library errors to HTTP responses
//!
//! `status_for` is the one table deciding the status code. Each endpoint
//! chooses only the body shape its client expects.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tango::TangoError;
use tracing::{error, warn};

/// Status code for each error kind
pub fn status_for(err: &TangoError) -> StatusCode {
    match err {
        TangoError::Validation(_) => StatusCode::BAD_REQUEST,
        TangoError::NotFound(_) => StatusCode::NOT_FOUND,
        TangoError::Provider(_)
        | TangoError::Storage(_)
        | TangoError::Config(_)
        | TangoError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON body layout of an error response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    /// `{"error": message}`
    Plain,
    /// `{"status": "error", "message": message}`
    Status,
}

#[derive(Debug)]
pub struct ApiError {
    error: TangoError,
    shape: ErrorShape,
}

impl ApiError {
    pub fn plain(error: TangoError) -> Self {
        Self {
            error,
            shape: ErrorShape::Plain,
        }
    }

    pub fn status(error: TangoError) -> Self {
        Self {
            error,
            shape: ErrorShape::Status,
        }
    }

    /// Message shown to the client. Internal failures are not echoed back.
    fn client_message(&self) -> String {
        match &self.error {
            TangoError::Validation(_) | TangoError::NotFound(_) => self.error.to_string(),
            TangoError::Provider(_) => "Translation service error".to_string(),
            TangoError::Storage(_) | TangoError::Config(_) | TangoError::Task(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

/// Undecodable request bodies are the caller's fault
pub fn rejection_error(rejection: JsonRejection) -> TangoError {
    TangoError::Validation(format!("invalid JSON body: {}", rejection.body_text()))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.error);
        if status.is_server_error() {
            error!(error = %self.error, "request failed");
        } else {
            warn!(%status, error = %self.error, "request rejected");
        }

        let message = self.client_message();
        let body = match self.shape {
            ErrorShape::Plain => json!({ "error": message }),
            ErrorShape::Status => json!({ "status": "error", "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
