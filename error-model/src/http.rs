use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::error::StructuredError;
use crate::kind::ErrorKind;

/// HTTP status for an error kind.
///
/// `AlreadyExists` and `Conflict` share 409.
pub fn http_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON body of every HTTP error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<ViolationData>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationData {
    pub field: String,
    pub violation: String,
}

impl From<&StructuredError> for ErrorEnvelope {
    fn from(error: &StructuredError) -> Self {
        let detail = if error.violations().is_empty() {
            None
        } else {
            Some(
                error
                    .violations()
                    .iter()
                    .map(|v| ViolationData {
                        field: v.field.clone(),
                        violation: v.description.clone(),
                    })
                    .collect(),
            )
        };

        Self {
            message: error.message().to_string(),
            detail,
        }
    }
}

/// Render any error convertible to [`StructuredError`] as an HTTP response.
///
/// Errors raised by the gateway itself and errors decoded from an RPC status
/// both go through here, so the body shape is identical for both.
pub fn render_http(error: impl Into<StructuredError>) -> Response {
    let error = error.into();
    (http_status(error.kind()), Json(ErrorEnvelope::from(&error))).into_response()
}

impl IntoResponse for StructuredError {
    fn into_response(self) -> Response {
        render_http(self)
    }
}

impl From<anyhow::Error> for StructuredError {
    fn from(e: anyhow::Error) -> Self {
        StructuredError::internal(e)
    }
}
