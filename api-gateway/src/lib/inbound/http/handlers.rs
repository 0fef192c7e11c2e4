pub mod create_user;
pub mod login;
pub mod refresh;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
pub use create_user::create_user;
use error_model::ErrorKind;
use error_model::StructuredError;
pub use login::login;
pub use refresh::refresh;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SessionTokens;

pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// Standardized API success response
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self { status, data }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

/// Error returned by every handler.
///
/// Rendered through [`error_model::render_http`] so gateway-raised and
/// user-service errors share one body shape.
#[derive(Debug)]
pub struct ApiError(pub StructuredError);

impl From<StructuredError> for ApiError {
    fn from(error: StructuredError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        Self(StructuredError::new(
            ErrorKind::InvalidInput,
            INVALID_BODY_MESSAGE,
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_model::render_http(self.0)
    }
}

/// `Json` extractor whose rejection is an [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Missing fields deserialize as empty so the user service reports them as
/// field violations instead of the body being rejected outright.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateUserResponseData {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<SessionTokens> for LoginResponseData {
    fn from(tokens: SessionTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshResponseData {
    pub access_token: String,
}
