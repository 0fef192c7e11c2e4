//! Transport-agnostic error model.
//!
//! A [`StructuredError`] carries a coarse [`ErrorKind`], a stable message and,
//! for invalid input only, an ordered list of [`FieldViolation`]s. The `rpc`
//! module converts it to and from `tonic::Status` with typed bad-request
//! details; the `http` module renders it as a status code plus
//! `{"message": ..., "detail"?: [...]}`.

pub mod error;
pub mod http;
pub mod kind;
pub mod rpc;
pub mod validation;

pub use error::FieldViolation;
pub use error::StructuredError;
pub use http::render_http;
pub use http::ErrorEnvelope;
pub use kind::ErrorKind;
pub use rpc::from_status;
pub use rpc::to_status;
pub use validation::FieldChecks;
pub use validation::FieldError;
pub use validation::ValidationError;
