use prost::Message;
use tonic::Code;
use tonic::Status;
use tonic_types::pb;
use tonic_types::ErrorDetails;
use tonic_types::StatusExt;

use crate::error::FieldViolation;
use crate::error::StructuredError;
use crate::kind::ErrorKind;

const BAD_REQUEST_TYPE_URL: &str = "type.googleapis.com/google.rpc.BadRequest";
const FIELD_VIOLATION_TYPE_URL: &str = "type.googleapis.com/google.rpc.BadRequest.FieldViolation";

const RPC_CODES: [(ErrorKind, Code); 6] = [
    (ErrorKind::InvalidInput, Code::InvalidArgument),
    (ErrorKind::AlreadyExists, Code::AlreadyExists),
    (ErrorKind::NotFound, Code::NotFound),
    (ErrorKind::Unauthenticated, Code::Unauthenticated),
    (ErrorKind::Conflict, Code::Aborted),
    (ErrorKind::Internal, Code::Internal),
];

/// RPC code for an error kind.
pub fn code_for(kind: ErrorKind) -> Code {
    RPC_CODES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, code)| *code)
        .unwrap_or(Code::Internal)
}

/// Error kind for an RPC code. Codes outside the table become `Internal`.
pub fn kind_for(code: Code) -> ErrorKind {
    RPC_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(kind, _)| *kind)
        .unwrap_or(ErrorKind::Internal)
}

/// Encode an error as an RPC status.
///
/// Field violations travel as a `google.rpc.BadRequest` detail, never in
/// the message text.
pub fn to_status(error: &StructuredError) -> Status {
    let code = code_for(error.kind());

    if error.violations().is_empty() {
        return Status::new(code, error.message());
    }

    let mut details = ErrorDetails::new();
    for violation in error.violations() {
        details.add_bad_request_violation(violation.field.clone(), violation.description.clone());
    }

    Status::with_error_details(code, error.message(), details)
}

/// Rebuild an error from an RPC status received on the wire.
///
/// Never fails. Each detail is decoded on its own: one that is undecodable
/// or of an unknown type contributes nothing and does not hide the others.
pub fn from_status(status: &Status) -> StructuredError {
    let kind = kind_for(status.code());

    StructuredError::new(kind, status.message()).with_violations(wire_violations(status))
}

fn wire_violations(status: &Status) -> Vec<FieldViolation> {
    if status.details().is_empty() {
        return Vec::new();
    }

    let envelope = match pb::Status::decode(status.details()) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(error = %e, "Dropping undecodable status details");
            return Vec::new();
        }
    };

    let mut violations = Vec::new();
    for detail in &envelope.details {
        match detail.type_url.as_str() {
            BAD_REQUEST_TYPE_URL => match pb::BadRequest::decode(detail.value.as_slice()) {
                Ok(bad_request) => violations.extend(
                    bad_request
                        .field_violations
                        .into_iter()
                        .map(|v| FieldViolation::new(v.field, v.description)),
                ),
                Err(e) => tracing::debug!(error = %e, "Dropping undecodable BadRequest detail"),
            },
            FIELD_VIOLATION_TYPE_URL => {
                match pb::bad_request::FieldViolation::decode(detail.value.as_slice()) {
                    Ok(v) => violations.push(FieldViolation::new(v.field, v.description)),
                    Err(e) => {
                        tracing::debug!(error = %e, "Dropping undecodable FieldViolation detail")
                    }
                }
            }
            other => tracing::debug!(type_url = other, "Ignoring status detail"),
        }
    }

    violations
}

impl From<StructuredError> for Status {
    fn from(error: StructuredError) -> Self {
        to_status(&error)
    }
}

impl From<Status> for StructuredError {
    fn from(status: Status) -> Self {
        from_status(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_status() {
        for kind in ErrorKind::ALL {
            let original = StructuredError::new(kind, "something failed");
            let decoded = from_status(&to_status(&original));

            assert_eq!(decoded.kind(), kind);
            assert_eq!(decoded.message(), "something failed");
        }
    }

    #[test]
    fn test_code_table() {
        assert_eq!(code_for(ErrorKind::InvalidInput), Code::InvalidArgument);
        assert_eq!(code_for(ErrorKind::AlreadyExists), Code::AlreadyExists);
        assert_eq!(code_for(ErrorKind::NotFound), Code::NotFound);
        assert_eq!(code_for(ErrorKind::Unauthenticated), Code::Unauthenticated);
        assert_eq!(code_for(ErrorKind::Conflict), Code::Aborted);
        assert_eq!(code_for(ErrorKind::Internal), Code::Internal);
    }

    #[test]
    fn test_unmapped_codes_are_internal() {
        for code in [
            Code::Unavailable,
            Code::DeadlineExceeded,
            Code::PermissionDenied,
            Code::Unknown,
            Code::Ok,
        ] {
            assert_eq!(kind_for(code), ErrorKind::Internal);
        }
    }

    #[test]
    fn test_violations_travel_as_details() {
        let original = StructuredError::invalid_input(
            "invalid input data",
            vec![
                FieldViolation::new("email", "must be a valid email address"),
                FieldViolation::new("password", "must be at least 8 characters"),
            ],
        );

        let status = to_status(&original);
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid input data");
        assert!(!status.details().is_empty());

        assert_eq!(from_status(&status), original);
    }

    #[test]
    fn test_unknown_details_are_dropped() {
        let mut details = ErrorDetails::new();
        details.set_retry_info(Some(std::time::Duration::from_secs(5)));
        let status = Status::with_error_details(Code::InvalidArgument, "bad", details);

        let error = from_status(&status);
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(error.violations().is_empty());
    }

    #[test]
    fn test_garbage_details_are_dropped() {
        let status = Status::with_details(
            Code::InvalidArgument,
            "bad",
            vec![0xff, 0x01, 0x02].into(),
        );

        let error = from_status(&status);
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_eq!(error.message(), "bad");
        assert!(error.violations().is_empty());
    }

    fn status_with(details: Vec<prost_types::Any>) -> Status {
        let envelope = pb::Status {
            code: Code::InvalidArgument as i32,
            message: "bad".to_string(),
            details,
        };
        Status::with_details(Code::InvalidArgument, "bad", envelope.encode_to_vec().into())
    }

    fn bad_request_detail(field: &str, description: &str) -> prost_types::Any {
        let bad_request = pb::BadRequest {
            field_violations: vec![pb::bad_request::FieldViolation {
                field: field.to_string(),
                description: description.to_string(),
            }],
        };
        prost_types::Any {
            type_url: BAD_REQUEST_TYPE_URL.to_string(),
            value: bad_request.encode_to_vec(),
        }
    }

    #[test]
    fn test_corrupt_detail_keeps_bad_request() {
        let status = status_with(vec![
            prost_types::Any {
                type_url: "type.googleapis.com/google.rpc.RetryInfo".to_string(),
                value: vec![0xff, 0xff],
            },
            bad_request_detail("email", "is required"),
        ]);

        let error = from_status(&status);
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            error.violations(),
            &[FieldViolation::new("email", "is required")]
        );
    }

    #[test]
    fn test_corrupt_bad_request_keeps_other_details() {
        let status = status_with(vec![
            prost_types::Any {
                type_url: BAD_REQUEST_TYPE_URL.to_string(),
                value: vec![0xff, 0xff],
            },
            bad_request_detail("role", "invalid user role"),
        ]);

        assert_eq!(
            from_status(&status).violations(),
            &[FieldViolation::new("role", "invalid user role")]
        );
    }

    #[test]
    fn test_single_field_violation_detail() {
        let violation = pb::bad_request::FieldViolation {
            field: "password".to_string(),
            description: "must be at least 8 characters".to_string(),
        };
        let status = status_with(vec![
            prost_types::Any {
                type_url: FIELD_VIOLATION_TYPE_URL.to_string(),
                value: violation.encode_to_vec(),
            },
            bad_request_detail("email", "is required"),
        ]);

        assert_eq!(
            from_status(&status).violations(),
            &[
                FieldViolation::new("password", "must be at least 8 characters"),
                FieldViolation::new("email", "is required"),
            ]
        );
    }
}
