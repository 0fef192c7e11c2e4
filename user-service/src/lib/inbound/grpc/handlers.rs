use user_proto::UserRole;

use crate::domain::user::errors::RoleError;
use crate::domain::user::models::Role;

pub mod create_one_user;
pub mod login_user;
pub mod refresh_token;

const ROLE_TABLE: [(Role, UserRole); 4] = [
    (Role::Teacher, UserRole::Teacher),
    (Role::Staff, UserRole::Staff),
    (Role::Student, UserRole::Student),
    (Role::Parent, UserRole::Parent),
];

/// Domain role for a raw wire value.
///
/// # Errors
/// * `Unspecified` - The proto3 zero value
/// * `Unknown` - A value outside the wire enum, or one with no domain counterpart
pub fn role_from_proto(value: i32) -> Result<Role, RoleError> {
    let wire = UserRole::try_from(value).map_err(|_| RoleError::Unknown(value.to_string()))?;

    if wire == UserRole::Unspecified {
        return Err(RoleError::Unspecified);
    }

    ROLE_TABLE
        .iter()
        .find(|(_, w)| *w == wire)
        .map(|(domain, _)| *domain)
        .ok_or_else(|| RoleError::Unknown(wire.as_str_name().to_string()))
}
