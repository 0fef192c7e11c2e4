//! Wire contract of the `users.v1.UserService` RPC service.
//!
//! Messages are declared with prost derives; client and server stubs are
//! generated at build time.

/// Role vocabulary on the wire. `Unspecified` is the proto3 zero value and
/// never a valid role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum UserRole {
    Unspecified = 0,
    Teacher = 1,
    Staff = 2,
    Student = 3,
    Parent = 4,
}

impl UserRole {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            UserRole::Unspecified => "USER_ROLE_UNSPECIFIED",
            UserRole::Teacher => "USER_ROLE_TEACHER",
            UserRole::Staff => "USER_ROLE_STAFF",
            UserRole::Student => "USER_ROLE_STUDENT",
            UserRole::Parent => "USER_ROLE_PARENT",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "USER_ROLE_UNSPECIFIED" => Some(Self::Unspecified),
            "USER_ROLE_TEACHER" => Some(Self::Teacher),
            "USER_ROLE_STAFF" => Some(Self::Staff),
            "USER_ROLE_STUDENT" => Some(Self::Student),
            "USER_ROLE_PARENT" => Some(Self::Parent),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub email: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub password: ::prost::alloc::string::String,
    #[prost(enumeration = "UserRole", tag = "3")]
    pub role: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserResponse {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginUserRequest {
    #[prost(string, tag = "1")]
    pub email: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub password: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginUserResponse {
    #[prost(string, tag = "1")]
    pub access_token: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub refresh_token: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RefreshTokenRequest {
    #[prost(string, tag = "1")]
    pub refresh_token: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RefreshTokenResponse {
    #[prost(string, tag = "1")]
    pub access_token: ::prost::alloc::string::String,
}

include!(concat!(env!("OUT_DIR"), "/users.v1.UserService.rs"));
