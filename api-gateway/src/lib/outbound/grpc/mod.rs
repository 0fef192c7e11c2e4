pub mod user;

pub use user::GrpcUserGateway;
