use tonic_build::manual::Builder;
use tonic_build::manual::Method;
use tonic_build::manual::Service;

const CODEC: &str = "tonic::codec::ProstCodec";

fn method(name: &str, route_name: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route_name)
        .input_type(format!("crate::{}", input))
        .output_type(format!("crate::{}", output))
        .codec_path(CODEC)
        .build()
}

fn main() {
    // Messages are prost derives in src/lib.rs; only the service stubs are generated.
    let user_service = Service::builder()
        .name("UserService")
        .package("users.v1")
        .method(method(
            "create_one_user",
            "CreateOneUser",
            "CreateUserRequest",
            "CreateUserResponse",
        ))
        .method(method(
            "login_user",
            "LoginUser",
            "LoginUserRequest",
            "LoginUserResponse",
        ))
        .method(method(
            "refresh_token",
            "RefreshToken",
            "RefreshTokenRequest",
            "RefreshTokenResponse",
        ))
        .build();

    Builder::new().compile(&[user_service]);
}
