use crate::api::error::AppError;
use crate::api::middleware::auth::BearerToken;
use crate::api::response::ApiResponse;
use crate::utils::auth::Claims;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, alias = "username", alias = "UserName")]
    pub user_name: String,
    #[serde(default, alias = "Password")]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Bad credentials are a domain rejection: transport 200, envelope code 401
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Envelope with the token, or success=false and statusCode 401", body = TokenResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<ApiResponse<TokenResponse>, AppError> {
    let token = state
        .auth
        .login(&payload.user_name, &payload.password)
        .await?;

    Ok(match token {
        Some(token) => ApiResponse::ok_with_message(TokenResponse { token }, "Login Successful"),
        None => ApiResponse::error("Invalid credentials", 401),
    })
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Token revoked"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> ApiResponse<()> {
    state.auth.logout(&token, &claims).await;
    ApiResponse::<()>::message("Logged out")
}
