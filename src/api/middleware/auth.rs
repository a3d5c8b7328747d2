use crate::AppState;
use crate::services::auth_service::GateRejection;
use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const LOGGED_OUT_MESSAGE: &str = "Token has been logged out.";

/// The raw bearer string that passed the gate, for handlers that need it (logout)
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string());

    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return unauthorized();
    };

    match state.auth.authenticate(&token).await {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            req.extensions_mut().insert(BearerToken(token));
            next.run(req).await
        }
        Err(GateRejection::Revoked) => (
            StatusCode::UNAUTHORIZED,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            LOGGED_OUT_MESSAGE,
        )
            .into_response(),
        Err(GateRejection::Invalid) => unauthorized(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
    )
        .into_response()
}
