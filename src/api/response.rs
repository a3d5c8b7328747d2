use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Uniform body of every JSON response.
///
/// `status_code` mirrors the intended status; the transport status stays 200
/// for everything except `201 Created` and `AppError` renderings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with_message(data, "Success")
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            status_code: 200,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            success: true,
            message: "Resource created successfully".to_string(),
            data: Some(data),
            status_code: 201,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            status_code: 404,
        }
    }

    pub fn error(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            status_code,
        }
    }
}

impl ApiResponse<()> {
    /// Success without payload; `data` serializes as null
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            status_code: 200,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.status_code == 201 {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_field_names() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"id": 1}))).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Success");
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["data"]["id"], 1);
    }

    #[test]
    fn test_not_found_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::not_found("Vehicle not found")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 404);
        assert!(body["data"].is_null());
    }

    #[test]
    fn test_transport_status() {
        assert_eq!(
            ApiResponse::created(1).into_response().status(),
            StatusCode::CREATED
        );
        assert_eq!(
            ApiResponse::<()>::error("Invalid credentials", 401)
                .into_response()
                .status(),
            StatusCode::OK
        );
    }
}
