//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::response::MessageBody;

/// 请求处理错误
///
/// `Display` 的文本就是返回给客户端的 `message` 字段。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Invalid user data")]
    InvalidUserData,
    #[error("Invalid UUID")]
    InvalidUuid,
    #[error("User Not Found")]
    UserNotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Endpoint Not Found")]
    EndpointNotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::InvalidUserData | ApiError::InvalidUuid => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UserNotFound | ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(MessageBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidJson.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidUserData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidUuid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EndpointNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_messages_match_wire_text() {
        assert_eq!(ApiError::InvalidJson.to_string(), "Invalid JSON");
        assert_eq!(ApiError::InvalidUserData.to_string(), "Invalid user data");
        assert_eq!(ApiError::UserNotFound.to_string(), "User Not Found");
    }

    #[test]
    fn test_into_response_sets_json_content_type() {
        let response = ApiError::InvalidUuid.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
