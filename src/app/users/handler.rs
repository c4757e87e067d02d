//! 用户路由与处理器
//!
//! 路径匹配按字符串进行：只去掉一个末尾的 `/`，`/api/users/{id}` 在分派方法之前
//! 先校验 id 格式，所以格式错误的 id 对任何方法都返回 400。

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::model::{parse_user_id, UserPayload};
use crate::core::{
    error::ApiError, middleware::request_logging_middleware, service::UserRepository,
};

pub const COLLECTION_PATH: &str = "/api/users";
const ITEM_PREFIX: &str = "/api/users/";

/// 请求体默认上限 (2 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserRepository>,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn UserRepository>) -> Self {
        Self {
            store,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Collection,
    /// 已通过格式校验的原始 id 文本
    Item(&'a str),
}

/// 构建用户 API 路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

fn resolve(path: &str) -> Result<Target<'_>, ApiError> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed == COLLECTION_PATH {
        return Ok(Target::Collection);
    }

    match trimmed.strip_prefix(ITEM_PREFIX) {
        Some(raw_id) if !raw_id.is_empty() => {
            parse_user_id(raw_id)?;
            Ok(Target::Item(raw_id))
        }
        _ => Err(ApiError::EndpointNotFound),
    }
}

async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let target = resolve(&path);

    let result = match (target, method.clone()) {
        (Err(err), _) => Err(err),
        (Ok(Target::Collection), Method::GET) => Ok(list_users(&state)),
        (Ok(Target::Collection), Method::POST) => create_user(&state, req.into_body()).await,
        (Ok(Target::Item(id)), Method::GET) => get_user(&state, id),
        (Ok(Target::Item(id)), Method::PUT) => update_user(&state, id, req.into_body()).await,
        (Ok(Target::Item(id)), Method::DELETE) => delete_user(&state, id),
        (Ok(_), _) => Err(ApiError::MethodNotAllowed),
    };

    result.unwrap_or_else(|err| {
        warn!(method = %method, path = %path, reason = %err, "request rejected");
        err.into_response()
    })
}

/// 完整读取请求体后再解析
async fn read_payload(body: Body, limit: usize) -> Result<UserPayload, ApiError> {
    let bytes = to_bytes(body, limit)
        .await
        .map_err(|_| ApiError::InvalidJson)?;
    UserPayload::parse(&bytes)
}

fn list_users(state: &AppState) -> Response {
    Json(state.store.list_all()).into_response()
}

fn get_user(state: &AppState, id: &str) -> Result<Response, ApiError> {
    let user = state.store.find_by_id(id).ok_or(ApiError::UserNotFound)?;
    Ok(Json(user).into_response())
}

async fn create_user(state: &AppState, body: Body) -> Result<Response, ApiError> {
    let payload = read_payload(body, state.body_limit).await?;
    let user = state.store.insert(payload);
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

async fn update_user(state: &AppState, id: &str, body: Body) -> Result<Response, ApiError> {
    let payload = read_payload(body, state.body_limit).await?;
    let user = state
        .store
        .replace(id, payload)
        .ok_or(ApiError::UserNotFound)?;
    Ok(Json(user).into_response())
}

fn delete_user(state: &AppState, id: &str) -> Result<Response, ApiError> {
    if state.store.remove(id) {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(ApiError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_resolve_collection() {
        assert_eq!(resolve("/api/users"), Ok(Target::Collection));
        assert_eq!(resolve("/api/users/"), Ok(Target::Collection));
    }

    #[test]
    fn test_resolve_item() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(resolve(&format!("/api/users/{id}")), Ok(Target::Item(id.as_str())));
        assert_eq!(resolve(&format!("/api/users/{id}/")), Ok(Target::Item(id.as_str())));

        let upper = id.to_uppercase();
        assert_eq!(
            resolve(&format!("/api/users/{upper}")),
            Ok(Target::Item(upper.as_str()))
        );
    }

    #[test]
    fn test_resolve_only_strips_one_slash() {
        assert_eq!(resolve("/api/users//"), Err(ApiError::EndpointNotFound));
        let id = Uuid::new_v4();
        assert_eq!(
            resolve(&format!("/api/users/{id}//")),
            Err(ApiError::InvalidUuid)
        );
    }

    #[test]
    fn test_resolve_invalid_and_unknown() {
        assert_eq!(resolve("/api/users/not-a-uuid"), Err(ApiError::InvalidUuid));
        assert_eq!(resolve("/api/users/a/b"), Err(ApiError::InvalidUuid));
        assert_eq!(resolve("/api/user"), Err(ApiError::EndpointNotFound));
        assert_eq!(resolve("/api/usersx"), Err(ApiError::EndpointNotFound));
        assert_eq!(resolve("/"), Err(ApiError::EndpointNotFound));
    }
}
