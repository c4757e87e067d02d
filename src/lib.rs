//! # 用户管理 REST API
//!
//! 基于 Axum 的内存用户 CRUD 服务：
//! - `app`：用户模型、存储服务和路由处理器
//! - `core`：统一错误、响应结构、中间件和存储抽象
//! - `infrastructure`：配置加载与日志初始化

pub mod app;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;

use axum::Router;

pub use crate::app::users::handler::{create_router, AppState};
pub use crate::app::users::model::{User, UserPayload};
pub use crate::app::users::service::InMemoryUserStore;
pub use crate::core::error::ApiError;
pub use crate::core::service::UserRepository;
pub use crate::infrastructure::config::{AppConfig, ConfigError};

/// 使用给定存储和配置构建完整应用
pub fn build_app(store: Arc<dyn UserRepository>, config: &AppConfig) -> Router {
    create_router(AppState::new(store).with_body_limit(config.body_limit))
}
