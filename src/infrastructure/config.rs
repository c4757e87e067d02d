//! 服务配置
//!
//! 所有配置项都来自环境变量（可由 `.env` 文件补充），未设置时使用默认值。

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

use crate::app::users::handler::DEFAULT_BODY_LIMIT;

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_LOG: &str = "RUST_LOG";
pub const ENV_BODY_LIMIT: &str = "MAX_BODY_BYTES";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid host address: {0:?}")]
    InvalidHost(String),
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 绑定地址
    pub host: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 日志过滤规则，`EnvFilter` 语法
    pub log_filter: String,
    /// 请求体大小上限（字节）
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: "info".to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    /// 先加载可选的 `.env` 文件，再从进程环境变量加载
    ///
    /// 进程中已设置的变量优先于 `.env` 中的同名变量。
    pub fn load() -> Result<Self, ConfigError> {
        // 文件不存在不算错误
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用给定的查找函数加载，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = non_empty(lookup(ENV_HOST)) {
            config.host = host;
        }
        if let Some(port) = non_empty(lookup(ENV_PORT)) {
            config.port = parse_value(ENV_PORT, port)?;
        }
        if let Some(filter) = non_empty(lookup(ENV_LOG)) {
            config.log_filter = filter;
        }
        if let Some(limit) = non_empty(lookup(ENV_BODY_LIMIT)) {
            config.body_limit = parse_value(ENV_BODY_LIMIT, limit)?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// 空字符串与未设置等价
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
