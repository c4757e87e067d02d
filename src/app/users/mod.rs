//! 用户管理：模型、存储服务和路由处理器

pub mod handler;
pub mod model;
pub mod service;
