//! 核心层：错误、响应、中间件和服务抽象

pub mod error;
pub mod middleware;
pub mod response;
pub mod service;
