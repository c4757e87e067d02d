//! 日志基础设施

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// 安装全局日志订阅器，过滤规则无效时退回 `info`
    pub fn init(filter: &str) {
        let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
        {
            debug!("日志订阅器已存在，跳过初始化: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        Logger::init("debug");
        Logger::init("not a [valid filter");
    }
}
