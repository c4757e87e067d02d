use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use users_api::infrastructure::logger::Logger;
use users_api::{build_app, AppConfig, InMemoryUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("加载配置失败")?;
    Logger::init(&config.log_filter);

    info!("启动用户 API 服务器...");

    let addr = config.socket_addr()?;
    let store = Arc::new(InMemoryUserStore::new());
    let app = build_app(store, &config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到地址 {addr}"))?;

    info!("🚀 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/users      - 获取所有用户");
    info!("   POST   /api/users      - 创建新用户");
    info!("   GET    /api/users/{{id}} - 获取特定用户");
    info!("   PUT    /api/users/{{id}} - 更新用户");
    info!("   DELETE /api/users/{{id}} - 删除用户");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl-C 信号: {}", err);
        std::future::pending::<()>().await;
    }
}
