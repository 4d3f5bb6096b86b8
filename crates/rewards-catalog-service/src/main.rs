//! 积分商城服务入口
//!
//! 提供奖品目录查询、积分兑换、兑换历史等功能的 HTTP 服务入口。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::info;

use rewards_shared::{cache::Cache, config::AppConfig, database::Database, observability};

use rewards_catalog::{
    notification::{NotificationSender, NotificationService},
    profile_sync::ProfileSync,
    repository::{ClaimRepository, ProfileRepository, RewardRepository},
    routes,
    service::{CatalogQueryService, ClaimService},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 统一加载配置
    let config = AppConfig::load("rewards-catalog-service").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    // 2. 初始化日志
    let obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    observability::init(&obs_config)?;

    info!("Starting rewards-catalog-service...");
    info!(environment = %config.environment, "Configuration loaded");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid server address");

    // 3. 初始化数据库连接并执行迁移
    let db = Database::connect(&config.database).await?;
    db.run_migrations().await?;
    let pool = db.pool().clone();
    info!("Database connection established");

    // 4. 初始化 Redis 缓存
    let cache = Arc::new(Cache::new(&config.redis)?);
    // 验证 Redis 连接
    cache.health_check().await?;
    info!("Redis connection established");

    // 5. 创建仓储
    let reward_repo = Arc::new(RewardRepository::new(pool.clone()));
    let profile_repo = Arc::new(ProfileRepository::new(pool.clone()));
    let claim_repo = Arc::new(ClaimRepository::new(pool.clone()));
    info!("Repositories initialized");

    // 6. 创建服务
    let profile_sync = Arc::new(ProfileSync::new());

    let catalog_service = Arc::new(CatalogQueryService::new(
        reward_repo,
        profile_repo,
        claim_repo,
        cache.clone(),
        profile_sync.clone(),
    ));

    // 6.1 初始化通知服务
    let notification_service = Arc::new(NotificationService::with_defaults());
    let notification_sender = Arc::new(NotificationSender::new(notification_service));
    info!("Notification service initialized");

    let claim_service = Arc::new(
        ClaimService::new(pool.clone(), cache.clone(), profile_sync.clone())
            .with_notification_sender(notification_sender),
    );

    info!("Services initialized");

    // 7. 构建路由并启动 HTTP 服务
    let state = AppState::new(catalog_service, claim_service, profile_sync);
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
///
/// 监听 Ctrl+C 和 SIGTERM 信号，用于 Kubernetes 优雅关闭
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
