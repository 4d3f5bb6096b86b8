//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// 构建目录与兑换相关的路由
pub fn rewards_routes() -> Router<AppState> {
    Router::new()
        .route("/rewards", get(handlers::catalog::list_rewards))
        .route(
            "/rewards/categories",
            get(handlers::catalog::list_categories),
        )
        .route("/rewards/history", get(handlers::history::claim_history))
        .route(
            "/rewards/{id}/claim",
            post(handlers::claim::claim_reward),
        )
}

/// 构建用户资料相关的路由
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile/{user_id}", get(handlers::profile::get_profile))
        .route("/profile/sync", post(handlers::profile::sync_balance))
}

/// 构建完整应用路由
pub fn build_router(state: AppState) -> Router {
    let api = Router::new().merge(rewards_routes()).merge(profile_routes());

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
