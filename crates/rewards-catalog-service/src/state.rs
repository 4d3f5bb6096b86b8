//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::profile_sync::ProfileSync;
use crate::service::{CatalogService, ClaimService};

/// Axum 应用共享状态
///
/// 通过 Arc 在 handler 间共享各业务服务
#[derive(Clone)]
pub struct AppState {
    /// 目录查询引擎
    pub catalog_service: Arc<CatalogService>,
    /// 兑换事务处理器
    pub claim_service: Arc<ClaimService>,
    /// 余额同步快照
    pub profile_sync: Arc<ProfileSync>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        catalog_service: Arc<CatalogService>,
        claim_service: Arc<ClaimService>,
        profile_sync: Arc<ProfileSync>,
    ) -> Self {
        Self {
            catalog_service,
            claim_service,
            profile_sync,
        }
    }
}
