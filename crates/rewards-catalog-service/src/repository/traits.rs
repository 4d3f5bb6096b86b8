//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试。
//! 事务内的加锁读写（FOR UPDATE 等）不在接口中——它们与具体事务句柄
//! 绑定，以具体仓储的静态方法形式提供。

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CatalogFilter, ClaimRecord, HistoryEntry, RewardDefinition, UserAccount};

/// 奖品仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardRepositoryTrait: Send + Sync {
    /// 获取单个奖品（不过滤上架状态）
    async fn get_reward(&self, id: Uuid) -> Result<Option<RewardDefinition>>;

    /// 按过滤条件查询上架奖品（分页窗口内的有序结果）
    async fn query_catalog(&self, filter: &CatalogFilter) -> Result<Vec<RewardDefinition>>;

    /// 统计过滤后的完整结果集大小（与分页窗口无关）
    async fn count_catalog(&self, filter: &CatalogFilter) -> Result<i64>;

    /// 列出上架奖品的全部分类
    async fn list_categories(&self) -> Result<Vec<String>>;
}

/// 用户账户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    async fn get_account(&self, user_id: &str) -> Result<Option<UserAccount>>;
}

/// 兑换记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimRepositoryTrait: Send + Sync {
    async fn get_claim(&self, user_id: &str, reward_id: Uuid) -> Result<Option<ClaimRecord>>;

    async fn list_claims_by_user(&self, user_id: &str) -> Result<Vec<ClaimRecord>>;

    /// 兑换历史：兑换记录连接奖品定义，按兑换时间倒序
    async fn list_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>>;
}
