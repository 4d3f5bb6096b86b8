//! 积分商城服务错误类型
//!
//! 定义服务层的业务错误和系统错误

use thiserror::Error;
use uuid::Uuid;

/// 积分商城服务错误类型
#[derive(Debug, Error)]
pub enum RewardsError {
    // === 奖品相关错误 ===
    #[error("奖品不存在或已下架: {0}")]
    RewardNotFoundOrInactive(Uuid),

    #[error("奖品库存不足: reward_id={0}")]
    OutOfStock(Uuid),

    // === 用户相关错误 ===
    #[error("用户不存在: {0}")]
    UserNotFound(String),

    #[error("积分余额不足: 需要 {required}, 可用 {balance}")]
    InsufficientPoints { required: i64, balance: i64 },

    // === 兑换相关错误 ===
    #[error("奖品已兑换过: user_id={user_id}, reward_id={reward_id}")]
    AlreadyClaimed { user_id: String, reward_id: Uuid },

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis 错误: {0}")]
    Redis(String),

    #[error("内部错误: {0}")]
    Internal(String),

    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("并发冲突，请重试")]
    ConcurrencyConflict,
}

/// 积分商城服务 Result 类型别名
pub type Result<T> = std::result::Result<T, RewardsError>;

impl RewardsError {
    /// 检查是否为可重试的错误
    ///
    /// 可重试错误会由兑换事务的有界重试逻辑自动重新执行整个事务
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Redis(_) | Self::ConcurrencyConflict
        )
    }

    /// 检查是否为业务错误（非系统错误）
    ///
    /// 业务错误是校验拒绝，对同一状态重试必然再次失败，
    /// 调用方应先重新查询状态
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_)
                | Self::Serialization(_)
                | Self::Redis(_)
                | Self::Internal(_)
                | Self::ConcurrencyConflict
        )
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RewardNotFoundOrInactive(_) => "REWARD_NOT_FOUND_OR_INACTIVE",
            Self::OutOfStock(_) => "OUT_OF_STOCK",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::AlreadyClaimed { .. } => "ALREADY_CLAIMED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Redis(_) => "REDIS_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
        }
    }
}

impl From<rewards_shared::error::SharedError> for RewardsError {
    fn from(err: rewards_shared::error::SharedError) -> Self {
        use rewards_shared::error::SharedError;
        match err {
            SharedError::Database(e) => Self::Database(e),
            SharedError::Redis(e) => Self::Redis(e.to_string()),
            SharedError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}
