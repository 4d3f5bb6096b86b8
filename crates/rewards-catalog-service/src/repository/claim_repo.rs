//! 兑换记录仓储
//!
//! 提供兑换记录的数据访问。记录只增不改：插入发生在兑换事务内，
//! 其余全部是只读查询。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::traits::ClaimRepositoryTrait;
use crate::error::Result;
use crate::models::{ClaimRecord, HistoryEntry, RewardDefinition};

/// 兑换历史行（用于连接查询的扁平映射）
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    title: String,
    description: String,
    points_required: i64,
    category: String,
    image_url: Option<String>,
    is_active: bool,
    stock_quantity: Option<i32>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    claimed_at: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            reward: RewardDefinition {
                id: row.id,
                title: row.title,
                description: row.description,
                points_required: row.points_required,
                category: row.category,
                image_url: row.image_url,
                is_active: row.is_active,
                stock_quantity: row.stock_quantity,
                display_order: row.display_order,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            claimed_at: row.claimed_at,
        }
    }
}

/// 兑换记录仓储
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 查询用户对某个奖品的兑换记录
    pub async fn get_claim(&self, user_id: &str, reward_id: Uuid) -> Result<Option<ClaimRecord>> {
        let claim = sqlx::query_as::<_, ClaimRecord>(
            r#"
            SELECT id, user_id, reward_id, claimed_at
            FROM reward_claims
            WHERE user_id = $1 AND reward_id = $2
            "#,
        )
        .bind(user_id)
        .bind(reward_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(claim)
    }

    /// 列出用户的全部兑换记录
    pub async fn list_claims_by_user(&self, user_id: &str) -> Result<Vec<ClaimRecord>> {
        let claims = sqlx::query_as::<_, ClaimRecord>(
            r#"
            SELECT id, user_id, reward_id, claimed_at
            FROM reward_claims
            WHERE user_id = $1
            ORDER BY claimed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(claims)
    }

    /// 查询兑换历史（连接奖品定义，按兑换时间倒序）
    pub async fn list_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT r.id, r.title, r.description, r.points_required, r.category,
                   r.image_url, r.is_active, r.stock_quantity, r.display_order,
                   r.created_at, r.updated_at, c.claimed_at
            FROM reward_claims c
            JOIN rewards r ON r.id = c.reward_id
            WHERE c.user_id = $1
            ORDER BY c.claimed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    // ==================== 事务内操作 ====================

    /// 在事务中检查兑换记录是否存在
    ///
    /// 事务内的重查是强制的：调用方缓存的状态只是参考，
    /// 并发场景下可能已经过期。
    pub async fn claim_exists_in_tx(
        tx: &mut PgConnection,
        user_id: &str,
        reward_id: Uuid,
    ) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reward_claims
                WHERE user_id = $1 AND reward_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(reward_id)
        .fetch_one(tx)
        .await?;

        Ok(exists)
    }

    /// 在事务中插入兑换记录
    ///
    /// (user_id, reward_id) 上的唯一索引兜底防重复——
    /// 竞争越过事务内检查时，这里以唯一冲突失败。
    pub async fn insert_claim_in_tx(
        tx: &mut PgConnection,
        user_id: &str,
        reward_id: Uuid,
    ) -> Result<ClaimRecord> {
        let claim = sqlx::query_as::<_, ClaimRecord>(
            r#"
            INSERT INTO reward_claims (user_id, reward_id, claimed_at)
            VALUES ($1, $2, NOW())
            RETURNING id, user_id, reward_id, claimed_at
            "#,
        )
        .bind(user_id)
        .bind(reward_id)
        .fetch_one(tx)
        .await?;

        Ok(claim)
    }
}

#[async_trait]
impl ClaimRepositoryTrait for ClaimRepository {
    async fn get_claim(&self, user_id: &str, reward_id: Uuid) -> Result<Option<ClaimRecord>> {
        self.get_claim(user_id, reward_id).await
    }

    async fn list_claims_by_user(&self, user_id: &str) -> Result<Vec<ClaimRecord>> {
        self.list_claims_by_user(user_id).await
    }

    async fn list_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>> {
        self.list_history(user_id).await
    }
}
