//! 奖品仓储
//!
//! 提供奖品定义的数据访问，包括目录过滤查询和事务内的加锁读取

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::traits::RewardRepositoryTrait;
use crate::error::Result;
use crate::models::{CatalogFilter, RewardDefinition};

/// 奖品仓储
///
/// 负责奖品定义的数据访问。奖品由运营侧维护，本服务只读，
/// 唯一的写入是兑换事务内的库存扣减。
pub struct RewardRepository {
    pool: PgPool,
}

impl RewardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单个奖品
    pub async fn get_reward(&self, id: Uuid) -> Result<Option<RewardDefinition>> {
        let reward = sqlx::query_as::<_, RewardDefinition>(
            r#"
            SELECT id, title, description, points_required, category, image_url,
                   is_active, stock_quantity, display_order, created_at, updated_at
            FROM rewards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reward)
    }

    /// 按过滤条件查询上架奖品
    ///
    /// search 对标题和描述做不区分大小写的子串匹配（ILIKE）；
    /// 排序固定为 display_order ASC, id ASC——第二排序键保证
    /// 相同 display_order 的奖品在翻页间顺序稳定。
    pub async fn query_catalog(&self, filter: &CatalogFilter) -> Result<Vec<RewardDefinition>> {
        let rewards = sqlx::query_as::<_, RewardDefinition>(
            r#"
            SELECT id, title, description, points_required, category, image_url,
                   is_active, stock_quantity, display_order, created_at, updated_at
            FROM rewards
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR title ILIKE '%' || $1 || '%'
                                    OR description ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
            ORDER BY display_order ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.category.as_deref())
        .bind(filter.page_size)
        .bind(filter.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rewards)
    }

    /// 统计过滤后的完整结果集大小
    ///
    /// 与 query_catalog 使用相同的过滤条件，调用方据此计算总页数
    pub async fn count_catalog(&self, filter: &CatalogFilter) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM rewards
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR title ILIKE '%' || $1 || '%'
                                    OR description ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.category.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// 列出上架奖品的全部分类
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT category FROM rewards
            WHERE is_active = TRUE
            ORDER BY category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    // ==================== 事务内操作 ====================

    /// 在事务中锁定并读取奖品行（FOR UPDATE）
    ///
    /// 兑换事务持有该锁直到提交，并发兑换同一奖品的事务在此串行化
    pub async fn get_reward_for_update_in_tx(
        tx: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<RewardDefinition>> {
        let reward = sqlx::query_as::<_, RewardDefinition>(
            r#"
            SELECT id, title, description, points_required, category, image_url,
                   is_active, stock_quantity, display_order, created_at, updated_at
            FROM rewards
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(tx)
        .await?;

        Ok(reward)
    }

    /// 在事务中扣减一件库存
    ///
    /// WHERE stock_quantity > 0 作为行锁校验之外的第二道防线，
    /// 返回实际更新的行数；0 表示库存已耗尽。
    /// 不限量奖品（stock_quantity IS NULL）不应调用此方法。
    pub async fn decrement_stock_in_tx(tx: &mut PgConnection, id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE rewards
            SET stock_quantity = stock_quantity - 1, updated_at = NOW()
            WHERE id = $1 AND stock_quantity > 0
            "#,
        )
        .bind(id)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RewardRepositoryTrait for RewardRepository {
    async fn get_reward(&self, id: Uuid) -> Result<Option<RewardDefinition>> {
        self.get_reward(id).await
    }

    async fn query_catalog(&self, filter: &CatalogFilter) -> Result<Vec<RewardDefinition>> {
        self.query_catalog(filter).await
    }

    async fn count_catalog(&self, filter: &CatalogFilter) -> Result<i64> {
        self.count_catalog(filter).await
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        self.list_categories().await
    }
}
