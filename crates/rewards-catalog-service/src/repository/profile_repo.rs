//! 用户账户仓储
//!
//! 提供用户积分账户的数据访问和事务内的余额扣减

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::ProfileRepositoryTrait;
use crate::error::Result;
use crate::models::UserAccount;

/// 用户账户仓储
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取用户账户
    pub async fn get_account(&self, user_id: &str) -> Result<Option<UserAccount>> {
        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, points_balance, display_name, created_at, updated_at
            FROM user_profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    // ==================== 事务内操作 ====================

    /// 在事务中锁定并读取用户账户行（FOR UPDATE）
    ///
    /// 兑换事务先锁账户行再锁奖品行，固定加锁顺序避免死锁
    pub async fn get_account_for_update_in_tx(
        tx: &mut PgConnection,
        user_id: &str,
    ) -> Result<Option<UserAccount>> {
        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, points_balance, display_name, created_at, updated_at
            FROM user_profiles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(tx)
        .await?;

        Ok(account)
    }

    /// 在事务中扣减积分，返回扣减后的余额
    ///
    /// 调用方必须已在同一事务中完成余额校验；
    /// points_balance 上的 CHECK 约束是最后的兜底。
    pub async fn deduct_points_in_tx(
        tx: &mut PgConnection,
        user_id: &str,
        amount: i64,
    ) -> Result<i64> {
        let new_balance: i64 = sqlx::query_scalar(
            r#"
            UPDATE user_profiles
            SET points_balance = points_balance - $2, updated_at = NOW()
            WHERE id = $1
            RETURNING points_balance
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(tx)
        .await?;

        Ok(new_balance)
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn get_account(&self, user_id: &str) -> Result<Option<UserAccount>> {
        self.get_account(user_id).await
    }
}
