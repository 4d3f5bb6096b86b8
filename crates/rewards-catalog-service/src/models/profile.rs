//! 用户账户实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户账户
///
/// 积分余额只会被兑换事务和外部积分获取事件调整，
/// 不变式：余额永不为负（由数据库 CHECK 约束和事务内校验双重保证）。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    /// 当前积分余额
    pub points_balance: i64,
    /// 展示名称
    #[sqlx(default)]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
