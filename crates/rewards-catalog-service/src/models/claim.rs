//! 兑换记录实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reward::RewardDefinition;

/// 兑换记录
///
/// (user_id, reward_id) 组合全局唯一——这是防重复兑换的核心不变式，
/// 由数据库唯一索引保证。记录只由兑换事务创建，永不更新或删除。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: i64,
    pub user_id: String,
    pub reward_id: Uuid,
    pub claimed_at: DateTime<Utc>,
}

/// 兑换历史条目
///
/// 兑换记录与奖品定义的连接结果，按兑换时间倒序返回。
/// 历史条目隐含「已兑换」状态，无需重新分类。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub reward: RewardDefinition,
    pub claimed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_record_serialization() {
        let reward_id = Uuid::new_v4();
        let record = ClaimRecord {
            id: 1,
            user_id: "user-123".to_string(),
            reward_id,
            claimed_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "user-123");
        assert_eq!(json["rewardId"], reward_id.to_string());
        assert!(json.get("claimedAt").is_some());
    }
}
