//! 服务层数据传输对象

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EligibilityStatus, RejectReason, RewardDefinition};

/// 兑换结果
///
/// 校验拒绝是预期内的业务结果而非系统错误，携带稳定原因码；
/// 系统/瞬时错误走 `Err(RewardsError)` 通道。
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// 兑换成功
    Success {
        claim_id: i64,
        new_balance: i64,
    },
    /// 校验拒绝（无任何状态变更）
    Rejected { reason: RejectReason },
}

impl ClaimOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// 兑换回执（事务内部产物）
///
/// 除 API 返回所需的字段外，还携带奖品名称供通知渠道使用
#[derive(Debug, Clone)]
pub struct ClaimReceipt {
    pub claim_id: i64,
    pub new_balance: i64,
    pub reward_title: String,
    pub claimed_at: DateTime<Utc>,
}

/// 带资格状态的奖品视图
///
/// 目录查询的返回单元：奖品定义 + 按调用方余额和已兑换集合
/// 计算出的资格状态；已兑换的附带兑换时间。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardView {
    #[serde(flatten)]
    pub reward: RewardDefinition,
    pub claim_status: EligibilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
}

/// 目录分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub items: Vec<RewardView>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl CatalogPage {
    /// 创建分页结果
    pub fn new(items: Vec<RewardView>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_reward() -> RewardDefinition {
        RewardDefinition {
            id: Uuid::new_v4(),
            title: "电影票".to_string(),
            description: "任意场次电影票一张".to_string(),
            points_required: 800,
            category: "entertainment".to_string(),
            image_url: None,
            is_active: true,
            stock_quantity: Some(3),
            display_order: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_claim_outcome_is_success() {
        let outcome = ClaimOutcome::Success {
            claim_id: 1,
            new_balance: 200,
        };
        assert!(outcome.is_success());

        let outcome = ClaimOutcome::Rejected {
            reason: RejectReason::OutOfStock,
        };
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_reward_view_flattens_reward_fields() {
        let view = RewardView {
            reward: create_test_reward(),
            claim_status: EligibilityStatus::Available,
            claimed_at: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        // 奖品字段与状态字段平铺在同一层
        assert!(json.get("title").is_some());
        assert!(json.get("pointsRequired").is_some());
        assert_eq!(json["claimStatus"], "AVAILABLE");
        // 未兑换时不输出 claimedAt
        assert!(json.get("claimedAt").is_none());
    }

    #[test]
    fn test_reward_view_includes_claimed_at_when_claimed() {
        let view = RewardView {
            reward: create_test_reward(),
            claim_status: EligibilityStatus::Claimed,
            claimed_at: Some(Utc::now()),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["claimStatus"], "CLAIMED");
        assert!(json.get("claimedAt").is_some());
    }

    #[test]
    fn test_catalog_page_total_pages() {
        let page = CatalogPage::new(vec![], 15, 1, 10);
        assert_eq!(page.total_pages, 2);

        let page = CatalogPage::new(vec![], 20, 1, 10);
        assert_eq!(page.total_pages, 2);

        let page = CatalogPage::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);
    }
}
