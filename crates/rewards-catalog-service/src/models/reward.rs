//! 奖品实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 奖品定义
///
/// 商城中可被积分兑换的奖品。由运营侧维护，对本服务只读。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RewardDefinition {
    pub id: Uuid,
    /// 奖品名称
    pub title: String,
    /// 奖品描述
    pub description: String,
    /// 兑换所需积分（非负）
    pub points_required: i64,
    /// 分类标签
    pub category: String,
    /// 奖品图片
    #[sqlx(default)]
    pub image_url: Option<String>,
    /// 是否上架（下架奖品不出现在任何目录查询中）
    pub is_active: bool,
    /// 剩余库存（NULL 表示不限量）
    #[sqlx(default)]
    pub stock_quantity: Option<i32>,
    /// 目录展示顺序
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RewardDefinition {
    /// 检查是否有库存
    pub fn has_stock(&self) -> bool {
        match self.stock_quantity {
            Some(remaining) => remaining > 0,
            None => true, // 不限量
        }
    }
}

/// 目录查询过滤条件
///
/// search 对标题和描述做不区分大小写的子串匹配；
/// category 为精确匹配；分页从第 1 页起算。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            page: 1,
            page_size: 20,
        }
    }
}

impl CatalogFilter {
    /// 计算查询偏移量
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_reward() -> RewardDefinition {
        RewardDefinition {
            id: Uuid::new_v4(),
            title: "咖啡礼品卡".to_string(),
            description: "价值 50 元的咖啡礼品卡".to_string(),
            points_required: 500,
            category: "gift-card".to_string(),
            image_url: None,
            is_active: true,
            stock_quantity: Some(10),
            display_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reward_has_stock() {
        let mut reward = create_test_reward();

        // 有库存
        reward.stock_quantity = Some(5);
        assert!(reward.has_stock());

        // 无库存
        reward.stock_quantity = Some(0);
        assert!(!reward.has_stock());

        // 不限量
        reward.stock_quantity = None;
        assert!(reward.has_stock());
    }

    #[test]
    fn test_catalog_filter_offset() {
        let filter = CatalogFilter {
            page: 1,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 0);

        let filter = CatalogFilter {
            page: 3,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 20);

        // page 越界保护：0 或负数按第 1 页处理
        let filter = CatalogFilter {
            page: 0,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_reward_serialization_camel_case() {
        let reward = create_test_reward();
        let json = serde_json::to_value(&reward).unwrap();
        assert!(json.get("pointsRequired").is_some());
        assert!(json.get("stockQuantity").is_some());
        assert!(json.get("displayOrder").is_some());
    }
}
