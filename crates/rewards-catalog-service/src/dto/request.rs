//! HTTP 请求 DTO 定义

use serde::Deserialize;
use validator::Validate;

use crate::models::CatalogFilter;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// 目录查询参数
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQueryParams {
    #[validate(length(min = 1, message = "用户ID不能为空"))]
    pub user_id: String,
    /// 标题/描述子串搜索（不区分大小写）
    pub search: Option<String>,
    /// 分类精确过滤
    pub category: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "页码必须 >= 1"))]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "每页数量必须在 1-100 之间"))]
    pub page_size: i64,
}

impl CatalogQueryParams {
    /// 转换为服务层过滤条件
    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            search: self.search.clone().filter(|s| !s.is_empty()),
            category: self.category.clone().filter(|s| !s.is_empty()),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// 兑换请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardRequest {
    #[validate(length(min = 1, message = "用户ID不能为空"))]
    pub user_id: String,
}

/// 兑换历史查询参数
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQueryParams {
    #[validate(length(min = 1, message = "用户ID不能为空"))]
    pub user_id: String,
}

/// 余额变更推送事件
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSyncRequest {
    #[validate(length(min = 1, message = "用户ID不能为空"))]
    pub user_id: String,
    #[validate(range(min = 0, message = "余额不能为负"))]
    pub new_balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_params_defaults() {
        let params: CatalogQueryParams =
            serde_json::from_value(serde_json::json!({"userId": "user-1"})).unwrap();

        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_catalog_params_validation() {
        let params: CatalogQueryParams = serde_json::from_value(
            serde_json::json!({"userId": "user-1", "page": 0}),
        )
        .unwrap();
        assert!(params.validate().is_err());

        let params: CatalogQueryParams = serde_json::from_value(
            serde_json::json!({"userId": "", "page": 1}),
        )
        .unwrap();
        assert!(params.validate().is_err());

        let params: CatalogQueryParams = serde_json::from_value(
            serde_json::json!({"userId": "user-1", "pageSize": 500}),
        )
        .unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_catalog_params_filter_drops_empty_strings() {
        let params: CatalogQueryParams = serde_json::from_value(serde_json::json!({
            "userId": "user-1",
            "search": "",
            "category": "gift-card"
        }))
        .unwrap();

        let filter = params.filter();
        assert_eq!(filter.search, None);
        assert_eq!(filter.category, Some("gift-card".to_string()));
    }

    #[test]
    fn test_balance_sync_rejects_negative() {
        let request: BalanceSyncRequest = serde_json::from_value(serde_json::json!({
            "userId": "user-1",
            "newBalance": -5
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
