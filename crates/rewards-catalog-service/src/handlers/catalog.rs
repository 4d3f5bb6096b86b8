//! 目录查询 API 处理器

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use super::{ApiResult, ApiError};
use crate::dto::{ApiResponse, CatalogQueryParams};
use crate::service::dto::CatalogPage;
use crate::state::AppState;

/// 查询奖品目录
///
/// GET /api/v1/rewards?userId=...&search=...&category=...&page=1&pageSize=20
pub async fn list_rewards(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> ApiResult<Json<ApiResponse<CatalogPage>>> {
    params.validate().map_err(ApiError::from)?;

    let filter = params.filter();
    let page = state
        .catalog_service
        .query_catalog(&params.user_id, &filter)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

/// 列出全部奖品分类
///
/// GET /api/v1/rewards/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<String>>>> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(Json(ApiResponse::success(categories)))
}
