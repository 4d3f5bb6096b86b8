//! 兑换历史 API 处理器

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use super::{ApiError, ApiResult};
use crate::dto::{ApiResponse, HistoryQueryParams};
use crate::models::HistoryEntry;
use crate::state::AppState;

/// 查询兑换历史
///
/// GET /api/v1/rewards/history?userId=...
///
/// 按兑换时间倒序返回用户的全部兑换记录
pub async fn claim_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQueryParams>,
) -> ApiResult<Json<ApiResponse<Vec<HistoryEntry>>>> {
    params.validate().map_err(ApiError::from)?;

    let history = state.catalog_service.query_history(&params.user_id).await?;
    Ok(Json(ApiResponse::success(history)))
}
