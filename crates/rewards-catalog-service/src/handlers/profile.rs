//! 用户资料 API 处理器

use axum::Json;
use axum::extract::{Path, State};
use tracing::info;
use validator::Validate;

use super::{ApiError, ApiResult};
use crate::dto::{ApiResponse, BalanceSyncRequest};
use crate::models::UserAccount;
use crate::state::AppState;

/// 读取用户资料
///
/// GET /api/v1/profile/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserAccount>>> {
    let profile = state.catalog_service.get_profile(&user_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// 余额变更推送
///
/// POST /api/v1/profile/sync
///
/// 接收外部积分系统推送的余额变更事件，以最新推送为准
pub async fn sync_balance(
    State(state): State<AppState>,
    Json(request): Json<BalanceSyncRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    request.validate().map_err(ApiError::from)?;

    state
        .profile_sync
        .apply(&request.user_id, request.new_balance);

    info!(
        user_id = %request.user_id,
        new_balance = request.new_balance,
        "余额变更事件已应用"
    );

    Ok(Json(ApiResponse::<()>::success_empty()))
}
