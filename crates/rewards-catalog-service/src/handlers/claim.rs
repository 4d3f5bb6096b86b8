//! 兑换 API 处理器

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;
use validator::Validate;

use super::{ApiError, ApiResult};
use crate::dto::{ApiResponse, ClaimResponseDto, ClaimRewardRequest};
use crate::models::RejectReason;
use crate::service::dto::ClaimOutcome;
use crate::state::AppState;

/// 兑换奖品
///
/// POST /api/v1/rewards/{id}/claim
///
/// 成功返回 200 与新余额/兑换记录 ID；校验拒绝返回 404/409，
/// 响应体携带稳定原因码供前端区分具体提示。
pub async fn claim_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<Uuid>,
    Json(request): Json<ClaimRewardRequest>,
) -> ApiResult<Response> {
    request.validate().map_err(ApiError::from)?;

    let outcome = state.claim_service.claim(&request.user_id, reward_id).await?;

    let response = match outcome {
        ClaimOutcome::Success {
            claim_id,
            new_balance,
        } => {
            let dto = ClaimResponseDto {
                claim_id,
                new_balance,
            };
            (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
        }
        ClaimOutcome::Rejected { reason } => {
            let status = match reason {
                RejectReason::RewardNotFoundOrInactive => StatusCode::NOT_FOUND,
                _ => StatusCode::CONFLICT,
            };
            let body = ApiResponse::<()>::error(reason.code(), reason.message());
            (status, Json(body)).into_response()
        }
    };

    Ok(response)
}
