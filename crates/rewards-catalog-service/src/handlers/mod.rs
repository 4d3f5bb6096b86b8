//! HTTP 处理器模块

pub mod catalog;
pub mod claim;
pub mod history;
pub mod profile;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::dto::ApiResponse;
use crate::error::RewardsError;

/// 健康检查
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// HTTP 层错误包装
///
/// 将服务层错误映射为带状态码的统一响应体
#[derive(Debug)]
pub struct ApiError(pub RewardsError);

impl From<RewardsError> for ApiError {
    fn from(err: RewardsError) -> Self {
        Self(err)
    }
}

/// 处理器 Result 类型别名
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// 返回对应的 HTTP 状态码
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            RewardsError::Validation(_) => StatusCode::BAD_REQUEST,

            RewardsError::RewardNotFoundOrInactive(_) | RewardsError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            // 业务冲突：请求合法但与当前状态冲突
            RewardsError::AlreadyClaimed { .. }
            | RewardsError::OutOfStock(_)
            | RewardsError::InsufficientPoints { .. } => StatusCode::CONFLICT,

            // 瞬时冲突已重试耗尽，提示稍后再试
            RewardsError::ConcurrencyConflict => StatusCode::SERVICE_UNAVAILABLE,

            RewardsError::Database(_)
            | RewardsError::Serialization(_)
            | RewardsError::Redis(_)
            | RewardsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self.0 {
            RewardsError::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            RewardsError::Redis(e) => {
                tracing::error!(error = %e, "Redis 操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            RewardsError::Serialization(e) => {
                tracing::error!(error = %e, "序列化失败");
                "服务内部错误，请稍后重试".to_string()
            }
            RewardsError::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse::<()>::error(self.0.error_code(), message);

        (status, Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self(RewardsError::Validation(errors.to_string()))
    }
}
