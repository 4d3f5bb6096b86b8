//! HTTP 接口 DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{BalanceSyncRequest, CatalogQueryParams, ClaimRewardRequest, HistoryQueryParams};
pub use response::{ApiResponse, ClaimResponseDto};
