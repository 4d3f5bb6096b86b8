//! 业务服务层
//!
//! - `ClaimService`: 兑换事务处理器（核心）
//! - `CatalogQueryService`: 目录查询引擎与兑换历史

mod catalog_service;
mod claim_service;
pub mod dto;

pub use catalog_service::CatalogQueryService;
pub use claim_service::ClaimService;

use crate::repository::{ClaimRepository, ProfileRepository, RewardRepository};

/// 使用具体仓储的目录查询服务类型别名
pub type CatalogService = CatalogQueryService<RewardRepository, ProfileRepository, ClaimRepository>;
