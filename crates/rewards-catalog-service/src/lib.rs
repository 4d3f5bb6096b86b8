//! 积分商城服务
//!
//! 提供积分兑换奖品的目录查询、兑换处理与历史查询。
//!
//! ## 核心功能
//!
//! - **资格分类**：根据余额、库存和已兑换集合计算每个奖品的兑换资格
//! - **兑换事务**：事务内重校验 + 行级锁，保证并发下余额/库存/防重
//!   三项不变式，同一 (用户, 奖品) 至多成功一次
//! - **目录查询**：搜索、分类过滤、稳定分页，结果逐个标注资格状态
//! - **兑换历史**：按兑换时间倒序的历史视图
//! - **余额同步**：接收外部推送的余额变更事件，最新推送为准
//! - **通知发送**：兑换成功后的异步通知，与事务结果完全解耦
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `eligibility`: 资格分类器（纯函数）
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层
//! - `profile_sync`: 余额同步快照
//! - `notification`: 通知服务模块
//! - `handlers` / `routes` / `state` / `dto`: HTTP 接口层

pub mod dto;
pub mod eligibility;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notification;
pub mod profile_sync;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use eligibility::classify;
pub use error::{Result, RewardsError};
pub use models::*;
pub use notification::{NotificationSender, NotificationService};
pub use profile_sync::ProfileSync;
pub use repository::{ClaimRepository, ProfileRepository, RewardRepository};
pub use service::{CatalogQueryService, CatalogService, ClaimService, dto as service_dto};
pub use state::AppState;
