//! 兑换事务处理器
//!
//! 处理积分兑换奖品的核心业务逻辑，包括：
//! - 事务内重校验（防止并发下的脏判定）
//! - 余额、库存、重复兑换三项不变式
//! - 原子性扣减与兑换记录写入
//! - 瞬时故障的有界重试
//!
//! ## 兑换流程
//!
//! 1. 锁定账户行 -> 2. 锁定并重读奖品 -> 3. 重查兑换记录
//!    -> 4. 校验余额与库存 -> 5. 扣减 + 写入记录 -> 6. 提交
//!    -> 7. 缓存失效 + 余额快照更新 + 异步通知
//!
//! ## 并发控制策略
//!
//! - FOR UPDATE 行级锁：先锁账户行、再锁奖品行，固定顺序避免死锁；
//!   同一 (用户, 奖品) 的并发兑换在锁上串行化，只有一个能通过重查
//! - (user_id, reward_id) 唯一索引：竞争越过事务内检查时的兜底
//! - 序列化冲突（40001/40P01/55P03）映射为可重试错误，
//!   由有界重试策略整体重放事务

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use rewards_shared::cache::Cache;
use rewards_shared::retry::{RetryPolicy, retry_with_policy};

use crate::error::{Result, RewardsError};
use crate::models::RejectReason;
use crate::notification::NotificationSender;
use crate::profile_sync::ProfileSync;
use crate::repository::{ClaimRepository, ProfileRepository, RewardRepository};
use crate::service::dto::{ClaimOutcome, ClaimReceipt};

/// 缓存键生成
mod cache_keys {
    pub fn user_claims(user_id: &str) -> String {
        format!("user:claims:{}", user_id)
    }
}

/// 兑换事务处理器
///
/// 负责兑换的完整流程：事务内重校验、原子状态变更、
/// 提交后的缓存失效与通知发送
pub struct ClaimService {
    pool: PgPool,
    cache: Arc<Cache>,
    profile_sync: Arc<ProfileSync>,
    notification_sender: Option<Arc<NotificationSender>>,
    retry_policy: RetryPolicy,
}

impl ClaimService {
    pub fn new(pool: PgPool, cache: Arc<Cache>, profile_sync: Arc<ProfileSync>) -> Self {
        Self {
            pool,
            cache,
            profile_sync,
            notification_sender: None,
            retry_policy: RetryPolicy::transactional(),
        }
    }

    /// 注入通知发送器
    pub fn with_notification_sender(mut self, sender: Arc<NotificationSender>) -> Self {
        self.notification_sender = Some(sender);
        self
    }

    /// 兑换奖品
    ///
    /// 返回三种结果之一：
    /// - `Ok(ClaimOutcome::Success)` —— 扣减与记录写入已原子提交
    /// - `Ok(ClaimOutcome::Rejected)` —— 校验拒绝，无任何状态变更，
    ///   携带稳定原因码；对同一状态直接重试必然再次被拒
    /// - `Err(_)` —— 瞬时故障且重试耗尽，或系统错误；
    ///   调用方此时无法断定事务是否提交，应重新查询兑换状态
    #[instrument(skip(self), fields(user_id = %user_id, reward_id = %reward_id))]
    pub async fn claim(&self, user_id: &str, reward_id: Uuid) -> Result<ClaimOutcome> {
        let result = retry_with_policy(
            &self.retry_policy,
            "claim_reward",
            RewardsError::is_retryable,
            || self.execute_claim_tx(user_id, reward_id),
        )
        .await;

        match result {
            Ok(receipt) => {
                // 提交后副作用：余额快照、缓存失效、异步通知。
                // 任何一项失败都不影响已提交的兑换结果。
                self.profile_sync.apply(user_id, receipt.new_balance);
                self.invalidate_user_cache(user_id).await;

                if let Some(sender) = &self.notification_sender {
                    sender.send_claim_succeeded(user_id, &receipt.reward_title);
                }

                info!(
                    user_id = %user_id,
                    reward_id = %reward_id,
                    claim_id = receipt.claim_id,
                    new_balance = receipt.new_balance,
                    "兑换成功"
                );

                Ok(ClaimOutcome::Success {
                    claim_id: receipt.claim_id,
                    new_balance: receipt.new_balance,
                })
            }
            Err(err) => match reject_reason(&err) {
                Some(reason) => {
                    info!(
                        user_id = %user_id,
                        reward_id = %reward_id,
                        reason = reason.code(),
                        "兑换被拒绝"
                    );
                    Ok(ClaimOutcome::Rejected { reason })
                }
                None => Err(err),
            },
        }
    }

    /// 执行兑换事务（单次尝试）
    async fn execute_claim_tx(&self, user_id: &str, reward_id: Uuid) -> Result<ClaimReceipt> {
        self.run_claim_tx(user_id, reward_id)
            .await
            .map_err(|e| refine_db_error(e, user_id, reward_id))
    }

    /// 事务主体
    ///
    /// 所有校验在持锁状态下重新执行——事务外的任何预读
    /// （目录展示的状态标注）都只是参考，不作为放行依据。
    async fn run_claim_tx(&self, user_id: &str, reward_id: Uuid) -> Result<ClaimReceipt> {
        let mut tx = self.pool.begin().await?;

        // 1. 锁定账户行（固定顺序：账户先于奖品）
        let account = ProfileRepository::get_account_for_update_in_tx(&mut tx, user_id)
            .await?
            .ok_or_else(|| RewardsError::UserNotFound(user_id.to_string()))?;

        // 2. 锁定并重读奖品；缺失或已下架一律同一原因码，
        //    不向调用方泄露两者的区别
        let reward = RewardRepository::get_reward_for_update_in_tx(&mut tx, reward_id)
            .await?
            .filter(|r| r.is_active)
            .ok_or(RewardsError::RewardNotFoundOrInactive(reward_id))?;

        // 3. 重查兑换记录
        if ClaimRepository::claim_exists_in_tx(&mut tx, user_id, reward_id).await? {
            return Err(RewardsError::AlreadyClaimed {
                user_id: user_id.to_string(),
                reward_id,
            });
        }

        // 4. 校验余额与库存
        if account.points_balance < reward.points_required {
            return Err(RewardsError::InsufficientPoints {
                required: reward.points_required,
                balance: account.points_balance,
            });
        }
        if !reward.has_stock() {
            return Err(RewardsError::OutOfStock(reward_id));
        }

        // 5. 原子变更：扣减余额、扣减库存（限量奖品）、写入兑换记录
        let new_balance =
            ProfileRepository::deduct_points_in_tx(&mut tx, user_id, reward.points_required)
                .await?;

        if reward.stock_quantity.is_some() {
            let updated = RewardRepository::decrement_stock_in_tx(&mut tx, reward_id).await?;
            if updated == 0 {
                // 带条件的 UPDATE 未命中任何行：库存在锁内也已耗尽
                return Err(RewardsError::OutOfStock(reward_id));
            }
        }

        let claim = ClaimRepository::insert_claim_in_tx(&mut tx, user_id, reward_id).await?;

        // 6. 提交
        tx.commit().await?;

        Ok(ClaimReceipt {
            claim_id: claim.id,
            new_balance,
            reward_title: reward.title,
            claimed_at: claim.claimed_at,
        })
    }

    /// 使用户兑换集合缓存失效
    async fn invalidate_user_cache(&self, user_id: &str) {
        let key = cache_keys::user_claims(user_id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!(key = %key, error = %e, "缓存失效失败");
        }
    }
}

/// 将业务错误映射为兑换拒绝原因
///
/// 系统错误和瞬时错误返回 None，由调用方作为 Err 向上传播
fn reject_reason(err: &RewardsError) -> Option<RejectReason> {
    match err {
        RewardsError::AlreadyClaimed { .. } => Some(RejectReason::AlreadyClaimed),
        RewardsError::InsufficientPoints { .. } => Some(RejectReason::InsufficientPoints),
        RewardsError::OutOfStock(_) => Some(RejectReason::OutOfStock),
        RewardsError::RewardNotFoundOrInactive(_) => Some(RejectReason::RewardNotFoundOrInactive),
        // 用户不存在不属于兑换拒绝（认证边界保证用户存在），向上传播
        _ => None,
    }
}

/// 细化数据库错误
///
/// - 唯一索引冲突（23505）：并发兑换越过了事务内重查，
///   对调用方等价于「已兑换过」
/// - 序列化失败（40001）/ 死锁（40P01）/ 锁不可用（55P03）：
///   瞬时冲突，映射为可重试错误
fn refine_db_error(err: RewardsError, user_id: &str, reward_id: Uuid) -> RewardsError {
    if let RewardsError::Database(sqlx::Error::Database(ref db_err)) = err {
        match db_err.code().as_deref() {
            Some("23505") => {
                return RewardsError::AlreadyClaimed {
                    user_id: user_id.to_string(),
                    reward_id,
                };
            }
            Some("40001") | Some("40P01") | Some("55P03") => {
                return RewardsError::ConcurrencyConflict;
            }
            _ => {}
        }
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_mapping() {
        let reward_id = Uuid::new_v4();

        assert_eq!(
            reject_reason(&RewardsError::AlreadyClaimed {
                user_id: "u".to_string(),
                reward_id,
            }),
            Some(RejectReason::AlreadyClaimed)
        );
        assert_eq!(
            reject_reason(&RewardsError::InsufficientPoints {
                required: 500,
                balance: 100,
            }),
            Some(RejectReason::InsufficientPoints)
        );
        assert_eq!(
            reject_reason(&RewardsError::OutOfStock(reward_id)),
            Some(RejectReason::OutOfStock)
        );
        assert_eq!(
            reject_reason(&RewardsError::RewardNotFoundOrInactive(reward_id)),
            Some(RejectReason::RewardNotFoundOrInactive)
        );
    }

    #[test]
    fn test_unknown_user_is_not_a_rejection() {
        let reason = reject_reason(&RewardsError::UserNotFound("ghost".to_string()));
        assert_eq!(reason, None);
    }

    #[test]
    fn test_system_errors_are_not_rejections() {
        assert_eq!(reject_reason(&RewardsError::ConcurrencyConflict), None);
        assert_eq!(
            reject_reason(&RewardsError::Internal("boom".to_string())),
            None
        );
        assert_eq!(
            reject_reason(&RewardsError::Redis("down".to_string())),
            None
        );
    }

    #[test]
    fn test_refine_db_error_passes_through_non_database_errors() {
        let reward_id = Uuid::new_v4();
        let err = RewardsError::Validation("bad".to_string());
        let refined = refine_db_error(err, "user-1", reward_id);
        assert!(matches!(refined, RewardsError::Validation(_)));
    }

    #[test]
    fn test_refine_db_error_keeps_plain_sqlx_errors() {
        let reward_id = Uuid::new_v4();
        let err = RewardsError::Database(sqlx::Error::RowNotFound);
        let refined = refine_db_error(err, "user-1", reward_id);
        assert!(matches!(refined, RewardsError::Database(_)));
    }
}
