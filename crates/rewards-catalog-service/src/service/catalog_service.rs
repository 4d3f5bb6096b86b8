//! 目录查询引擎
//!
//! 提供奖品目录的过滤、分页、状态标注查询，以及兑换历史和
//! 用户资料读取。全部只读，不加锁，允许看到轻微过期的余额与
//! 兑换集合——兑换能否放行以兑换事务内的重校验为准。
//!
//! ## 缓存策略
//!
//! - 用户兑换集合: TTL 5 分钟，兑换成功后主动失效
//! - 分类列表: TTL 30 分钟

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use rewards_shared::cache::Cache;

use crate::eligibility::classify;
use crate::error::{Result, RewardsError};
use crate::models::{CatalogFilter, ClaimRecord, HistoryEntry, UserAccount};
use crate::profile_sync::ProfileSync;
use crate::repository::{ClaimRepositoryTrait, ProfileRepositoryTrait, RewardRepositoryTrait};
use crate::service::dto::{CatalogPage, RewardView};

/// 缓存 TTL 常量（秒）
mod cache_ttl {
    pub const USER_CLAIMS: u64 = 300; // 5 min
    pub const CATEGORIES: u64 = 1800; // 30 min
}

/// 缓存键生成
mod cache_keys {
    pub fn user_claims(user_id: &str) -> String {
        format!("user:claims:{}", user_id)
    }

    pub fn categories() -> String {
        "rewards:categories".to_string()
    }
}

/// 目录查询引擎
///
/// 聚合三个仓储提供目录视图：查询结果逐个套用资格分类器，
/// 保证展示状态与兑换事务的校验规则一致
pub struct CatalogQueryService<RR, PR, CR>
where
    RR: RewardRepositoryTrait,
    PR: ProfileRepositoryTrait,
    CR: ClaimRepositoryTrait,
{
    reward_repo: Arc<RR>,
    profile_repo: Arc<PR>,
    claim_repo: Arc<CR>,
    cache: Arc<Cache>,
    profile_sync: Arc<ProfileSync>,
}

impl<RR, PR, CR> CatalogQueryService<RR, PR, CR>
where
    RR: RewardRepositoryTrait,
    PR: ProfileRepositoryTrait,
    CR: ClaimRepositoryTrait,
{
    pub fn new(
        reward_repo: Arc<RR>,
        profile_repo: Arc<PR>,
        claim_repo: Arc<CR>,
        cache: Arc<Cache>,
        profile_sync: Arc<ProfileSync>,
    ) -> Self {
        Self {
            reward_repo,
            profile_repo,
            claim_repo,
            cache,
            profile_sync,
        }
    }

    /// 带缓存的数据获取辅助方法
    ///
    /// 缓存读写失败时记录警告并降级到数据源，永不因缓存故障
    /// 向调用方返回错误
    async fn get_cached_or_fetch<T, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.cache.get::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "Cache get failed, falling back to database");
            }
        }

        let data = fetch().await?;

        if let Err(e) = self.cache.set(key, &data, ttl).await {
            warn!(key = %key, error = %e, "Cache set failed");
        }

        Ok(data)
    }

    /// 查询奖品目录
    ///
    /// 只返回上架奖品，按 display_order 升序（id 升序兜底）排列；
    /// total 为过滤后的完整结果集大小，与分页窗口无关。
    /// 每个结果按调用方当前余额和已兑换集合标注资格状态。
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn query_catalog(&self, user_id: &str, filter: &CatalogFilter) -> Result<CatalogPage> {
        validate_filter(filter)?;

        let rewards = self.reward_repo.query_catalog(filter).await?;
        let total = self.reward_repo.count_catalog(filter).await?;

        let claims = self.get_user_claims(user_id).await?;
        let balance = self.current_balance(user_id).await?;

        let claimed_ids: HashSet<Uuid> = claims.iter().map(|c| c.reward_id).collect();
        let claimed_at_map: HashMap<Uuid, chrono::DateTime<chrono::Utc>> =
            claims.iter().map(|c| (c.reward_id, c.claimed_at)).collect();

        let items: Vec<RewardView> = rewards
            .into_iter()
            .map(|reward| {
                let claim_status = classify(&reward, balance, &claimed_ids);
                let claimed_at = claimed_at_map.get(&reward.id).copied();
                RewardView {
                    reward,
                    claim_status,
                    claimed_at,
                }
            })
            .collect();

        info!(
            user_id = %user_id,
            count = items.len(),
            total = total,
            "Catalog query completed"
        );

        Ok(CatalogPage::new(items, total, filter.page, filter.page_size))
    }

    /// 查询兑换历史
    ///
    /// 按兑换时间倒序返回；每条历史隐含已兑换状态，无需重新分类
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn query_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>> {
        let history = self.claim_repo.list_history(user_id).await?;

        info!(user_id = %user_id, count = history.len(), "History query completed");
        Ok(history)
    }

    /// 读取用户资料
    ///
    /// 余额以推送快照中的最新值为准（若有），其余字段来自存储
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_profile(&self, user_id: &str) -> Result<UserAccount> {
        let mut account = self
            .profile_repo
            .get_account(user_id)
            .await?
            .ok_or_else(|| RewardsError::UserNotFound(user_id.to_string()))?;

        if let Some(balance) = self.profile_sync.current_balance(user_id) {
            account.points_balance = balance;
        }

        Ok(account)
    }

    /// 列出上架奖品的全部分类
    ///
    /// 缓存键: rewards:categories, TTL: 30min
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        let cache_key = cache_keys::categories();

        self.get_cached_or_fetch(
            &cache_key,
            Duration::from_secs(cache_ttl::CATEGORIES),
            || async { self.reward_repo.list_categories().await },
        )
        .await
    }

    /// 获取用户的兑换集合（带缓存）
    ///
    /// 缓存键: user:claims:{user_id}, TTL: 5min；兑换成功后由
    /// 兑换事务处理器主动失效
    async fn get_user_claims(&self, user_id: &str) -> Result<Vec<ClaimRecord>> {
        let cache_key = cache_keys::user_claims(user_id);
        let user_id_owned = user_id.to_string();

        self.get_cached_or_fetch(
            &cache_key,
            Duration::from_secs(cache_ttl::USER_CLAIMS),
            || async { self.claim_repo.list_claims_by_user(&user_id_owned).await },
        )
        .await
    }

    /// 获取用户当前余额
    ///
    /// 优先读取推送快照，未命中时回退存储
    async fn current_balance(&self, user_id: &str) -> Result<i64> {
        if let Some(balance) = self.profile_sync.current_balance(user_id) {
            return Ok(balance);
        }

        let account = self
            .profile_repo
            .get_account(user_id)
            .await?
            .ok_or_else(|| RewardsError::UserNotFound(user_id.to_string()))?;

        Ok(account.points_balance)
    }
}

/// 校验过滤参数
fn validate_filter(filter: &CatalogFilter) -> Result<()> {
    if filter.page < 1 {
        return Err(RewardsError::Validation(format!(
            "page 必须 >= 1, 实际: {}",
            filter.page
        )));
    }
    if filter.page_size < 1 {
        return Err(RewardsError::Validation(format!(
            "page_size 必须 > 0, 实际: {}",
            filter.page_size
        )));
    }
    Ok(())
}
