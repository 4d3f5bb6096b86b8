//! 余额同步模块
//!
//! 接收外部推送的余额变更事件 (user_id, new_balance)，在内存中保留
//! 每个用户最新的余额快照。本服务不计算余额——除兑换事务内的临时
//! 计算外，余额始终以推送源和账本存储为准。
//!
//! 查询路径优先读取快照（展示容忍轻微过期），未命中时回退数据库；
//! 兑换事务提交后会把事务内得到的新余额写回快照，保证自身写入
//! 立即可见。

use dashmap::DashMap;
use tracing::debug;

/// 余额同步快照
///
/// 并发安全：DashMap 分段锁，推送与查询可任意交错
#[derive(Default)]
pub struct ProfileSync {
    balances: DashMap<String, i64>,
}

impl ProfileSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// 应用一条余额变更推送事件，以最新推送为准
    pub fn apply(&self, user_id: &str, new_balance: i64) {
        debug!(user_id = %user_id, new_balance, "应用余额变更事件");
        self.balances.insert(user_id.to_string(), new_balance);
    }

    /// 读取用户最新已知余额；无快照时返回 None（调用方回退数据库）
    pub fn current_balance(&self, user_id: &str) -> Option<i64> {
        self.balances.get(user_id).map(|entry| *entry.value())
    }

    /// 当前持有快照的用户数
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
