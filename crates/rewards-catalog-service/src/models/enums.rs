//! 积分商城枚举类型定义

use serde::{Deserialize, Serialize};

/// 奖品兑换资格状态
///
/// 派生值：由分类器根据奖品、余额和已兑换集合实时计算，
/// 永不落库，每次查询重新计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityStatus {
    /// 可兑换 - 未兑换过、有库存且余额充足
    Available,
    /// 已兑换 - 该用户已兑换过此奖品
    Claimed,
    /// 积分不足 - 余额低于所需积分
    InsufficientPoints,
    /// 不可用 - 库存耗尽
    Unavailable,
}

/// 兑换拒绝原因
///
/// 校验拒绝的稳定原因码，UI 依赖它区分「已兑换过」和「积分不足」等
/// 具体提示，属于 API 契约的一部分。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// 该用户已兑换过此奖品
    AlreadyClaimed,
    /// 积分余额不足
    InsufficientPoints,
    /// 库存耗尽
    OutOfStock,
    /// 奖品不存在或已下架
    RewardNotFoundOrInactive,
}

impl RejectReason {
    /// 原因码（与 API 错误码保持一致）
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyClaimed => "ALREADY_CLAIMED",
            Self::InsufficientPoints => "INSUFFICIENT_POINTS",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::RewardNotFoundOrInactive => "REWARD_NOT_FOUND_OR_INACTIVE",
        }
    }

    /// 用户可读的拒绝说明
    pub fn message(&self) -> &'static str {
        match self {
            Self::AlreadyClaimed => "您已兑换过该奖品",
            Self::InsufficientPoints => "积分不足，无法兑换",
            Self::OutOfStock => "奖品已兑完",
            Self::RewardNotFoundOrInactive => "奖品不存在或已下架",
        }
    }
}
