//! 兑换资格分类器
//!
//! 纯函数：根据奖品定义、用户余额和已兑换集合计算资格状态。
//! 无副作用、无 I/O，相同输入必然得到相同输出。
//!
//! ## 判定优先级（先匹配者生效，顺序是契约的一部分）
//!
//! 1. 已兑换过 -> `Claimed`
//! 2. 库存存在且 <= 0 -> `Unavailable`
//! 3. 余额 < 所需积分 -> `InsufficientPoints`
//! 4. 其余 -> `Available`
//!
//! 目录展示和兑换事务的校验都依赖这一顺序，两处必须一致：
//! 事务内的逐项校验（见 `ClaimService`）即为该顺序的持锁重放。

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{EligibilityStatus, RewardDefinition};

/// 计算用户对某个奖品的兑换资格状态
pub fn classify(
    reward: &RewardDefinition,
    balance: i64,
    claimed_ids: &HashSet<Uuid>,
) -> EligibilityStatus {
    if claimed_ids.contains(&reward.id) {
        return EligibilityStatus::Claimed;
    }
    if matches!(reward.stock_quantity, Some(q) if q <= 0) {
        return EligibilityStatus::Unavailable;
    }
    if balance < reward.points_required {
        return EligibilityStatus::InsufficientPoints;
    }
    EligibilityStatus::Available
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_reward(points_required: i64, stock: Option<i32>) -> RewardDefinition {
        RewardDefinition {
            id: Uuid::new_v4(),
            title: "测试奖品".to_string(),
            description: "测试描述".to_string(),
            points_required,
            category: "test".to_string(),
            image_url: None,
            is_active: true,
            stock_quantity: stock,
            display_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_available_when_balance_exactly_equals_required() {
        // 余额恰好等于所需积分 -> 可兑换
        let reward = create_test_reward(500, None);
        assert_eq!(
            classify(&reward, 500, &HashSet::new()),
            EligibilityStatus::Available
        );
    }

    #[test]
    fn test_insufficient_when_balance_one_short() {
        let reward = create_test_reward(500, None);
        assert_eq!(
            classify(&reward, 499, &HashSet::new()),
            EligibilityStatus::InsufficientPoints
        );
    }

    #[test]
    fn test_unavailable_when_stock_zero_regardless_of_balance() {
        // 库存为 0 时即使余额充足也不可兑换
        let reward = create_test_reward(500, Some(0));
        assert_eq!(
            classify(&reward, 10_000, &HashSet::new()),
            EligibilityStatus::Unavailable
        );
    }

    #[test]
    fn test_unlimited_stock_is_always_in_stock() {
        let reward = create_test_reward(100, None);
        assert_eq!(
            classify(&reward, 100, &HashSet::new()),
            EligibilityStatus::Available
        );
    }

    #[test]
    fn test_claimed_takes_precedence_over_everything() {
        // 已兑换状态优先于库存耗尽和积分不足
        let reward = create_test_reward(500, Some(0));
        let mut claimed = HashSet::new();
        claimed.insert(reward.id);

        assert_eq!(classify(&reward, 0, &claimed), EligibilityStatus::Claimed);
    }

    #[test]
    fn test_stock_takes_precedence_over_balance() {
        // 库存耗尽优先于积分不足
        let reward = create_test_reward(500, Some(0));
        assert_eq!(
            classify(&reward, 100, &HashSet::new()),
            EligibilityStatus::Unavailable
        );
    }

    #[test]
    fn test_other_claims_do_not_affect_status() {
        // 已兑换集合中的其他奖品不影响当前奖品的判定
        let reward = create_test_reward(100, Some(5));
        let mut claimed = HashSet::new();
        claimed.insert(Uuid::new_v4());

        assert_eq!(
            classify(&reward, 200, &claimed),
            EligibilityStatus::Available
        );
    }

    #[test]
    fn test_referential_transparency() {
        // 相同输入重复调用结果一致，与调用顺序无关
        let reward = create_test_reward(300, Some(2));
        let claimed = HashSet::new();

        let first = classify(&reward, 250, &claimed);
        let _ = classify(&reward, 999, &claimed);
        let again = classify(&reward, 250, &claimed);

        assert_eq!(first, again);
        assert_eq!(first, EligibilityStatus::InsufficientPoints);
    }

    #[test]
    fn test_zero_cost_reward_with_zero_balance() {
        // 免费奖品：0 积分也可兑换
        let reward = create_test_reward(0, None);
        assert_eq!(
            classify(&reward, 0, &HashSet::new()),
            EligibilityStatus::Available
        );
    }

    #[test]
    fn test_negative_stock_is_unavailable() {
        // 库存为负（理论上不应出现，数据库约束兜底）仍判定为不可用
        let reward = create_test_reward(100, Some(-1));
        assert_eq!(
            classify(&reward, 200, &HashSet::new()),
            EligibilityStatus::Unavailable
        );
    }
}
