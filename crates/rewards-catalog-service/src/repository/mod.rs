//! 数据库仓储层
//!
//! 封装对账本存储（PostgreSQL）三张表的访问：
//! 用户账户、奖品定义、兑换记录。

mod claim_repo;
mod profile_repo;
mod reward_repo;
mod traits;

pub use claim_repo::ClaimRepository;
pub use profile_repo::ProfileRepository;
pub use reward_repo::RewardRepository;
pub use traits::{ClaimRepositoryTrait, ProfileRepositoryTrait, RewardRepositoryTrait};

#[cfg(test)]
pub use traits::{MockClaimRepositoryTrait, MockProfileRepositoryTrait, MockRewardRepositoryTrait};
