//! 数据库仓储层
//!
//! 仓储按聚合划分，trait 供服务层依赖和 mock 测试，
//! `*_in_tx` 关联函数承载多步写入的事务内操作

mod business_repo;
mod deal_repo;
mod follow_repo;
mod redemption_repo;
mod review_repo;
pub mod traits;
mod user_repo;

pub use business_repo::BusinessRepository;
pub use deal_repo::DealRepository;
pub use follow_repo::FollowRepository;
pub use redemption_repo::RedemptionRepository;
pub use review_repo::ReviewRepository;
pub use traits::{
    BusinessRepositoryTrait, DealRepositoryTrait, FollowRepositoryTrait,
    RedemptionRepositoryTrait, ReviewRepositoryTrait, UserRepositoryTrait,
};
pub use user_repo::UserRepository;
