//! 领域模型模块
//!
//! 定义平台核心实体与枚举类型

mod business;
mod deal;
mod enums;
mod follow;
mod redemption;
mod review;
mod user;

pub use business::Business;
pub use deal::Deal;
pub use enums::{DealStatus, FollowStatus, RedemptionStatus, ReviewStatus};
pub use follow::Follow;
pub use redemption::{Redemption, RedemptionStatusSummary};
pub use review::{
    MAX_RATING, MIN_RATING, RatingDistribution, Review, is_valid_rating, round_rating,
};
pub use user::User;
