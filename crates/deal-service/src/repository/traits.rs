//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{
    Business, Deal, Follow, FollowStatus, Redemption, RedemptionStatus, Review, User,
};

/// 优惠仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealRepositoryTrait: Send + Sync {
    async fn get_deal(&self, id: i64) -> Result<Option<Deal>>;
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
}

/// 商家仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessRepositoryTrait: Send + Sync {
    async fn get_business(&self, id: i64) -> Result<Option<Business>>;
}

/// 兑换仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionRepositoryTrait: Send + Sync {
    async fn get_redemption(&self, id: i64) -> Result<Option<Redemption>>;

    /// 统计用户对某优惠的兑换次数（用于单用户限领检查）
    async fn count_user_deal_redemptions(&self, user_id: &str, deal_id: i64) -> Result<i64>;

    /// 统计用户在某商家的兑换次数（用于验证买家判断）
    async fn count_user_business_redemptions(&self, user_id: &str, business_id: i64)
    -> Result<i64>;

    /// 更新兑换状态并记录核销人和核销时间
    async fn update_status(
        &self,
        id: i64,
        status: RedemptionStatus,
        validated_by: &str,
        validated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// 分页列出商家的兑换记录，可按状态过滤
    async fn list_by_business(
        &self,
        business_id: i64,
        status: Option<RedemptionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Redemption>>;

    async fn count_by_business(
        &self,
        business_id: i64,
        status: Option<RedemptionStatus>,
    ) -> Result<i64>;

    /// 商家全量兑换记录按状态分组计数（与分页过滤无关）
    async fn group_by_status(&self, business_id: i64) -> Result<Vec<(RedemptionStatus, i64)>>;
}

/// 关注仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepositoryTrait: Send + Sync {
    async fn find_follow(&self, user_id: &str, business_id: i64) -> Result<Option<Follow>>;

    /// 更新关注状态（不联动粉丝计数，用于 active <-> muted 切换）
    async fn update_status(&self, id: i64, status: FollowStatus) -> Result<()>;

    async fn update_preferences(
        &self,
        id: i64,
        notify_new_deals: bool,
        notify_flash_deals: bool,
    ) -> Result<()>;
}

/// 评价仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepositoryTrait: Send + Sync {
    async fn get_review(&self, id: i64) -> Result<Option<Review>>;

    async fn find_by_user_and_business(
        &self,
        user_id: &str,
        business_id: i64,
    ) -> Result<Option<Review>>;

    async fn list_active_by_business(
        &self,
        business_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>>;

    async fn count_active(&self, business_id: i64) -> Result<i64>;

    /// active 评价的平均评分，无评价时为 None
    async fn average_active_rating(&self, business_id: i64) -> Result<Option<Decimal>>;

    /// active 评价按评分值分组计数
    async fn rating_distribution(&self, business_id: i64) -> Result<Vec<(i32, i64)>>;
}
