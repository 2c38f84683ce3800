//! 关注关系实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::FollowStatus;

/// 关注关系
///
/// 每个 (user, business) 对至多一行，关注/取关周期内复用同一行。
/// 商家的 follower_count 由每次跨越关注边界的状态切换同步维护。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: i64,
    /// 关注用户 ID
    pub user_id: String,
    /// 被关注商家 ID
    pub business_id: i64,
    /// 关注状态
    pub status: FollowStatus,
    /// 是否推送新优惠通知
    pub notify_new_deals: bool,
    /// 是否推送限时抢购通知
    pub notify_flash_deals: bool,
    /// 首次关注时间
    pub followed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Follow {
    /// 该记录当前是否计入粉丝数
    pub fn is_following(&self) -> bool {
        self.status.is_following()
    }
}
