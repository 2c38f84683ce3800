//! 平台枚举类型定义
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化。
//! 状态字段统一使用封闭枚举而非自由字符串，穷尽匹配消除非法状态值。

use serde::{Deserialize, Serialize};

/// 优惠状态
///
/// 控制优惠是否可被兑换
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
pub enum DealStatus {
    /// 进行中 - 正常展示和兑换
    #[default]
    Active,
    /// 已暂停 - 商家临时下架
    Paused,
    /// 已过期 - 超过有效期
    Expired,
    /// 已售罄 - 库存耗尽
    SoldOut,
}

/// 兑换记录状态
///
/// 追踪单次兑换从创建到核销的生命周期
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedemptionStatus {
    /// 待核销 - 用户已领取，等待商家确认
    #[default]
    Pending,
    /// 已核销 - 商家已确认使用
    Validated,
    /// 已过期 - 未在有效期内使用
    Expired,
    /// 已取消 - 用户或系统取消
    Cancelled,
}

/// 关注状态
///
/// 一条 (user, business) 关注记录在关注/取关周期中复用，
/// 状态切换而非删除行
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowStatus {
    /// 关注中 - 正常接收通知
    #[default]
    Active,
    /// 已静音 - 仍在关注，但不推送通知
    Muted,
    /// 已取关 - 不再关注
    Unfollowed,
}

impl FollowStatus {
    /// 该状态是否计入商家粉丝数
    ///
    /// 静音仍算关注，只有取关才离开粉丝群体
    pub fn is_following(&self) -> bool {
        matches!(self, Self::Active | Self::Muted)
    }

    /// 状态切换对粉丝计数的增量
    ///
    /// 只有跨越 关注中/静音 与 已取关 边界的切换才触碰计数器，
    /// active <-> muted 之间切换不影响
    pub fn counter_delta(from: FollowStatus, to: FollowStatus) -> i64 {
        i64::from(to.is_following()) - i64::from(from.is_following())
    }
}

/// 评价状态
///
/// 只有 active 状态的评价参与评分聚合
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// 有效 - 正常展示并计入平均分
    #[default]
    Active,
    /// 已隐藏 - 被运营隐藏，不计入平均分
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_status_serialization() {
        assert_eq!(
            serde_json::to_string(&DealStatus::SoldOut).unwrap(),
            "\"SOLD_OUT\""
        );
        assert_eq!(
            serde_json::from_str::<DealStatus>("\"ACTIVE\"").unwrap(),
            DealStatus::Active
        );
    }

    #[test]
    fn test_redemption_status_default() {
        assert_eq!(RedemptionStatus::default(), RedemptionStatus::Pending);
    }

    #[test]
    fn test_follow_status_is_following() {
        assert!(FollowStatus::Active.is_following());
        assert!(FollowStatus::Muted.is_following());
        assert!(!FollowStatus::Unfollowed.is_following());
    }

    #[test]
    fn test_follow_counter_delta() {
        use FollowStatus::*;

        // 跨越关注边界的切换
        assert_eq!(FollowStatus::counter_delta(Unfollowed, Active), 1);
        assert_eq!(FollowStatus::counter_delta(Active, Unfollowed), -1);
        assert_eq!(FollowStatus::counter_delta(Muted, Unfollowed), -1);

        // 边界内切换不触碰计数器
        assert_eq!(FollowStatus::counter_delta(Active, Muted), 0);
        assert_eq!(FollowStatus::counter_delta(Muted, Active), 0);
        assert_eq!(FollowStatus::counter_delta(Unfollowed, Unfollowed), 0);
    }

    #[test]
    fn test_review_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReviewStatus::Hidden).unwrap(),
            "\"HIDDEN\""
        );
    }
}
