//! 评价实体与评分聚合定义

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::ReviewStatus;

/// 评价
///
/// 每个 (business, user) 对至多一条评价，唯一性在业务层显式检查。
/// is_verified_buyer 在创建时根据兑换历史计算，此后不再更新。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    /// 被评价商家 ID
    pub business_id: i64,
    /// 评价用户 ID
    pub user_id: String,
    /// 评分（1-5 整数）
    pub rating: i32,
    /// 评价内容
    #[sqlx(default)]
    pub review_text: Option<String>,
    /// 是否验证买家（创建时在该商家有至少一条兑换记录）
    pub is_verified_buyer: bool,
    /// 评价状态
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 评分有效范围
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// 检查评分是否在有效范围内
pub fn is_valid_rating(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// 五档评分分布直方图
///
/// 基于全量 active 评价统计，与分页无关
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    pub one_star: i64,
    pub two_star: i64,
    pub three_star: i64,
    pub four_star: i64,
    pub five_star: i64,
}

impl RatingDistribution {
    /// 从 (评分, 数量) 分组结果构建直方图
    ///
    /// 范围外的评分值直接忽略
    pub fn from_counts(counts: &[(i32, i64)]) -> Self {
        let mut dist = Self::default();
        for (rating, count) in counts {
            match rating {
                1 => dist.one_star = *count,
                2 => dist.two_star = *count,
                3 => dist.three_star = *count,
                4 => dist.four_star = *count,
                5 => dist.five_star = *count,
                _ => {}
            }
        }
        dist
    }
}

/// 平均分保留一位小数
pub fn round_rating(average: Decimal) -> Decimal {
    average.round_dp(1)
}
