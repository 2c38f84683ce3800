//! 服务层数据传输对象
//!
//! 服务接口的请求与响应结构

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    RatingDistribution, Redemption, RedemptionStatus, RedemptionStatusSummary, Review,
};

/// 兑换结果
///
/// 兑换记录自身的 ID 即兑换码
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemDealResponse {
    pub redemption: Redemption,
    pub redemption_code: String,
}

/// 核销请求
///
/// status 缺省时按已核销处理
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRedemptionRequest {
    pub status: Option<RedemptionStatus>,
}

/// 商家侧兑换记录查询过滤
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionFilter {
    pub status: Option<RedemptionStatus>,
}

/// 商家侧兑换记录分页结果
///
/// summary 基于商家全量兑换记录统计，与 status 过滤无关
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRedemptionsDto {
    pub redemptions: Vec<Redemption>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub summary: RedemptionStatusSummary,
}

/// 创建评价请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "评分必须在 1-5 之间"))]
    pub rating: i32,
    #[validate(length(max = 2000, message = "评价内容最长 2000 字符"))]
    pub review_text: Option<String>,
}

/// 更新评价请求
///
/// 未提供的字段保持原值；仅当 rating 出现时才重算商家平均分
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "评分必须在 1-5 之间"))]
    pub rating: Option<i32>,
    #[validate(length(max = 2000, message = "评价内容最长 2000 字符"))]
    pub review_text: Option<String>,
}

/// 商家评价分页结果
///
/// average_rating 保留一位小数，distribution 基于全量 active 评价
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessReviewsDto {
    pub reviews: Vec<Review>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub average_rating: Decimal,
    pub distribution: RatingDistribution,
}

/// 通知偏好更新请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesRequest {
    pub notify_new_deals: bool,
    pub notify_flash_deals: bool,
}
