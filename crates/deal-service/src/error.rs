//! 优惠服务错误类型
//!
//! 定义服务层的业务错误和系统错误，并给出 HTTP 状态码映射：
//! 资源不存在 404，状态/参数不合法 400，所有权校验失败 403，业务冲突 409。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::models::DealStatus;

/// 优惠服务错误类型
#[derive(Debug, Error)]
pub enum DealError {
    // === 资源不存在 ===
    #[error("优惠不存在: {0}")]
    DealNotFound(i64),

    #[error("用户不存在: {0}")]
    UserNotFound(String),

    #[error("商家不存在: {0}")]
    BusinessNotFound(i64),

    #[error("无效的兑换码: {0}")]
    RedemptionNotFound(i64),

    #[error("评价不存在: {0}")]
    ReviewNotFound(i64),

    #[error("未关注该商家: business_id={business_id}, user_id={user_id}")]
    FollowNotFound { user_id: String, business_id: i64 },

    // === 状态不合法 ===
    #[error("优惠不可兑换: deal_id={deal_id}, status={status:?}")]
    DealNotActive { deal_id: i64, status: DealStatus },

    #[error("优惠尚未开始: {0}")]
    DealNotStarted(i64),

    #[error("优惠已过期: {0}")]
    DealExpired(i64),

    #[error("优惠已售罄: {0}")]
    DealSoldOut(i64),

    #[error("兑换已核销，不能重复核销: {0}")]
    AlreadyValidated(i64),

    #[error("不能关注自己的商家: {0}")]
    SelfFollow(i64),

    #[error("当前未在关注状态: business_id={0}")]
    NotFollowing(i64),

    // === 业务冲突 ===
    #[error("已关注该商家: {0}")]
    AlreadyFollowing(i64),

    #[error("已评价过该商家: {0}")]
    AlreadyReviewed(i64),

    #[error("已达到单用户兑换上限: deal_id={deal_id}, limit={limit}")]
    RedemptionLimitReached { deal_id: i64, limit: i32 },

    // === 权限错误 ===
    #[error("无权操作该商家的数据: business_id={business_id}")]
    NotBusinessOwner { business_id: i64 },

    #[error("只能修改自己的评价: review_id={0}")]
    NotReviewAuthor(i64),

    #[error("缺少调用者身份: {0}")]
    Unauthorized(String),

    // === 系统错误 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 优惠服务 Result 类型别名
pub type Result<T> = std::result::Result<T, DealError>;

impl DealError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DealNotFound(_)
            | Self::UserNotFound(_)
            | Self::BusinessNotFound(_)
            | Self::RedemptionNotFound(_)
            | Self::ReviewNotFound(_)
            | Self::FollowNotFound { .. } => StatusCode::NOT_FOUND,

            // 自关注是业务规则违例而非授权问题，按 400 处理
            Self::DealNotActive { .. }
            | Self::DealNotStarted(_)
            | Self::DealExpired(_)
            | Self::DealSoldOut(_)
            | Self::AlreadyValidated(_)
            | Self::SelfFollow(_)
            | Self::NotFollowing(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::AlreadyFollowing(_)
            | Self::AlreadyReviewed(_)
            | Self::RedemptionLimitReached { .. } => StatusCode::CONFLICT,

            Self::NotBusinessOwner { .. } | Self::NotReviewAuthor(_) => StatusCode::FORBIDDEN,

            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DealNotFound(_) => "DEAL_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::BusinessNotFound(_) => "BUSINESS_NOT_FOUND",
            Self::RedemptionNotFound(_) => "REDEMPTION_NOT_FOUND",
            Self::ReviewNotFound(_) => "REVIEW_NOT_FOUND",
            Self::FollowNotFound { .. } => "FOLLOW_NOT_FOUND",
            Self::DealNotActive { .. } => "DEAL_NOT_ACTIVE",
            Self::DealNotStarted(_) => "DEAL_NOT_STARTED",
            Self::DealExpired(_) => "DEAL_EXPIRED",
            Self::DealSoldOut(_) => "DEAL_SOLD_OUT",
            Self::AlreadyValidated(_) => "ALREADY_VALIDATED",
            Self::SelfFollow(_) => "SELF_FOLLOW",
            Self::NotFollowing(_) => "NOT_FOLLOWING",
            Self::AlreadyFollowing(_) => "ALREADY_FOLLOWING",
            Self::AlreadyReviewed(_) => "ALREADY_REVIEWED",
            Self::RedemptionLimitReached { .. } => "REDEMPTION_LIMIT_REACHED",
            Self::NotBusinessOwner { .. } => "NOT_BUSINESS_OWNER",
            Self::NotReviewAuthor(_) => "NOT_REVIEW_AUTHOR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

impl IntoResponse for DealError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for DealError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
