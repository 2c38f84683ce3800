//! REST API 处理器
//!
//! 调用方身份由上游网关通过 x-user-id 请求头传入

pub mod follow;
pub mod redemption;
pub mod review;

use axum::http::HeaderMap;

use crate::error::{DealError, Result};

/// 调用方身份请求头
pub const USER_ID_HEADER: &str = "x-user-id";

/// 从请求头提取调用方用户 ID
///
/// 缺失或非 ASCII 时拒绝请求
pub fn caller_id(headers: &HeaderMap) -> Result<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| DealError::Unauthorized("缺少调用方身份".to_string()))
}
