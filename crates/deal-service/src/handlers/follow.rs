//! 关注与通知偏好 API 处理器

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::{
    dto::ApiResponse,
    error::DealError,
    handlers::caller_id,
    models::Follow,
    service::dto::NotificationPreferencesRequest,
    state::AppState,
};

/// 关注商家
///
/// POST /api/businesses/{id}/follow
pub async fn follow_business(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Follow>>, DealError> {
    let user_id = caller_id(&headers)?;
    let follow = state.follow_service.follow_business(&user_id, business_id).await?;
    Ok(Json(ApiResponse::success(follow)))
}

/// 取消关注
///
/// DELETE /api/businesses/{id}/follow
pub async fn unfollow_business(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Follow>>, DealError> {
    let user_id = caller_id(&headers)?;
    let follow = state
        .follow_service
        .unfollow_business(&user_id, business_id)
        .await?;
    Ok(Json(ApiResponse::success(follow)))
}

/// 屏蔽商家通知
///
/// POST /api/businesses/{id}/mute
pub async fn mute_business(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Follow>>, DealError> {
    let user_id = caller_id(&headers)?;
    let follow = state.follow_service.mute_business(&user_id, business_id).await?;
    Ok(Json(ApiResponse::success(follow)))
}

/// 恢复商家通知
///
/// POST /api/businesses/{id}/unmute
pub async fn unmute_business(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Follow>>, DealError> {
    let user_id = caller_id(&headers)?;
    let follow = state.follow_service.unmute_business(&user_id, business_id).await?;
    Ok(Json(ApiResponse::success(follow)))
}

/// 更新通知偏好
///
/// PUT /api/businesses/{id}/notifications
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<NotificationPreferencesRequest>,
) -> Result<Json<ApiResponse<Follow>>, DealError> {
    let user_id = caller_id(&headers)?;
    let follow = state
        .follow_service
        .update_preferences(&user_id, business_id, request)
        .await?;
    Ok(Json(ApiResponse::success(follow)))
}
