//! 评价 API 处理器

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::{
    dto::{ApiResponse, PaginationParams},
    error::DealError,
    handlers::caller_id,
    models::Review,
    service::dto::{BusinessReviewsDto, CreateReviewRequest, UpdateReviewRequest},
    state::AppState,
};

/// 创建评价
///
/// POST /api/businesses/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<ApiResponse<Review>>, DealError> {
    let user_id = caller_id(&headers)?;
    let review = state
        .review_service
        .create_review(&user_id, business_id, request)
        .await?;
    Ok(Json(ApiResponse::success(review)))
}

/// 查询商家评价
///
/// GET /api/businesses/{id}/reviews
pub async fn get_business_reviews(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<BusinessReviewsDto>>, DealError> {
    let result = state
        .review_service
        .get_business_reviews(business_id, pagination.page(), pagination.limit())
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// 更新评价
///
/// PUT /api/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<Review>>, DealError> {
    let user_id = caller_id(&headers)?;
    let review = state
        .review_service
        .update_review(&user_id, review_id, request)
        .await?;
    Ok(Json(ApiResponse::success(review)))
}

/// 删除评价
///
/// DELETE /api/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, DealError> {
    let user_id = caller_id(&headers)?;
    state.review_service.delete_review(&user_id, review_id).await?;
    Ok(Json(ApiResponse::<()>::success_empty()))
}
