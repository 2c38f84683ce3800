//! 兑换相关 API 处理器
//!
//! 用户领取优惠、商家核销与兑换记录查询

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::{
    dto::{ApiResponse, PaginationParams},
    error::DealError,
    handlers::caller_id,
    models::Redemption,
    service::dto::{
        BusinessRedemptionsDto, RedeemDealResponse, RedemptionFilter, ValidateRedemptionRequest,
    },
    state::AppState,
};

/// 领取优惠
///
/// POST /api/deals/{id}/redeem
pub async fn redeem_deal(
    State(state): State<AppState>,
    Path(deal_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<RedeemDealResponse>>, DealError> {
    let user_id = caller_id(&headers)?;
    let response = state.redemption_service.redeem_deal(&user_id, deal_id).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// 核销兑换记录
///
/// POST /api/redemptions/{id}/validate
pub async fn validate_redemption(
    State(state): State<AppState>,
    Path(redemption_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<ValidateRedemptionRequest>,
) -> Result<Json<ApiResponse<Redemption>>, DealError> {
    let validator_id = caller_id(&headers)?;
    let redemption = state
        .validation_service
        .validate_redemption(&validator_id, redemption_id, request)
        .await?;
    Ok(Json(ApiResponse::success(redemption)))
}

/// 商家侧查询兑换记录
///
/// GET /api/businesses/{id}/redemptions
pub async fn get_business_redemptions(
    State(state): State<AppState>,
    Path(business_id): Path<i64>,
    headers: HeaderMap,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<RedemptionFilter>,
) -> Result<Json<ApiResponse<BusinessRedemptionsDto>>, DealError> {
    let owner_id = caller_id(&headers)?;
    let result = state
        .validation_service
        .get_business_redemptions(
            &owner_id,
            business_id,
            filter,
            pagination.page(),
            pagination.limit(),
        )
        .await?;
    Ok(Json(ApiResponse::success(result)))
}
