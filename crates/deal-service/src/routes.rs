//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 构建兑换相关路由
///
/// 包含用户领取、商家核销和兑换记录查询
fn redemption_routes() -> Router<AppState> {
    Router::new()
        .route("/deals/{id}/redeem", post(handlers::redemption::redeem_deal))
        .route(
            "/redemptions/{id}/validate",
            post(handlers::redemption::validate_redemption),
        )
        .route(
            "/businesses/{id}/redemptions",
            get(handlers::redemption::get_business_redemptions),
        )
}

/// 构建关注与通知偏好路由
fn follow_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/businesses/{id}/follow",
            post(handlers::follow::follow_business),
        )
        .route(
            "/businesses/{id}/follow",
            delete(handlers::follow::unfollow_business),
        )
        .route("/businesses/{id}/mute", post(handlers::follow::mute_business))
        .route(
            "/businesses/{id}/unmute",
            post(handlers::follow::unmute_business),
        )
        .route(
            "/businesses/{id}/notifications",
            put(handlers::follow::update_preferences),
        )
}

/// 构建评价路由
///
/// 包含评价 CRUD 和商家评价聚合查询
fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/businesses/{id}/reviews",
            post(handlers::review::create_review),
        )
        .route(
            "/businesses/{id}/reviews",
            get(handlers::review::get_business_reviews),
        )
        .route("/reviews/{id}", put(handlers::review::update_review))
        .route("/reviews/{id}", delete(handlers::review::delete_review))
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(redemption_routes())
        .merge(follow_routes())
        .merge(review_routes())
}
