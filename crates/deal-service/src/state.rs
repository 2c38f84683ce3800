//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::service::{FollowService, RedemptionService, ReviewService, ValidationService};

/// Axum 应用共享状态
///
/// 四个核心服务通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub redemption_service: Arc<RedemptionService>,
    pub validation_service: Arc<ValidationService>,
    pub follow_service: Arc<FollowService>,
    pub review_service: Arc<ReviewService>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        redemption_service: Arc<RedemptionService>,
        validation_service: Arc<ValidationService>,
        follow_service: Arc<FollowService>,
        review_service: Arc<ReviewService>,
    ) -> Self {
        Self {
            redemption_service,
            validation_service,
            follow_service,
            review_service,
        }
    }
}
