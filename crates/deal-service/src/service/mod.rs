//! 业务服务层
//!
//! 四个核心服务：优惠兑换、商家核销、关注与通知偏好、评价与评分聚合。
//! 服务依赖仓储 trait 便于 mock 测试，多步写入通过连接池开启事务

pub mod dto;
mod follow_service;
mod redemption_service;
mod review_service;
mod validation_service;

pub use follow_service::FollowService;
pub use redemption_service::RedemptionService;
pub use review_service::ReviewService;
pub use validation_service::ValidationService;
