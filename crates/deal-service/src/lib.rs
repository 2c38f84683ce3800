//! 本地优惠平台核心服务
//!
//! 提供优惠兑换、商家核销、关注通知偏好、评价评分等 REST API。
//!
//! ## 核心功能
//!
//! - **优惠兑换**：用户领取优惠，含状态/时间窗/库存/限领校验与价格快照
//! - **商家核销**：商家拥有者核销兑换码，查询兑换记录与状态汇总
//! - **关注管理**：关注/取关/屏蔽商家，维护粉丝计数与通知偏好
//! - **评价聚合**：评价 CRUD，商家平均分与评分分布的一致性维护
//!
//! ## 模块结构
//!
//! - `models`: 领域实体与状态枚举
//! - `repository`: 数据库仓储层，含事务内操作
//! - `service`: 业务服务层
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `dto`: 通用响应与分页参数
//! - `error`: 错误类型定义
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据库：sqlx (PostgreSQL)
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

// 重新导出核心类型
pub use dto::{ApiResponse, PaginationParams};
pub use error::{DealError, Result};
pub use models::{
    Business, Deal, DealStatus, Follow, FollowStatus, RatingDistribution, Redemption,
    RedemptionStatus, RedemptionStatusSummary, Review, ReviewStatus, User,
};
pub use service::{FollowService, RedemptionService, ReviewService, ValidationService};
pub use state::AppState;
