//! 本地优惠平台核心服务
//!
//! 提供优惠兑换、商家核销、关注通知偏好、评价评分等 REST API。

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use deal_service::{
    repository::{
        BusinessRepository, DealRepository, FollowRepository, RedemptionRepository,
        ReviewRepository, UserRepository,
    },
    routes,
    service::{FollowService, RedemptionService, ReviewService, ValidationService},
    state::AppState,
};
use deal_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/default.toml + 环境配置 + DEAL_ 前缀环境变量
    let config = AppConfig::load("deal-service").unwrap_or_default();

    observability::init(&config.observability)?;

    info!("Starting deal-service on {}", config.server_addr());

    let db = Database::connect(&config.database).await?;
    let pool = db.pool().clone();

    // 仓储 -> 服务装配
    let deal_repo = Arc::new(DealRepository::new(pool.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let business_repo = Arc::new(BusinessRepository::new(pool.clone()));
    let redemption_repo = Arc::new(RedemptionRepository::new(pool.clone()));
    let follow_repo = Arc::new(FollowRepository::new(pool.clone()));
    let review_repo = Arc::new(ReviewRepository::new(pool.clone()));

    let redemption_service = Arc::new(RedemptionService::new(
        deal_repo,
        user_repo,
        redemption_repo.clone(),
        pool.clone(),
    ));
    let validation_service = Arc::new(ValidationService::new(
        redemption_repo.clone(),
        business_repo.clone(),
    ));
    let follow_service = Arc::new(FollowService::new(
        follow_repo,
        business_repo.clone(),
        pool.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(
        review_repo,
        business_repo,
        redemption_repo,
        pool.clone(),
    ));

    let state = AppState::new(
        redemption_service,
        validation_service,
        follow_service,
        review_service,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", routes::api_routes())
        .route("/health", get(health_check))
        .route(
            "/ready",
            get({
                let db_for_ready = db;
                move || readiness_check(db_for_ready.clone())
            }),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM（K8s 停止 Pod）或 Ctrl+C 时，
    // 停止接收新连接并等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// K8s 通过 SIGTERM 通知 Pod 停止；本地开发通过 Ctrl+C。
/// 收到任一信号后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// 存活探针：服务进程正常即返回 ok
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "deal-service"
    }))
}

/// 就绪探针：检查数据库连接是否可用
///
/// K8s 就绪探针失败时会将 Pod 从 Service 端点移除，
/// 避免将流量路由到无法正常处理请求的实例。
async fn readiness_check(db: Database) -> Json<serde_json::Value> {
    let db_ok = db.health_check().await.is_ok();

    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "service": "deal-service",
        "checks": {
            "database": if db_ok { "ok" } else { "fail" }
        }
    }))
}
