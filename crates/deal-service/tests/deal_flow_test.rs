//! 核心业务流程集成测试
//!
//! 使用真实 PostgreSQL 验证跨服务的一致性语义：库存上限、限领、
//! 重复核销、粉丝计数恢复、评分聚合。事务路径无法通过纯 mock 覆盖，
//! 因此需要集成测试。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test deal_flow_test -- --ignored
//! ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use deal_service::error::DealError;
use deal_service::models::{FollowStatus, RedemptionStatus};
use deal_service::repository::{
    BusinessRepository, DealRepository, FollowRepository, RedemptionRepository, ReviewRepository,
    UserRepository,
};
use deal_service::service::dto::{
    CreateReviewRequest, UpdateReviewRequest, ValidateRedemptionRequest,
};
use deal_service::service::{FollowService, RedemptionService, ReviewService, ValidationService};
use deal_shared::test_utils::{test_entity_id, test_user_id};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ==================== 辅助函数 ====================

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

async fn connect() -> PgPool {
    PgPool::connect(&database_url())
        .await
        .expect("数据库连接失败")
}

fn redemption_service(pool: &PgPool) -> RedemptionService {
    RedemptionService::new(
        Arc::new(DealRepository::new(pool.clone())),
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(RedemptionRepository::new(pool.clone())),
        pool.clone(),
    )
}

fn validation_service(pool: &PgPool) -> ValidationService {
    ValidationService::new(
        Arc::new(RedemptionRepository::new(pool.clone())),
        Arc::new(BusinessRepository::new(pool.clone())),
    )
}

fn follow_service(pool: &PgPool) -> FollowService {
    FollowService::new(
        Arc::new(FollowRepository::new(pool.clone())),
        Arc::new(BusinessRepository::new(pool.clone())),
        pool.clone(),
    )
}

fn review_service(pool: &PgPool) -> ReviewService {
    ReviewService::new(
        Arc::new(ReviewRepository::new(pool.clone())),
        Arc::new(BusinessRepository::new(pool.clone())),
        Arc::new(RedemptionRepository::new(pool.clone())),
        pool.clone(),
    )
}

/// 插入测试用户
async fn seed_user(pool: &PgPool) -> String {
    let user_id = test_user_id();
    sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2)")
        .bind(&user_id)
        .bind(format!("{}@example.com", user_id))
        .execute(pool)
        .await
        .expect("插入测试用户失败");
    user_id
}

/// 插入测试商家，返回 (business_id, owner_id)
async fn seed_business(pool: &PgPool) -> (i64, String) {
    let owner_id = seed_user(pool).await;
    let business_id = test_entity_id();
    sqlx::query(
        r#"
        INSERT INTO businesses (id, owner_id, name, category)
        VALUES ($1, $2, $3, '餐饮')
        "#,
    )
    .bind(business_id)
    .bind(&owner_id)
    .bind(format!("测试商家 {}", business_id))
    .execute(pool)
    .await
    .expect("插入测试商家失败");
    (business_id, owner_id)
}

/// 插入测试优惠
async fn seed_deal(
    pool: &PgPool,
    business_id: i64,
    quantity_available: Option<i32>,
    max_per_user: i32,
) -> i64 {
    let deal_id = test_entity_id();
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO deals (id, business_id, title, status, original_price, discounted_price,
                           quantity_available, quantity_redeemed, max_per_user,
                           starts_at, expires_at)
        VALUES ($1, $2, $3, 'active', 100.00, 50.00, $4, 0, $5, $6, $7)
        "#,
    )
    .bind(deal_id)
    .bind(business_id)
    .bind(format!("测试优惠 {}", deal_id))
    .bind(quantity_available)
    .bind(max_per_user)
    .bind(now - Duration::hours(1))
    .bind(now + Duration::hours(24))
    .execute(pool)
    .await
    .expect("插入测试优惠失败");
    deal_id
}

async fn follower_count(pool: &PgPool, business_id: i64) -> i64 {
    sqlx::query_scalar("SELECT follower_count FROM businesses WHERE id = $1")
        .bind(business_id)
        .fetch_one(pool)
        .await
        .expect("查询粉丝计数失败")
}

async fn average_rating(pool: &PgPool, business_id: i64) -> Decimal {
    sqlx::query_scalar("SELECT average_rating FROM businesses WHERE id = $1")
        .bind(business_id)
        .fetch_one(pool)
        .await
        .expect("查询平均评分失败")
}

// ==================== 兑换流程 ====================

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_redemption_respects_quantity_ceiling() {
    let pool = connect().await;
    let service = redemption_service(&pool);

    let (business_id, _) = seed_business(&pool).await;
    let deal_id = seed_deal(&pool, business_id, Some(1), 5).await;
    let first_user = seed_user(&pool).await;
    let second_user = seed_user(&pool).await;

    let response = service.redeem_deal(&first_user, deal_id).await.unwrap();
    assert_eq!(response.redemption.status, RedemptionStatus::Pending);
    assert_eq!(response.redemption.savings_amount, Decimal::new(5000, 2));
    assert_eq!(response.redemption_code, response.redemption.id.to_string());

    // 库存只有 1，第二个用户兑换失败
    let err = service.redeem_deal(&second_user, deal_id).await.unwrap_err();
    assert!(matches!(err, DealError::DealSoldOut(_)));

    let redeemed: i32 = sqlx::query_scalar("SELECT quantity_redeemed FROM deals WHERE id = $1")
        .bind(deal_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(redeemed, 1);
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_redemption_per_user_limit() {
    let pool = connect().await;
    let service = redemption_service(&pool);

    let (business_id, _) = seed_business(&pool).await;
    let deal_id = seed_deal(&pool, business_id, Some(10), 2).await;
    let user_id = seed_user(&pool).await;

    service.redeem_deal(&user_id, deal_id).await.unwrap();
    service.redeem_deal(&user_id, deal_id).await.unwrap();

    let err = service.redeem_deal(&user_id, deal_id).await.unwrap_err();
    assert!(matches!(
        err,
        DealError::RedemptionLimitReached { limit: 2, .. }
    ));
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_deal_schema_constraints() {
    let pool = connect().await;
    let (business_id, _) = seed_business(&pool).await;
    let now = Utc::now();

    // 折后价必须严格低于原价
    let err = sqlx::query(
        r#"
        INSERT INTO deals (id, business_id, title, status, original_price, discounted_price,
                           max_per_user, starts_at, expires_at)
        VALUES ($1, $2, '无折扣', 'active', 100.00, 100.00, 1, $3, $4)
        "#,
    )
    .bind(test_entity_id())
    .bind(business_id)
    .bind(now)
    .bind(now + Duration::hours(1))
    .execute(&pool)
    .await
    .unwrap_err();
    assert!(err.to_string().contains("chk_deal_prices"));

    // 已兑换数不得超过库存上限
    let err = sqlx::query(
        r#"
        INSERT INTO deals (id, business_id, title, status, original_price, discounted_price,
                           quantity_available, quantity_redeemed, max_per_user,
                           starts_at, expires_at)
        VALUES ($1, $2, '超卖', 'active', 100.00, 50.00, 1, 2, 1, $3, $4)
        "#,
    )
    .bind(test_entity_id())
    .bind(business_id)
    .bind(now)
    .bind(now + Duration::hours(1))
    .execute(&pool)
    .await
    .unwrap_err();
    assert!(err.to_string().contains("chk_deal_quantity"));
}

// ==================== 核销流程 ====================

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_double_validation_rejected() {
    let pool = connect().await;
    let redeem = redemption_service(&pool);
    let validate = validation_service(&pool);

    let (business_id, owner_id) = seed_business(&pool).await;
    let deal_id = seed_deal(&pool, business_id, None, 1).await;
    let user_id = seed_user(&pool).await;

    let response = redeem.redeem_deal(&user_id, deal_id).await.unwrap();
    let redemption_id = response.redemption.id;

    let validated = validate
        .validate_redemption(&owner_id, redemption_id, ValidateRedemptionRequest::default())
        .await
        .unwrap();
    assert_eq!(validated.status, RedemptionStatus::Validated);
    assert_eq!(validated.validated_by.as_deref(), Some(owner_id.as_str()));

    let err = validate
        .validate_redemption(&owner_id, redemption_id, ValidateRedemptionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DealError::AlreadyValidated(_)));
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_business_redemptions_summary() {
    let pool = connect().await;
    let redeem = redemption_service(&pool);
    let validate = validation_service(&pool);

    let (business_id, owner_id) = seed_business(&pool).await;
    let deal_id = seed_deal(&pool, business_id, None, 5).await;
    let user_id = seed_user(&pool).await;

    let first = redeem.redeem_deal(&user_id, deal_id).await.unwrap();
    redeem.redeem_deal(&user_id, deal_id).await.unwrap();

    validate
        .validate_redemption(&owner_id, first.redemption.id, ValidateRedemptionRequest::default())
        .await
        .unwrap();

    let result = validate
        .get_business_redemptions(&owner_id, business_id, Default::default(), 1, 20)
        .await
        .unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.summary.validated, 1);
    assert_eq!(result.summary.pending, 1);
}

// ==================== 关注流程 ====================

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_follow_cycle_restores_counter() {
    let pool = connect().await;
    let service = follow_service(&pool);

    let (business_id, _) = seed_business(&pool).await;
    let user_id = seed_user(&pool).await;
    let baseline = follower_count(&pool, business_id).await;

    let follow = service.follow_business(&user_id, business_id).await.unwrap();
    assert_eq!(follow.status, FollowStatus::Active);
    assert_eq!(follower_count(&pool, business_id).await, baseline + 1);

    // 重复关注报错，计数不变
    let err = service.follow_business(&user_id, business_id).await.unwrap_err();
    assert!(matches!(err, DealError::AlreadyFollowing(_)));
    assert_eq!(follower_count(&pool, business_id).await, baseline + 1);

    // 屏蔽不触碰计数
    service.mute_business(&user_id, business_id).await.unwrap();
    assert_eq!(follower_count(&pool, business_id).await, baseline + 1);

    service.unfollow_business(&user_id, business_id).await.unwrap();
    assert_eq!(follower_count(&pool, business_id).await, baseline);

    // 重新关注复用原行并恢复计数
    let refollowed = service.follow_business(&user_id, business_id).await.unwrap();
    assert_eq!(refollowed.id, follow.id);
    assert_eq!(follower_count(&pool, business_id).await, baseline + 1);
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_concurrent_follow_transitions_move_counter_once() {
    let pool = connect().await;
    let service = follow_service(&pool);

    let (business_id, _) = seed_business(&pool).await;
    let user_id = seed_user(&pool).await;
    let baseline = follower_count(&pool, business_id).await;

    service.follow_business(&user_id, business_id).await.unwrap();
    service.unfollow_business(&user_id, business_id).await.unwrap();

    // 并发重新关注：行锁内复核状态，只有一个事务移动计数
    let (first, second) = tokio::join!(
        service.follow_business(&user_id, business_id),
        service.follow_business(&user_id, business_id),
    );
    let successes = first.is_ok() as i32 + second.is_ok() as i32;
    assert_eq!(successes, 1);
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(err, DealError::AlreadyFollowing(_)));
        }
    }
    assert_eq!(follower_count(&pool, business_id).await, baseline + 1);

    // 并发取关同理，计数只回退一次
    let (first, second) = tokio::join!(
        service.unfollow_business(&user_id, business_id),
        service.unfollow_business(&user_id, business_id),
    );
    let successes = first.is_ok() as i32 + second.is_ok() as i32;
    assert_eq!(successes, 1);
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(err, DealError::NotFollowing(_)));
        }
    }
    assert_eq!(follower_count(&pool, business_id).await, baseline);
}

// ==================== 评价流程 ====================

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_review_aggregate_consistency() {
    let pool = connect().await;
    let redeem = redemption_service(&pool);
    let reviews = review_service(&pool);

    let (business_id, _) = seed_business(&pool).await;
    let deal_id = seed_deal(&pool, business_id, None, 1).await;
    let buyer = seed_user(&pool).await;
    let visitor = seed_user(&pool).await;

    // buyer 有兑换记录，visitor 没有
    redeem.redeem_deal(&buyer, deal_id).await.unwrap();

    let buyer_review = reviews
        .create_review(
            &buyer,
            business_id,
            CreateReviewRequest {
                rating: 5,
                review_text: Some("很好".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(buyer_review.is_verified_buyer);
    assert_eq!(average_rating(&pool, business_id).await, Decimal::new(500, 2));

    let visitor_review = reviews
        .create_review(
            &visitor,
            business_id,
            CreateReviewRequest {
                rating: 2,
                review_text: None,
            },
        )
        .await
        .unwrap();
    assert!(!visitor_review.is_verified_buyer);
    // (5 + 2) / 2 = 3.5
    assert_eq!(average_rating(&pool, business_id).await, Decimal::new(350, 2));

    // 纯文本修改不影响平均分
    reviews
        .update_review(
            &visitor,
            visitor_review.id,
            UpdateReviewRequest {
                rating: None,
                review_text: Some("改个说法".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(average_rating(&pool, business_id).await, Decimal::new(350, 2));

    // 改评分触发重算：(5 + 4) / 2 = 4.5
    reviews
        .update_review(
            &visitor,
            visitor_review.id,
            UpdateReviewRequest {
                rating: Some(4),
                review_text: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(average_rating(&pool, business_id).await, Decimal::new(450, 2));

    // 删除后重算
    reviews.delete_review(&visitor, visitor_review.id).await.unwrap();
    assert_eq!(average_rating(&pool, business_id).await, Decimal::new(500, 2));

    let page = reviews.get_business_reviews(business_id, 1, 20).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.distribution.five_star, 1);
    assert_eq!(page.average_rating, Decimal::new(50, 1));
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_duplicate_review_rejected() {
    let pool = connect().await;
    let reviews = review_service(&pool);

    let (business_id, _) = seed_business(&pool).await;
    let user_id = seed_user(&pool).await;

    reviews
        .create_review(
            &user_id,
            business_id,
            CreateReviewRequest {
                rating: 4,
                review_text: None,
            },
        )
        .await
        .unwrap();

    let err = reviews
        .create_review(
            &user_id,
            business_id,
            CreateReviewRequest {
                rating: 3,
                review_text: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DealError::AlreadyReviewed(_)));
}
