//! 评价仓储
//!
//! 评价的增删改只在事务内进行，与商家平均分重算共用一个事务

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Row};

use super::traits::ReviewRepositoryTrait;
use crate::error::Result;
use crate::models::Review;

/// 评价仓储
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单条评价
    pub async fn get_review(&self, id: i64) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, business_id, user_id, rating, review_text, is_verified_buyer,
                   status, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// 查找 (user, business) 的评价
    ///
    /// 用于每对至多一条评价的业务规则检查
    pub async fn find_by_user_and_business(
        &self,
        user_id: &str,
        business_id: i64,
    ) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, business_id, user_id, rating, review_text, is_verified_buyer,
                   status, created_at, updated_at
            FROM reviews
            WHERE user_id = $1 AND business_id = $2
            "#,
        )
        .bind(user_id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// 在事务中创建评价
    pub async fn create_in_tx(tx: &mut PgConnection, review: &Review) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO reviews (business_id, user_id, rating, review_text,
                                 is_verified_buyer, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(review.business_id)
        .bind(&review.user_id)
        .bind(review.rating)
        .bind(&review.review_text)
        .bind(review.is_verified_buyer)
        .bind(review.status)
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }

    /// 在事务中更新评价
    ///
    /// 未提供的字段保持原值
    pub async fn update_in_tx(
        tx: &mut PgConnection,
        id: i64,
        rating: Option<i32>,
        review_text: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE reviews
            SET rating = COALESCE($2, rating),
                review_text = COALESCE($3, review_text),
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(review_text)
        .bind(updated_at)
        .execute(tx)
        .await?;

        Ok(())
    }

    /// 在事务中删除评价
    pub async fn delete_in_tx(tx: &mut PgConnection, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(tx)
            .await?;

        Ok(())
    }

    /// 分页列出商家的 active 评价
    pub async fn list_active_by_business(
        &self,
        business_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, business_id, user_id, rating, review_text, is_verified_buyer,
                   status, created_at, updated_at
            FROM reviews
            WHERE business_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(business_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// 统计商家的 active 评价总数
    pub async fn count_active(&self, business_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reviews
            WHERE business_id = $1 AND status = 'active'
            "#,
        )
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// active 评价的平均评分
    pub async fn average_active_rating(&self, business_id: i64) -> Result<Option<Decimal>> {
        let average: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT AVG(rating) FROM reviews
            WHERE business_id = $1 AND status = 'active'
            "#,
        )
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }

    /// 在事务中重算 active 评价的平均评分
    ///
    /// 评价变更与平均分更新共用一个事务，读到的是变更后的行集
    pub async fn average_active_rating_in_tx(
        tx: &mut PgConnection,
        business_id: i64,
    ) -> Result<Option<Decimal>> {
        let average: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT AVG(rating) FROM reviews
            WHERE business_id = $1 AND status = 'active'
            "#,
        )
        .bind(business_id)
        .fetch_one(tx)
        .await?;

        Ok(average)
    }

    /// active 评价按评分值分组计数
    pub async fn rating_distribution(&self, business_id: i64) -> Result<Vec<(i32, i64)>> {
        let counts = sqlx::query_as::<_, (i32, i64)>(
            r#"
            SELECT rating, COUNT(*) FROM reviews
            WHERE business_id = $1 AND status = 'active'
            GROUP BY rating
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}

#[async_trait]
impl ReviewRepositoryTrait for ReviewRepository {
    async fn get_review(&self, id: i64) -> Result<Option<Review>> {
        self.get_review(id).await
    }

    async fn find_by_user_and_business(
        &self,
        user_id: &str,
        business_id: i64,
    ) -> Result<Option<Review>> {
        self.find_by_user_and_business(user_id, business_id).await
    }

    async fn list_active_by_business(
        &self,
        business_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>> {
        self.list_active_by_business(business_id, limit, offset)
            .await
    }

    async fn count_active(&self, business_id: i64) -> Result<i64> {
        self.count_active(business_id).await
    }

    async fn average_active_rating(&self, business_id: i64) -> Result<Option<Decimal>> {
        self.average_active_rating(business_id).await
    }

    async fn rating_distribution(&self, business_id: i64) -> Result<Vec<(i32, i64)>> {
        self.rating_distribution(business_id).await
    }
}
