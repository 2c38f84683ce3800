//! 商家仓储
//!
//! 商家读取与派生字段（粉丝数、平均评分）的事务内维护

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use super::traits::BusinessRepositoryTrait;
use crate::error::Result;
use crate::models::Business;

/// 商家仓储
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单个商家
    pub async fn get_business(&self, id: i64) -> Result<Option<Business>> {
        let business = sqlx::query_as::<_, Business>(
            r#"
            SELECT id, owner_id, name, category, follower_count, average_rating,
                   created_at, updated_at
            FROM businesses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    /// 在事务中调整粉丝计数
    ///
    /// 与关注状态切换共用一个事务，保证计数与状态一致
    pub async fn increment_follower_count_in_tx(
        tx: &mut PgConnection,
        business_id: i64,
        delta: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE businesses
            SET follower_count = follower_count + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(business_id)
        .bind(delta)
        .execute(tx)
        .await?;

        Ok(())
    }

    /// 在事务中更新平均评分
    pub async fn update_average_rating_in_tx(
        tx: &mut PgConnection,
        business_id: i64,
        average_rating: Decimal,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE businesses
            SET average_rating = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(business_id)
        .bind(average_rating)
        .execute(tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl BusinessRepositoryTrait for BusinessRepository {
    async fn get_business(&self, id: i64) -> Result<Option<Business>> {
        self.get_business(id).await
    }
}
