//! 兑换仓储
//!
//! 提供兑换记录的数据访问，创建操作只在兑换事务内进行

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Row};

use super::traits::RedemptionRepositoryTrait;
use crate::error::Result;
use crate::models::{Redemption, RedemptionStatus};

/// 兑换仓储
pub struct RedemptionRepository {
    pool: PgPool,
}

impl RedemptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单条兑换记录
    pub async fn get_redemption(&self, id: i64) -> Result<Option<Redemption>> {
        let redemption = sqlx::query_as::<_, Redemption>(
            r#"
            SELECT id, user_id, deal_id, business_id, original_price, paid_price,
                   savings_amount, status, redeemed_at, validated_at, validated_by
            FROM redemptions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(redemption)
    }

    /// 在事务中创建兑换记录
    ///
    /// 价格字段为创建时快照，返回新记录的 ID
    pub async fn create_in_tx(tx: &mut PgConnection, redemption: &Redemption) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO redemptions (user_id, deal_id, business_id, original_price,
                                     paid_price, savings_amount, status, redeemed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&redemption.user_id)
        .bind(redemption.deal_id)
        .bind(redemption.business_id)
        .bind(redemption.original_price)
        .bind(redemption.paid_price)
        .bind(redemption.savings_amount)
        .bind(redemption.status)
        .bind(redemption.redeemed_at)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }

    /// 统计用户对某优惠的兑换次数
    ///
    /// 用于单用户限领检查
    pub async fn count_user_deal_redemptions(&self, user_id: &str, deal_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM redemptions
            WHERE user_id = $1 AND deal_id = $2
            "#,
        )
        .bind(user_id)
        .bind(deal_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// 统计用户在某商家的兑换次数
    ///
    /// 用于评价的验证买家判断
    pub async fn count_user_business_redemptions(
        &self,
        user_id: &str,
        business_id: i64,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM redemptions
            WHERE user_id = $1 AND business_id = $2
            "#,
        )
        .bind(user_id)
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// 更新兑换状态并盖核销戳
    pub async fn update_status(
        &self,
        id: i64,
        status: RedemptionStatus,
        validated_by: &str,
        validated_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE redemptions
            SET status = $2, validated_by = $3, validated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(validated_by)
        .bind(validated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 分页列出商家的兑换记录，可按状态过滤
    pub async fn list_by_business(
        &self,
        business_id: i64,
        status: Option<RedemptionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Redemption>> {
        let redemptions = if let Some(status) = status {
            sqlx::query_as::<_, Redemption>(
                r#"
                SELECT id, user_id, deal_id, business_id, original_price, paid_price,
                       savings_amount, status, redeemed_at, validated_at, validated_by
                FROM redemptions
                WHERE business_id = $1 AND status = $2
                ORDER BY redeemed_at DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(business_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Redemption>(
                r#"
                SELECT id, user_id, deal_id, business_id, original_price, paid_price,
                       savings_amount, status, redeemed_at, validated_at, validated_by
                FROM redemptions
                WHERE business_id = $1
                ORDER BY redeemed_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(business_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(redemptions)
    }

    /// 统计商家的兑换记录总数，可按状态过滤
    pub async fn count_by_business(
        &self,
        business_id: i64,
        status: Option<RedemptionStatus>,
    ) -> Result<i64> {
        let count: i64 = if let Some(status) = status {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM redemptions
                WHERE business_id = $1 AND status = $2
                "#,
            )
            .bind(business_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM redemptions
                WHERE business_id = $1
                "#,
            )
            .bind(business_id)
            .fetch_one(&self.pool)
            .await?
        };

        Ok(count)
    }

    /// 商家全量兑换记录按状态分组计数
    pub async fn group_by_status(&self, business_id: i64) -> Result<Vec<(RedemptionStatus, i64)>> {
        let counts = sqlx::query_as::<_, (RedemptionStatus, i64)>(
            r#"
            SELECT status, COUNT(*) FROM redemptions
            WHERE business_id = $1
            GROUP BY status
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}

#[async_trait]
impl RedemptionRepositoryTrait for RedemptionRepository {
    async fn get_redemption(&self, id: i64) -> Result<Option<Redemption>> {
        self.get_redemption(id).await
    }

    async fn count_user_deal_redemptions(&self, user_id: &str, deal_id: i64) -> Result<i64> {
        self.count_user_deal_redemptions(user_id, deal_id).await
    }

    async fn count_user_business_redemptions(
        &self,
        user_id: &str,
        business_id: i64,
    ) -> Result<i64> {
        self.count_user_business_redemptions(user_id, business_id)
            .await
    }

    async fn update_status(
        &self,
        id: i64,
        status: RedemptionStatus,
        validated_by: &str,
        validated_at: DateTime<Utc>,
    ) -> Result<()> {
        self.update_status(id, status, validated_by, validated_at)
            .await
    }

    async fn list_by_business(
        &self,
        business_id: i64,
        status: Option<RedemptionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Redemption>> {
        self.list_by_business(business_id, status, limit, offset)
            .await
    }

    async fn count_by_business(
        &self,
        business_id: i64,
        status: Option<RedemptionStatus>,
    ) -> Result<i64> {
        self.count_by_business(business_id, status).await
    }

    async fn group_by_status(&self, business_id: i64) -> Result<Vec<(RedemptionStatus, i64)>> {
        self.group_by_status(business_id).await
    }
}
