//! 优惠仓储
//!
//! 提供优惠的数据访问，库存计数的写操作只在事务内进行

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::DealRepositoryTrait;
use crate::error::Result;
use crate::models::Deal;

/// 优惠仓储
pub struct DealRepository {
    pool: PgPool,
}

impl DealRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单个优惠
    pub async fn get_deal(&self, id: i64) -> Result<Option<Deal>> {
        let deal = sqlx::query_as::<_, Deal>(
            r#"
            SELECT id, business_id, title, category, status, original_price,
                   discounted_price, quantity_available, quantity_redeemed, max_per_user,
                   starts_at, expires_at, created_at, updated_at
            FROM deals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deal)
    }

    /// 在事务中锁定并获取优惠（FOR UPDATE）
    ///
    /// 兑换写入前重新读取库存，封堵检查与写入之间的并发竞争
    pub async fn get_deal_for_update_in_tx(
        tx: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Deal>> {
        let deal = sqlx::query_as::<_, Deal>(
            r#"
            SELECT id, business_id, title, category, status, original_price,
                   discounted_price, quantity_available, quantity_redeemed, max_per_user,
                   starts_at, expires_at, created_at, updated_at
            FROM deals
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(tx)
        .await?;

        Ok(deal)
    }

    /// 在事务中递增已兑换数量
    pub async fn increment_quantity_redeemed_in_tx(tx: &mut PgConnection, id: i64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE deals
            SET quantity_redeemed = quantity_redeemed + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl DealRepositoryTrait for DealRepository {
    async fn get_deal(&self, id: i64) -> Result<Option<Deal>> {
        self.get_deal(id).await
    }
}
