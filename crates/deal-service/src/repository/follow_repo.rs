//! 关注仓储
//!
//! 关注行在关注/取关周期内复用，涉及粉丝计数的写操作只在事务内进行

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Row};

use super::traits::FollowRepositoryTrait;
use crate::error::Result;
use crate::models::{Follow, FollowStatus};

/// 关注仓储
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 查找 (user, business) 的关注记录
    pub async fn find_follow(&self, user_id: &str, business_id: i64) -> Result<Option<Follow>> {
        let follow = sqlx::query_as::<_, Follow>(
            r#"
            SELECT id, user_id, business_id, status, notify_new_deals,
                   notify_flash_deals, followed_at, updated_at
            FROM follows
            WHERE user_id = $1 AND business_id = $2
            "#,
        )
        .bind(user_id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(follow)
    }

    /// 在事务中创建关注记录
    pub async fn create_in_tx(tx: &mut PgConnection, follow: &Follow) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO follows (user_id, business_id, status, notify_new_deals,
                                 notify_flash_deals, followed_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&follow.user_id)
        .bind(follow.business_id)
        .bind(follow.status)
        .bind(follow.notify_new_deals)
        .bind(follow.notify_flash_deals)
        .bind(follow.followed_at)
        .bind(follow.updated_at)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }

    /// 在事务中锁定并读取关注行
    ///
    /// 跨越关注边界的状态切换先锁行复核再写入，
    /// 防止并发切换重复移动粉丝计数
    pub async fn get_follow_for_update_in_tx(
        tx: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Follow>> {
        let follow = sqlx::query_as::<_, Follow>(
            r#"
            SELECT id, user_id, business_id, status, notify_new_deals,
                   notify_flash_deals, followed_at, updated_at
            FROM follows
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(tx)
        .await?;

        Ok(follow)
    }

    /// 更新关注状态
    ///
    /// 仅用于不触碰粉丝计数的切换（active <-> muted）
    pub async fn update_status(&self, id: i64, status: FollowStatus) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE follows
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 在事务中更新关注状态
    ///
    /// 与粉丝计数调整共用一个事务
    pub async fn update_status_in_tx(
        tx: &mut PgConnection,
        id: i64,
        status: FollowStatus,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE follows
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(tx)
        .await?;

        Ok(())
    }

    /// 更新通知偏好
    pub async fn update_preferences(
        &self,
        id: i64,
        notify_new_deals: bool,
        notify_flash_deals: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE follows
            SET notify_new_deals = $2, notify_flash_deals = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(notify_new_deals)
        .bind(notify_flash_deals)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl FollowRepositoryTrait for FollowRepository {
    async fn find_follow(&self, user_id: &str, business_id: i64) -> Result<Option<Follow>> {
        self.find_follow(user_id, business_id).await
    }

    async fn update_status(&self, id: i64, status: FollowStatus) -> Result<()> {
        self.update_status(id, status).await
    }

    async fn update_preferences(
        &self,
        id: i64,
        notify_new_deals: bool,
        notify_flash_deals: bool,
    ) -> Result<()> {
        self.update_preferences(id, notify_new_deals, notify_flash_deals)
            .await
    }
}
