//! 用户仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::UserRepositoryTrait;
use crate::error::Result;
use crate::models::User;

/// 用户仓储
///
/// 用户的创建和资料维护在上游系统，这里只做存在性读取
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单个用户
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, display_name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.get_user(id).await
    }
}
