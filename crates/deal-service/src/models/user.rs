//! 用户实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户
///
/// 认证与资料管理在上游完成，这里只保留兑换与评价流程需要的字段
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[sqlx(default)]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
