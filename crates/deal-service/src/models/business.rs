//! 商家实体定义

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 商家
///
/// follower_count 与 average_rating 为派生字段：
/// 前者由关注状态切换增量维护，后者在评价变更后全量重算。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    /// 商家所有者用户 ID
    pub owner_id: String,
    /// 商家名称
    pub name: String,
    /// 分类
    #[sqlx(default)]
    pub category: Option<String>,
    /// 粉丝数（派生计数）
    pub follower_count: i64,
    /// 平均评分（active 评价的均值，派生字段）
    pub average_rating: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// 检查某用户是否为该商家所有者
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owned_by() {
        let now = Utc::now();
        let business = Business {
            id: 10,
            owner_id: "owner-1".to_string(),
            name: "Corner Cafe".to_string(),
            category: None,
            follower_count: 0,
            average_rating: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };

        assert!(business.is_owned_by("owner-1"));
        assert!(!business.is_owned_by("user-2"));
    }
}
