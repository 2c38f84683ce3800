//! 优惠实体定义

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::DealStatus;

/// 优惠
///
/// 商家发布的限时折扣，库存与每人限领通过兑换流程约束。
/// 不变式：quantity_available 非空时 quantity_redeemed 不超过它；
/// discounted_price 小于 original_price。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    /// 所属商家 ID
    pub business_id: i64,
    /// 优惠标题
    pub title: String,
    /// 分类
    #[sqlx(default)]
    pub category: Option<String>,
    /// 优惠状态
    pub status: DealStatus,
    /// 原价
    pub original_price: Decimal,
    /// 折后价
    pub discounted_price: Decimal,
    /// 可兑换总量（null 表示不限量）
    #[sqlx(default)]
    pub quantity_available: Option<i32>,
    /// 已兑换数量（只增不减）
    pub quantity_redeemed: i32,
    /// 单用户限领次数
    pub max_per_user: i32,
    /// 生效时间
    pub starts_at: DateTime<Utc>,
    /// 失效时间
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// 检查库存是否已耗尽
    ///
    /// quantity_available 为空表示不限量，永不售罄
    pub fn is_sold_out(&self) -> bool {
        match self.quantity_available {
            Some(available) => self.quantity_redeemed >= available,
            None => false,
        }
    }

    /// 单次兑换可节省的金额
    pub fn savings(&self) -> Decimal {
        self.original_price - self.discounted_price
    }
}
