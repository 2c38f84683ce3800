//! 兑换记录实体定义

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::RedemptionStatus;

/// 兑换记录
///
/// 用户领取优惠时创建，价格字段在创建时快照，此后不可变。
/// 状态只允许 pending -> validated 一次性跃迁，不存在回退路径。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: i64,
    /// 兑换用户 ID
    pub user_id: String,
    /// 优惠 ID
    pub deal_id: i64,
    /// 商家 ID（冗余存储，便于商家侧查询）
    pub business_id: i64,
    /// 兑换时的原价快照
    pub original_price: Decimal,
    /// 实际支付价格快照
    pub paid_price: Decimal,
    /// 节省金额快照
    pub savings_amount: Decimal,
    /// 兑换状态
    pub status: RedemptionStatus,
    /// 兑换时间
    pub redeemed_at: DateTime<Utc>,
    /// 核销时间（核销前为空）
    #[sqlx(default)]
    pub validated_at: Option<DateTime<Utc>>,
    /// 核销人（商家所有者 ID，核销前为空）
    #[sqlx(default)]
    pub validated_by: Option<String>,
}

impl Redemption {
    /// 是否已核销
    pub fn is_validated(&self) -> bool {
        self.status == RedemptionStatus::Validated
    }

    /// 兑换码
    ///
    /// 兑换记录自身的标识即兑换码，不单独生成
    pub fn code(&self) -> String {
        self.id.to_string()
    }
}

/// 按状态统计的兑换汇总
///
/// 商家侧兑换列表附带的全量统计，与分页过滤无关
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionStatusSummary {
    pub pending: i64,
    pub validated: i64,
    pub expired: i64,
    pub cancelled: i64,
}

impl RedemptionStatusSummary {
    /// 从 (状态, 数量) 分组结果构建汇总
    pub fn from_counts(counts: &[(RedemptionStatus, i64)]) -> Self {
        let mut summary = Self::default();
        for (status, count) in counts {
            match status {
                RedemptionStatus::Pending => summary.pending = *count,
                RedemptionStatus::Validated => summary.validated = *count,
                RedemptionStatus::Expired => summary.expired = *count,
                RedemptionStatus::Cancelled => summary.cancelled = *count,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_redemption() -> Redemption {
        Redemption {
            id: 42,
            user_id: "user-1".to_string(),
            deal_id: 1,
            business_id: 10,
            original_price: Decimal::new(10000, 2),
            paid_price: Decimal::new(5000, 2),
            savings_amount: Decimal::new(5000, 2),
            status: RedemptionStatus::Pending,
            redeemed_at: Utc::now(),
            validated_at: None,
            validated_by: None,
        }
    }

    #[test]
    fn test_is_validated() {
        let mut redemption = create_test_redemption();
        assert!(!redemption.is_validated());

        redemption.status = RedemptionStatus::Validated;
        assert!(redemption.is_validated());
    }

    #[test]
    fn test_code_is_own_identifier() {
        let redemption = create_test_redemption();
        assert_eq!(redemption.code(), "42");
    }

    #[test]
    fn test_status_summary_from_counts() {
        let counts = vec![
            (RedemptionStatus::Pending, 3),
            (RedemptionStatus::Validated, 7),
        ];
        let summary = RedemptionStatusSummary::from_counts(&counts);

        assert_eq!(summary.pending, 3);
        assert_eq!(summary.validated, 7);
        assert_eq!(summary.expired, 0);
        assert_eq!(summary.cancelled, 0);
    }
}
