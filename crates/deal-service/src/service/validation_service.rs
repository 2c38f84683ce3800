//! 兑换核销服务
//!
//! 商家侧的核销与兑换记录查询。核销按序校验：
//! 兑换码有效 -> 商家存在 -> 核销人是商家拥有者 -> 未重复核销

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::error::{DealError, Result};
use crate::models::{Redemption, RedemptionStatus, RedemptionStatusSummary};
use crate::repository::{BusinessRepositoryTrait, RedemptionRepositoryTrait};
use crate::service::dto::{BusinessRedemptionsDto, RedemptionFilter, ValidateRedemptionRequest};

/// 兑换核销服务
pub struct ValidationService {
    redemption_repo: Arc<dyn RedemptionRepositoryTrait>,
    business_repo: Arc<dyn BusinessRepositoryTrait>,
}

impl ValidationService {
    pub fn new(
        redemption_repo: Arc<dyn RedemptionRepositoryTrait>,
        business_repo: Arc<dyn BusinessRepositoryTrait>,
    ) -> Self {
        Self {
            redemption_repo,
            business_repo,
        }
    }

    /// 核销兑换记录
    ///
    /// 仅商家拥有者可核销自家的兑换记录，已核销的记录不可重复核销。
    /// 请求未指定目标状态时按 Validated 处理
    #[instrument(skip(self, request), fields(validator_id = %validator_id, redemption_id = %redemption_id))]
    pub async fn validate_redemption(
        &self,
        validator_id: &str,
        redemption_id: i64,
        request: ValidateRedemptionRequest,
    ) -> Result<Redemption> {
        let redemption = self
            .redemption_repo
            .get_redemption(redemption_id)
            .await?
            .ok_or(DealError::RedemptionNotFound(redemption_id))?;

        let business = self
            .business_repo
            .get_business(redemption.business_id)
            .await?
            .ok_or(DealError::BusinessNotFound(redemption.business_id))?;

        if !business.is_owned_by(validator_id) {
            return Err(DealError::NotBusinessOwner {
                business_id: business.id,
            });
        }

        if redemption.is_validated() {
            return Err(DealError::AlreadyValidated(redemption_id));
        }

        let status = request.status.unwrap_or(RedemptionStatus::Validated);
        let validated_at = Utc::now();
        self.redemption_repo
            .update_status(redemption_id, status, validator_id, validated_at)
            .await?;

        info!(redemption_id, status = ?status, "兑换记录核销完成");

        Ok(Redemption {
            status,
            validated_at: Some(validated_at),
            validated_by: Some(validator_id.to_string()),
            ..redemption
        })
    }

    /// 商家侧分页查询兑换记录
    ///
    /// 仅商家拥有者可查询；按兑换时间倒序，可按状态过滤。
    /// 状态汇总不受过滤影响，始终覆盖商家全量记录
    #[instrument(skip(self, filter), fields(caller_id = %caller_id, business_id = %business_id))]
    pub async fn get_business_redemptions(
        &self,
        caller_id: &str,
        business_id: i64,
        filter: RedemptionFilter,
        page: i64,
        page_size: i64,
    ) -> Result<BusinessRedemptionsDto> {
        let business = self
            .business_repo
            .get_business(business_id)
            .await?
            .ok_or(DealError::BusinessNotFound(business_id))?;

        if !business.is_owned_by(caller_id) {
            return Err(DealError::NotBusinessOwner { business_id });
        }

        let offset = (page - 1) * page_size;
        let redemptions = self
            .redemption_repo
            .list_by_business(business_id, filter.status, page_size, offset)
            .await?;
        let total = self
            .redemption_repo
            .count_by_business(business_id, filter.status)
            .await?;
        let counts = self.redemption_repo.group_by_status(business_id).await?;
        let summary = RedemptionStatusSummary::from_counts(&counts);

        Ok(BusinessRedemptionsDto {
            redemptions,
            total,
            page,
            page_size,
            summary,
        })
    }
}
