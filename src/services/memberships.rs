//! Membership catalog and acquisition service

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::membership::{CreateMembership, Membership, MembershipAcquisition},
    models::office::{weekday_from_index, weekday_index},
    repository::Repository,
    services::payments::{PaymentGateway, PreferenceInfo},
};

#[derive(Clone)]
pub struct MembershipService {
    repository: Repository,
    gateway: Arc<dyn PaymentGateway>,
    public_url: String,
}

impl MembershipService {
    pub fn new(
        repository: Repository,
        gateway: Arc<dyn PaymentGateway>,
        public_url: String,
    ) -> Self {
        Self {
            repository,
            gateway,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a membership on a branch the caller owns
    pub async fn create_membership(
        &self,
        owner_email: &str,
        data: CreateMembership,
    ) -> AppResult<Membership> {
        let branch = self.repository.branches.get_by_id(data.branch_id).await?;
        if branch.owner_email != owner_email {
            return Err(AppError::Authorization(
                "Only the branch owner may sell memberships on it".to_string(),
            ));
        }
        if data.price <= rust_decimal::Decimal::ZERO {
            return Err(AppError::Validation(
                "Membership price must be positive".to_string(),
            ));
        }

        let mut access_days: Vec<i16> = data
            .access_days
            .iter()
            .map(|&day| weekday_from_index(day))
            .collect::<AppResult<Vec<_>>>()?
            .into_iter()
            .map(weekday_index)
            .collect();
        access_days.sort_unstable();
        access_days.dedup();

        let membership = Membership {
            id: Uuid::new_v4(),
            branch_id: data.branch_id,
            name: data.name,
            price: data.price,
            access_days,
            created_at: Utc::now(),
        };
        self.repository
            .membership_acquisitions
            .create_membership(&membership)
            .await?;
        Ok(membership)
    }

    /// Get a membership by ID
    pub async fn get_membership(&self, id: Uuid) -> AppResult<Membership> {
        self.repository.membership_acquisitions.get_membership(id).await
    }

    /// Register a purchase intent: the acquisition is stored pending and a
    /// payment preference is opened with the gateway; the webhook resolver
    /// later marks it bought.
    pub async fn purchase(
        &self,
        buyer_email: &str,
        membership_id: Uuid,
        days: &[u8],
    ) -> AppResult<MembershipAcquisition> {
        let membership = self
            .repository
            .membership_acquisitions
            .get_membership(membership_id)
            .await?;

        let weekdays = days
            .iter()
            .map(|&day| weekday_from_index(day))
            .collect::<AppResult<Vec<_>>>()?;

        let acquisition = MembershipAcquisition::new(&membership, buyer_email, &weekdays)?;
        self.repository
            .membership_acquisitions
            .create(&acquisition)
            .await?;

        let preference = self
            .gateway
            .create_preference(&PreferenceInfo {
                title: format!("Membership: {}", membership.name),
                unit_price: membership.price,
                payer_email: buyer_email.to_string(),
                external_reference: acquisition.id.to_string(),
                notification_url: format!(
                    "{}/api/v1/webhooks/payments/membership-acquisitions/{}",
                    self.public_url, acquisition.id
                ),
            })
            .await?;

        tracing::info!(
            acquisition_id = %acquisition.id,
            membership_id = %membership.id,
            preference_id = %preference.id,
            "membership acquisition created, awaiting payment"
        );

        Ok(acquisition)
    }
}
