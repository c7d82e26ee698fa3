//! Branch, office and inactivity management service

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        branch::{CreateBranch, OfficeBranch},
        office::{weekday_from_index, CreateInactivity, CreateOffice, Inactivity, Office},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct OfficeService {
    repository: Repository,
}

impl OfficeService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a branch owned by the caller
    pub async fn create_branch(
        &self,
        owner_email: &str,
        data: CreateBranch,
    ) -> AppResult<OfficeBranch> {
        let branch = OfficeBranch {
            id: Uuid::new_v4(),
            owner_email: owner_email.to_string(),
            name: data.name,
            street: data.street,
            city: data.city,
            phone: data.phone,
            created_at: Utc::now(),
        };
        self.repository.branches.create(&branch).await?;
        Ok(branch)
    }

    /// Get a branch by ID
    pub async fn get_branch(&self, id: Uuid) -> AppResult<OfficeBranch> {
        self.repository.branches.get_by_id(id).await
    }

    /// Create an office on a branch the caller owns
    pub async fn create_office(&self, owner_email: &str, data: CreateOffice) -> AppResult<Office> {
        let branch = self.repository.branches.get_by_id(data.branch_id).await?;
        if branch.owner_email != owner_email {
            return Err(AppError::Authorization(
                "Only the branch owner may add offices to it".to_string(),
            ));
        }
        if data.price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Office hourly price must be positive".to_string(),
            ));
        }

        let office = Office {
            id: Uuid::new_v4(),
            branch_id: data.branch_id,
            name: data.name,
            price: data.price,
            capacity: data.capacity,
            is_private: data.is_private,
            deleted_at: None,
            created_at: Utc::now(),
            modified_at: None,
        };
        self.repository.offices.create(&office).await?;
        Ok(office)
    }

    /// Get an office by ID
    pub async fn get_office(&self, id: Uuid) -> AppResult<Office> {
        self.repository.offices.get_by_id(id).await
    }

    /// List offices of a branch
    pub async fn list_branch_offices(&self, branch_id: Uuid) -> AppResult<Vec<Office>> {
        self.repository.branches.get_by_id(branch_id).await?;
        self.repository.offices.list_for_branch(branch_id).await
    }

    /// Soft-delete an office as of the given date (today if omitted). The
    /// office stays bookable until the effective date passes.
    pub async fn delete_office(
        &self,
        owner_email: &str,
        office_id: Uuid,
        effective_date: Option<NaiveDate>,
    ) -> AppResult<()> {
        let office = self.repository.offices.get_by_id(office_id).await?;
        let branch = self.repository.branches.get_by_id(office.branch_id).await?;
        if branch.owner_email != owner_email {
            return Err(AppError::Authorization(
                "Only the branch owner may delete its offices".to_string(),
            ));
        }

        let effective = effective_date.unwrap_or_else(|| Utc::now().date_naive());
        self.repository.offices.soft_delete(office_id, effective).await
    }

    /// Add an inactivity rule to an office
    pub async fn add_inactivity(
        &self,
        owner_email: &str,
        office_id: Uuid,
        data: CreateInactivity,
    ) -> AppResult<Inactivity> {
        let office = self.repository.offices.get_by_id(office_id).await?;
        let branch = self.repository.branches.get_by_id(office.branch_id).await?;
        if branch.owner_email != owner_email {
            return Err(AppError::Authorization(
                "Only the branch owner may manage office inactivities".to_string(),
            ));
        }

        let weekday = match data.weekday {
            Some(day) => Some(weekday_from_index(day)?),
            None => None,
        };
        let rule = Inactivity::new(office_id, data.specific_date, weekday)?;
        self.repository.offices.create_inactivity(&rule).await?;
        Ok(rule)
    }

    /// List the inactivity rules of an office
    pub async fn list_inactivities(&self, office_id: Uuid) -> AppResult<Vec<Inactivity>> {
        self.repository.offices.get_by_id(office_id).await?;
        self.repository.offices.list_inactivities(office_id).await
    }

    /// Remove an inactivity rule
    pub async fn remove_inactivity(&self, id: Uuid) -> AppResult<()> {
        self.repository.offices.delete_inactivity(id).await
    }
}
