use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    status_filter_options, ApplicationForm, ApplicationId, ApplicationRecord, StatusCounts,
};
use super::repository::{ApplicationRepository, RepositoryError};
use super::validation::ValidationError;

/// Service composing form validation with the repository.
pub struct ApplicationService<R> {
    repository: Arc<R>,
}

/// Everything the listing page needs.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListing {
    pub applications: Vec<ApplicationRecord>,
    pub status_options: Vec<&'static str>,
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validate a submitted form and persist it as a new record.
    pub async fn create(
        &self,
        form: ApplicationForm,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let draft = form.validate().inspect_err(|err| {
            warn!(reason = %err, "rejected new application");
        })?;

        let record = self.repository.insert(draft).await?;
        info!(id = %record.id, company = %record.company_name, "application created");
        Ok(record)
    }

    pub async fn list(&self) -> Result<ApplicationListing, ApplicationServiceError> {
        let applications = self.repository.list_by_date_desc().await?;
        Ok(ApplicationListing {
            applications,
            status_options: status_filter_options(),
        })
    }

    pub async fn get(&self, id: ApplicationId) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Replace the fields of an existing record.
    ///
    /// The id is resolved before the form is looked at, so an unknown id is reported as
    /// not-found even when the form is also invalid.
    pub async fn edit(
        &self,
        id: ApplicationId,
        form: ApplicationForm,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.get(id).await?;

        let draft = form.validate().inspect_err(|err| {
            warn!(%id, reason = %err, "rejected application update");
        })?;

        let record = self.repository.update(id, draft).await?;
        info!(%id, "application updated");
        Ok(record)
    }

    pub async fn delete(&self, id: ApplicationId) -> Result<(), ApplicationServiceError> {
        self.repository.delete(id).await?;
        info!(%id, "application deleted");
        Ok(())
    }

    pub async fn stats(&self) -> Result<StatusCounts, ApplicationServiceError> {
        Ok(self.repository.count_by_status().await?)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApplicationServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::NotFound))
    }
}
