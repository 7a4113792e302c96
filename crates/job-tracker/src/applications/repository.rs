use async_trait::async_trait;

use super::domain::{ApplicationDraft, ApplicationId, ApplicationRecord, StatusCounts};

/// Storage abstraction so the service can run against SQLite or memory.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new record; the store assigns the id.
    async fn insert(&self, draft: ApplicationDraft) -> Result<ApplicationRecord, RepositoryError>;
    /// Overwrite every field of an existing record, keeping its id.
    async fn update(
        &self,
        id: ApplicationId,
        draft: ApplicationDraft,
    ) -> Result<ApplicationRecord, RepositoryError>;
    async fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    async fn delete(&self, id: ApplicationId) -> Result<(), RepositoryError>;
    /// All records, newest application date first; ties break on id, newest first.
    async fn list_by_date_desc(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    async fn count_by_status(&self) -> Result<StatusCounts, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("stored record is invalid: {0}")]
    InvalidData(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
