use async_trait::async_trait;
use job_tracker::applications::{
    ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus,
    InMemoryApplicationRepository, RepositoryError, SqliteApplicationRepository, StatusCounts,
};
use job_tracker::config::{AppConfig, DatabaseConfig};
use job_tracker::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

use crate::cli::DatabaseArgs;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Storage backend picked from the configured database URL.
pub(crate) enum ApplicationStore {
    Sqlite(SqliteApplicationRepository),
    Memory(InMemoryApplicationRepository),
}

impl ApplicationStore {
    /// Connect to the configured backend and make sure the schema exists.
    pub(crate) async fn open(config: &DatabaseConfig) -> Result<Self, AppError> {
        if config.is_memory() {
            info!("using in-memory application store; records are lost on exit");
            return Ok(Self::Memory(InMemoryApplicationRepository::new()));
        }

        let repository = SqliteApplicationRepository::connect(&config.url).await?;
        repository.init_schema().await?;
        Ok(Self::Sqlite(repository))
    }

    fn backend(&self) -> &dyn ApplicationRepository {
        match self {
            Self::Sqlite(repository) => repository,
            Self::Memory(repository) => repository,
        }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn insert(&self, draft: ApplicationDraft) -> Result<ApplicationRecord, RepositoryError> {
        self.backend().insert(draft).await
    }

    async fn update(
        &self,
        id: ApplicationId,
        draft: ApplicationDraft,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.backend().update(id, draft).await
    }

    async fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.backend().fetch(id).await
    }

    async fn delete(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        self.backend().delete(id).await
    }

    async fn list_by_date_desc(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.backend().list_by_date_desc().await
    }

    async fn count_by_status(&self) -> Result<StatusCounts, RepositoryError> {
        self.backend().count_by_status().await
    }
}

/// Load configuration from the environment and apply the command-line database override.
pub(crate) fn load_config(database: DatabaseArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = database.database_url {
        config.database = DatabaseConfig::new(url)?;
    }
    Ok(config)
}

pub(crate) fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    raw.trim().parse::<ApplicationStatus>().map_err(|err| {
        format!("{err}; expected one of Applied, Interview, Rejected, Offer")
    })
}
