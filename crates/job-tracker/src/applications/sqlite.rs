//! SQLite-backed repository built on a `sqlx` connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, error, info};

use super::domain::{
    ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationStatus, StatusCounts,
};
use super::repository::{ApplicationRepository, RepositoryError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name VARCHAR(120) NOT NULL,
    role VARCHAR(120) NOT NULL,
    application_date TEXT NOT NULL,
    status VARCHAR(20) NOT NULL,
    notes TEXT NOT NULL
)";

const SELECT_COLUMNS: &str =
    "SELECT id, company_name, role, application_date, status, notes FROM applications";

const MAX_CONNECTIONS: u32 = 5;

pub struct SqliteApplicationRepository {
    pool: SqlitePool,
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: i64,
    company_name: String,
    role: String,
    application_date: NaiveDate,
    status: String,
    notes: String,
}

impl TryFrom<ApplicationRow> for ApplicationRecord {
    type Error = RepositoryError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|err| RepositoryError::InvalidData(format!("application {}: {err}", row.id)))?;

        Ok(Self {
            id: ApplicationId(row.id),
            company_name: row.company_name,
            role: row.role,
            application_date: row.application_date,
            status,
            notes: row.notes,
        })
    }
}

fn storage_error(err: sqlx::Error) -> RepositoryError {
    error!(error = %err, "sqlite query failed");
    RepositoryError::Unavailable(err.to_string())
}

impl SqliteApplicationRepository {
    /// Open a pool for `url` (e.g. `sqlite://jobs.db` or `sqlite::memory:`), creating the
    /// database file when it does not exist yet.
    ///
    /// An in-memory database lives only as long as its connection, so those pools are pinned
    /// to a single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|err| RepositoryError::Unavailable(format!("invalid database url: {err}")))?
            .create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        info!(%url, "connected to sqlite database");
        Ok(Self { pool })
    }

    /// Create the `applications` table if it is missing. Safe to run on every start.
    pub async fn init_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        debug!("applications table ready");
        Ok(())
    }
}

#[async_trait]
impl ApplicationRepository for SqliteApplicationRepository {
    async fn insert(&self, draft: ApplicationDraft) -> Result<ApplicationRecord, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO applications (company_name, role, application_date, status, notes) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.company_name)
        .bind(&draft.role)
        .bind(draft.application_date)
        .bind(draft.status.label())
        .bind(&draft.notes)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        let id = ApplicationId(result.last_insert_rowid());
        Ok(ApplicationRecord::from_draft(id, draft))
    }

    async fn update(
        &self,
        id: ApplicationId,
        draft: ApplicationDraft,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let result = sqlx::query(
            "UPDATE applications \
             SET company_name = ?, role = ?, application_date = ?, status = ?, notes = ? \
             WHERE id = ?",
        )
        .bind(&draft.company_name)
        .bind(&draft.role)
        .bind(draft.application_date)
        .bind(draft.status.label())
        .bind(&draft.notes)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(ApplicationRecord::from_draft(id, draft))
    }

    async fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(ApplicationRecord::try_from).transpose()
    }

    async fn delete(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list_by_date_desc(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY application_date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?
        .into_iter()
        .map(ApplicationRecord::try_from)
        .collect()
    }

    async fn count_by_status(&self) -> Result<StatusCounts, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM applications GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut counts = StatusCounts::default();
        for (label, count) in rows {
            let status = label
                .parse::<ApplicationStatus>()
                .map_err(|err| RepositoryError::InvalidData(err.to_string()))?;
            let count = u64::try_from(count)
                .map_err(|_| RepositoryError::InvalidData(format!("negative count for {label}")))?;
            counts.add(status, count);
        }
        Ok(counts)
    }
}
