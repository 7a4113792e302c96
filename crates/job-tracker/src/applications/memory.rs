use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::domain::{ApplicationDraft, ApplicationId, ApplicationRecord, StatusCounts};
use super::repository::{ApplicationRepository, RepositoryError};

/// Process-local store. Ids start at 1 and are never reused, matching SQLite `AUTOINCREMENT`.
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    records: BTreeMap<ApplicationId, ApplicationRecord>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. A poisoned lock is an error, never an empty store.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, draft: ApplicationDraft) -> Result<ApplicationRecord, RepositoryError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let record = ApplicationRecord::from_draft(ApplicationId(state.last_id), draft);
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: ApplicationId,
        draft: ApplicationDraft,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut state = self.lock()?;
        let slot = state
            .records
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = ApplicationRecord::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    async fn delete(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        self.lock()?
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_by_date_desc(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let state = self.lock()?;
        let mut records: Vec<ApplicationRecord> = state.records.values().cloned().collect();
        records.sort_by(|a, b| {
            b.application_date
                .cmp(&a.application_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn count_by_status(&self) -> Result<StatusCounts, RepositoryError> {
        Ok(self.lock()?.records.values().collect())
    }
}
