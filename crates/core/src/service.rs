//! Patient service: the single writer over the patient store.
//!
//! Front ends (REST, CLI) go through this type rather than the store so that every create and
//! edit is validated and ids are assigned in one place.

use crate::config::CoreConfig;
use crate::error::PatientResult;
use crate::loader::{load_patients, PeopleSource};
use crate::patient::{PatientAdmission, PatientDraft};
use crate::query::{PatientPage, PatientQuery};
use crate::stats::{self, DashboardSummary, PatientStatistics};
use crate::store::PatientStore;
use crate::validation::validate_draft;
use chrono::{DateTime, Utc};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct PatientService {
    store: PatientStore,
    page_size: usize,
    loaded_at: Option<DateTime<Utc>>,
}

impl PatientService {
    /// Creates an empty service using the page size from `cfg`.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            store: PatientStore::new(),
            page_size: cfg.page_size(),
            loaded_at: None,
        }
    }

    /// Fetches people from `source` and replaces the whole store with the result.
    ///
    /// On failure the error is logged, the store keeps its previous contents and the error is
    /// returned so the caller can report it. There is no retry.
    pub async fn load_from<S, R>(&mut self, source: &S, rng: &mut R) -> PatientResult<usize>
    where
        S: PeopleSource + ?Sized,
        R: Rng + Send,
    {
        match load_patients(source, rng).await {
            Ok(patients) => {
                let count = patients.len();
                self.replace_all(patients);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to fetch patients from {}: {}", source.describe(), e);
                Err(e)
            }
        }
    }

    /// Installs `patients` as the full collection.
    pub fn replace_all(&mut self, patients: Vec<PatientAdmission>) {
        self.store.replace_all(patients);
        self.loaded_at = Some(Utc::now());
    }

    /// Validates `draft` and appends it under the next free id.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the draft is incomplete or its room is taken.
    pub fn create(&mut self, draft: PatientDraft) -> PatientResult<PatientAdmission> {
        let id = self.store.next_id();
        let record = validate_draft(draft, id, self.store.all())?;
        self.store.insert(record.clone());
        tracing::info!(id, "created patient");
        Ok(record)
    }

    /// Validates `draft` and replaces the record with `id`.
    ///
    /// Returns `Ok(None)` without touching the store if no record has `id`.
    pub fn update(
        &mut self,
        id: u32,
        draft: PatientDraft,
    ) -> PatientResult<Option<PatientAdmission>> {
        if self.store.get(id).is_none() {
            return Ok(None);
        }
        let record = validate_draft(draft, id, self.store.all())?;
        self.store.update(record.clone());
        tracing::info!(id, "updated patient");
        Ok(Some(record))
    }

    /// Removes the record with `id`; `false` if there was none.
    pub fn delete(&mut self, id: u32) -> bool {
        let removed = self.store.delete(id);
        if removed {
            tracing::info!(id, "deleted patient");
        }
        removed
    }

    pub fn get(&self, id: u32) -> Option<&PatientAdmission> {
        self.store.get(id)
    }

    pub fn list(&self) -> &[PatientAdmission] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// When the store was last replaced wholesale, if ever.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn query(&self, query: &PatientQuery) -> PatientPage {
        query.run(self.store.all(), self.page_size)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        stats::dashboard(self.store.all())
    }

    pub fn statistics(&self) -> PatientStatistics {
        stats::statistics(self.store.all())
    }
}
