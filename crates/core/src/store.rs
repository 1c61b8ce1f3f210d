//! In-memory patient store.
//!
//! Holds the merged patient records in insertion order. Nothing is persisted and the store does
//! no locking of its own; it expects a single writer. Operations addressing an id that is not
//! present are no-ops, never errors.

use crate::patient::PatientAdmission;

#[derive(Clone, Debug, Default)]
pub struct PatientStore {
    patients: Vec<PatientAdmission>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current contents and installs `records` as the whole collection.
    pub fn replace_all(&mut self, records: Vec<PatientAdmission>) {
        self.patients = records;
    }

    /// Appends `record`.
    ///
    /// The caller picks the id (normally [`PatientStore::next_id`]); duplicates are not detected.
    pub fn insert(&mut self, record: PatientAdmission) {
        self.patients.push(record);
    }

    /// Replaces the record with the same `generated_id` in place.
    ///
    /// Returns `false`, leaving the store untouched, if no record has that id.
    pub fn update(&mut self, record: PatientAdmission) -> bool {
        match self
            .patients
            .iter_mut()
            .find(|p| p.generated_id == record.generated_id)
        {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record with `id`. Returns `false` if there was none.
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.patients.len();
        self.patients.retain(|p| p.generated_id != id);
        self.patients.len() != before
    }

    pub fn get(&self, id: u32) -> Option<&PatientAdmission> {
        self.patients.iter().find(|p| p.generated_id == id)
    }

    pub fn all(&self) -> &[PatientAdmission] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn max_id(&self) -> Option<u32> {
        self.patients.iter().map(|p| p.generated_id).max()
    }

    /// Id for a newly created record: one past the current maximum, or 1 for an empty store.
    pub fn next_id(&self) -> u32 {
        self.max_id().map_or(1, |max| max.saturating_add(1))
    }
}
