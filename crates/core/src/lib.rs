//! # Ward Core
//!
//! Core business logic for the Ward hospital admission service.
//!
//! This crate contains pure data operations:
//! - synthesis of admission data (status, room) for people fetched from a remote source
//! - the in-memory patient store and the service that validates writes to it
//! - read-side queries and statistics for dashboards and the patient table
//!
//! **No API concerns**: HTTP servers and command line handling belong in `api-rest`,
//! `api-shared` and `ward-cli`.

pub mod admission;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod patient;
pub mod query;
pub mod service;
pub mod stats;
pub mod store;
pub mod validation;

pub use admission::{generate_all_admission_data, AdmissionRecord, AdmissionStatus, RoomPool};
pub use config::CoreConfig;
pub use constants::*;
pub use error::{PatientError, PatientResult};
pub use loader::{load_patients, parse_people, HttpPeopleSource, PeopleSource};
pub use patient::{
    merge_people, random_blood_group, Address, BloodGroup, Gender, PatientAdmission,
    PatientDraft, PersonRecord,
};
pub use query::{PatientPage, PatientQuery};
pub use service::PatientService;
pub use stats::{Bucket, DashboardSummary, PatientStatistics, StatusCounts};
pub use store::PatientStore;
pub use ward_types::{NonEmptyText, RoomNumber, TextError};
