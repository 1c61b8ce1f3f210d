//! # API Shared
//!
//! Shared request/response types for the Ward APIs.
//!
//! Contains:
//! - wire types with OpenAPI schemas (`HealthRes`, `GenerateAdmissionsReq`, ...)
//! - the `HealthService`
//!
//! Domain records (`PatientAdmission`, `PatientPage`, ...) are served as-is from `ward-core`.

pub mod health;

pub use health::HealthService;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use ward_core::AdmissionRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Number of patients currently held in memory.
    pub patients: usize,
    /// When the patient list was last loaded, if it ever was.
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Body of an error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query string of `GET /patients`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPatientsParams {
    /// `Admitted`, `Discharged` or `Under Observation` (also accepts `under_observation`).
    pub status: Option<String>,
    /// Case-insensitive substring of the patient's full name.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateAdmissionsReq {
    /// Number of records to synthesize, from 0 to `MAX_GENERATE_TOTAL` (10 000).
    pub total: i64,
    /// Optional seed for a reproducible run.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateAdmissionsRes {
    pub admissions: Vec<AdmissionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReloadRes {
    /// Number of patients loaded from the people source.
    pub loaded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_seed_is_optional() {
        let req: GenerateAdmissionsReq = serde_json::from_str(r#"{"total": 3}"#).unwrap();
        assert_eq!(req.total, 3);
        assert_eq!(req.seed, None);
    }
}
