use crate::HealthRes;
use chrono::{DateTime, Utc};

/// Health reporting shared by the REST binaries.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Builds the health response for the current store state.
    ///
    /// The service is reported as alive even with an empty store: a failed startup fetch leaves
    /// the patient list empty but the API keeps serving.
    pub fn check_health(patients: usize, loaded_at: Option<DateTime<Utc>>) -> HealthRes {
        let message = match loaded_at {
            Some(_) => "Ward is alive".to_string(),
            None => "Ward is alive (patients not loaded)".to_string(),
        };
        HealthRes {
            ok: true,
            message,
            patients,
            loaded_at,
        }
    }
}
