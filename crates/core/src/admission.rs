//! Admission data synthesis.
//!
//! The people source only supplies demographics. Everything admission related (status and
//! room) is made up here, one record per person, in a single pass:
//!
//! - every record draws its status uniformly from [`AdmissionStatus::ALL`], independently of
//!   the others, so a run may well produce very few admitted patients;
//! - an `Admitted` record takes the lowest-numbered free room from a pool of
//!   [`ROOM_POOL_SIZE`] rooms;
//! - once the pool is empty, further admitted records simply have no room.
//!
//! The pool lives for one call only. Two calls never share room history.

use crate::constants::{MAX_GENERATE_TOTAL, ROOM_POOL_SIZE};
use crate::error::{PatientError, PatientResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;
use ward_types::RoomNumber;

/// Where a patient currently is in their stay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AdmissionStatus {
    Admitted,
    Discharged,
    #[serde(rename = "Under Observation")]
    UnderObservation,
}

impl AdmissionStatus {
    /// All statuses, in the order the patient tabs show them.
    pub const ALL: [AdmissionStatus; 3] = [
        AdmissionStatus::Admitted,
        AdmissionStatus::Discharged,
        AdmissionStatus::UnderObservation,
    ];

    /// Uniform draw over [`AdmissionStatus::ALL`].
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::Admitted => "Admitted",
            AdmissionStatus::Discharged => "Discharged",
            AdmissionStatus::UnderObservation => "Under Observation",
        }
    }
}

impl std::fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdmissionStatus {
    type Err = PatientError;

    /// Accepts the display name, case-insensitively, with `_`, `-` or a space between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalised.as_str() {
            "admitted" => Ok(AdmissionStatus::Admitted),
            "discharged" => Ok(AdmissionStatus::Discharged),
            "under observation" => Ok(AdmissionStatus::UnderObservation),
            _ => Err(PatientError::InvalidInput(format!(
                "unknown admission status: {s}"
            ))),
        }
    }
}

/// Synthesized admission metadata for the person at the same position in the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRecord {
    /// `index + 1`; only meaningful within the run that produced it.
    pub generated_id: u32,
    pub status: AdmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub room_number: Option<RoomNumber>,
}

/// Rooms not yet handed out during one synthesis run.
#[derive(Debug)]
pub struct RoomPool {
    available: BTreeSet<u16>,
}

impl RoomPool {
    /// A full pool of rooms `1..=size`.
    pub fn new(size: u16) -> Self {
        Self {
            available: (1..=size).collect(),
        }
    }

    /// Takes the lowest-numbered free room, if any remain.
    pub fn take_lowest(&mut self) -> Option<RoomNumber> {
        self.available.pop_first().map(RoomNumber::from_number)
    }

    pub fn remaining(&self) -> usize {
        self.available.len()
    }
}

impl Default for RoomPool {
    fn default() -> Self {
        Self::new(ROOM_POOL_SIZE)
    }
}

/// Generates admission data for `total` people.
///
/// # Errors
///
/// Returns [`PatientError::InvalidArgument`] if `total` is negative or above
/// [`MAX_GENERATE_TOTAL`].
pub fn generate_all_admission_data<R: Rng>(
    total: i64,
    rng: &mut R,
) -> PatientResult<Vec<AdmissionRecord>> {
    if total < 0 {
        return Err(PatientError::InvalidArgument(format!(
            "total must be non-negative, got {total}"
        )));
    }
    let total = u32::try_from(total)
        .ok()
        .filter(|t| *t <= MAX_GENERATE_TOTAL)
        .ok_or_else(|| {
            PatientError::InvalidArgument(format!(
                "total must be at most {MAX_GENERATE_TOTAL}, got {total}"
            ))
        })?;

    let mut rooms = RoomPool::default();
    let records: Vec<AdmissionRecord> = (1..=total)
        .map(|generated_id| {
            let status = AdmissionStatus::random(rng);
            let room_number = match status {
                AdmissionStatus::Admitted => rooms.take_lowest(),
                _ => None,
            };
            AdmissionRecord {
                generated_id,
                status,
                room_number,
            }
        })
        .collect();

    tracing::debug!(
        total,
        rooms_left = rooms.remaining(),
        "generated admission data"
    );

    Ok(records)
}
