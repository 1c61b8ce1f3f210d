//! Aggregations for the dashboard, overview and statistics views.

use crate::admission::AdmissionStatus;
use crate::constants::{AGE_GROUP_BOUNDS, AGE_GROUP_OLDEST, ROOM_POOL_SIZE};
use crate::patient::{BloodGroup, Gender, PatientAdmission};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub admitted: usize,
    pub discharged: usize,
    pub under_observation: usize,
}

impl StatusCounts {
    pub fn tally(patients: &[PatientAdmission]) -> Self {
        patients
            .iter()
            .fold(Self::default(), |mut counts, p| {
                match p.status {
                    AdmissionStatus::Admitted => counts.admitted += 1,
                    AdmissionStatus::Discharged => counts.discharged += 1,
                    AdmissionStatus::UnderObservation => counts.under_observation += 1,
                }
                counts
            })
    }

    pub fn get(&self, status: AdmissionStatus) -> usize {
        match status {
            AdmissionStatus::Admitted => self.admitted,
            AdmissionStatus::Discharged => self.discharged,
            AdmissionStatus::UnderObservation => self.under_observation,
        }
    }
}

/// A labelled count, used for chart series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Headline numbers for the dashboard cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub currently_admitted: usize,
    pub status_counts: StatusCounts,
    /// Distinct rooms held by admitted patients.
    pub occupied_rooms: usize,
    /// Rooms of the fixed pool not held by anyone.
    pub free_rooms: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientStatistics {
    pub status_counts: StatusCounts,
    pub gender_counts: Vec<Bucket>,
    pub age_groups: Vec<Bucket>,
    pub blood_groups: Vec<Bucket>,
}

pub fn dashboard(patients: &[PatientAdmission]) -> DashboardSummary {
    let status_counts = StatusCounts::tally(patients);
    let occupied: HashSet<&str> = patients
        .iter()
        .filter(|p| p.is_admitted())
        .filter_map(|p| p.room_number.as_ref().map(|r| r.as_str()))
        .collect();
    let pool_rooms_held = occupied
        .iter()
        .filter(|room| {
            room.parse::<u16>()
                .is_ok_and(|n| (1..=ROOM_POOL_SIZE).contains(&n))
        })
        .count();

    DashboardSummary {
        total_patients: patients.len(),
        currently_admitted: status_counts.admitted,
        status_counts,
        occupied_rooms: occupied.len(),
        free_rooms: usize::from(ROOM_POOL_SIZE).saturating_sub(pool_rooms_held),
    }
}

/// Bucket label for `age`.
pub fn age_group(age: u32) -> &'static str {
    AGE_GROUP_BOUNDS
        .iter()
        .find(|(_, upper)| age <= *upper)
        .map_or(AGE_GROUP_OLDEST, |(label, _)| *label)
}

pub fn statistics(patients: &[PatientAdmission]) -> PatientStatistics {
    let gender_counts = Gender::ALL
        .iter()
        .map(|g| Bucket {
            label: g.to_string(),
            count: patients.iter().filter(|p| p.gender == *g).count(),
        })
        .collect();

    let age_groups = AGE_GROUP_BOUNDS
        .iter()
        .map(|(label, _)| *label)
        .chain(std::iter::once(AGE_GROUP_OLDEST))
        .map(|label| Bucket {
            label: label.to_string(),
            count: patients.iter().filter(|p| age_group(p.age) == label).count(),
        })
        .collect();

    let blood_groups = BloodGroup::ALL
        .iter()
        .map(|bg| Bucket {
            label: bg.to_string(),
            count: patients.iter().filter(|p| p.blood_group == *bg).count(),
        })
        .collect();

    PatientStatistics {
        status_counts: StatusCounts::tally(patients),
        gender_counts,
        age_groups,
        blood_groups,
    }
}
