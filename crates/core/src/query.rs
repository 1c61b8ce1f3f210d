//! Read-side queries backing the patient tabs: filter by status, search by name, paginate.

use crate::admission::AdmissionStatus;
use crate::patient::PatientAdmission;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which slice of the patient list to return.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientQuery {
    /// Only patients with this status; all patients when `None`.
    pub status: Option<AdmissionStatus>,
    /// Case-insensitive substring of `"<first name> <last name>"`.
    pub search: Option<String>,
    /// 1-based page number. Out-of-range values are clamped.
    pub page: Option<usize>,
}

/// One page of matching patients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientPage {
    pub patients: Vec<PatientAdmission>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl PatientQuery {
    pub fn matches(&self, patient: &PatientAdmission) -> bool {
        if let Some(status) = self.status {
            if patient.status != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => patient
                .full_name()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// Runs the query over `patients`, keeping their order.
    ///
    /// A `page_size` of zero is treated as one.
    pub fn run(&self, patients: &[PatientAdmission], page_size: usize) -> PatientPage {
        let page_size = page_size.max(1);
        let matching: Vec<&PatientAdmission> =
            patients.iter().filter(|p| self.matches(p)).collect();

        let total_matches = matching.len();
        let total_pages = total_matches.div_ceil(page_size);
        let page = self.page.unwrap_or(1).clamp(1, total_pages.max(1));
        let start = (page - 1) * page_size;

        PatientPage {
            patients: matching
                .into_iter()
                .skip(start)
                .take(page_size)
                .cloned()
                .collect(),
            page,
            page_size,
            total_pages,
            total_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::tests::patient;

    fn named(id: u32, first: &str, last: &str, status: AdmissionStatus) -> PatientAdmission {
        let mut record = patient(id, status);
        record.first_name = first.into();
        record.last_name = last.into();
        record
    }

    fn ward() -> Vec<PatientAdmission> {
        vec![
            named(1, "Emily", "Johnson", AdmissionStatus::Admitted),
            named(2, "Michael", "Williams", AdmissionStatus::Discharged),
            named(3, "Sophia", "Brown", AdmissionStatus::Admitted),
            named(4, "James", "Davis", AdmissionStatus::UnderObservation),
            named(5, "Emma", "Miller", AdmissionStatus::Admitted),
        ]
    }

    fn ids(page: &PatientPage) -> Vec<u32> {
        page.patients.iter().map(|p| p.generated_id).collect()
    }

    #[test]
    fn test_filters_by_status() {
        let query = PatientQuery {
            status: Some(AdmissionStatus::Admitted),
            ..Default::default()
        };
        let page = query.run(&ward(), 10);
        assert_eq!(ids(&page), vec![1, 3, 5]);
        assert_eq!(page.total_matches, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_over_full_name() {
        let query = PatientQuery {
            search: Some("EM".into()),
            ..Default::default()
        };
        assert_eq!(ids(&query.run(&ward(), 10)), vec![1, 5]);

        let across_names = PatientQuery {
            search: Some("sophia b".into()),
            ..Default::default()
        };
        assert_eq!(ids(&across_names.run(&ward(), 10)), vec![3]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let query = PatientQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.run(&ward(), 10).total_matches, 5);
    }

    #[test]
    fn test_pagination_splits_and_clamps() {
        let patients = ward();
        let second = PatientQuery {
            page: Some(2),
            ..Default::default()
        }
        .run(&patients, 2);
        assert_eq!(ids(&second), vec![3, 4]);
        assert_eq!(second.total_pages, 3);

        let beyond = PatientQuery {
            page: Some(99),
            ..Default::default()
        }
        .run(&patients, 2);
        assert_eq!(beyond.page, 3);
        assert_eq!(ids(&beyond), vec![5]);

        let zero = PatientQuery {
            page: Some(0),
            ..Default::default()
        }
        .run(&patients, 2);
        assert_eq!(zero.page, 1);
        assert_eq!(ids(&zero), vec![1, 2]);
    }

    #[test]
    fn test_no_matches_gives_empty_first_page() {
        let query = PatientQuery {
            search: Some("nobody".into()),
            page: Some(4),
            ..Default::default()
        };
        let page = query.run(&ward(), 10);
        assert!(page.patients.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
    }
}
