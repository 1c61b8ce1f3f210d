//! Patient records and the merge step that builds them.
//!
//! A [`PatientAdmission`] is a [`PersonRecord`] from the people source combined with the
//! synthesized [`AdmissionRecord`] at the same position, plus a randomly drawn blood group.

use crate::admission::{AdmissionRecord, AdmissionStatus};
use crate::error::{PatientError, PatientResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use ward_types::RoomNumber;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ABO/Rh blood group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// Canonical display order, also used for statistics.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform draw over the eight blood groups.
pub fn random_blood_group<R: Rng>(rng: &mut R) -> BloodGroup {
    BloodGroup::ALL[rng.gen_range(0..BloodGroup::ALL.len())]
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// One person as supplied by the people source. Extra fields in the payload are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// A patient as held by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientAdmission {
    pub generated_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub status: AdmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub room_number: Option<RoomNumber>,
    pub blood_group: BloodGroup,
}

impl PatientAdmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admitted(&self) -> bool {
        self.status == AdmissionStatus::Admitted
    }
}

/// Patient fields as entered on the add/edit form, before validation.
///
/// The room number is free text here; [`crate::validation::validate_draft`] turns a draft into
/// a [`PatientAdmission`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub status: AdmissionStatus,
    #[serde(default)]
    pub room_number: Option<String>,
    pub blood_group: BloodGroup,
}

impl From<&PatientAdmission> for PatientDraft {
    fn from(patient: &PatientAdmission) -> Self {
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            age: patient.age,
            gender: patient.gender,
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            address: patient.address.clone(),
            status: patient.status,
            room_number: patient.room_number.as_ref().map(|r| r.to_string()),
            blood_group: patient.blood_group,
        }
    }
}

/// Combines people with the admission data synthesized for them, by position.
///
/// # Errors
///
/// Returns [`PatientError::InvalidArgument`] if the two sequences differ in length.
pub fn merge_people<R: Rng>(
    people: Vec<PersonRecord>,
    admissions: Vec<AdmissionRecord>,
    rng: &mut R,
) -> PatientResult<Vec<PatientAdmission>> {
    if people.len() != admissions.len() {
        return Err(PatientError::InvalidArgument(format!(
            "{} people but {} admission records",
            people.len(),
            admissions.len()
        )));
    }

    Ok(people
        .into_iter()
        .zip(admissions)
        .map(|(person, admission)| PatientAdmission {
            generated_id: admission.generated_id,
            first_name: person.first_name,
            last_name: person.last_name,
            age: person.age,
            gender: person.gender,
            email: person.email,
            phone: person.phone,
            address: person.address,
            status: admission.status,
            room_number: admission.room_number,
            blood_group: random_blood_group(rng),
        })
        .collect())
}
