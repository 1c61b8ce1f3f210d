//! Input validation for patient create and edit.
//!
//! A draft is accepted only when every field is filled in. Admitted patients also need a room
//! that no other admitted patient holds.

use crate::admission::AdmissionStatus;
use crate::error::{PatientError, PatientResult};
use crate::patient::{Address, PatientAdmission, PatientDraft};
use ward_types::{NonEmptyText, RoomNumber};

fn required(field: &str, value: &str) -> PatientResult<String> {
    NonEmptyText::new(value)
        .map(NonEmptyText::into_inner)
        .map_err(|_| PatientError::InvalidInput(format!("{field} is required")))
}

/// Validates `draft` and builds the record that will be stored under `generated_id`.
///
/// `existing` is the current store contents; the record with `generated_id` itself is ignored
/// for the room check, so an edit can keep its own room. A room typed for a patient who is not
/// admitted is dropped.
///
/// # Errors
///
/// - [`PatientError::InvalidInput`] if a text field is blank, the age is zero, or an admitted
///   patient has no room or an unusable room label.
/// - [`PatientError::RoomTaken`] if another admitted patient already holds the room.
pub fn validate_draft(
    draft: PatientDraft,
    generated_id: u32,
    existing: &[PatientAdmission],
) -> PatientResult<PatientAdmission> {
    let first_name = required("first name", &draft.first_name)?;
    let last_name = required("last name", &draft.last_name)?;
    if draft.age == 0 {
        return Err(PatientError::InvalidInput("age is required".into()));
    }
    let email = required("email", &draft.email)?;
    let phone = required("phone", &draft.phone)?;
    let address = Address {
        address: required("address", &draft.address.address)?,
        city: required("city", &draft.address.city)?,
        postal_code: required("postal code", &draft.address.postal_code)?,
    };

    let room_number = match draft.status {
        AdmissionStatus::Admitted => {
            let raw = draft.room_number.as_deref().unwrap_or_default();
            let room = RoomNumber::parse(raw).map_err(|e| {
                PatientError::InvalidInput(format!("room number is required for admitted patients: {e}"))
            })?;
            ensure_room_free(&room, generated_id, existing)?;
            Some(room)
        }
        _ => None,
    };

    Ok(PatientAdmission {
        generated_id,
        first_name,
        last_name,
        age: draft.age,
        gender: draft.gender,
        email,
        phone,
        address,
        status: draft.status,
        room_number,
        blood_group: draft.blood_group,
    })
}

/// Fails if an admitted patient other than `generated_id` holds `room`.
pub fn ensure_room_free(
    room: &RoomNumber,
    generated_id: u32,
    existing: &[PatientAdmission],
) -> PatientResult<()> {
    let taken = existing.iter().any(|p| {
        p.is_admitted() && p.room_number.as_ref() == Some(room) && p.generated_id != generated_id
    });
    if taken {
        return Err(PatientError::RoomTaken(room.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::tests::patient;
    use crate::patient::{BloodGroup, Gender};

    fn draft(status: AdmissionStatus, room: Option<&str>) -> PatientDraft {
        PatientDraft {
            first_name: "  Sophia ".into(),
            last_name: "Brown".into(),
            age: 42,
            gender: Gender::Female,
            email: "sophia.brown@example.com".into(),
            phone: "+81 965-431-3024".into(),
            address: Address {
                address: "1642 Ninth Street".into(),
                city: "Washington".into(),
                postal_code: "32822".into(),
            },
            status,
            room_number: room.map(str::to_string),
            blood_group: BloodGroup::BNegative,
        }
    }

    fn admitted_in(id: u32, room: u16) -> PatientAdmission {
        let mut record = patient(id, AdmissionStatus::Admitted);
        record.room_number = Some(RoomNumber::from_number(room));
        record
    }

    #[test]
    fn test_valid_draft_is_trimmed_and_assigned_id() {
        let record = validate_draft(draft(AdmissionStatus::Admitted, Some(" 5 ")), 12, &[])
            .expect("draft should be valid");
        assert_eq!(record.generated_id, 12);
        assert_eq!(record.first_name, "Sophia");
        assert_eq!(record.room_number.unwrap().as_str(), "5");
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut blank_city = draft(AdmissionStatus::Discharged, None);
        blank_city.address.city = "   ".into();
        let err = validate_draft(blank_city, 1, &[]).expect_err("blank city should fail");
        assert!(matches!(err, PatientError::InvalidInput(ref m) if m == "city is required"));

        let mut no_age = draft(AdmissionStatus::Discharged, None);
        no_age.age = 0;
        assert!(matches!(
            validate_draft(no_age, 1, &[]),
            Err(PatientError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_admitted_patient_needs_a_room() {
        for room in [None, Some(""), Some("  ")] {
            let err = validate_draft(draft(AdmissionStatus::Admitted, room), 1, &[])
                .expect_err("admitted without room should fail");
            assert!(matches!(err, PatientError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_room_held_by_another_admitted_patient_is_rejected() {
        let existing = vec![admitted_in(1, 5)];
        let err = validate_draft(draft(AdmissionStatus::Admitted, Some("5")), 2, &existing)
            .expect_err("room 5 is taken");
        assert!(matches!(err, PatientError::RoomTaken(ref r) if r == "5"));
    }

    #[test]
    fn test_zero_padded_room_is_the_same_room() {
        let existing = vec![admitted_in(1, 1)];
        let err = validate_draft(draft(AdmissionStatus::Admitted, Some("01")), 2, &existing)
            .expect_err("room 01 is room 1");
        assert!(matches!(err, PatientError::RoomTaken(ref r) if r == "1"));
    }

    #[test]
    fn test_unusable_room_label_is_invalid_input() {
        let err = validate_draft(draft(AdmissionStatus::Admitted, Some("room 5")), 1, &[])
            .expect_err("spaces are not allowed in a room label");
        assert!(matches!(err, PatientError::InvalidInput(_)));
    }

    #[test]
    fn test_editing_patient_may_keep_own_room() {
        let existing = vec![admitted_in(1, 5)];
        let record = validate_draft(draft(AdmissionStatus::Admitted, Some("5")), 1, &existing)
            .expect("own room is allowed");
        assert_eq!(record.room_number.unwrap().as_str(), "5");
    }

    #[test]
    fn test_room_of_discharged_patient_is_free() {
        let mut discharged = admitted_in(1, 5);
        discharged.status = AdmissionStatus::Discharged;
        validate_draft(draft(AdmissionStatus::Admitted, Some("5")), 2, &[discharged])
            .expect("room of a discharged patient can be reused");
    }

    #[test]
    fn test_room_is_dropped_when_not_admitted() {
        let record = validate_draft(draft(AdmissionStatus::UnderObservation, Some("9")), 3, &[])
            .expect("draft should be valid");
        assert!(record.room_number.is_none());
    }
}
