use serde::{Deserialize, Serialize};

use crate::workflows::admissions::domain::{ChildProfile, ExtractedDocData};

/// Outcome of comparing extracted fields against the submitted profile.
/// Failures are data for the UI to narrate, never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub mismatch_details: Option<String>,
}

/// Pure comparison of the two inputs. Checks run in a fixed order (name,
/// date of birth, address) and every mismatch lands in one "; "-joined
/// narrative. Fields absent from either side are skipped.
pub fn validate(extracted: &ExtractedDocData, profile: &ChildProfile) -> ValidationReport {
    let mut mismatches = Vec::new();

    if let Some(child_name) = &extracted.child_name {
        if !names_align(child_name, &profile.name) {
            mismatches.push(format!(
                "name '{}' on the document does not match '{}' in the profile",
                child_name, profile.name
            ));
        }
    }

    if let (Some(document_dob), Some(profile_dob)) =
        (extracted.date_of_birth, profile.date_of_birth)
    {
        if document_dob != profile_dob {
            mismatches.push(format!(
                "date of birth {} on the document differs from {} in the profile",
                document_dob, profile_dob
            ));
        }
    }

    if let Some(address) = &extracted.address {
        if !text_aligns(address, &profile.location) {
            mismatches.push(format!(
                "address '{}' on the document does not mention '{}'",
                address, profile.location
            ));
        }
    }

    if mismatches.is_empty() {
        ValidationReport {
            is_valid: true,
            mismatch_details: None,
        }
    } else {
        ValidationReport {
            is_valid: false,
            mismatch_details: Some(mismatches.join("; ")),
        }
    }
}

/// Case-insensitive bidirectional containment, tolerating partial name entry
/// on either side.
fn names_align(left: &str, right: &str) -> bool {
    text_aligns(left, right)
}

fn text_aligns(left: &str, right: &str) -> bool {
    let left = left.trim().to_lowercase();
    let right = right.trim().to_lowercase();

    if left.is_empty() || right.is_empty() {
        return false;
    }

    left.contains(&right) || right.contains(&left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::admissions::domain::{AcademicLevel, BudgetRange};
    use chrono::NaiveDate;

    fn profile() -> ChildProfile {
        ChildProfile {
            name: "Aarav".to_string(),
            age_years: 7.0,
            date_of_birth: NaiveDate::from_ymd_opt(2018, 5, 15),
            target_class: "Class 2".to_string(),
            preferred_board: "CBSE".to_string(),
            location: "Indiranagar, Bengaluru".to_string(),
            max_distance_km: 8.0,
            budget: BudgetRange {
                min: 50_000,
                max: 250_000,
            },
            academic_level: AcademicLevel::AboveAverage,
        }
    }

    #[test]
    fn partial_name_passes_in_both_directions() {
        let mut extracted = ExtractedDocData {
            child_name: Some("Aarav Sharma".to_string()),
            ..ExtractedDocData::default()
        };
        assert!(validate(&extracted, &profile()).is_valid);

        extracted.child_name = Some("aarav".to_string());
        let mut long_profile = profile();
        long_profile.name = "Aarav Sharma".to_string();
        assert!(validate(&extracted, &long_profile).is_valid);
    }

    #[test]
    fn unrelated_name_is_rejected() {
        let extracted = ExtractedDocData {
            child_name: Some("Ved".to_string()),
            ..ExtractedDocData::default()
        };
        let report = validate(&extracted, &profile());

        assert!(!report.is_valid);
        let details = report.mismatch_details.expect("mismatch narrative");
        assert!(details.contains("Ved"));
    }

    #[test]
    fn birth_date_mismatch_is_reported_without_flagging_the_name() {
        let extracted = ExtractedDocData {
            child_name: Some("Aarav Sharma".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(2019, 1, 1),
            ..ExtractedDocData::default()
        };
        let report = validate(&extracted, &profile());

        assert!(!report.is_valid);
        let details = report.mismatch_details.expect("mismatch narrative");
        assert!(details.contains("date of birth"));
        assert!(details.contains("2019-01-01"));
        assert!(!details.contains("name '"));
    }

    #[test]
    fn multiple_mismatches_join_in_check_order() {
        let extracted = ExtractedDocData {
            child_name: Some("Ved".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(2019, 1, 1),
            ..ExtractedDocData::default()
        };
        let report = validate(&extracted, &profile());

        let details = report.mismatch_details.expect("mismatch narrative");
        let name_at = details.find("name 'Ved'").expect("name mismatch listed");
        let dob_at = details.find("date of birth").expect("dob mismatch listed");
        assert!(name_at < dob_at);
        assert!(details.contains("; "));
    }

    #[test]
    fn empty_extraction_is_vacuously_valid() {
        let report = validate(&ExtractedDocData::default(), &profile());
        assert!(report.is_valid);
        assert!(report.mismatch_details.is_none());
    }

    #[test]
    fn profile_without_birth_date_skips_the_dob_check() {
        let mut profile = profile();
        profile.date_of_birth = None;
        let extracted = ExtractedDocData {
            date_of_birth: NaiveDate::from_ymd_opt(2019, 1, 1),
            ..ExtractedDocData::default()
        };
        assert!(validate(&extracted, &profile).is_valid);
    }
}
