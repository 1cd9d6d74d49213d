use std::collections::BTreeMap;

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for opened admission applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Structured intake snapshot describing the prospective student and the
/// family's preferences. Assembled by the external intake flow and passed in
/// by value; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub name: String,
    /// Fractional years, e.g. 4.5.
    pub age_years: f32,
    /// Explicit date of birth when the family provided one.
    pub date_of_birth: Option<NaiveDate>,
    pub target_class: String,
    pub preferred_board: String,
    pub location: String,
    pub max_distance_km: f32,
    pub budget: BudgetRange,
    pub academic_level: AcademicLevel,
}

impl ChildProfile {
    /// The profile's date of birth, deriving one from the declared age when
    /// the family skipped the field.
    pub fn date_of_birth_or_derived(&self, today: NaiveDate) -> NaiveDate {
        if let Some(dob) = self.date_of_birth {
            return dob;
        }

        let months = (self.age_years * 12.0).round().max(0.0) as u32;
        today.checked_sub_months(Months::new(months)).unwrap_or(today)
    }
}

/// Currency-agnostic annual fee band the family will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

/// Qualitative academic self-assessment collected during intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicLevel {
    BelowAverage,
    Average,
    AboveAverage,
    Excellent,
}

impl AcademicLevel {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BelowAverage,
            Self::Average,
            Self::AboveAverage,
            Self::Excellent,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowAverage => "Below Average",
            Self::Average => "Average",
            Self::AboveAverage => "Above Average",
            Self::Excellent => "Excellent",
        }
    }
}

/// The fixed set of document kinds the upload checklist accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Photo,
    ParentId,
    BirthCertificate,
    TransferCertificate,
    Marksheet,
    AddressProof,
}

impl DocumentType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Photo,
            Self::ParentId,
            Self::BirthCertificate,
            Self::TransferCertificate,
            Self::Marksheet,
            Self::AddressProof,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Photo => "Passport Photo",
            Self::ParentId => "Parent ID Proof",
            Self::BirthCertificate => "Birth Certificate",
            Self::TransferCertificate => "Transfer Certificate",
            Self::Marksheet => "Previous Marksheet",
            Self::AddressProof => "Address Proof",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::ParentId => "parent_id",
            Self::BirthCertificate => "birth_certificate",
            Self::TransferCertificate => "transfer_certificate",
            Self::Marksheet => "marksheet",
            Self::AddressProof => "address_proof",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug() == value)
    }
}

/// Verification state of one uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Verified,
    Mismatch,
    Rejected,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Mismatch => "Mismatch",
            Self::Rejected => "Rejected",
        }
    }
}

/// Sparse field bag produced by the document extractor. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocData {
    pub child_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub previous_school: Option<String>,
    pub grades: Option<BTreeMap<String, String>>,
}

/// One uploaded document and its verification outcome. Re-uploading the same
/// type replaces the previous instance wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: String,
    pub document_type: DocumentType,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
    pub extracted: Option<ExtractedDocData>,
    pub mismatch_details: Option<String>,
}

/// Coarse application state. Transitions are driven by external actors; this
/// subsystem only renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    DocumentsPending,
    UnderReview,
    Shortlisted,
    InterviewScheduled,
    Accepted,
    Waitlisted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Draft,
            Self::DocumentsPending,
            Self::UnderReview,
            Self::Shortlisted,
            Self::InterviewScheduled,
            Self::Accepted,
            Self::Waitlisted,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::DocumentsPending => "documents_pending",
            Self::UnderReview => "under_review",
            Self::Shortlisted => "shortlisted",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Accepted => "accepted",
            Self::Waitlisted => "waitlisted",
            Self::Rejected => "rejected",
        }
    }
}
