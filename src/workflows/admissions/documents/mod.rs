mod extractor;
mod validator;

pub use extractor::{DocumentExtractor, ExtractionError, MockExtractor};
pub use validator::{validate, ValidationReport};

use crate::workflows::admissions::domain::DocumentType;
use serde::Serialize;

/// One entry of the upload checklist the UI renders during intake.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRequirement {
    pub document_type: DocumentType,
    pub label: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// The static checklist of accepted documents, in upload order.
pub fn required_documents() -> Vec<DocumentRequirement> {
    vec![
        DocumentRequirement {
            document_type: DocumentType::Photo,
            label: DocumentType::Photo.label(),
            required: true,
            description: "Recent passport-size photograph of the child.",
        },
        DocumentRequirement {
            document_type: DocumentType::ParentId,
            label: DocumentType::ParentId.label(),
            required: true,
            description: "Government-issued identity proof of a parent or guardian.",
        },
        DocumentRequirement {
            document_type: DocumentType::BirthCertificate,
            label: DocumentType::BirthCertificate.label(),
            required: true,
            description: "Municipal birth certificate establishing the child's date of birth.",
        },
        DocumentRequirement {
            document_type: DocumentType::TransferCertificate,
            label: DocumentType::TransferCertificate.label(),
            required: false,
            description: "Transfer certificate from the previous school, for Class 1 and above.",
        },
        DocumentRequirement {
            document_type: DocumentType::Marksheet,
            label: DocumentType::Marksheet.label(),
            required: false,
            description: "Latest report card or marksheet from the previous school.",
        },
        DocumentRequirement {
            document_type: DocumentType::AddressProof,
            label: DocumentType::AddressProof.label(),
            required: true,
            description: "Utility bill or rental agreement showing the residential address.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_covers_every_document_type_once() {
        let checklist = required_documents();
        assert_eq!(checklist.len(), DocumentType::ordered().len());

        for kind in DocumentType::ordered() {
            assert_eq!(
                checklist
                    .iter()
                    .filter(|entry| entry.document_type == kind)
                    .count(),
                1,
                "{kind:?} listed exactly once"
            );
        }
    }

    #[test]
    fn transfer_paperwork_is_optional() {
        let checklist = required_documents();
        let optional: Vec<_> = checklist
            .iter()
            .filter(|entry| !entry.required)
            .map(|entry| entry.document_type)
            .collect();
        assert_eq!(
            optional,
            vec![DocumentType::TransferCertificate, DocumentType::Marksheet]
        );
    }
}
