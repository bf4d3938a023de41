//! Structural completeness checks on a résumé document

use crate::model::ResumeDocument;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check required fields. Findings are returned, never raised.
///
/// Date ordering is not checked here; the scoring engine and the
/// recommendation generator apply the date-sequence rule.
pub fn validate(document: &ResumeDocument) -> ValidationResult {
    let mut errors = Vec::new();

    match &document.personal_info {
        None => errors.push("Personal information is required".to_string()),
        Some(info) => {
            if is_blank(&info.full_name) {
                errors.push("Full name is required".to_string());
            }
            if is_blank(&info.email) {
                errors.push("Email is required".to_string());
            }
        }
    }

    for (idx, exp) in document.experience.iter().enumerate() {
        if is_blank(&exp.company) {
            errors.push(format!("Experience {}: Company name is required", idx + 1));
        }
        if is_blank(&exp.position) {
            errors.push(format!("Experience {}: Position is required", idx + 1));
        }
    }

    for (idx, edu) in document.education.iter().enumerate() {
        if is_blank(&edu.school) {
            errors.push(format!("Education {}: School name is required", idx + 1));
        }
        if is_blank(&edu.degree) {
            errors.push(format!("Education {}: Degree is required", idx + 1));
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationEntry, ExperienceEntry, PersonalInfo};

    fn named_document() -> ResumeDocument {
        ResumeDocument {
            personal_info: Some(PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                ..PersonalInfo::default()
            }),
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn test_name_and_email_are_enough() {
        let result = validate(&named_document());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_missing_personal_info() {
        let result = validate(&ResumeDocument::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Personal information is required"]);
    }

    #[test]
    fn test_whitespace_only_fields_are_blank() {
        let mut doc = named_document();
        if let Some(info) = doc.personal_info.as_mut() {
            info.full_name = "   ".to_string();
            info.email = "\t".to_string();
        }
        let result = validate(&doc);
        assert_eq!(result.errors, vec!["Full name is required", "Email is required"]);
    }

    #[test]
    fn test_entry_errors_follow_array_order() {
        let mut doc = named_document();
        doc.experience = vec![
            ExperienceEntry {
                company: "Acme".to_string(),
                ..ExperienceEntry::default()
            },
            ExperienceEntry::default(),
        ];
        doc.education = vec![EducationEntry {
            degree: "BSc".to_string(),
            ..EducationEntry::default()
        }];

        let result = validate(&doc);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Experience 1: Position is required",
                "Experience 2: Company name is required",
                "Experience 2: Position is required",
                "Education 1: School name is required",
            ]
        );
    }

    #[test]
    fn test_bad_dates_are_not_validator_errors() {
        let mut doc = named_document();
        doc.experience = vec![ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2023-01".to_string(),
            end_date: "2020-01".to_string(),
            ..ExperienceEntry::default()
        }];
        assert!(validate(&doc).is_valid);
    }
}
