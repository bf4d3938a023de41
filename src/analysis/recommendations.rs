//! Actionable issue lists derived from the document

use crate::config::ScoringConfig;
use crate::model::{is_valid_date_sequence, ResumeDocument};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub text: String,
}

impl Recommendation {
    fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Recommendations using the default thresholds
pub fn recommendations(document: &ResumeDocument) -> Vec<Recommendation> {
    recommendations_with(document, &ScoringConfig::default())
}

/// Ordered issues: contact, summary, experience, education, skills,
/// projects, certifications. Callers filter by severity for display.
pub fn recommendations_with(document: &ResumeDocument, thresholds: &ScoringConfig) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let info = document.personal();

    if blank(&info.full_name) {
        recs.push(Recommendation::error("Add your full name"));
    }
    if blank(&info.email) {
        recs.push(Recommendation::error("Add your email address"));
    }
    if blank(&info.phone) {
        recs.push(Recommendation::error("Add your phone number"));
    }
    if blank(&info.location) {
        recs.push(Recommendation::warning("Add your location"));
    }

    let summary_min = thresholds.summary_min_length;
    let summary = info.summary_text();
    if summary.is_empty() {
        recs.push(Recommendation::warning(format!(
            "Add a professional summary ({}+ characters)",
            summary_min
        )));
    } else if summary.chars().count() <= summary_min {
        recs.push(Recommendation::warning(format!(
            "Expand your professional summary to {}+ characters",
            summary_min
        )));
    }

    if document.experience.is_empty() {
        recs.push(Recommendation::error("Add at least one work experience entry"));
    } else {
        for (idx, exp) in document.experience.iter().enumerate() {
            let n = idx + 1;
            if blank(&exp.company) {
                recs.push(Recommendation::error(format!("Experience {}: Add company name", n)));
            }
            if blank(&exp.position) {
                recs.push(Recommendation::error(format!("Experience {}: Add job position", n)));
            }
            if !is_valid_date_sequence(&exp.start_date, &exp.end_date, exp.is_current_role) {
                recs.push(Recommendation::error(format!(
                    "Experience {}: End date must be after start date",
                    n
                )));
            }
            if exp.bullets.is_empty() {
                recs.push(Recommendation::warning(format!(
                    "Experience {}: Add at least one bullet point describing your achievements",
                    n
                )));
            }
        }
    }

    if document.education.is_empty() {
        recs.push(Recommendation::error("Add at least one education entry"));
    } else {
        for (idx, edu) in document.education.iter().enumerate() {
            let n = idx + 1;
            if blank(&edu.school) {
                recs.push(Recommendation::error(format!("Education {}: Add school/university name", n)));
            }
            if blank(&edu.degree) {
                recs.push(Recommendation::error(format!("Education {}: Add degree", n)));
            }
            if !is_valid_date_sequence(&edu.start_date, &edu.end_date, edu.is_current_role) {
                recs.push(Recommendation::error(format!(
                    "Education {}: End date must be after start date",
                    n
                )));
            }
        }
    }

    let skill_count = document.skills.len();
    if skill_count == 0 {
        recs.push(Recommendation::error(format!(
            "Add at least {} skills",
            thresholds.skills_mid_threshold
        )));
    } else if skill_count < thresholds.skills_full_threshold {
        recs.push(Recommendation::warning(format!(
            "Add more skills (currently {}, recommended {}+)",
            skill_count, thresholds.skills_full_threshold
        )));
    }

    if document.projects.is_empty() {
        recs.push(Recommendation::warning("Add at least one project to improve ATS score"));
    }

    if document.certifications.is_empty() {
        recs.push(Recommendation::warning("Add certifications to strengthen your profile"));
    }

    recs
}
