//! ATS compatibility scoring
//!
//! A weighted, additive model: every section earns points independently and
//! the sum is clamped to the configured ceiling. Scoring is a pure function of
//! the document, so repeated calls on the same value always agree.

use crate::config::ScoringConfig;
use crate::model::{
    is_valid_date_sequence, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument,
};
use serde::{Deserialize, Serialize};

/// Per-section points; the fields sum to the unclamped total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub contact_info: u32,
    pub summary: u32,
    pub experience: u32,
    pub education: u32,
    pub skills: u32,
    pub projects: u32,
    pub certifications: u32,
    pub formatting: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.contact_info
            + self.summary
            + self.experience
            + self.education
            + self.skills
            + self.projects
            + self.certifications
            + self.formatting
    }

    /// (label, points) pairs in display order
    pub fn sections(&self) -> [(&'static str, u32); 8] {
        [
            ("Contact Info", self.contact_info),
            ("Summary", self.summary),
            ("Experience", self.experience),
            ("Education", self.education),
            ("Skills", self.skills),
            ("Projects", self.projects),
            ("Certifications", self.certifications),
            ("Formatting", self.formatting),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Scores documents against a fixed set of section weights
#[derive(Debug, Clone, Default)]
pub struct AtsScorer {
    weights: ScoringConfig,
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn scaled(points: u32, count: usize, out_of: usize) -> u32 {
    if out_of == 0 {
        return points;
    }
    (points as f64 * count as f64 / out_of as f64).round() as u32
}

impl AtsScorer {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }

    pub fn score(&self, document: &ResumeDocument) -> AtsScore {
        let info = document.personal();

        let breakdown = ScoreBreakdown {
            contact_info: self.contact_points(document),
            summary: self.summary_points(info.summary_text()),
            experience: self.experience_points(&document.experience),
            education: self.education_points(&document.education),
            skills: self.skill_points(document.skills.len()),
            projects: self.project_points(&document.projects),
            certifications: if document.certifications.is_empty() {
                0
            } else {
                self.weights.certification_points
            },
            formatting: if document.personal_info.is_some() && !document.experience.is_empty() {
                self.weights.formatting_points
            } else {
                0
            },
        };

        let score = breakdown.total().min(self.weights.max_score).min(100) as u8;
        AtsScore { score, breakdown }
    }

    fn contact_points(&self, document: &ResumeDocument) -> u32 {
        let info = document.personal();
        let filled = [&info.full_name, &info.email, &info.phone, &info.location]
            .into_iter()
            .filter(|field| present(field))
            .count();
        scaled(self.weights.contact_info_points, filled, 4)
    }

    fn summary_points(&self, summary: &str) -> u32 {
        let length = summary.chars().count();
        if length > self.weights.summary_min_length {
            self.weights.summary_full_points
        } else if length > 0 {
            self.weights.summary_partial_points
        } else {
            0
        }
    }

    fn experience_points(&self, entries: &[ExperienceEntry]) -> u32 {
        let valid = entries.iter().filter(|exp| is_complete_experience(exp)).count() as u32;
        (valid * self.weights.experience_points_per_entry).min(self.weights.experience_max_points)
    }

    fn education_points(&self, entries: &[EducationEntry]) -> u32 {
        let valid = entries.iter().filter(|edu| is_complete_education(edu)).count() as u32;
        (valid * self.weights.education_points_per_entry).min(self.weights.education_max_points)
    }

    fn skill_points(&self, count: usize) -> u32 {
        if count >= self.weights.skills_full_threshold {
            self.weights.skills_full_points
        } else if count >= self.weights.skills_mid_threshold {
            self.weights.skills_mid_points
        } else {
            // Scales toward the mid tier so that every added skill helps
            scaled(self.weights.skills_mid_points, count, self.weights.skills_mid_threshold)
        }
    }

    fn project_points(&self, entries: &[ProjectEntry]) -> u32 {
        let min_description = self.weights.project_min_description_length;
        let valid = entries
            .iter()
            .filter(|proj| {
                present(&proj.name)
                    && proj.description.trim().chars().count() > min_description
                    && present(&proj.technologies)
            })
            .count() as u32;
        (valid * self.weights.project_points_per_entry).min(self.weights.projects_max_points)
    }
}

/// Company, position, at least one bullet and a valid date span
pub fn is_complete_experience(exp: &ExperienceEntry) -> bool {
    present(&exp.company)
        && present(&exp.position)
        && !exp.bullets.is_empty()
        && is_valid_date_sequence(&exp.start_date, &exp.end_date, exp.is_current_role)
}

/// School, degree and a valid date span
pub fn is_complete_education(edu: &EducationEntry) -> bool {
    present(&edu.school)
        && present(&edu.degree)
        && is_valid_date_sequence(&edu.start_date, &edu.end_date, edu.is_current_role)
}

/// Score with the default weights
pub fn score(document: &ResumeDocument) -> AtsScore {
    AtsScorer::default().score(document)
}
