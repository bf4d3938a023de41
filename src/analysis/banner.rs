//! Single score-band banner shown above the editor

use crate::analysis::scoring::AtsScorer;
use crate::model::ResumeDocument;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub title: String,
    pub message: String,
}

/// Banner for a score; `None` from 90 upwards
pub fn banner_for_score(score: u8) -> Option<Banner> {
    let (level, title, message) = match score {
        0..=49 => (
            BannerLevel::Critical,
            "Resume Incomplete",
            "Your resume is missing critical information. Add personal info, experience, education, and skills.",
        ),
        50..=74 => (
            BannerLevel::Warning,
            "Needs Improvement",
            "Add more details to improve ATS compatibility. Expand descriptions and add more skills.",
        ),
        75..=89 => (
            BannerLevel::Info,
            "Almost Perfect",
            "Your resume is well-optimized. Small improvements can make it perfect.",
        ),
        _ => return None,
    };

    Some(Banner {
        level,
        title: title.to_string(),
        message: message.to_string(),
    })
}

/// Banner chosen from the document's score band alone
pub fn top_warning(document: &ResumeDocument, scorer: &AtsScorer) -> Option<Banner> {
    banner_for_score(scorer.score(document).score)
}
