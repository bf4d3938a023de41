//! ATS report: score, breakdown, issues and banner for one document snapshot

use crate::analysis::{
    banner_for_score, recommendations_with, validate, AtsScorer, Banner, BannerLevel,
    Recommendation, ScoreBreakdown, Severity, ValidationResult,
};
use crate::error::Result;
use crate::model::ResumeDocument;
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

/// Everything the editor shows next to the form, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    /// Overall ATS score (0-100)
    pub score: u8,

    pub breakdown: ScoreBreakdown,

    /// Errors and warnings in category order
    pub recommendations: Vec<Recommendation>,

    pub validation: ValidationResult,

    /// Score-band banner; absent for excellent scores
    pub banner: Option<Banner>,
}

impl AtsReport {
    pub fn build(document: &ResumeDocument, scorer: &AtsScorer) -> Self {
        let result = scorer.score(document);

        Self {
            score: result.score,
            breakdown: result.breakdown,
            recommendations: recommendations_with(document, scorer.weights()),
            validation: validate(document),
            banner: banner_for_score(result.score),
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(|r| r.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(|r| r.severity == Severity::Warning)
    }

    pub fn score_label(&self) -> &'static str {
        match self.score {
            90..=100 => "Excellent",
            75..=89 => "Good",
            50..=74 => "Fair",
            _ => "Needs Work",
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Console rendering of an `AtsReport`
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn score_color(score: u8) -> Color {
        match score {
            90..=100 => Color::Green,
            75..=89 => Color::Blue,
            50..=74 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn banner_color(level: BannerLevel) -> Color {
        match level {
            BannerLevel::Critical => Color::Red,
            BannerLevel::Warning => Color::Yellow,
            BannerLevel::Info => Color::Cyan,
        }
    }

    pub fn format_report(&self, report: &AtsReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("ATS COMPATIBILITY"));
        let score_text = format!("{}%", report.score);
        output.push_str(&format!(
            "Score: {} [{}]\n",
            self.colorize(&score_text, Self::score_color(report.score)),
            report.score_label()
        ));

        if let Some(banner) = &report.banner {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize(&banner.title, Self::banner_color(banner.level)),
                banner.message
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Score Breakdown"));
            for (label, points) in report.breakdown.sections() {
                output.push_str(&format!("  {:<16}{:>3}\n", label, points));
            }
        }

        let errors: Vec<_> = report.errors().collect();
        if !errors.is_empty() {
            output.push_str(&self.format_header("Errors"));
            for rec in errors {
                output.push_str(&format!("  {} {}\n", self.colorize("[!]", Color::Red), rec.text));
            }
        }

        let warnings: Vec<_> = report.warnings().collect();
        if self.detailed {
            if !warnings.is_empty() {
                output.push_str(&self.format_header("Warnings"));
                for rec in warnings {
                    output.push_str(&format!("  {} {}\n", self.colorize("[*]", Color::Yellow), rec.text));
                }
            }
        } else if let Some(first) = warnings.first() {
            output.push_str(&format!("\n{} {}\n", self.colorize("Tip:", Color::Yellow), first.text));
        }

        output
    }

    pub fn format_validation(&self, validation: &ValidationResult) -> String {
        if validation.is_valid {
            return format!("{}\n", self.colorize("Document is valid", Color::Green));
        }

        let mut output = format!(
            "{}\n",
            self.colorize(&format!("{} validation issue(s)", validation.errors.len()), Color::Red)
        );
        for error in &validation.errors {
            output.push_str(&format!("  • {}\n", error));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_empty_document() {
        let report = AtsReport::build(&ResumeDocument::empty(), &AtsScorer::default());
        assert_eq!(report.score, 0);
        assert_eq!(report.banner.as_ref().map(|b| b.level), Some(BannerLevel::Critical));
        assert!(!report.validation.is_valid);
        assert_eq!(report.errors().count(), 6);
        assert_eq!(report.warnings().count(), 4);
    }

    #[test]
    fn test_report_for_example_document() {
        let report = AtsReport::build(&ResumeDocument::example(), &AtsScorer::default());
        assert_eq!(report.score, 91);
        assert_eq!(report.score_label(), "Excellent");
        assert!(report.banner.is_none());
        assert!(report.recommendations.is_empty());
        assert!(report.validation.is_valid);
    }

    #[test]
    fn test_console_output_without_colors() {
        let report = AtsReport::build(&ResumeDocument::empty(), &AtsScorer::default());

        let brief = ConsoleFormatter::new(false, false).format_report(&report);
        assert!(brief.contains("Score: 0% [Needs Work]"));
        assert!(brief.contains("Resume Incomplete"));
        assert!(brief.contains("[!] Add your full name"));
        assert!(brief.contains("Tip: Add your location"));
        assert!(!brief.contains("Score Breakdown"));

        let detailed = ConsoleFormatter::new(false, true).format_report(&report);
        assert!(detailed.contains("Score Breakdown"));
        assert!(detailed.contains("[*] Add certifications to strengthen your profile"));
    }

    #[test]
    fn test_report_serializes() {
        let report = AtsReport::build(&ResumeDocument::example(), &AtsScorer::default());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"contactInfo\": 15"));
        assert!(json.contains("\"isValid\": true"));
    }
}
