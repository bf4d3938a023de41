//! Validation, ATS scoring and recommendations

pub mod banner;
pub mod recommendations;
pub mod scoring;
pub mod validator;

pub use banner::{banner_for_score, top_warning, Banner, BannerLevel};
pub use recommendations::{recommendations, recommendations_with, Recommendation, Severity};
pub use scoring::{score, AtsScore, AtsScorer, ScoreBreakdown};
pub use validator::{validate, ValidationResult};
