//! Configuration management for the resume crafter

use crate::error::{Result, ResumeCrafterError};
use crate::output::formatter::{FontFamily, StyleOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

/// Per-section point allocation of the ATS score.
///
/// The maxima add up to more than `max_score`; the total is clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub contact_info_points: u32,
    pub summary_full_points: u32,
    pub summary_partial_points: u32,
    pub summary_min_length: usize,
    pub experience_points_per_entry: u32,
    pub experience_max_points: u32,
    pub education_points_per_entry: u32,
    pub education_max_points: u32,
    pub skills_full_points: u32,
    pub skills_full_threshold: usize,
    pub skills_mid_points: u32,
    pub skills_mid_threshold: usize,
    pub project_points_per_entry: u32,
    pub projects_max_points: u32,
    pub project_min_description_length: usize,
    pub certification_points: u32,
    pub formatting_points: u32,
    pub max_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub save_debounce_ms: u64,
    pub history_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub export_dir: PathBuf,
    pub color_output: bool,
    pub font: FontFamily,
    pub primary_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Html,
    Json,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            contact_info_points: 15,
            summary_full_points: 10,
            summary_partial_points: 5,
            summary_min_length: 50,
            experience_points_per_entry: 8,
            experience_max_points: 25,
            education_points_per_entry: 7,
            education_max_points: 15,
            skills_full_points: 15,
            skills_full_threshold: 10,
            skills_mid_points: 10,
            skills_mid_threshold: 5,
            project_points_per_entry: 5,
            projects_max_points: 10,
            project_min_description_length: 20,
            certification_points: 5,
            formatting_points: 5,
            max_score: 100,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resume-crafter");

        Self {
            data_dir,
            save_debounce_ms: 500,
            history_limit: 50,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        let style = StyleOptions::default();

        Self {
            export_dir: PathBuf::from("."),
            color_output: true,
            font: style.font,
            primary_color: style.primary_color,
            accent_color: style.accent_color,
        }
    }
}

impl OutputConfig {
    pub fn style(&self) -> StyleOptions {
        StyleOptions::new(self.font, &self.primary_color, &self.accent_color)
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ResumeCrafterError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeCrafterError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-crafter")
            .join("config.toml")
    }

    pub fn document_path(&self) -> PathBuf {
        self.storage.data_dir.join(crate::session::store::DOCUMENT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.scoring.skills_full_points = 20;
        config.output.font = FontFamily::Georgia;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.skills_full_points, 20);
        assert_eq!(loaded.output.font, FontFamily::Georgia);
        assert_eq!(loaded.storage.save_debounce_ms, 500);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\ncertification_points = 7\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.certification_points, 7);
        assert_eq!(loaded.scoring.contact_info_points, 15);
        assert_eq!(loaded.scoring.max_score, 100);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = 12").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ResumeCrafterError::Configuration(_)));
    }

    #[test]
    fn test_output_format_extensions() {
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }
}
