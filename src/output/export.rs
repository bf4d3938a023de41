//! File naming and writing for exported documents

use crate::config::OutputFormat;
use crate::error::{Result, ResumeCrafterError};
use crate::model::ResumeDocument;
use crate::output::formatter::{to_plain_text, ReportGenerator};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

const FALLBACK_STEM: &str = "resume";

/// File stem derived from the owner's name, or "resume" when it is blank
pub fn file_stem(document: &ResumeDocument) -> String {
    let name = document.personal().full_name.trim();
    let stem: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let stem = stem.trim();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

pub fn suggest_filename(document: &ResumeDocument, format: OutputFormat) -> String {
    format!("{}.{}", file_stem(document), format.extension())
}

pub fn save_export(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Render a text-based export into `output_dir` and return the written path
pub fn write_export(
    generator: &ReportGenerator,
    document: &ResumeDocument,
    format: OutputFormat,
    output_dir: &Path,
) -> Result<PathBuf> {
    if format == OutputFormat::Pdf {
        return Err(ResumeCrafterError::InvalidInput(
            "PDF exports go through the rasterizer".to_string(),
        ));
    }

    let content = generator.generate(document, format)?;
    let path = output_dir.join(suggest_filename(document, format));
    save_export(&content, &path)?;

    info!("Exported {} bytes to {}", content.len(), path.display());
    Ok(path)
}

/// Write the plain-text projection to `writer` for piping into a clipboard tool
pub fn copy_as_text<W: Write>(document: &ResumeDocument, writer: &mut W) -> Result<()> {
    let text = to_plain_text(document)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonalInfo;
    use tempfile::TempDir;

    #[test]
    fn test_suggest_filename_uses_full_name() {
        let doc = ResumeDocument::example();
        assert_eq!(suggest_filename(&doc, OutputFormat::Pdf), "Mark Gates.pdf");
        assert_eq!(suggest_filename(&doc, OutputFormat::Text), "Mark Gates.txt");
    }

    #[test]
    fn test_suggest_filename_falls_back() {
        assert_eq!(suggest_filename(&ResumeDocument::empty(), OutputFormat::Html), "resume.html");

        let doc = ResumeDocument {
            personal_info: Some(PersonalInfo {
                full_name: "  Ada: Lovelace? ".to_string(),
                ..PersonalInfo::default()
            }),
            ..ResumeDocument::empty()
        };
        assert_eq!(file_stem(&doc), "Ada Lovelace");
    }

    #[test]
    fn test_write_export() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("exports");
        let generator = ReportGenerator::new();

        let path = write_export(&generator, &ResumeDocument::example(), OutputFormat::Json, &out).unwrap();
        assert_eq!(path, out.join("Mark Gates.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(ResumeDocument::from_json(&written).unwrap(), ResumeDocument::example());
    }

    #[test]
    fn test_copy_as_text() {
        let mut buffer = Vec::new();
        copy_as_text(&ResumeDocument::example(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, to_plain_text(&ResumeDocument::example()).unwrap());
    }

    #[test]
    fn test_write_export_rejects_pdf() {
        let dir = TempDir::new().unwrap();
        let err = write_export(&ReportGenerator::new(), &ResumeDocument::example(), OutputFormat::Pdf, dir.path())
            .unwrap_err();
        assert!(matches!(err, ResumeCrafterError::InvalidInput(_)));
    }
}
