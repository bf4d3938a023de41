//! Document renderers: plain text, styled HTML and JSON
//!
//! All formatters agree on field selection and section order (experience,
//! education, projects, certifications, skills), omit sections without
//! entries, and substitute "Present" for ongoing entries.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::date::{format_date_range, format_month};
use crate::model::ResumeDocument;
use askama::Template;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const EXPERIENCE_HEADER: &str = "WORK EXPERIENCE";
pub const EDUCATION_HEADER: &str = "EDUCATION";
pub const PROJECTS_HEADER: &str = "PROJECTS";
pub const CERTIFICATIONS_HEADER: &str = "CERTIFICATIONS & ACHIEVEMENTS";
pub const SKILLS_HEADER: &str = "SKILLS";
pub const SUMMARY_HEADER: &str = "SUMMARY";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color pattern"));

/// Trait for rendering a résumé document into a textual format
pub trait OutputFormatter {
    fn format_document(&self, document: &ResumeDocument) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// ATS-safe font choices for the HTML output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Calibri,
    Arial,
    Helvetica,
    Times,
    Georgia,
    Verdana,
    SansSerif,
    Serif,
    Monospace,
}

impl FontFamily {
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Calibri => "'Calibri', 'Segoe UI', sans-serif",
            FontFamily::Arial => "'Arial', sans-serif",
            FontFamily::Helvetica => "'Helvetica', 'Arial', sans-serif",
            FontFamily::Times => "'Times New Roman', serif",
            FontFamily::Georgia => "'Georgia', serif",
            FontFamily::Verdana => "'Verdana', sans-serif",
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "'Courier New', monospace",
        }
    }
}

/// Presentation options for the HTML renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOptions {
    pub font: FontFamily,
    pub primary_color: String,
    pub accent_color: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font: FontFamily::default(),
            primary_color: "#1a1a1a".to_string(),
            accent_color: "#0066cc".to_string(),
        }
    }
}

impl StyleOptions {
    /// Colors that are not `#rgb`/`#rrggbb` fall back to the defaults
    pub fn new(font: FontFamily, primary_color: &str, accent_color: &str) -> Self {
        let defaults = Self::default();
        let pick = |color: &str, fallback: String| {
            if HEX_COLOR.is_match(color.trim()) {
                color.trim().to_string()
            } else {
                fallback
            }
        };

        Self {
            font,
            primary_color: pick(primary_color, defaults.primary_color),
            accent_color: pick(accent_color, defaults.accent_color),
        }
    }
}

/// Plain-text formatter used for `.txt` export and copy-as-text
pub struct TextFormatter;

/// JSON formatter producing the interchange form
pub struct JsonFormatter {
    pretty: bool,
}

/// Self-contained styled HTML for display, download and PDF conversion
pub struct HtmlFormatter {
    style: StyleOptions,
}

/// Coordinates the formatters by output format
pub struct ReportGenerator {
    text_formatter: TextFormatter,
    json_formatter: JsonFormatter,
    html_formatter: HtmlFormatter,
}

/// Askama template for the HTML document
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: {{ font_family|safe }};
            line-height: 1.6;
            color: #333;
            padding: 40px;
            max-width: 900px;
            margin: 0 auto;
        }
        h1 { font-size: 32px; margin-bottom: 8px; color: {{ primary_color|safe }}; }
        h2 {
            font-size: 14px;
            margin-top: 20px;
            margin-bottom: 12px;
            letter-spacing: 1px;
            color: {{ primary_color|safe }};
            border-bottom: 2px solid {{ accent_color|safe }};
            padding-bottom: 8px;
        }
        a { color: {{ accent_color|safe }}; }
        .header { margin-bottom: 24px; border-bottom: 2px solid {{ primary_color|safe }}; padding-bottom: 16px; }
        .contact, .links { font-size: 12px; color: #555; margin-top: 4px; }
        .contact span, .links span { margin: 0 4px; }
        .summary { margin-bottom: 20px; font-size: 13px; }
        .section { margin-bottom: 20px; }
        .entry { margin-bottom: 16px; overflow: hidden; }
        .entry-title { font-weight: bold; font-size: 13px; color: {{ primary_color|safe }}; }
        .entry-date { font-size: 11px; color: #555; float: right; }
        .entry-subtitle { font-size: 12px; color: #555; font-weight: bold; margin-top: 2px; }
        .entry-description { font-size: 12px; margin-top: 6px; line-height: 1.5; }
        .bullet-point { margin-left: 20px; margin-top: 4px; font-size: 12px; line-height: 1.5; }
        .skills-category { margin-bottom: 8px; }
        .skills-category-name { font-size: 11px; font-weight: bold; color: {{ primary_color|safe }}; }
        .skills-list { font-size: 12px; margin-top: 2px; }
        @page { size: A4; margin: 12mm; }
        @media print { body { padding: 0; } }
    </style>
</head>
<body>
    <div class="header">
        <h1>{{ full_name }}</h1>
        {% if !contact_parts.is_empty() %}
        <div class="contact">
            {% for part in contact_parts %}{% if !loop.first %}<span>&bull;</span>{% endif %}<span>{{ part }}</span>{% endfor %}
        </div>
        {% endif %}
        {% if !links.is_empty() %}
        <div class="links">
            {% for link in links %}{% if !loop.first %}<span>&bull;</span>{% endif %}<span>{{ link }}</span>{% endfor %}
        </div>
        {% endif %}
    </div>

    {% if !summary.is_empty() %}
    <div class="summary">{{ summary }}</div>
    {% endif %}

    {% if !experience.is_empty() %}
    <h2>WORK EXPERIENCE</h2>
    <div class="section">
        {% for entry in experience %}
        <div class="entry">
            <div class="entry-date">{{ entry.dates }}</div>
            <div class="entry-title">{{ entry.title }}</div>
            <div class="entry-subtitle">{{ entry.subtitle }}</div>
            {% for bullet in entry.bullets %}
            <div class="bullet-point">&bull; {{ bullet }}</div>
            {% endfor %}
        </div>
        {% endfor %}
    </div>
    {% endif %}

    {% if !education.is_empty() %}
    <h2>EDUCATION</h2>
    <div class="section">
        {% for entry in education %}
        <div class="entry">
            <div class="entry-date">{{ entry.dates }}</div>
            <div class="entry-title">{{ entry.title }}</div>
            <div class="entry-subtitle">{{ entry.subtitle }}</div>
            {% for detail in entry.details %}
            <div class="entry-description">{{ detail }}</div>
            {% endfor %}
        </div>
        {% endfor %}
    </div>
    {% endif %}

    {% if !projects.is_empty() %}
    <h2>PROJECTS</h2>
    <div class="section">
        {% for entry in projects %}
        <div class="entry">
            <div class="entry-title">{{ entry.title }}</div>
            {% for detail in entry.details %}
            <div class="entry-description">{{ detail }}</div>
            {% endfor %}
            {% if !entry.subtitle.is_empty() %}
            <div class="entry-subtitle">{{ entry.subtitle }}</div>
            {% endif %}
        </div>
        {% endfor %}
    </div>
    {% endif %}

    {% if !certifications.is_empty() %}
    <h2>CERTIFICATIONS &amp; ACHIEVEMENTS</h2>
    <div class="section">
        {% for entry in certifications %}
        <div class="entry">
            <div class="entry-date">{{ entry.dates }}</div>
            <div class="entry-title">{{ entry.title }}</div>
            <div class="entry-subtitle">{{ entry.subtitle }}</div>
        </div>
        {% endfor %}
    </div>
    {% endif %}

    {% if !skill_groups.is_empty() %}
    <h2>SKILLS</h2>
    <div class="section">
        {% for group in skill_groups %}
        <div class="skills-category">
            <div class="skills-category-name">{{ group.category }}</div>
            <div class="skills-list">{{ group.skills }}</div>
        </div>
        {% endfor %}
    </div>
    {% endif %}
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    title: String,
    font_family: String,
    primary_color: String,
    accent_color: String,
    full_name: String,
    contact_parts: Vec<String>,
    links: Vec<String>,
    summary: String,
    experience: Vec<HtmlEntry>,
    education: Vec<HtmlEntry>,
    projects: Vec<HtmlEntry>,
    certifications: Vec<HtmlEntry>,
    skill_groups: Vec<HtmlSkillGroup>,
}

#[derive(Debug, Clone, Default)]
struct HtmlEntry {
    title: String,
    subtitle: String,
    dates: String,
    bullets: Vec<String>,
    details: Vec<String>,
}

#[derive(Debug, Clone)]
struct HtmlSkillGroup {
    category: String,
    skills: String,
}

fn with_location(base: &str, location: Option<&str>) -> String {
    match location.map(str::trim).filter(|loc| !loc.is_empty()) {
        Some(loc) => format!("{}, {}", base, loc),
        None => base.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextFormatter {
    fn format_document(&self, document: &ResumeDocument) -> Result<String> {
        let info = document.personal();
        let mut text = String::new();

        text.push_str(info.full_name.trim());
        text.push('\n');

        let contact = info.contact_parts();
        if !contact.is_empty() {
            text.push_str(&contact.join(" | "));
            text.push('\n');
        }
        let links = info.links();
        if !links.is_empty() {
            text.push_str(&links.join(" | "));
            text.push('\n');
        }
        text.push('\n');

        let summary = info.summary_text();
        if !summary.is_empty() {
            text.push_str(&format!("{}\n{}\n\n", SUMMARY_HEADER, summary));
        }

        if !document.experience.is_empty() {
            text.push_str(EXPERIENCE_HEADER);
            text.push('\n');
            for exp in &document.experience {
                let heading = format!("{} - {}", exp.position.trim(), exp.company.trim());
                text.push_str(&with_location(&heading, exp.location.as_deref()));
                text.push('\n');

                let dates = format_date_range(&exp.start_date, &exp.end_date, exp.is_current_role);
                if !dates.is_empty() {
                    text.push_str(&dates);
                    text.push('\n');
                }
                for bullet in &exp.bullets {
                    text.push_str(&format!("• {}\n", bullet.trim()));
                }
                text.push('\n');
            }
        }

        if !document.education.is_empty() {
            text.push_str(EDUCATION_HEADER);
            text.push('\n');
            for edu in &document.education {
                text.push_str(&format!("{} - {}\n", edu.degree.trim(), edu.school.trim()));

                let dates = format_date_range(&edu.start_date, &edu.end_date, edu.is_current_role);
                if !dates.is_empty() {
                    text.push_str(&dates);
                    text.push('\n');
                }
                if let Some(field) = non_blank(edu.field.as_deref()) {
                    text.push_str(field);
                    text.push('\n');
                }
                if let Some(score) = non_blank(edu.score.as_deref()) {
                    text.push_str(&format!("Score: {}\n", score));
                }
                text.push('\n');
            }
        }

        if !document.projects.is_empty() {
            text.push_str(PROJECTS_HEADER);
            text.push('\n');
            for proj in &document.projects {
                text.push_str(proj.name.trim());
                text.push('\n');
                if !proj.description.trim().is_empty() {
                    text.push_str(proj.description.trim());
                    text.push('\n');
                }
                if !proj.technologies.trim().is_empty() {
                    text.push_str(&format!("Technologies: {}\n", proj.technologies.trim()));
                }
                if let Some(link) = non_blank(proj.link.as_deref()) {
                    text.push_str(&format!("Link: {}\n", link));
                }
                text.push('\n');
            }
        }

        if !document.certifications.is_empty() {
            text.push_str(CERTIFICATIONS_HEADER);
            text.push('\n');
            for cert in &document.certifications {
                let mut line = cert.title.trim().to_string();
                if !cert.issuer.trim().is_empty() {
                    line.push_str(&format!(" - {}", cert.issuer.trim()));
                }
                let date = format_month(cert.date.as_deref().unwrap_or(""));
                if !date.is_empty() {
                    line.push_str(&format!(" ({})", date));
                }
                text.push_str(&line);
                text.push('\n');
            }
            text.push('\n');
        }

        let groups = document.skill_groups();
        if !groups.is_empty() {
            text.push_str(SKILLS_HEADER);
            text.push('\n');
            for group in groups {
                text.push_str(&format!("{}: {}\n", group.category, group.names.join(", ")));
            }
        }

        Ok(text)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_document(&self, document: &ResumeDocument) -> Result<String> {
        if self.pretty {
            document.to_json()
        } else {
            Ok(serde_json::to_string(document)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(style: StyleOptions) -> Self {
        Self { style }
    }

    fn create_template_data(&self, document: &ResumeDocument) -> HtmlTemplate {
        let info = document.personal();
        let full_name = info.full_name.trim().to_string();

        let experience = document
            .experience
            .iter()
            .map(|exp| HtmlEntry {
                title: exp.position.trim().to_string(),
                subtitle: with_location(exp.company.trim(), exp.location.as_deref()),
                dates: format_date_range(&exp.start_date, &exp.end_date, exp.is_current_role),
                bullets: exp.bullets.iter().map(|b| b.trim().to_string()).collect(),
                details: Vec::new(),
            })
            .collect();

        let education = document
            .education
            .iter()
            .map(|edu| HtmlEntry {
                title: edu.degree.trim().to_string(),
                subtitle: edu.school.trim().to_string(),
                dates: format_date_range(&edu.start_date, &edu.end_date, edu.is_current_role),
                bullets: Vec::new(),
                details: [
                    non_blank(edu.field.as_deref()).map(str::to_string),
                    non_blank(edu.score.as_deref()).map(|score| format!("Score: {}", score)),
                ]
                .into_iter()
                .flatten()
                .collect(),
            })
            .collect();

        let projects = document
            .projects
            .iter()
            .map(|proj| HtmlEntry {
                title: proj.name.trim().to_string(),
                subtitle: match proj.technologies.trim() {
                    "" => String::new(),
                    tech => format!("Technologies: {}", tech),
                },
                dates: String::new(),
                bullets: Vec::new(),
                details: [
                    non_blank(Some(proj.description.as_str())).map(str::to_string),
                    non_blank(proj.link.as_deref()).map(|link| format!("Link: {}", link)),
                ]
                .into_iter()
                .flatten()
                .collect(),
            })
            .collect();

        let certifications = document
            .certifications
            .iter()
            .map(|cert| HtmlEntry {
                title: cert.title.trim().to_string(),
                subtitle: cert.issuer.trim().to_string(),
                dates: format_month(cert.date.as_deref().unwrap_or("")),
                ..HtmlEntry::default()
            })
            .collect();

        let skill_groups = document
            .skill_groups()
            .into_iter()
            .map(|group| HtmlSkillGroup {
                category: group.category.to_string(),
                skills: group.names.join(", "),
            })
            .collect();

        HtmlTemplate {
            title: if full_name.is_empty() {
                "Resume".to_string()
            } else {
                format!("{} - Resume", full_name)
            },
            font_family: self.style.font.css_stack().to_string(),
            primary_color: self.style.primary_color.clone(),
            accent_color: self.style.accent_color.clone(),
            full_name,
            contact_parts: info.contact_parts().into_iter().map(str::to_string).collect(),
            links: info.links().into_iter().map(str::to_string).collect(),
            summary: info.summary_text().to_string(),
            experience,
            education,
            projects,
            certifications,
            skill_groups,
        }
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new(StyleOptions::default())
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_document(&self, document: &ResumeDocument) -> Result<String> {
        Ok(self.create_template_data(document).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_style(StyleOptions::default())
    }

    pub fn with_style(style: StyleOptions) -> Self {
        Self {
            text_formatter: TextFormatter::new(),
            json_formatter: JsonFormatter::new(true),
            html_formatter: HtmlFormatter::new(style),
        }
    }

    /// Render a document; PDF yields the HTML source handed to the rasterizer
    pub fn generate(&self, document: &ResumeDocument, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => self.text_formatter.format_document(document),
            OutputFormat::Json => self.json_formatter.format_document(document),
            OutputFormat::Html | OutputFormat::Pdf => self.html_formatter.format_document(document),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text projection of the document
pub fn to_plain_text(document: &ResumeDocument) -> Result<String> {
    TextFormatter::new().format_document(document)
}

/// Self-contained styled HTML projection of the document
pub fn to_html(document: &ResumeDocument, style: &StyleOptions) -> Result<String> {
    HtmlFormatter::new(style.clone()).format_document(document)
}

/// Pretty-printed JSON projection of the document
pub fn to_json(document: &ResumeDocument) -> Result<String> {
    JsonFormatter::new(true).format_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceEntry, PersonalInfo, SkillEntry};

    fn position(haystack: &str, needle: &str) -> usize {
        haystack.find(needle).unwrap_or_else(|| panic!("missing '{}'", needle))
    }

    #[test]
    fn test_plain_text_sections_in_order() {
        let text = to_plain_text(&ResumeDocument::example()).unwrap();

        assert!(text.starts_with("Mark Gates\n"));
        assert!(text.contains("mark.gates@example.com | +1 555 0100 | United States"));
        let exp = position(&text, EXPERIENCE_HEADER);
        let edu = position(&text, "\nEDUCATION\n");
        let proj = position(&text, PROJECTS_HEADER);
        let cert = position(&text, CERTIFICATIONS_HEADER);
        let skills = position(&text, "\nSKILLS\n");
        assert!(exp < edu && edu < proj && proj < cert && cert < skills);

        assert!(text.contains("Software Developer - Meta\nJul 2022 - Jun 2025\n"));
        assert!(text.contains("• Optimized existing codebase"));
        assert!(text.contains("Languages: Java, JavaScript, Python, TypeScript\n"));
        assert!(text.contains("AWS Certified Solutions Architect - Amazon Web Services (May 2023)"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut doc = ResumeDocument::example();
        doc.projects.clear();
        doc.certifications.clear();

        let text = to_plain_text(&doc).unwrap();
        assert!(!text.contains("PROJECTS"));
        assert!(!text.contains("CERTIFICATIONS"));

        let html = to_html(&doc, &StyleOptions::default()).unwrap();
        assert!(!html.contains("PROJECTS"));
        assert!(!html.contains("CERTIFICATIONS"));
        assert!(html.contains("WORK EXPERIENCE"));
    }

    #[test]
    fn test_current_role_renders_present() {
        let mut doc = ResumeDocument::example();
        doc.experience[0].is_current_role = true;
        doc.experience[0].end_date = "garbage".to_string();

        let text = to_plain_text(&doc).unwrap();
        assert!(text.contains("Jul 2022 - Present"));
        let html = to_html(&doc, &StyleOptions::default()).unwrap();
        assert!(html.contains("Jul 2022 - Present"));
        assert!(!html.contains("Invalid Date"));
    }

    #[test]
    fn test_invalid_dates_render_empty() {
        let doc = ResumeDocument {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                start_date: "someday".to_string(),
                end_date: String::new(),
                ..ExperienceEntry::default()
            }],
            ..ResumeDocument::empty()
        };
        let text = to_plain_text(&doc).unwrap();
        assert!(text.contains("Engineer - Acme\n\n"));
    }

    #[test]
    fn test_html_is_self_contained() {
        let html = to_html(&ResumeDocument::example(), &StyleOptions::default()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("<title>Mark Gates - Resume</title>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("src=\"http"));
        assert!(html.contains("'Calibri', 'Segoe UI', sans-serif"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let doc = ResumeDocument {
            personal_info: Some(PersonalInfo {
                full_name: "Tom & <Jerry>".to_string(),
                ..PersonalInfo::default()
            }),
            ..ResumeDocument::default()
        };
        let html = to_html(&doc, &StyleOptions::default()).unwrap();
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!html.contains("<Jerry>"));
    }

    #[test]
    fn test_html_groups_skills_once_per_category() {
        let doc = ResumeDocument {
            skills: vec![
                SkillEntry::new("Rust", "Languages"),
                SkillEntry::new("Git", "Tools"),
                SkillEntry::new("Go", "Languages"),
            ],
            ..ResumeDocument::empty()
        };
        let html = to_html(&doc, &StyleOptions::default()).unwrap();
        assert_eq!(html.matches("skills-category-name\">Languages<").count(), 1);
        assert!(html.contains("Rust, Go"));
    }

    #[test]
    fn test_missing_personal_info_degrades() {
        let doc = ResumeDocument::default();
        let text = to_plain_text(&doc).unwrap();
        assert_eq!(text, "\n\n");
        let html = to_html(&doc, &StyleOptions::default()).unwrap();
        assert!(html.contains("<title>Resume</title>"));
    }

    #[test]
    fn test_style_options_reject_non_hex_colors() {
        let style = StyleOptions::new(FontFamily::Georgia, "red; } body { display:none", "#27ae60");
        assert_eq!(style.primary_color, "#1a1a1a");
        assert_eq!(style.accent_color, "#27ae60");

        let html = to_html(&ResumeDocument::example(), &style).unwrap();
        assert!(html.contains("'Georgia', serif"));
        assert!(html.contains("#27ae60"));
    }

    #[test]
    fn test_json_round_trip_through_formatter() {
        let doc = ResumeDocument::example();
        let json = to_json(&doc).unwrap();
        assert!(json.contains("\n  \"personalInfo\""));
        assert_eq!(ResumeDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_renderers_do_not_mutate_input() {
        let doc = ResumeDocument::example();
        let before = doc.clone();
        let generator = ReportGenerator::new();
        for format in [OutputFormat::Text, OutputFormat::Html, OutputFormat::Json, OutputFormat::Pdf] {
            generator.generate(&doc, format).unwrap();
        }
        assert_eq!(doc, before);
    }
}
