//! Integration tests for the resume crafter

use std::sync::Arc;
use std::time::Duration;

use resume_crafter::analysis::{banner_for_score, recommendations, score, validate, BannerLevel};
use resume_crafter::model::{is_valid_date_sequence, PersonalInfo, SkillEntry};
use resume_crafter::output::{export_pdf, to_html, to_plain_text, AtsReport, PdfExport, PrintPdfRasterizer, StyleOptions};
use resume_crafter::session::{DocumentStore, Edit, FileStore, ResumeSession, SaveScheduler};
use resume_crafter::ResumeDocument;
use tempfile::TempDir;

fn scenario() -> ResumeDocument {
    let text = std::fs::read_to_string("tests/fixtures/scenario_resume.json").unwrap();
    ResumeDocument::from_json(&text).unwrap()
}

#[test]
fn test_scenario_breakdown() {
    let result = score(&scenario());
    let b = &result.breakdown;

    assert_eq!(b.contact_info, 15);
    assert_eq!(b.summary, 10);
    assert_eq!(b.experience, 8);
    assert_eq!(b.education, 7);
    assert_eq!(b.skills, 15);
    assert_eq!(b.projects, 5);
    assert_eq!(b.certifications, 5);
    assert_eq!(b.formatting, 5);
    assert_eq!(result.score, 70);
    assert_eq!(banner_for_score(result.score).map(|b| b.level), Some(BannerLevel::Warning));
}

#[test]
fn test_numeric_ids_are_imported_as_strings() {
    let doc = scenario();
    assert_eq!(doc.skills[0].id.as_str(), "1");
    assert_eq!(doc.skills[11].id.as_str(), "12");
}

#[test]
fn test_json_round_trip() {
    for doc in [scenario(), ResumeDocument::example(), ResumeDocument::empty(), ResumeDocument::default()] {
        let json = doc.to_json().unwrap();
        assert_eq!(ResumeDocument::from_json(&json).unwrap(), doc);
    }
}

#[test]
fn test_score_is_monotonic_in_skills() {
    let mut doc = scenario();
    doc.skills.clear();

    let mut previous = score(&doc).score;
    for n in 0..10 {
        doc.skills.push(SkillEntry::new(&format!("Skill {}", n), "Tools"));
        let current = score(&doc).score;
        assert!(current >= previous, "score dropped from {} to {} at {} skills", previous, current, n + 1);
        previous = current;
    }
}

#[test]
fn test_date_sequence_rules() {
    assert!(!is_valid_date_sequence("2022-01", "2022-01", false));
    assert!(is_valid_date_sequence("2022-06", "2023-01", false));
    assert!(is_valid_date_sequence("2022-06", "", true));
    assert!(!is_valid_date_sequence("", "2022-06", false));
}

#[test]
fn test_validator_minimalism() {
    let doc = ResumeDocument {
        personal_info: Some(PersonalInfo {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..PersonalInfo::default()
        }),
        ..ResumeDocument::default()
    };

    assert!(validate(&doc).is_valid);
    assert!(recommendations(&doc).iter().any(|r| r.is_error()));
}

#[test]
fn test_rendering_omits_empty_projects() {
    let mut doc = scenario();
    doc.projects.clear();

    assert!(!to_plain_text(&doc).unwrap().contains("PROJECTS"));
    assert!(!to_html(&doc, &StyleOptions::default()).unwrap().contains("PROJECTS"));
}

#[test]
fn test_report_matches_individual_analyses() {
    let doc = scenario();
    let report = AtsReport::build(&doc, &Default::default());

    assert_eq!(report.score, score(&doc).score);
    assert_eq!(report.recommendations, recommendations(&doc));
    assert_eq!(report.validation, validate(&doc));
}

#[tokio::test]
async fn test_session_edits_are_saved_and_reloaded() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));

    let mut session = ResumeSession::load_or_default(&*store, 20);
    session.apply(&Edit::set("personal.fullName", "Jordan Lee").unwrap()).unwrap();
    session.apply(&Edit::set("experience.1.company", "Globex").unwrap()).unwrap();

    let scheduler = SaveScheduler::spawn(store.clone(), Duration::from_millis(10));
    scheduler.schedule(session.document());
    scheduler.shutdown().await.unwrap();

    let reloaded = ResumeSession::load_or_default(&*store, 20);
    assert_eq!(reloaded.document().personal().full_name, "Jordan Lee");
    assert_eq!(reloaded.document().experience[0].company, "Globex");
    assert_eq!(*reloaded.document(), *session.document());
}

#[test]
fn test_corrupt_saved_document_falls_back_to_example() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path(), "[1, 2,").unwrap();

    assert!(store.load().is_err());
    let session = ResumeSession::load_or_default(&store, 20);
    assert_eq!(*session.document(), ResumeDocument::example());
}

#[tokio::test]
async fn test_pdf_export_of_scenario() {
    let dir = TempDir::new().unwrap();
    let html = to_html(&scenario(), &StyleOptions::default()).unwrap();
    let rasterizer = PrintPdfRasterizer::new(dir.path());

    let export = export_pdf(&rasterizer, &html, "Jordan Lee", dir.path()).await.unwrap();
    assert!(matches!(export, PdfExport::Rasterized(_)));
    assert!(export.path().exists());
}
