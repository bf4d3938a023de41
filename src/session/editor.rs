//! The editing session: one authoritative document, replaced wholesale on every change

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, info, warn};

use super::edit::{apply_edit, Edit};
use super::store::DocumentStore;
use crate::analysis::{validate, ValidationResult};
use crate::error::Result;
use crate::model::ResumeDocument;

/// Holds the current snapshot plus a bounded undo history.
///
/// Snapshots handed out by [`ResumeSession::document`] are immutable; later
/// edits build new values and leave them untouched.
pub struct ResumeSession {
    current: Arc<ResumeDocument>,
    history: VecDeque<Arc<ResumeDocument>>,
    history_limit: usize,
}

impl ResumeSession {
    pub fn new(document: ResumeDocument, history_limit: usize) -> Self {
        Self {
            current: Arc::new(document),
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Start from the stored document, or the example when none is usable
    pub fn load_or_default(store: &dyn DocumentStore, history_limit: usize) -> Self {
        let document = match store.load() {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!("No saved resume found; starting from the example document");
                ResumeDocument::example()
            }
            Err(e) => {
                warn!("Could not load saved resume ({}); starting from the example document", e);
                ResumeDocument::example()
            }
        };

        Self::new(document, history_limit)
    }

    pub fn document(&self) -> Arc<ResumeDocument> {
        Arc::clone(&self.current)
    }

    /// Replace the whole document; every other mutator funnels through here
    pub fn set_document(&mut self, document: ResumeDocument) -> ValidationResult {
        let validation = validate(&document);

        if document != *self.current {
            let previous = std::mem::replace(&mut self.current, Arc::new(document));
            self.history.push_back(previous);
            while self.history.len() > self.history_limit {
                self.history.pop_front();
            }
            debug!("Document replaced ({} undo steps)", self.history.len());
        }

        validation
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<ValidationResult> {
        let next = apply_edit(&self.current, edit)?;
        Ok(self.set_document(next))
    }

    /// Edit a private copy and install it as the new document
    pub fn update<F>(&mut self, change: F) -> ValidationResult
    where
        F: FnOnce(&mut ResumeDocument),
    {
        let mut next = (*self.current).clone();
        change(&mut next);
        self.set_document(next)
    }

    /// Raw JSON editing; malformed text is rejected and the current document kept
    pub fn apply_json_edit(&mut self, text: &str) -> Result<ValidationResult> {
        let document = ResumeDocument::from_json(text)?;
        Ok(self.set_document(document))
    }

    pub fn json_view(&self) -> Result<String> {
        self.current.to_json()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn reset_to_example(&mut self) -> ValidationResult {
        self.set_document(ResumeDocument::example())
    }

    pub fn clear(&mut self) -> ValidationResult {
        self.set_document(ResumeDocument::empty())
    }

    /// Drop the stored document, then start over from the example or an empty resume
    pub fn reset(&mut self, store: &dyn DocumentStore, empty: bool) -> Result<ValidationResult> {
        store.clear()?;
        info!("Cleared saved resume");

        Ok(if empty {
            self.clear()
        } else {
            self.reset_to_example()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeCrafterError;
    use crate::session::store::MemoryStore;

    #[test]
    fn test_snapshots_are_not_affected_by_later_edits() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 10);
        let before = session.document();

        session.apply(&Edit::set("personal.fullName", "Jane Roe").unwrap()).unwrap();

        assert_eq!(before.personal().full_name, "Mark Gates");
        assert_eq!(session.document().personal().full_name, "Jane Roe");
    }

    #[test]
    fn test_malformed_json_keeps_last_good_document() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 10);
        let err = session.apply_json_edit("{ \"personalInfo\": ").unwrap_err();

        assert!(matches!(err, ResumeCrafterError::InvalidJson(_)));
        assert_eq!(*session.document(), ResumeDocument::example());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_json_edit_replaces_document_and_reports_validation() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 10);
        let validation = session.apply_json_edit("{\"personalInfo\": {\"fullName\": \"A\"}}").unwrap();

        assert!(!validation.is_valid);
        assert!(validation.errors.contains(&"Email is required".to_string()));
        assert!(session.document().experience.is_empty());
        assert!(session.json_view().unwrap().contains("\"fullName\": \"A\""));
    }

    #[test]
    fn test_undo_and_history_limit() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 2);
        for name in ["a", "b", "c"] {
            session.update(|doc| {
                if let Some(info) = doc.personal_info.as_mut() {
                    info.full_name = name.to_string();
                }
            });
        }

        assert!(session.undo());
        assert_eq!(session.document().personal().full_name, "b");
        assert!(session.undo());
        assert_eq!(session.document().personal().full_name, "a");
        assert!(!session.undo());
    }

    #[test]
    fn test_unchanged_document_adds_no_history() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 10);
        session.reset_to_example();
        assert!(!session.can_undo());

        session.clear();
        assert!(session.can_undo());
        assert_eq!(*session.document(), ResumeDocument::empty());
    }

    #[test]
    fn test_json_edit_cannot_repeat_entry_ids() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 10);
        session
            .apply_json_edit(r#"{"skills": [{"id": "1", "name": "Rust"}, {"id": "1", "name": "Go"}]}"#)
            .unwrap();

        let doc = session.document();
        assert_eq!(doc.skills.len(), 2);
        assert_ne!(doc.skills[0].id, doc.skills[1].id);
    }

    #[test]
    fn test_json_edit_keeps_malformed_dates_but_reports_them() {
        let mut session = ResumeSession::new(ResumeDocument::example(), 10);
        let mut doc = ResumeDocument::example();
        doc.experience[0].start_date = "June 2020".to_string();

        session.apply_json_edit(&doc.to_json().unwrap()).unwrap();
        assert_eq!(session.document().experience[0].start_date, "June 2020");

        let recs = crate::analysis::recommendations(&session.document());
        assert!(recs
            .iter()
            .any(|r| r.is_error() && r.text == "Experience 1: End date must be after start date"));
        assert!(crate::analysis::score(&session.document()).breakdown.experience
            < crate::analysis::score(&ResumeDocument::example()).breakdown.experience);
    }

    #[test]
    fn test_reset_clears_store_before_replacing() {
        let store = MemoryStore::with_document(ResumeDocument::empty());
        let mut session = ResumeSession::load_or_default(&store, 10);

        session.reset(&store, false).unwrap();
        assert!(store.load().unwrap().is_none());
        assert_eq!(*session.document(), ResumeDocument::example());

        let validation = session.reset(&store, true).unwrap();
        assert!(!validation.is_valid);
        assert_eq!(*session.document(), ResumeDocument::empty());
    }

    #[test]
    fn test_load_or_default() {
        let empty = MemoryStore::new();
        let session = ResumeSession::load_or_default(&empty, 10);
        assert_eq!(*session.document(), ResumeDocument::example());

        let stored = MemoryStore::with_document(ResumeDocument::empty());
        let session = ResumeSession::load_or_default(&stored, 10);
        assert_eq!(*session.document(), ResumeDocument::empty());
    }
}
