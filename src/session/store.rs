//! Persistence collaborators for the single working document

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use log::debug;

use crate::error::{Result, ResumeCrafterError};
use crate::model::ResumeDocument;

pub const DOCUMENT_FILE_NAME: &str = "resume.json";

/// Persistence collaborator holding a single document
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<ResumeDocument>>;
    fn save(&self, document: &ResumeDocument) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// One JSON file under the data directory
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(DOCUMENT_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read(&self) -> anyhow::Result<Option<ResumeDocument>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.file_path)
            .with_context(|| format!("failed to read document file {}", self.file_path.display()))?;

        let mut parsed = serde_json::from_str::<ResumeDocument>(&content)
            .with_context(|| format!("invalid JSON in document file {}", self.file_path.display()))?;
        parsed.ensure_unique_ids();

        Ok(Some(parsed))
    }

    fn write(&self, document: &ResumeDocument) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create data directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.file_path, json)
            .with_context(|| format!("failed to write document file {}", self.file_path.display()))?;
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Option<ResumeDocument>> {
        Ok(self.read()?)
    }

    fn save(&self, document: &ResumeDocument) -> Result<()> {
        self.write(document)?;
        debug!("Saved document to {}", self.file_path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ResumeCrafterError::Storage(format!(
                "failed to remove {}: {}",
                self.file_path.display(),
                e
            ))),
        }
    }
}

/// In-process store; counts saves so debounce behaviour can be observed
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<ResumeDocument>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: ResumeDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|count| *count).unwrap_or(0)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ResumeCrafterError {
    ResumeCrafterError::Storage("memory store lock poisoned".to_string())
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<ResumeDocument>> {
        Ok(self.document.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, document: &ResumeDocument) -> Result<()> {
        *self.document.lock().map_err(poisoned)? = Some(document.clone());
        *self.saves.lock().map_err(poisoned)? += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.document.lock().map_err(poisoned)? = None;
        Ok(())
    }
}
