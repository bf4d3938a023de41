//! Document session: editing, persistence and debounced saving

pub mod edit;
pub mod editor;
pub mod scheduler;
pub mod store;

pub use edit::{apply_edit, Edit, PersonalField, Section};
pub use editor::ResumeSession;
pub use scheduler::SaveScheduler;
pub use store::{DocumentStore, FileStore, MemoryStore};
