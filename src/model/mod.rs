//! Résumé data model

pub mod date;
pub mod document;

pub use date::{is_valid_date_sequence, YearMonth};
pub use document::{
    CertificationEntry, EducationEntry, EntryId, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, SkillEntry, SkillGroup,
};
