//! Resume crafter library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod session;

pub use config::Config;
pub use error::{Result, ResumeCrafterError};
pub use model::ResumeDocument;
