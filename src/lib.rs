//! tubesum - terminal client for a YouTube video summarizer backend.
//!
//! This library provides functionality for:
//! - Validating YouTube URLs and Gemini API keys before submission
//! - Calling the summarizer backend's processing and health endpoints
//! - Rendering summaries and chapters, and copying them to the clipboard

pub mod api;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod prompt;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use api::{ApiClient, Chapter, HealthStatus, ProcessingRequest, ProcessingResult, VideoApi};
pub use app::{App, AppState};
pub use clipboard::{Clipboard, Osc52Clipboard};
pub use config::Config;
pub use console::Console;
pub use error::{ApiError, ClipboardError, ConfigError};
pub use form::{Field, ValidationErrors, VideoForm};
pub use summary::{CopyTarget, SummaryView};
