//! Shared configuration and error types for the folio portfolio backend.

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{FolioError, Result};
