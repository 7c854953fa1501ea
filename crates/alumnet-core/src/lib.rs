//! Alumnet Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! validation shared by every Alumnet component.

pub mod config;
pub mod constants;
pub mod error;
pub mod hooks;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::PortalConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use hooks::{NoOpNotificationSink, NotificationSink};
pub use storage_types::StorageBackend;
pub use validation::{DocumentValidator, ValidationError};
