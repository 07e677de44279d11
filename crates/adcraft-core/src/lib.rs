//! Domain types and configuration shared by every adcraft crate.

pub mod app_config;
pub mod config;
pub mod content;
pub mod invoice;
pub mod profile;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, LlmProviderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{GeneratedContent, VisualDirection};
pub use invoice::{load_invoice_draft, InvoiceDraft, InvoiceItem, PartyInfo};
pub use profile::{load_profile, BusinessProfile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    InputFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input file: {0}")]
    InputFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("required field is missing or blank: {0}")]
    MissingField(&'static str),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
