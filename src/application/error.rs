use std::error::Error as StdError;

use thiserror::Error;

use crate::application::api::ApiError;
use crate::application::form::{SubmitError, ValidationErrors};
use crate::config::LoadError;
use crate::infra::error::InfraError;

/// An error flattened into its chain of messages, outermost first.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    pub fn summary(&self) -> String {
        self.messages.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("post is invalid: {0}")]
    Invalid(ValidationErrors),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Short user-facing label for the failure class.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Configuration could not be loaded",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
            AppError::Infra(InfraError::Io(_)) => "I/O failure",
            AppError::Api(ApiError::NotFound) => "Post not found",
            AppError::Api(_) | AppError::Submit(SubmitError::Api(_)) => "Post API request failed",
            AppError::Submit(SubmitError::InvalidDraft(_)) | AppError::Invalid(_) => {
                "Post could not be saved"
            }
            AppError::Unexpected(_) => "Unexpected error occurred",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
