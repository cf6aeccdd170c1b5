//! Shared pieces of the rendering surface contract.

use thiserror::Error;

/// Raised by renderers when the host surface lacks a required element.
/// Controllers treat it as a silent degradation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("render target `{0}` is missing")]
    MissingElement(&'static str),
    #[error("failed to write output: {0}")]
    Output(String),
}

/// An image reference that falls back to a placeholder when it fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    src: String,
    fallback: String,
    failed: bool,
}

impl Thumbnail {
    pub fn new(src: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            fallback: fallback.into(),
            failed: false,
        }
    }

    /// Source to display right now.
    pub fn src(&self) -> &str {
        if self.failed || self.src.is_empty() {
            &self.fallback
        } else {
            &self.src
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.failed || self.src.is_empty()
    }

    /// Switch to the placeholder. Repeated failures keep the placeholder.
    pub fn on_load_error(&mut self) -> &str {
        self.failed = true;
        &self.fallback
    }
}
