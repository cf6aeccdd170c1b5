//! Controllers and the collaborator seams they depend on.

pub mod api;
pub mod detail;
pub mod error;
pub mod form;
pub mod lightbox;
pub mod list;
pub mod location;
pub mod notify;
pub mod render;
