//! postboard: the interaction layer of a blog post administration client.
//!
//! The crate keeps the two stateful cores of the admin UI independent of any
//! rendering surface: the list controller that reconciles location query
//! parameters, paginated fetches and the rendered list, and the post form
//! whose declarative rules gate submission. Hosts plug in renderers and the
//! HTTP collaborator through the traits in [`application`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod util;
