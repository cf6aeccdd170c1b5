//! Small formatting helpers shared by renderers.

pub mod text;
pub mod time;
