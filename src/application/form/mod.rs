//! Post form: declarative validation rules and the submit state machine.

mod controller;
mod rules;
mod save;
mod schema;
mod snapshot;

pub use controller::{FormDefaults, FormView, PostForm, SubmitError, SubmitHandler, SubmitOutcome};
pub use rules::{Check, Condition, Rule, RuleSet, ValidationErrors};
pub use save::SavePost;
pub use schema::{
    AUTHOR, DEFAULT_MAX_UPLOAD_BYTES, DESCRIPTION, IMAGE, IMAGE_SOURCE, IMAGE_URL, TITLE,
    governed_field, has_two_long_words, post_rules,
};
pub use snapshot::{FieldValue, FormSnapshot};
