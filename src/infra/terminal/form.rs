use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use crate::application::form::{FieldValue, FormSnapshot, FormView, IMAGE};
use crate::domain::posts::{ImageSource, UploadFile};

#[derive(Debug, Default)]
struct FormState {
    values: FormSnapshot,
    errors: BTreeMap<String, String>,
    hero: Option<String>,
    visible: Option<ImageSource>,
}

/// In-memory form filled from command-line arguments.
#[derive(Debug, Default)]
pub struct TerminalForm {
    state: Mutex<FormState>,
}

impl TerminalForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        // Plain data; usable after a poisoning panic.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Attach a file to the upload input.
    pub fn set_file(&self, file: UploadFile) {
        self.state().values.insert(IMAGE, FieldValue::File(file));
    }

    /// Displayed errors, field → message.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.state().errors.clone()
    }

    pub fn hero_image(&self) -> Option<String> {
        self.state().hero.clone()
    }

    pub fn visible_source(&self) -> Option<ImageSource> {
        self.state().visible
    }
}

impl FormView for TerminalForm {
    fn snapshot(&self) -> FormSnapshot {
        self.state().values.clone()
    }

    fn set_field_value(&self, field: &str, value: &str) {
        self.state()
            .values
            .insert(field, FieldValue::Text(value.to_string()));
    }

    fn set_field_error(&self, field: &str, message: &str) {
        let mut state = self.state();
        if message.is_empty() {
            state.errors.remove(field);
        } else {
            state.errors.insert(field.to_string(), message.to_string());
        }
    }

    fn show_image_source(&self, source: ImageSource) {
        self.state().visible = Some(source);
    }

    fn set_hero_image(&self, url: &str) {
        self.state().hero = Some(url.to_string());
    }

    fn object_url(&self, file: &UploadFile) -> Option<String> {
        let path = file.path.as_ref()?;
        let absolute = std::path::absolute(path).ok()?;
        url::Url::from_file_path(absolute).ok().map(String::from)
    }
}
