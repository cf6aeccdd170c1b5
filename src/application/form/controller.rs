use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::api::ApiError;
use crate::domain::posts::{ImageSource, Post, PostDraft, UnknownImageSource, UploadFile};

use super::rules::{RuleSet, ValidationErrors};
use super::schema::{
    AUTHOR, DEFAULT_MAX_UPLOAD_BYTES, DESCRIPTION, IMAGE, IMAGE_SOURCE, IMAGE_URL, TITLE,
    post_rules,
};
use super::snapshot::FormSnapshot;

const RANDOM_IMAGE_IDS: u128 = 1000;

/// Surface holding the form inputs.
///
/// Implementations use interior mutability; the form only ever borrows the
/// view shared.
pub trait FormView: Send + Sync {
    /// Capture every field value at once.
    fn snapshot(&self) -> FormSnapshot;

    fn set_field_value(&self, field: &str, value: &str);

    /// Show `message` under `field`. An empty message clears the error.
    fn set_field_error(&self, field: &str, message: &str);

    /// Reveal the input group of `source` and hide the others.
    fn show_image_source(&self, source: ImageSource);

    fn set_hero_image(&self, url: &str);

    /// Host-provided preview URL for a picked file.
    fn object_url(&self, file: &UploadFile) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("form values do not describe a post: {0}")]
    InvalidDraft(String),
}

/// Receives validated drafts.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, draft: PostDraft) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The handler ran and succeeded.
    Submitted,
    /// Validation failed; the handler was not called.
    Invalid(ValidationErrors),
    /// Another submission is still in flight.
    Busy,
}

/// Values the form starts with. Empty for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub image_url: String,
    pub image_source: ImageSource,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            author: String::new(),
            description: String::new(),
            image_url: String::new(),
            image_source: ImageSource::Picsum,
        }
    }
}

impl From<&Post> for FormDefaults {
    fn from(post: &Post) -> Self {
        Self {
            id: Some(post.id.clone()),
            title: post.title.clone(),
            author: post.author.clone(),
            description: post.description.clone(),
            image_url: post.image_url.clone(),
            image_source: ImageSource::Picsum,
        }
    }
}

/// Clears the in-flight flag on every exit path, unwinding included.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Post create/edit form.
pub struct PostForm<V> {
    view: V,
    rules: RuleSet,
    defaults: FormDefaults,
    on_submit: Arc<dyn SubmitHandler>,
    submitting: AtomicBool,
}

impl<V: FormView> PostForm<V> {
    /// Populate `view` with `defaults` and wire the default rule set.
    pub fn new(view: V, defaults: FormDefaults, on_submit: Arc<dyn SubmitHandler>) -> Self {
        Self::with_rules(view, post_rules(DEFAULT_MAX_UPLOAD_BYTES), defaults, on_submit)
    }

    pub fn with_rules(
        view: V,
        rules: RuleSet,
        defaults: FormDefaults,
        on_submit: Arc<dyn SubmitHandler>,
    ) -> Self {
        view.set_field_value(TITLE, &defaults.title);
        view.set_field_value(AUTHOR, &defaults.author);
        view.set_field_value(DESCRIPTION, &defaults.description);
        view.set_field_value(IMAGE_URL, &defaults.image_url);
        view.set_field_value(IMAGE_SOURCE, defaults.image_source.as_str());
        if !defaults.image_url.is_empty() {
            view.set_hero_image(&defaults.image_url);
        }
        view.show_image_source(defaults.image_source);

        Self {
            view,
            rules,
            defaults,
            on_submit,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn defaults(&self) -> &FormDefaults {
        &self.defaults
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validate everything, replacing all displayed errors.
    pub fn validate_form(&self, snapshot: &FormSnapshot) -> ValidationErrors {
        for field in self.rules.fields() {
            self.view.set_field_error(field, "");
        }

        let errors = self.rules.validate(snapshot);
        for (field, message) in errors.iter() {
            self.view.set_field_error(field, message);
        }
        errors
    }

    /// Validate one field, touching only that field's displayed error.
    pub fn validate_field(&self, snapshot: &FormSnapshot, field: &str) -> Option<String> {
        let message = self.rules.validate_field(snapshot, field);
        self.view
            .set_field_error(field, message.as_deref().unwrap_or_default());
        message
    }

    /// Live validation while typing. Only title and author validate on input.
    pub fn on_field_input(&self, field: &str, value: &str) -> Option<String> {
        if field != TITLE && field != AUTHOR {
            return None;
        }
        let snapshot = FormSnapshot::new().with_text(field, value);
        self.validate_field(&snapshot, field)
    }

    pub fn on_image_source_change(&self, source: ImageSource) {
        self.view.set_field_value(IMAGE_SOURCE, source.as_str());
        self.view.show_image_source(source);
    }

    /// Pick a random picsum image and return its URL.
    pub fn randomize_image(&self) -> String {
        let id = Uuid::new_v4().as_u128() % RANDOM_IMAGE_IDS;
        let url = format!("https://picsum.photos/id/{id}/1368/400");
        self.view.set_field_value(IMAGE_URL, &url);
        self.view.set_hero_image(&url);
        url
    }

    /// Preview and validate a newly picked upload. Clearing the picker is a
    /// no-op.
    pub fn on_upload_change(&self, file: Option<UploadFile>) -> Option<String> {
        let file = file?;
        if let Some(url) = self.view.object_url(&file) {
            self.view.set_hero_image(&url);
        }
        let snapshot = FormSnapshot::new()
            .with_text(IMAGE_SOURCE, ImageSource::Upload.as_str())
            .with_file(IMAGE, file);
        self.validate_field(&snapshot, IMAGE)
    }

    /// Validate the current values and hand them to the submit handler.
    ///
    /// A call made while another is in flight returns
    /// [`SubmitOutcome::Busy`] and does nothing else.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            debug!("submission already in flight");
            return Ok(SubmitOutcome::Busy);
        };

        let snapshot = self.view.snapshot();
        let errors = self.validate_form(&snapshot);
        if !errors.is_empty() {
            debug!(errors = %errors, "form is invalid");
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let draft = draft_from_snapshot(&snapshot, self.defaults.id.clone())?;
        match self.on_submit.submit(draft).await {
            Ok(()) => {
                info!(post_id = ?self.defaults.id, "post form submitted");
                Ok(SubmitOutcome::Submitted)
            }
            Err(err) => {
                warn!(error = %err, "post form submission failed");
                Err(err)
            }
        }
    }
}

/// Build a draft from a validated snapshot, keeping only the image field the
/// selected source governs.
fn draft_from_snapshot(
    snapshot: &FormSnapshot,
    id: Option<String>,
) -> Result<PostDraft, SubmitError> {
    let text = |field: &str| snapshot.text(field).unwrap_or_default().to_string();

    let image_source: ImageSource = snapshot
        .text(IMAGE_SOURCE)
        .unwrap_or_default()
        .parse()
        .map_err(|err: UnknownImageSource| SubmitError::InvalidDraft(err.to_string()))?;

    let (image_url, image) = match image_source {
        ImageSource::Picsum => (Some(text(IMAGE_URL)), None),
        ImageSource::Upload => (None, snapshot.file(IMAGE).cloned()),
    };

    Ok(PostDraft {
        id,
        title: text(TITLE),
        author: text(AUTHOR),
        description: text(DESCRIPTION),
        image_source,
        image_url,
        image,
    })
}
