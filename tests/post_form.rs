use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use postboard::{
    application::{
        api::{ApiError, PostApi, PostPage},
        form::{
            AUTHOR, DESCRIPTION, FormDefaults, FormView, IMAGE, IMAGE_SOURCE, IMAGE_URL,
            PostForm, SavePost, SubmitError, SubmitOutcome, TITLE, post_rules,
        },
        notify::{Notifier, Toast, ToastKind},
    },
    domain::{
        filter::FilterState,
        posts::{ImageSource, Post, PostDraft, UploadFile},
    },
    infra::terminal::TerminalForm,
};

fn saved_post(draft: &PostDraft, id: &str) -> Post {
    Post {
        id: id.to_string(),
        title: draft.title.clone(),
        author: draft.author.clone(),
        description: draft.description.clone(),
        image_url: draft.image_url.clone().unwrap_or_default(),
        created_at: 0,
        updated_at: 0,
    }
}

#[derive(Default)]
struct FakeApi {
    created: Mutex<Vec<PostDraft>>,
    updated: Mutex<Vec<PostDraft>>,
    fail_with: Mutex<Option<ApiError>>,
}

#[async_trait]
impl PostApi for FakeApi {
    async fn get_all(&self, _params: &FilterState) -> Result<PostPage, ApiError> {
        Err(ApiError::invalid_request("not used"))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Post, ApiError> {
        Err(ApiError::NotFound)
    }

    async fn remove(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        tokio::task::yield_now().await;
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        self.created.lock().unwrap().push(draft.clone());
        Ok(saved_post(draft, "new-id"))
    }

    async fn update(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.updated.lock().unwrap().push(draft.clone());
        Ok(saved_post(draft, draft.id.as_deref().unwrap_or_default()))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

struct Harness {
    api: Arc<FakeApi>,
    notifier: Arc<RecordingNotifier>,
    save: Arc<SavePost>,
    form: PostForm<TerminalForm>,
}

fn harness(defaults: FormDefaults) -> Harness {
    let api = Arc::new(FakeApi::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let save = Arc::new(SavePost::new(api.clone(), notifier.clone()));
    let form = PostForm::with_rules(
        TerminalForm::new(),
        post_rules(3 * 1024 * 1024),
        defaults,
        save.clone(),
    );
    Harness {
        api,
        notifier,
        save,
        form,
    }
}

fn fill(form: &PostForm<TerminalForm>, title: &str, author: &str) {
    form.view().set_field_value(TITLE, title);
    form.view().set_field_value(AUTHOR, author);
    form.view().set_field_value(DESCRIPTION, "Body");
}

#[tokio::test]
async fn create_with_random_image_posts_json_draft() {
    let h = harness(FormDefaults::default());
    assert_eq!(h.form.view().visible_source(), Some(ImageSource::Picsum));

    fill(&h.form, "Hello", "Jane Doe");
    let url = h.form.randomize_image();

    let outcome = h.form.submit().await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Submitted);

    let created = h.api.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, None);
    assert_eq!(created[0].image_source, ImageSource::Picsum);
    assert_eq!(created[0].image_url.as_deref(), Some(url.as_str()));
    assert_eq!(h.form.view().hero_image(), Some(url));
    assert_eq!(h.save.saved().map(|post| post.id), Some("new-id".to_string()));

    let toasts = h.notifier.toasts.lock().unwrap();
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].text, "Save post successfully");
}

#[tokio::test]
async fn edit_carries_the_post_id_into_update() {
    let post = Post {
        id: "42".to_string(),
        title: "Old".to_string(),
        author: "Jane Doe".to_string(),
        description: "Body".to_string(),
        image_url: "https://picsum.photos/id/3/1368/400".to_string(),
        created_at: 0,
        updated_at: 0,
    };
    let h = harness(FormDefaults::from(&post));
    h.form.view().set_field_value(TITLE, "New");

    assert_eq!(h.form.submit().await.expect("submit"), SubmitOutcome::Submitted);

    let updated = h.api.updated.lock().unwrap();
    assert_eq!(updated[0].id.as_deref(), Some("42"));
    assert_eq!(updated[0].title, "New");
    assert!(h.api.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_url_and_missing_title_block_submission() {
    let h = harness(FormDefaults::default());
    fill(&h.form, "", "Alice Bob");
    h.form.view().set_field_value(IMAGE_URL, "not-a-url");

    let outcome = h.form.submit().await.expect("submit");
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![IMAGE_URL, TITLE]);

    let shown = h.form.view().errors();
    assert_eq!(shown.get(TITLE).map(String::as_str), Some("Please enter title"));
    assert_eq!(
        shown.get(IMAGE_URL).map(String::as_str),
        Some("Please enter valid URL")
    );
    assert!(h.api.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fixing_errors_clears_them_on_the_next_pass() {
    let h = harness(FormDefaults::default());
    fill(&h.form, "", "Alice Bob");
    h.form.randomize_image();
    assert!(matches!(
        h.form.submit().await.expect("submit"),
        SubmitOutcome::Invalid(_)
    ));
    assert_eq!(h.form.view().errors().len(), 1);

    h.form.view().set_field_value(TITLE, "Fixed");
    assert_eq!(h.form.submit().await.expect("submit"), SubmitOutcome::Submitted);
    assert!(h.form.view().errors().is_empty());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let h = harness(FormDefaults::default());
    fill(&h.form, "T", "Jo Li");
    h.form.on_image_source_change(ImageSource::Upload);
    let file = UploadFile::new("cover.png", 4_000_000).with_path("/tmp/cover.png");
    h.form.view().set_file(file.clone());

    assert_eq!(h.form.on_upload_change(Some(file)).as_deref(), Some("Max 3mb"));
    assert_eq!(
        h.form.view().hero_image().as_deref(),
        Some("file:///tmp/cover.png")
    );

    let SubmitOutcome::Invalid(errors) = h.form.submit().await.expect("submit") else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.get(IMAGE), Some("Max 3mb"));
    assert_eq!(errors.get(AUTHOR), Some("Please enter at least two words"));
    assert_eq!(h.form.view().visible_source(), Some(ImageSource::Upload));
}

#[tokio::test]
async fn upload_draft_drops_the_image_url() {
    let h = harness(FormDefaults {
        image_url: "https://picsum.photos/id/3/1368/400".to_string(),
        ..FormDefaults::default()
    });
    fill(&h.form, "Title", "Jane Doe");
    h.form.on_image_source_change(ImageSource::Upload);
    h.form
        .view()
        .set_file(UploadFile::new("cover.png", 1024).with_path("/tmp/cover.png"));

    assert_eq!(h.form.submit().await.expect("submit"), SubmitOutcome::Submitted);

    let created = h.api.created.lock().unwrap();
    assert_eq!(created[0].image_source, ImageSource::Upload);
    assert_eq!(created[0].image_url, None);
    assert_eq!(
        created[0].image.as_ref().map(|file| file.name.as_str()),
        Some("cover.png")
    );
    assert_eq!(
        h.form.view().snapshot().text(IMAGE_SOURCE),
        Some("upload")
    );
}

#[tokio::test]
async fn api_failure_surfaces_as_submit_error_with_toast() {
    let h = harness(FormDefaults::default());
    *h.api.fail_with.lock().unwrap() = Some(ApiError::Network("offline".to_string()));
    fill(&h.form, "Title", "Jane Doe");
    h.form.randomize_image();

    let err = h.form.submit().await.expect_err("api failure");
    assert!(matches!(err, SubmitError::Api(ApiError::Network(_))));
    assert!(!h.form.is_submitting());

    let toasts = h.notifier.toasts.lock().unwrap();
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].text, "network error: offline");
}

#[tokio::test]
async fn double_submit_saves_once() {
    let h = harness(FormDefaults::default());
    fill(&h.form, "Title", "Jane Doe");
    h.form.randomize_image();

    let (first, second) = tokio::join!(h.form.submit(), h.form.submit());
    let outcomes = [first.expect("first"), second.expect("second")];
    assert!(outcomes.contains(&SubmitOutcome::Submitted));
    assert!(outcomes.contains(&SubmitOutcome::Busy));
    assert_eq!(h.api.created.lock().unwrap().len(), 1);
}
