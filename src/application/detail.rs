//! Single post page.

use std::sync::Arc;

use tracing::{debug, error};
use url::Url;

use crate::application::api::{ApiError, PostApi};
use crate::application::lightbox::Lightbox;
use crate::application::render::{RenderError, Thumbnail};
use crate::domain::posts::{Post, timestamp};
use crate::util::time::format_day_time;

const ID_KEY: &str = "id";
const EDIT_PAGE: &str = "add-edit-post.html";

/// Detail projection of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    /// ` - DD/MM/YYYY HH:mm` of the creation time.
    pub time_span: String,
    pub hero: Thumbnail,
    pub edit_link: String,
}

impl PostDetailView {
    pub fn new(post: &Post, placeholder_image: &str) -> Self {
        let time_span = timestamp(post.created_at)
            .map(|created| format!(" - {}", format_day_time(created)))
            .unwrap_or_default();

        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            author: post.author.clone(),
            time_span,
            hero: Thumbnail::new(post.image_url.clone(), placeholder_image),
            edit_link: edit_link(&post.id),
        }
    }
}

/// `add-edit-post.html?id=<id>` with the id query-encoded.
pub fn edit_link(id: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(ID_KEY, id)
        .finish();
    format!("{EDIT_PAGE}?{query}")
}

pub trait DetailRenderer: Send {
    fn render_detail(&mut self, view: &PostDetailView) -> Result<(), RenderError>;
}

/// Loads the post named by the location and renders it.
pub struct PostDetail<R> {
    api: Arc<dyn PostApi>,
    renderer: R,
    placeholder_image: String,
    lightbox: Lightbox,
    view: Option<PostDetailView>,
}

impl<R: DetailRenderer> PostDetail<R> {
    pub fn new(api: Arc<dyn PostApi>, renderer: R, placeholder_image: impl Into<String>) -> Self {
        Self {
            api,
            renderer,
            placeholder_image: placeholder_image.into(),
            lightbox: Lightbox::new(),
            view: None,
        }
    }

    /// Render the post whose id is in `location`. Without an id nothing
    /// happens. A failed fetch renders nothing; the error is logged and
    /// returned.
    pub async fn load(&mut self, location: &Url) -> Result<Option<&PostDetailView>, ApiError> {
        let id = location
            .query_pairs()
            .find(|(key, _)| key == ID_KEY)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
        let Some(id) = id else {
            debug!(%location, "no post id in location");
            return Ok(None);
        };

        self.load_id(&id).await.map(Some)
    }

    pub async fn load_id(&mut self, id: &str) -> Result<&PostDetailView, ApiError> {
        let post = self.api.get_by_id(id).await.map_err(|err| {
            error!(post_id = %id, error = %err, "failed to load post detail");
            err
        })?;

        let view = PostDetailView::new(&post, &self.placeholder_image);
        if let Err(err) = self.renderer.render_detail(&view) {
            debug!(error = %err, "detail surface unavailable");
        }
        // The hero image is the post's only album entry.
        let hero = view.hero.src().to_string();
        self.lightbox.open(vec![hero.clone()], &hero);
        Ok(self.view.insert(view))
    }

    pub fn view(&self) -> Option<&PostDetailView> {
        self.view.as_ref()
    }

    pub fn lightbox(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
