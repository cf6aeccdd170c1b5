use time::OffsetDateTime;

use crate::application::render::{RenderError, Thumbnail};
use crate::domain::posts::{Post, timestamp};
use crate::util::{text::truncate_text, time::relative_time};

use super::widget::PaginationView;

/// List item projection of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub time_span: String,
    pub thumbnail: Thumbnail,
}

/// Build the card for `post`; `time_span` is relative to `now`.
pub fn post_card(
    post: &Post,
    now: OffsetDateTime,
    description_max_chars: usize,
    placeholder_image: &str,
) -> PostCard {
    let time_span = timestamp(post.updated_at)
        .map(|updated| format!("- {}", relative_time(updated, now)))
        .unwrap_or_default();

    PostCard {
        id: post.id.clone(),
        title: post.title.clone(),
        description: truncate_text(&post.description, description_max_chars),
        author: post.author.clone(),
        time_span,
        thumbnail: Thumbnail::new(post.image_url.clone(), placeholder_image),
    }
}

/// Surface that displays the post list, the pagination control and the
/// search box.
pub trait ListRenderer: Send {
    /// Replace the whole rendered list with `cards`.
    fn render_posts(&mut self, cards: Vec<PostCard>) -> Result<(), RenderError>;

    fn render_pagination(&mut self, view: PaginationView) -> Result<(), RenderError>;

    /// Seed the search input with the value found in the location.
    fn render_search(&mut self, value: &str) -> Result<(), RenderError>;
}
