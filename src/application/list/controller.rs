use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, error};

use crate::application::api::{ApiError, PostApi};
use crate::application::location::Location;
use crate::application::notify::{Confirm, Notifier};
use crate::domain::filter::{DEFAULT_LIMIT, FilterState, PAGE_KEY, SEARCH_KEY};
use crate::domain::posts::Post;

use super::cards::{ListRenderer, post_card};
use super::removal::{Removal, remove_post, removed_toast};
use super::widget::PaginationWidget;

const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/1280x900?text=thumbnail";
const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 100;

/// Tunables of the list controller.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// `_limit` injected when the location carries none.
    pub default_limit: u32,
    /// Clear the rendered list when a fetch returns no rows. When false, an
    /// empty page leaves the previous rows on screen.
    pub clear_on_empty: bool,
    pub description_max_chars: usize,
    pub placeholder_image: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            clear_on_empty: false,
            description_max_chars: DEFAULT_DESCRIPTION_MAX_CHARS,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// User intents delivered to the controller by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Prev,
    Next,
    /// Debounced title search.
    Search(String),
    Filter { key: String, value: String },
    Delete(Post),
}

/// Keeps the location filter, the remote page and the rendered list in step.
pub struct ListController<L, R> {
    api: Arc<dyn PostApi>,
    location: L,
    renderer: R,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    options: ListOptions,
    filter: FilterState,
    widget: PaginationWidget,
    posts: Vec<Post>,
}

impl<L: Location, R: ListRenderer> ListController<L, R> {
    pub fn new(
        api: Arc<dyn PostApi>,
        location: L,
        renderer: R,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        options: ListOptions,
    ) -> Self {
        let filter = FilterState::from_url(location.current());
        let widget = PaginationWidget::new(filter.page());
        Self {
            api,
            location,
            renderer,
            notifier,
            confirm,
            options,
            filter,
            widget,
            posts: Vec::new(),
        }
    }

    /// Normalise the location, seed the search box and load the first page.
    ///
    /// Default injection rewrites the current history entry instead of adding
    /// one, so the back button does not land on the bare location.
    pub async fn initialize(&mut self) -> Result<(), ApiError> {
        let mut filter = FilterState::from_url(self.location.current());
        if filter.ensure_defaults(self.options.default_limit) {
            let url = filter.apply_to(self.location.current());
            debug!(location = %url, "injected default pagination parameters");
            self.location.replace(url);
        }
        self.widget = PaginationWidget::new(filter.page());
        self.filter = filter;

        if let Some(search) = self.filter.search() {
            let search = search.to_string();
            if let Err(err) = self.renderer.render_search(&search) {
                debug!(error = %err, "search input unavailable");
            }
        }

        self.fetch_and_render().await
    }

    /// Set `key=value` in the location, push a history entry and reload.
    ///
    /// The pagination widget restarts from the filter's page with an unknown
    /// total, so a failed fetch cannot leave it pointing into the previous
    /// result set.
    pub async fn on_filter_change(&mut self, key: &str, value: &str) -> Result<(), ApiError> {
        self.filter.set_filter(key, value);
        self.widget = PaginationWidget::new(self.filter.page());
        let url = self.filter.apply_to(self.location.current());
        debug!(%key, %value, location = %url, "filter changed");
        self.location.push(url);

        self.fetch_and_render().await
    }

    /// Fetch the page described by the current filter and render it. On
    /// failure the previous rendering stays in place and the error is logged
    /// before being returned.
    pub async fn fetch_and_render(&mut self) -> Result<(), ApiError> {
        match self.api.get_all(&self.filter).await {
            Ok(page) => {
                self.render_posts(page.data);
                self.widget.update(page.pagination);
                if let Err(err) = self.renderer.render_pagination(self.widget.view()) {
                    debug!(error = %err, "pagination widget unavailable");
                }
                Ok(())
            }
            Err(err) => {
                error!(error = %err, query = %self.filter, "failed to fetch post list");
                Err(err)
            }
        }
    }

    pub async fn previous_page(&mut self) -> Result<(), ApiError> {
        match self.widget.prev_target() {
            Some(page) => self.on_filter_change(PAGE_KEY, &page.to_string()).await,
            None => {
                debug!(page = self.widget.page(), "already at the first page");
                Ok(())
            }
        }
    }

    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        match self.widget.next_target() {
            Some(page) => self.on_filter_change(PAGE_KEY, &page.to_string()).await,
            None => {
                debug!(page = self.widget.page(), "already at the last page");
                Ok(())
            }
        }
    }

    pub async fn search(&mut self, text: &str) -> Result<(), ApiError> {
        self.on_filter_change(SEARCH_KEY, text).await
    }

    /// Confirm, remove, then reload the current page (the page is kept).
    pub async fn on_delete(&mut self, post: &Post) {
        let removal = remove_post(
            self.api.as_ref(),
            self.confirm.as_ref(),
            self.notifier.as_ref(),
            post,
        )
        .await;
        if let Ok(Removal::Removed) = removal {
            // Already logged; the removal itself succeeded.
            let _ = self.fetch_and_render().await;
            self.notifier.notify(removed_toast());
        }
    }

    /// Dispatch one user intent. Fetch failures are logged, not returned.
    pub async fn handle(&mut self, event: ListEvent) {
        let _ = match event {
            ListEvent::Prev => self.previous_page().await,
            ListEvent::Next => self.next_page().await,
            ListEvent::Search(text) => self.search(&text).await,
            ListEvent::Filter { key, value } => self.on_filter_change(&key, &value).await,
            ListEvent::Delete(post) => {
                self.on_delete(&post).await;
                Ok(())
            }
        };
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn widget(&self) -> &PaginationWidget {
        &self.widget
    }

    /// Posts currently on screen.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn render_posts(&mut self, posts: Vec<Post>) {
        if posts.is_empty() && !self.options.clear_on_empty {
            debug!(query = %self.filter, "empty page; keeping the previous list");
            return;
        }

        let now = OffsetDateTime::now_utc();
        let cards = posts
            .iter()
            .map(|post| {
                post_card(
                    post,
                    now,
                    self.options.description_max_chars,
                    &self.options.placeholder_image,
                )
            })
            .collect();

        match self.renderer.render_posts(cards) {
            Ok(()) => self.posts = posts,
            Err(err) => debug!(error = %err, "post list container unavailable"),
        }
    }
}
