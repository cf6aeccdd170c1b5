//! Confirm-then-remove flow shared by every delete entry point.

use tracing::{debug, info, warn};

use crate::application::api::{ApiError, PostApi};
use crate::application::notify::{Confirm, Notifier, Toast};
use crate::domain::posts::Post;

const REMOVED_MESSAGE: &str = "Remove post successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    Cancelled,
}

/// Confirmation asked before removing `post`.
pub fn removal_question(post: &Post) -> String {
    format!("Are you sure to remove post \"{}\"?", post.title)
}

/// Toast emitted once a removal has been applied.
pub fn removed_toast() -> Toast {
    Toast::success(REMOVED_MESSAGE)
}

/// Ask `confirm`, then remove `post`.
///
/// A failed removal is logged, reported through `notifier` and returned. The
/// success toast is left to the caller so it can reload first.
pub async fn remove_post(
    api: &dyn PostApi,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    post: &Post,
) -> Result<Removal, ApiError> {
    if !confirm.confirm(&removal_question(post)).await {
        debug!(post_id = %post.id, "post removal cancelled");
        return Ok(Removal::Cancelled);
    }

    match api.remove(&post.id).await {
        Ok(()) => {
            info!(post_id = %post.id, "post removed");
            Ok(Removal::Removed)
        }
        Err(err) => {
            warn!(post_id = %post.id, error = %err, "failed to remove post");
            notifier.notify(Toast::error(err.to_string()));
            Err(err)
        }
    }
}
