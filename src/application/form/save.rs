use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::api::PostApi;
use crate::application::notify::{Notifier, Toast};
use crate::domain::posts::{Post, PostDraft};

use super::controller::{SubmitError, SubmitHandler};

/// Persists drafts through the post API: drafts with an id are updated, the
/// rest are created.
pub struct SavePost {
    api: Arc<dyn PostApi>,
    notifier: Arc<dyn Notifier>,
    saved: Mutex<Option<Post>>,
}

impl SavePost {
    pub fn new(api: Arc<dyn PostApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            saved: Mutex::new(None),
        }
    }

    /// The post returned by the last successful save.
    pub fn saved(&self) -> Option<Post> {
        self.saved.lock().ok().and_then(|slot| slot.clone())
    }
}

#[async_trait]
impl SubmitHandler for SavePost {
    async fn submit(&self, draft: PostDraft) -> Result<(), SubmitError> {
        let result = match draft.id {
            Some(_) => self.api.update(&draft).await,
            None => self.api.create(&draft).await,
        };

        match result {
            Ok(post) => {
                info!(post_id = %post.id, "post saved");
                if let Ok(mut slot) = self.saved.lock() {
                    *slot = Some(post);
                }
                self.notifier.notify(Toast::success("Save post successfully"));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to save post");
                self.notifier.notify(Toast::error(err.to_string()));
                Err(err.into())
            }
        }
    }
}
