//! Remote post API seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::filter::FilterState;
use crate::domain::pagination::Pagination;
use crate::domain::posts::{Post, PostDraft};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("resource not found")]
    NotFound,
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// One page of posts plus its position in the filtered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub data: Vec<Post>,
    pub pagination: Pagination,
}

impl From<postboard_api_types::PostListResponse> for PostPage {
    fn from(response: postboard_api_types::PostListResponse) -> Self {
        Self {
            data: response.data,
            pagination: response.pagination.into(),
        }
    }
}

/// Post collaborator used by every controller. Calls are not retried and carry
/// no timeout of their own.
#[async_trait]
pub trait PostApi: Send + Sync {
    /// List posts using the full filter parameter set as query.
    async fn get_all(&self, params: &FilterState) -> Result<PostPage, ApiError>;

    async fn get_by_id(&self, id: &str) -> Result<Post, ApiError>;

    async fn remove(&self, id: &str) -> Result<(), ApiError>;

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError>;

    async fn update(&self, draft: &PostDraft) -> Result<Post, ApiError>;
}
