//! reqwest-backed [`PostApi`].

use async_trait::async_trait;
use postboard_api_types::{PostListResponse, PostPayload};
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::application::api::{ApiError, PostApi, PostPage};
use crate::domain::filter::FilterState;
use crate::domain::posts::{Post, PostDraft, UploadFile};

const POSTS_PATH: &str = "posts";
const UPLOAD_FIELD: &str = "image";

/// Talks to a json-server style post API rooted at `base`.
#[derive(Clone, Debug)]
pub struct HttpPostApi {
    client: Client,
    base: Url,
}

impl HttpPostApi {
    /// `base` should end with `/`; one is appended otherwise.
    pub fn new(mut base: Url) -> Result<Self, ApiError> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(ApiError::network)?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.base
            .join(POSTS_PATH)
            .map_err(|err| ApiError::invalid_request(format!("invalid post URL: {err}")))
    }

    fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        if id.is_empty() {
            return Err(ApiError::invalid_request("post id must not be empty"));
        }
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| ApiError::invalid_request("base URL cannot carry a path"))?
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(ApiError::network)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await.map_err(ApiError::network)?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// JSON body, or multipart when the draft carries an upload.
    async fn save(&self, method: Method, url: Url, draft: &PostDraft) -> Result<Post, ApiError> {
        let request = self.client.request(method.clone(), url.clone());
        let request = match draft.image.as_ref() {
            Some(file) => request.multipart(multipart_form(draft, file).await?),
            None => request.json(&payload(draft)),
        };

        debug!(%method, %url, upload = draft.image.is_some(), "saving post");
        let response = self.send(request).await?;
        Self::decode(response).await
    }
}

fn payload(draft: &PostDraft) -> PostPayload {
    PostPayload {
        id: draft.id.clone(),
        title: draft.title.clone(),
        author: draft.author.clone(),
        description: draft.description.clone(),
        image_url: draft.image_url.clone(),
    }
}

async fn multipart_form(draft: &PostDraft, file: &UploadFile) -> Result<Form, ApiError> {
    let path = file.path.as_ref().ok_or_else(|| {
        ApiError::invalid_request(format!("upload `{}` has no readable path", file.name))
    })?;
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        ApiError::invalid_request(format!("failed to read {}: {err}", path.display()))
    })?;

    let mut form = Form::new()
        .text("title", draft.title.clone())
        .text("author", draft.author.clone())
        .text("description", draft.description.clone());
    if let Some(id) = draft.id.as_ref() {
        form = form.text("id", id.clone());
    }
    Ok(form.part(
        UPLOAD_FIELD,
        Part::bytes(bytes).file_name(file.name.clone()),
    ))
}

#[async_trait]
impl PostApi for HttpPostApi {
    async fn get_all(&self, params: &FilterState) -> Result<PostPage, ApiError> {
        let mut url = self.collection_url()?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        debug!(%url, "fetching post list");
        let response = self.send(self.client.get(url)).await?;
        let body: PostListResponse = Self::decode(response).await?;
        Ok(body.into())
    }

    async fn get_by_id(&self, id: &str) -> Result<Post, ApiError> {
        let url = self.item_url(id)?;
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let url = self.collection_url()?;
        self.save(Method::POST, url, draft).await
    }

    async fn update(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let id = draft
            .id
            .as_deref()
            .ok_or_else(|| ApiError::invalid_request("cannot update a post without an id"))?;
        let url = self.item_url(id)?;
        self.save(Method::PATCH, url, draft).await
    }
}
