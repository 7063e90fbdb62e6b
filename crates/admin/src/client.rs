//! REST client for the admin endpoints under `/api/v1/admin`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tourbook_core::search::MAX_PAGE_SIZE;
use tourbook_core::types::DbId;
use tourbook_db::models::category::Category;
use tourbook_db::models::media::MediaItem;

use crate::error::ClientError;

/// Body of `POST /admin/media`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaUpload {
    /// `data:` URI carrying the file bytes.
    pub image: String,
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// The server operations the admin screens depend on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Categories in display order.
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;

    /// Persist a new display order. Returns how many categories changed.
    async fn reorder_categories(&self, ids: &[DbId]) -> Result<u64, ClientError>;

    async fn upload_media(&self, upload: &MediaUpload) -> Result<MediaItem, ClientError>;

    /// Newest-first media library.
    async fn list_media(&self) -> Result<Vec<MediaItem>, ClientError>;
}

/// HTTP implementation of [`CatalogApi`].
pub struct CatalogClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct CategoryList {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct MediaList {
    media: Vec<MediaItem>,
}

#[derive(Deserialize)]
struct ReorderReply {
    updated: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl CatalogClient {
    /// * `api_url` - Base URL including the version prefix, e.g.
    ///   `http://localhost:3000/api/v1`.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/admin{path}", self.api_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`ClientError::Api`], preferring the
    /// `error` field of the JSON body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self
            .authorize(self.client.get(self.admin_url("/categories")))
            .query(&[("limit", MAX_PAGE_SIZE)])
            .send()
            .await?;
        let list: CategoryList = Self::parse_response(response).await?;
        Ok(list.categories)
    }

    async fn reorder_categories(&self, ids: &[DbId]) -> Result<u64, ClientError> {
        let body = serde_json::json!({ "categories": ids });
        let response = self
            .authorize(self.client.put(self.admin_url("/categories/reorder")))
            .json(&body)
            .send()
            .await?;
        let reply: ReorderReply = Self::parse_response(response).await?;
        Ok(reply.updated)
    }

    async fn upload_media(&self, upload: &MediaUpload) -> Result<MediaItem, ClientError> {
        let response = self
            .authorize(self.client.post(self.admin_url("/media")))
            .json(upload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_media(&self) -> Result<Vec<MediaItem>, ClientError> {
        let response = self
            .authorize(self.client.get(self.admin_url("/media")))
            .query(&[("limit", MAX_PAGE_SIZE)])
            .send()
            .await?;
        let list: MediaList = Self::parse_response(response).await?;
        Ok(list.media)
    }
}
