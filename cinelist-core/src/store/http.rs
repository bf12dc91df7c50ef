use std::time::Duration;

use async_trait::async_trait;
use cinelist_config::CatalogConfig;
use cinelist_model::{Movie, MovieDraft, MovieId, MoviePatch};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use super::{MovieFilter, MovieQuery, MovieStore, StoreError, StoreResult};
use crate::constants::MOVIES;

/// [`MovieStore`] backed by the catalog's REST API.
#[derive(Debug, Clone)]
pub struct HttpMovieStore {
    client: Client,
    base_url: Url,
}

impl HttpMovieStore {
    pub fn new(base_url: Url, timeout: Duration) -> StoreResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Unavailable(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        info!(%base_url, ?timeout, "Using catalog API");

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &CatalogConfig) -> StoreResult<Self> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/movies` or `{base}/movies/{id}`, keeping any base path.
    fn resource_url(&self, id: Option<&MovieId>) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StoreError::Unavailable(format!(
                    "{} cannot be used as a base URL",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().push(MOVIES);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        id: Option<&MovieId>,
    ) -> StoreResult<T> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(StoreError::NotFound { id: id.clone() });
        }

        match status {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Decode(e.to_string())),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!(%status, %body, "Catalog API request failed");
                Err(StoreError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn query(&self, pairs: &[(String, String)]) -> StoreResult<Vec<Movie>> {
        let url = self.resource_url(None)?;
        debug!(%url, ?pairs, "GET movies");
        self.execute(self.client.get(url).query(pairs), None).await
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Transport(err.to_string())
    }
}

#[async_trait]
impl MovieStore for HttpMovieStore {
    async fn get_movie(&self, id: &MovieId) -> StoreResult<Movie> {
        let url = self.resource_url(Some(id))?;
        debug!(%url, "GET movie");
        self.execute(self.client.get(url), Some(id)).await
    }

    async fn list_movies(&self, query: &MovieQuery) -> StoreResult<Vec<Movie>> {
        self.query(&query.to_query_pairs()).await
    }

    async fn filter_movies(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        self.query(&filter.to_query_pairs()).await
    }

    async fn create_movie(&self, draft: &MovieDraft) -> StoreResult<Movie> {
        let url = self.resource_url(None)?;
        debug!(%url, title = %draft.title, "POST movie");
        let body = draft.to_new_movie();
        self.execute(self.client.post(url).json(&body), None).await
    }

    async fn update_movie(&self, id: &MovieId, patch: &MoviePatch) -> StoreResult<Movie> {
        let url = self.resource_url(Some(id))?;
        debug!(%url, "PATCH movie");
        self.execute(self.client.patch(url).json(patch), Some(id))
            .await
    }
}
