//! Access to the remote `/movies` resource.
//!
//! [`MovieStore`] is the port the catalog manager talks to. Two adapters
//! implement it: [`HttpMovieStore`] for a running catalog API and
//! [`InMemoryMovieStore`], which mirrors the API's query semantics in
//! process for tests and demos.

pub mod http;
pub mod memory;
pub mod query;

use async_trait::async_trait;
use cinelist_model::{Movie, MovieDraft, MovieId, MoviePatch};
use thiserror::Error;

pub use http::HttpMovieStore;
pub use memory::InMemoryMovieStore;
pub use query::{MovieField, MovieFilter, MovieQuery};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Movie not found: {id}")]
    NotFound { id: MovieId },

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD and query operations against the movie catalog.
///
/// Records returned by implementations are not normalized; callers apply
/// [`Movie::normalized`] before showing them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// `GET /movies/{id}`
    async fn get_movie(&self, id: &MovieId) -> StoreResult<Movie>;

    /// `GET /movies?{field}[_like]={value}[&_limit=N]`
    async fn list_movies(&self, query: &MovieQuery) -> StoreResult<Vec<Movie>>;

    /// `GET /movies?category=..&isTrending=..&favorites_like=..&incompleteness_like=..`
    async fn filter_movies(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>>;

    /// `POST /movies`. The store assigns the id.
    async fn create_movie(&self, draft: &MovieDraft) -> StoreResult<Movie>;

    /// `PATCH /movies/{id}`. Returns the merged record.
    async fn update_movie(&self, id: &MovieId, patch: &MoviePatch) -> StoreResult<Movie>;
}
