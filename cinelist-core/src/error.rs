use std::fmt;

use cinelist_model::{MovieId, ValidationErrors};
use thiserror::Error;

use crate::collections::CollectionKey;
use crate::constants::messages;
use crate::store::StoreError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Which kind of write was rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteAction::Create => f.write_str(messages::CREATE_FAILED),
            WriteAction::Update => f.write_str(messages::UPDATE_FAILED),
        }
    }
}

/// What a failed read was supposed to fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadTarget {
    Collection(CollectionKey),
    Movie(MovieId),
}

impl fmt::Display for ReadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadTarget::Collection(key) => {
                write!(f, "{} ({key})", messages::LIST_FAILED)
            }
            ReadTarget::Movie(id) => {
                write!(f, "{} (movie {id})", messages::DETAILS_FAILED)
            }
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The event named a movie the collection no longer holds.
    #[error("Movie {movie_id} is not in the {collection} list")]
    StaleReference {
        movie_id: MovieId,
        collection: CollectionKey,
    },

    #[error("{action}: {source}")]
    RemoteWrite {
        action: WriteAction,
        movie_id: Option<MovieId>,
        #[source]
        source: StoreError,
    },

    #[error("{target}: {source}")]
    RemoteRead {
        target: ReadTarget,
        #[source]
        source: StoreError,
    },

    #[error("Invalid movie: {0}")]
    Validation(#[from] ValidationErrors),
}

impl CatalogError {
    pub fn update_failed(movie_id: &MovieId, source: StoreError) -> Self {
        CatalogError::RemoteWrite {
            action: WriteAction::Update,
            movie_id: Some(movie_id.clone()),
            source,
        }
    }

    pub fn create_failed(source: StoreError) -> Self {
        CatalogError::RemoteWrite {
            action: WriteAction::Create,
            movie_id: None,
            source,
        }
    }

    pub fn list_failed(collection: CollectionKey, source: StoreError) -> Self {
        CatalogError::RemoteRead {
            target: ReadTarget::Collection(collection),
            source,
        }
    }

    /// Silent errors are returned to the caller but never alerted.
    pub fn is_silent(&self) -> bool {
        matches!(self, CatalogError::StaleReference { .. })
    }

    pub fn movie_id(&self) -> Option<&MovieId> {
        match self {
            CatalogError::StaleReference { movie_id, .. } => Some(movie_id),
            CatalogError::RemoteWrite { movie_id, .. } => movie_id.as_ref(),
            CatalogError::RemoteRead {
                target: ReadTarget::Movie(id),
                ..
            } => Some(id),
            _ => None,
        }
    }
}
