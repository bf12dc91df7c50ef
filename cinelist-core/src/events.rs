use cinelist_model::{Category, Membership, Movie, MovieDraft, MovieId};

use crate::collections::{CollectionKey, UnknownCollectionKey};

/// Interaction reported by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Heart button on a card in one of the lists.
    FavoriteToggled {
        movie_id: MovieId,
        collection: CollectionKey,
    },
    /// Heart button inside the detail view.
    DetailFavoriteToggled { movie_id: MovieId },
    CardSelected { movie_id: MovieId },
    EditRequested { movie_id: MovieId },
    CreateRequested,
    CategorySelected(Option<Category>),
    FormSubmitted(MovieDraft),
}

impl UiEvent {
    /// Builds a card toggle from the list tag the presentation layer holds.
    pub fn favorite_toggled(
        movie_id: MovieId,
        collection: &str,
    ) -> Result<Self, UnknownCollectionKey> {
        Ok(UiEvent::FavoriteToggled {
            movie_id,
            collection: collection.parse()?,
        })
    }

    pub fn movie_id(&self) -> Option<&MovieId> {
        match self {
            UiEvent::FavoriteToggled { movie_id, .. }
            | UiEvent::DetailFavoriteToggled { movie_id }
            | UiEvent::CardSelected { movie_id }
            | UiEvent::EditRequested { movie_id } => Some(movie_id),
            UiEvent::FormSubmitted(draft) => draft.id.as_ref(),
            UiEvent::CreateRequested | UiEvent::CategorySelected(_) => None,
        }
    }
}

/// What a dispatched event produced, for callers that care.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Toggled(Membership),
    Removed,
    Filtered,
    Detail(Movie),
    FormOpened,
    Saved(Movie),
}
