//! Per-page movie collections.
//!
//! Every movie the page knows about is stored exactly once, keyed by id;
//! the trending, favorites and continue-watching lists only hold ids in
//! display order. A membership change written to a record is therefore
//! seen by every list that shows the movie, and no list can hold a stale
//! copy.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use cinelist_model::{Movie, MovieId};
use tracing::warn;

/// Names one of the three lists a page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Trending,
    Favorites,
    ContinueWatching,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [
        CollectionKey::Trending,
        CollectionKey::Favorites,
        CollectionKey::ContinueWatching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Trending => "trending",
            CollectionKey::Favorites => "favorites",
            CollectionKey::ContinueWatching => "continueWatching",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection key: {0:?}")]
pub struct UnknownCollectionKey(pub String);

impl FromStr for CollectionKey {
    type Err = UnknownCollectionKey;

    /// Accepts the spellings presentation layers have used for list tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "trending" => Ok(CollectionKey::Trending),
            "favorites" | "favourites" => Ok(CollectionKey::Favorites),
            "continuewatching" => Ok(CollectionKey::ContinueWatching),
            _ => Err(UnknownCollectionKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilteredMovieCollections {
    movies: HashMap<MovieId, Movie>,
    trending: Vec<MovieId>,
    favorites: Vec<MovieId>,
    continue_watching: Vec<MovieId>,
}

impl FilteredMovieCollections {
    pub fn new() -> Self {
        Self::default()
    }

    fn ids(&self, key: CollectionKey) -> &Vec<MovieId> {
        match key {
            CollectionKey::Trending => &self.trending,
            CollectionKey::Favorites => &self.favorites,
            CollectionKey::ContinueWatching => &self.continue_watching,
        }
    }

    fn ids_mut(&mut self, key: CollectionKey) -> &mut Vec<MovieId> {
        match key {
            CollectionKey::Trending => &mut self.trending,
            CollectionKey::Favorites => &mut self.favorites,
            CollectionKey::ContinueWatching => &mut self.continue_watching,
        }
    }

    /// Replaces a list wholesale.
    ///
    /// Records already held for other lists are overwritten with the fresh
    /// copies. Movies without an id cannot be tracked and are skipped, as
    /// are repeated ids within `movies`.
    pub fn replace(&mut self, key: CollectionKey, movies: Vec<Movie>) {
        let mut ids = Vec::with_capacity(movies.len());
        for movie in movies {
            let Some(id) = movie.id.clone() else {
                warn!(collection = %key, title = %movie.title, "Skipping movie without id");
                continue;
            };
            if ids.contains(&id) {
                continue;
            }
            self.movies.insert(id.clone(), movie);
            ids.push(id);
        }
        *self.ids_mut(key) = ids;
        self.prune();
    }

    /// Overwrites the stored record for a movie that is already shown.
    /// Returns `false` when no list holds the movie.
    pub fn upsert(&mut self, movie: Movie) -> bool {
        let Some(id) = movie.id.as_ref() else {
            return false;
        };
        match self.movies.get_mut(id) {
            Some(existing) => {
                *existing = movie;
                true
            }
            None => false,
        }
    }

    /// Appends a movie, evicting from the end first so the list never
    /// grows past `limit`. Replaces the record in place when the movie is
    /// already listed.
    pub fn push_bounded(
        &mut self,
        key: CollectionKey,
        movie: Movie,
        limit: usize,
    ) -> bool {
        let Some(id) = movie.id.clone() else {
            return false;
        };
        if limit == 0 {
            return false;
        }
        self.movies.insert(id.clone(), movie);
        let ids = self.ids_mut(key);
        if !ids.contains(&id) {
            while ids.len() >= limit {
                ids.pop();
            }
            ids.push(id);
        }
        self.prune();
        true
    }

    /// Drops a movie from one list. The record survives while another
    /// list still shows it.
    pub fn remove(&mut self, key: CollectionKey, id: &MovieId) -> bool {
        let ids = self.ids_mut(key);
        let before = ids.len();
        ids.retain(|held| held != id);
        let removed = ids.len() != before;
        if removed {
            self.prune();
        }
        removed
    }

    pub fn contains(&self, key: CollectionKey, id: &MovieId) -> bool {
        self.ids(key).contains(id)
    }

    pub fn get(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.get(id)
    }

    /// The record for `id`, only if `key` lists it.
    pub fn get_in(&self, key: CollectionKey, id: &MovieId) -> Option<&Movie> {
        if self.contains(key, id) {
            self.movies.get(id)
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, id: &MovieId) -> Option<&mut Movie> {
        self.movies.get_mut(id)
    }

    pub fn iter(&self, key: CollectionKey) -> impl Iterator<Item = &Movie> {
        self.ids(key).iter().filter_map(|id| self.movies.get(id))
    }

    pub fn movies(&self, key: CollectionKey) -> Vec<&Movie> {
        self.iter(key).collect()
    }

    pub fn ids_in(&self, key: CollectionKey) -> &[MovieId] {
        self.ids(key)
    }

    /// Every list holding `id`.
    pub fn holders(&self, id: &MovieId) -> Vec<CollectionKey> {
        CollectionKey::ALL
            .into_iter()
            .filter(|key| self.contains(*key, id))
            .collect()
    }

    pub fn len(&self, key: CollectionKey) -> usize {
        self.ids(key).len()
    }

    pub fn is_empty(&self, key: CollectionKey) -> bool {
        self.ids(key).is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn prune(&mut self) {
        let Self {
            movies,
            trending,
            favorites,
            continue_watching,
        } = self;
        movies.retain(|id, _| {
            trending.contains(id)
                || favorites.contains(id)
                || continue_watching.contains(id)
        });
    }
}
