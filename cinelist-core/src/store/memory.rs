use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use cinelist_model::{Movie, MovieDraft, MovieId, MoviePatch};
use serde_json::Value;
use tracing::debug;

use super::{MovieFilter, MovieQuery, MovieStore, StoreError, StoreResult};
use crate::constants::query as param;

/// [`MovieStore`] holding records in process.
///
/// Queries follow the catalog API's json-server rules: plain parameters
/// compare the stringified field, `<field>_like` is a case-insensitive
/// substring test on the stringified field (arrays join with `,`), and
/// `_limit` caps the result. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieStore {
    inner: Arc<RwLock<InnerState>>,
}

#[derive(Debug, Default)]
struct InnerState {
    movies: Vec<Movie>,
    failing_updates: usize,
    fail_reads: bool,
    fail_creates: bool,
    update_calls: Vec<(MovieId, MoviePatch)>,
    read_calls: usize,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Movies without an id get the next free numeric id.
    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let store = Self::new();
        for movie in movies {
            store.insert(movie);
        }
        store
    }

    pub fn insert(&self, mut movie: Movie) -> MovieId {
        let mut guard = self.write_state();
        let id = match movie.id.clone() {
            Some(id) => id,
            None => next_id(&guard.movies),
        };
        movie.id = Some(id.clone());
        guard.movies.retain(|held| held.id.as_ref() != Some(&id));
        guard.movies.push(movie);
        id
    }

    pub fn movie(&self, id: &MovieId) -> Option<Movie> {
        self.read_state()
            .movies
            .iter()
            .find(|movie| movie.id.as_ref() == Some(id))
            .cloned()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.read_state().movies.clone()
    }

    /// Makes the next `count` updates fail with a 500.
    pub fn fail_next_updates(&self, count: usize) {
        self.write_state().failing_updates = count;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.write_state().fail_reads = fail;
    }

    pub fn fail_creates(&self, fail: bool) {
        self.write_state().fail_creates = fail;
    }

    /// Every update attempted so far, failed ones included.
    pub fn update_calls(&self) -> Vec<(MovieId, MoviePatch)> {
        self.read_state().update_calls.clone()
    }

    pub fn read_calls(&self) -> usize {
        self.read_state().read_calls
    }

    fn read_state(&self) -> RwLockReadGuard<'_, InnerState> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, InnerState> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_read(&self) -> StoreResult<()> {
        let mut guard = self.write_state();
        guard.read_calls += 1;
        if guard.fail_reads {
            return Err(StoreError::Unavailable("reads are failing".into()));
        }
        Ok(())
    }

    fn select(&self, pairs: &[(String, String)]) -> StoreResult<Vec<Movie>> {
        self.begin_read()?;
        let conditions = Conditions::parse(pairs);
        let guard = self.read_state();

        let mut matched = Vec::new();
        for movie in &guard.movies {
            if conditions.limit.is_some_and(|limit| matched.len() >= limit) {
                break;
            }
            let record = serde_json::to_value(movie)
                .map_err(|e| StoreError::Decode(e.to_string()))?;
            if conditions.matches(&record) {
                matched.push(movie.clone());
            }
        }
        debug!(?pairs, count = matched.len(), "In-memory query");
        Ok(matched)
    }
}

fn next_id(movies: &[Movie]) -> MovieId {
    let max = movies
        .iter()
        .filter_map(|movie| movie.id.as_ref().and_then(MovieId::as_number))
        .max()
        .unwrap_or(0);
    MovieId::from(max + 1)
}

#[derive(Debug, Default)]
struct Conditions<'a> {
    equals: Vec<(&'a str, &'a str)>,
    like: Vec<(&'a str, String)>,
    limit: Option<usize>,
}

impl<'a> Conditions<'a> {
    fn parse(pairs: &'a [(String, String)]) -> Self {
        let mut conditions = Conditions::default();
        for (key, value) in pairs {
            if key == param::LIMIT {
                conditions.limit = value.parse().ok().filter(|limit| *limit > 0);
            } else if let Some(field) = key.strip_suffix(param::LIKE_SUFFIX) {
                conditions.like.push((field, value.to_lowercase()));
            } else {
                conditions.equals.push((key.as_str(), value.as_str()));
            }
        }
        conditions
    }

    fn matches(&self, record: &Value) -> bool {
        let equals = self.equals.iter().all(|(field, expected)| {
            match record.get(*field) {
                Some(Value::Array(items)) => {
                    items.iter().any(|item| stringify(item) == *expected)
                }
                Some(value) => stringify(value) == *expected,
                None => false,
            }
        });
        equals
            && self.like.iter().all(|(field, needle)| {
                record
                    .get(*field)
                    .is_some_and(|value| stringify(value).to_lowercase().contains(needle))
            })
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn get_movie(&self, id: &MovieId) -> StoreResult<Movie> {
        self.begin_read()?;
        self.movie(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    async fn list_movies(&self, query: &MovieQuery) -> StoreResult<Vec<Movie>> {
        self.select(&query.to_query_pairs())
    }

    async fn filter_movies(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        self.select(&filter.to_query_pairs())
    }

    async fn create_movie(&self, draft: &MovieDraft) -> StoreResult<Movie> {
        if self.read_state().fail_creates {
            return Err(StoreError::Status {
                status: 500,
                body: "create rejected".into(),
            });
        }
        let id = self.insert(draft.to_new_movie());
        self.movie(&id)
            .ok_or_else(|| StoreError::NotFound { id })
    }

    async fn update_movie(&self, id: &MovieId, patch: &MoviePatch) -> StoreResult<Movie> {
        let mut guard = self.write_state();
        guard.update_calls.push((id.clone(), patch.clone()));

        if guard.failing_updates > 0 {
            guard.failing_updates -= 1;
            return Err(StoreError::Status {
                status: 500,
                body: "update rejected".into(),
            });
        }

        let movie = guard
            .movies
            .iter_mut()
            .find(|movie| movie.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        movie.apply_patch(patch);
        Ok(movie.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MovieField;
    use cinelist_model::{Category, ViewerId, ViewerSet};

    fn movie(title: &str, category: Category, favorites: &[u64]) -> Movie {
        Movie {
            title: title.to_string(),
            category,
            favorites: favorites.iter().copied().map(ViewerId).collect(),
            ..Movie::default()
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn inserts_assign_sequential_ids() {
        let store = InMemoryMovieStore::new();
        store.insert(Movie {
            id: Some(MovieId::from(7)),
            ..Movie::default()
        });
        let next = store.insert(Movie::default());
        assert_eq!(next, MovieId::from(8));
    }

    #[tokio::test]
    async fn like_matches_substrings_of_joined_arrays() {
        let store = InMemoryMovieStore::with_movies([
            movie("Mine", Category::Movies, &[1]),
            movie("Eleven", Category::Movies, &[11]),
            movie("Theirs", Category::Movies, &[2]),
        ]);

        let found = store
            .filter_movies(&MovieFilter::new().favorite_of(ViewerId(1)))
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["Mine", "Eleven"]);
    }

    #[tokio::test]
    async fn equality_and_limit_combine() {
        let store = InMemoryMovieStore::with_movies([
            movie("A", Category::Series, &[]),
            movie("B", Category::Movies, &[]),
            movie("C", Category::Series, &[]),
            movie("D", Category::Series, &[]),
        ]);

        let found = store
            .list_movies(&MovieQuery::exact(MovieField::Category, "series").with_limit(2))
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn title_like_is_case_insensitive() {
        let store =
            InMemoryMovieStore::with_movies([movie("The Heat", Category::Movies, &[])]);
        let found = store
            .list_movies(&MovieQuery::like(MovieField::Title, "heAT"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn updates_merge_and_failures_are_counted() {
        let store =
            InMemoryMovieStore::with_movies([movie("Heat", Category::Movies, &[])]);
        let id = MovieId::from(1);
        store.fail_next_updates(1);

        let patch = MoviePatch::favorites(ViewerSet::from([ViewerId(1)]));
        assert!(store.update_movie(&id, &patch).await.is_err());
        let updated = store.update_movie(&id, &patch).await.unwrap();

        assert_eq!(updated.title, "Heat");
        assert!(updated.is_favorite_of(ViewerId(1)));
        assert_eq!(store.update_calls().len(), 2);
    }

    #[tokio::test]
    async fn failure_switches_survive_a_poisoned_lock() {
        let store = InMemoryMovieStore::with_movies([movie("Heat", Category::Movies, &[])]);
        let shared = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.inner.write();
            panic!("poison the store lock");
        })
        .join();
        assert!(store.inner.is_poisoned());

        store.fail_reads(true);
        store.fail_next_updates(1);

        assert!(store.get_movie(&MovieId::from(1)).await.is_err());
        let patch = MoviePatch::favorites(ViewerSet::from([ViewerId(1)]));
        assert!(store.update_movie(&MovieId::from(1), &patch).await.is_err());
    }

    #[tokio::test]
    async fn missing_movies_are_not_found() {
        let store = InMemoryMovieStore::new();
        let err = store.get_movie(&MovieId::from(3)).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound { id: MovieId::from(3) });
    }
}
