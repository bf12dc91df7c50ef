//! Keeps a page's movie lists consistent with the remote catalog.
//!
//! Every mutation follows the same shape: resolve the movie in the list
//! the event named, apply the change to the shared record, send one write
//! to the store, then either keep the store's answer or put the previous
//! value back. Because [`FilteredMovieCollections`] stores each movie once,
//! a change made through one list is already visible in the others.

use cinelist_config::CatalogConfig;
use cinelist_config::constants::{DEFAULT_TRENDING_LIMIT, DEFAULT_VIEWER_ID};
use cinelist_model::{
    Category, Membership, Movie, MovieDraft, MovieId, MoviePatch, ViewerId,
    ViewerSet,
};
use tracing::{debug, info, warn};

use crate::collections::{CollectionKey, FilteredMovieCollections};
use crate::error::{CatalogError, CatalogResult, ReadTarget};
use crate::events::{EventOutcome, UiEvent};
use crate::page::PageContext;
use crate::presenter::Presenter;
use crate::store::{MovieStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerConfig {
    /// The logged-in viewer whose favorites are toggled.
    pub viewer: ViewerId,
    pub trending_limit: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerId::new(DEFAULT_VIEWER_ID),
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl From<&CatalogConfig> for ManagerConfig {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            viewer: config.viewer_id,
            trending_limit: config.trending_limit,
        }
    }
}

/// Outcome of filling a page. Lists that failed to load stay empty.
#[derive(Debug, Clone)]
pub struct PageLoad {
    pub page: PageContext,
    pub failures: Vec<CatalogError>,
}

impl PageLoad {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct ListConsistencyManager<S, P> {
    store: S,
    presenter: P,
    config: ManagerConfig,
    page: PageContext,
    category: Option<Category>,
    collections: FilteredMovieCollections,
}

impl<S, P> ListConsistencyManager<S, P>
where
    S: MovieStore,
    P: Presenter,
{
    pub fn new(store: S, presenter: P, config: ManagerConfig) -> Self {
        Self {
            store,
            presenter,
            config,
            page: PageContext::default(),
            category: None,
            collections: FilteredMovieCollections::new(),
        }
    }

    pub fn page(&self) -> PageContext {
        self.page
    }

    /// The category filter currently applied, `None` for all.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn collections(&self) -> &FilteredMovieCollections {
        &self.collections
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Navigates to `page`: drops every list, loads the page's lists
    /// unfiltered and renders once. A list that fails to load is alerted
    /// and left empty while the others still load.
    pub async fn load_page(&mut self, page: PageContext) -> PageLoad {
        self.page = page;
        self.category = None;
        let failures = self.populate(None).await;

        info!(
            %page,
            failed = failures.len(),
            "Page loaded"
        );
        self.render();

        PageLoad { page, failures }
    }

    /// Re-queries the current page scoped to `category` and replaces its
    /// lists wholesale. `None` restores the unfiltered lists.
    pub async fn apply_filter(&mut self, category: Option<Category>) -> CatalogResult<()> {
        debug!(page = %self.page, ?category, "Applying category filter");
        self.category = category;
        let mut failures = self.populate(category).await;
        self.render();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures.remove(0))
        }
    }

    /// Flips the viewer's favorite flag on a movie held by `collection`.
    ///
    /// The new set is written to the shared record before the store is
    /// asked, and restored if the store refuses or answers with another
    /// record. Only the favorites set is sent, since held records carry
    /// display defaults. On success the store's copy of the set wins.
    /// Toggles from the favorites list are not re-rendered here;
    /// [`Self::remove_from_favorites`] does that after dropping the card.
    pub async fn toggle_favorite(
        &mut self,
        movie_id: &MovieId,
        collection: CollectionKey,
    ) -> CatalogResult<Membership> {
        let viewer = self.config.viewer;

        let Some(movie) = self.collections.get_in(collection, movie_id) else {
            debug!(%movie_id, %collection, "Ignoring toggle for movie not in list");
            return Err(CatalogError::StaleReference {
                movie_id: movie_id.clone(),
                collection,
            });
        };

        let previous = movie.favorites.clone();
        let mut favorites = previous.clone();
        let expected = favorites.toggle(viewer);
        let patch = MoviePatch::favorites(favorites.clone());
        self.set_favorites(movie_id, favorites);

        let result = self
            .store
            .update_movie(movie_id, &patch)
            .await
            .and_then(|saved| {
                if saved.id.as_ref() == Some(movie_id) {
                    Ok(saved)
                } else {
                    Err(StoreError::Decode(
                        "updated movie came back without its id".into(),
                    ))
                }
            });

        match result {
            Ok(saved) => {
                let membership = if saved.is_favorite_of(viewer) {
                    Membership::Added
                } else {
                    Membership::Removed
                };
                if membership != expected {
                    warn!(%movie_id, ?expected, ?membership, "Store disagreed with toggle");
                }
                self.set_favorites(movie_id, saved.favorites);

                info!(%movie_id, %collection, ?membership, "Favorite toggled");
                if collection != CollectionKey::Favorites {
                    self.render();
                }
                Ok(membership)
            }
            Err(source) => {
                self.set_favorites(movie_id, previous);
                warn!(%movie_id, %collection, error = %source, "Favorite toggle rolled back");
                Err(self.report(CatalogError::update_failed(movie_id, source)))
            }
        }
    }

    /// Unfavorites from the favorites page. The card leaves the favorites
    /// list only; other lists holding the movie keep it.
    pub async fn remove_from_favorites(&mut self, movie_id: &MovieId) -> CatalogResult<()> {
        let membership = self
            .toggle_favorite(movie_id, CollectionKey::Favorites)
            .await?;

        if membership == Membership::Removed {
            self.collections.remove(CollectionKey::Favorites, movie_id);
        }
        self.render();
        Ok(())
    }

    /// Fetches a movie and opens its detail view.
    pub async fn show_detail(&mut self, movie_id: &MovieId) -> CatalogResult<Movie> {
        match self.store.get_movie(movie_id).await {
            Ok(movie) => {
                let movie = movie.normalized();
                self.collections.upsert(movie.clone());
                self.presenter.show_detail(&movie);
                Ok(movie)
            }
            Err(source) => Err(self.report(CatalogError::RemoteRead {
                target: ReadTarget::Movie(movie_id.clone()),
                source,
            })),
        }
    }

    /// The detail view's heart button. Toggles through whichever list
    /// holds the movie and re-shows the detail with the saved record.
    pub async fn toggle_favorite_from_detail(
        &mut self,
        movie_id: &MovieId,
    ) -> CatalogResult<Membership> {
        let collection = self
            .collections
            .holders(movie_id)
            .into_iter()
            .next()
            .unwrap_or(CollectionKey::Trending);

        let membership = self.toggle_favorite(movie_id, collection).await?;
        if collection == CollectionKey::Favorites && membership == Membership::Removed {
            self.collections.remove(CollectionKey::Favorites, movie_id);
            self.render();
        }
        if let Some(movie) = self.collections.get(movie_id).cloned() {
            self.presenter.show_detail(&movie);
        }
        Ok(membership)
    }

    /// Opens the form prefilled with a trending movie.
    pub fn edit_movie(&mut self, movie_id: &MovieId) -> CatalogResult<Movie> {
        let movie = self
            .collections
            .get_in(CollectionKey::Trending, movie_id)
            .cloned()
            .ok_or_else(|| CatalogError::StaleReference {
                movie_id: movie_id.clone(),
                collection: CollectionKey::Trending,
            })?;
        self.presenter.open_form(Some(&movie));
        Ok(movie)
    }

    pub fn open_create_form(&mut self) {
        self.presenter.open_form(None);
    }

    /// Validates and saves the form. Drafts with an id update that movie;
    /// drafts without one create a new movie.
    pub async fn submit_movie(&mut self, draft: MovieDraft) -> CatalogResult<Movie> {
        if let Err(errors) = draft.validate() {
            debug!(%errors, "Rejected movie draft");
            return Err(self.report(CatalogError::Validation(errors)));
        }

        let saved = match draft.id.clone() {
            Some(movie_id) => self.save_update(&movie_id, &draft).await?,
            None => self.save_new(&draft).await?,
        };

        self.render();
        self.presenter.close_form();
        Ok(saved)
    }

    /// Routes a presentation event to its operation. Failures have already
    /// been alerted when this returns.
    pub async fn dispatch(&mut self, event: UiEvent) -> CatalogResult<EventOutcome> {
        debug!(?event, "Dispatching UI event");
        match event {
            UiEvent::FavoriteToggled {
                movie_id,
                collection: CollectionKey::Favorites,
            } => self
                .remove_from_favorites(&movie_id)
                .await
                .map(|()| EventOutcome::Removed),
            UiEvent::FavoriteToggled {
                movie_id,
                collection,
            } => self
                .toggle_favorite(&movie_id, collection)
                .await
                .map(EventOutcome::Toggled),
            UiEvent::DetailFavoriteToggled { movie_id } => self
                .toggle_favorite_from_detail(&movie_id)
                .await
                .map(EventOutcome::Toggled),
            UiEvent::CardSelected { movie_id } => {
                self.show_detail(&movie_id).await.map(EventOutcome::Detail)
            }
            UiEvent::EditRequested { movie_id } => self
                .edit_movie(&movie_id)
                .map(|_| EventOutcome::FormOpened),
            UiEvent::CreateRequested => {
                self.open_create_form();
                Ok(EventOutcome::FormOpened)
            }
            UiEvent::CategorySelected(category) => self
                .apply_filter(category)
                .await
                .map(|()| EventOutcome::Filtered),
            UiEvent::FormSubmitted(draft) => {
                self.submit_movie(draft).await.map(EventOutcome::Saved)
            }
        }
    }

    async fn save_update(
        &mut self,
        movie_id: &MovieId,
        draft: &MovieDraft,
    ) -> CatalogResult<Movie> {
        let patch = MoviePatch::from(draft);
        let saved = match self.store.update_movie(movie_id, &patch).await {
            Ok(movie) => movie.normalized(),
            Err(source) => {
                return Err(self.report(CatalogError::update_failed(movie_id, source)));
            }
        };
        if saved.id.as_ref() != Some(movie_id) {
            let source = StoreError::Decode("updated movie came back without its id".into());
            return Err(self.report(CatalogError::update_failed(movie_id, source)));
        }

        let listed = self.collections.contains(CollectionKey::Trending, movie_id);
        if saved.is_trending {
            if listed {
                self.collections.upsert(saved.clone());
            } else if self.page.shows(CollectionKey::Trending) && self.in_filter(&saved) {
                self.collections.push_bounded(
                    CollectionKey::Trending,
                    saved.clone(),
                    self.config.trending_limit,
                );
            }
        } else {
            self.collections.remove(CollectionKey::Trending, movie_id);
            self.collections.upsert(saved.clone());
        }

        info!(%movie_id, trending = saved.is_trending, "Movie updated");
        Ok(saved)
    }

    async fn save_new(&mut self, draft: &MovieDraft) -> CatalogResult<Movie> {
        let created = match self.store.create_movie(draft).await {
            Ok(movie) => movie.normalized(),
            Err(source) => return Err(self.report(CatalogError::create_failed(source))),
        };
        let Some(movie_id) = created.id.clone() else {
            let source = StoreError::Decode("created movie came back without an id".into());
            return Err(self.report(CatalogError::create_failed(source)));
        };

        if created.is_trending
            && self.page.shows(CollectionKey::Trending)
            && self.in_filter(&created)
        {
            self.collections.push_bounded(
                CollectionKey::Trending,
                created.clone(),
                self.config.trending_limit,
            );
        }

        info!(%movie_id, trending = created.is_trending, "Movie created");
        Ok(created)
    }

    /// Loads every list of the current page into a fresh set of
    /// collections, then swaps it in.
    async fn populate(&mut self, category: Option<Category>) -> Vec<CatalogError> {
        let mut collections = FilteredMovieCollections::new();
        let mut failures = Vec::new();

        for key in self.page.collections() {
            match self.fetch(*key, category).await {
                Ok(movies) => collections.replace(*key, movies),
                Err(err) => {
                    warn!(page = %self.page, collection = %key, error = %err, "List failed to load");
                    failures.push(self.report(err));
                }
            }
        }

        self.collections = collections;
        failures
    }

    async fn fetch(
        &self,
        key: CollectionKey,
        category: Option<Category>,
    ) -> CatalogResult<Vec<Movie>> {
        let viewer = self.config.viewer;
        let filter = self
            .page
            .filter_for(key, category, viewer, self.config.trending_limit);

        let movies = self
            .store
            .filter_movies(&filter)
            .await
            .map_err(|source| CatalogError::list_failed(key, source))?;

        // `_like` matches substrings, so viewer 1 also matches 11.
        Ok(movies
            .into_iter()
            .map(Movie::normalized)
            .filter(|movie| match key {
                CollectionKey::Trending => true,
                CollectionKey::Favorites => movie.is_favorite_of(viewer),
                CollectionKey::ContinueWatching => movie.is_in_progress_for(viewer),
            })
            .collect())
    }

    fn in_filter(&self, movie: &Movie) -> bool {
        self.category.is_none_or(|category| movie.category == category)
    }

    fn set_favorites(&mut self, movie_id: &MovieId, favorites: ViewerSet) {
        if let Some(record) = self.collections.get_mut(movie_id) {
            record.favorites = favorites;
        }
    }

    fn render(&mut self) {
        self.presenter.render(self.page, &self.collections);
    }

    fn report(&mut self, error: CatalogError) -> CatalogError {
        if !error.is_silent() {
            self.presenter.alert(&error);
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::RecordingPresenter;
    use crate::store::MockMovieStore;
    use mockall::predicate::eq;

    const VIEWER: ViewerId = ViewerId(1);

    fn movie(id: u64, favorites: &[u64]) -> Movie {
        Movie {
            id: Some(MovieId::from(id)),
            title: format!("Movie {id}"),
            is_trending: true,
            favorites: favorites.iter().copied().map(ViewerId).collect(),
            ..Movie::default()
        }
    }

    fn manager(store: MockMovieStore) -> ListConsistencyManager<MockMovieStore, RecordingPresenter> {
        ListConsistencyManager::new(store, RecordingPresenter::new(), ManagerConfig::default())
    }

    async fn loaded(mut store: MockMovieStore, movies: Vec<Movie>) -> ListConsistencyManager<MockMovieStore, RecordingPresenter> {
        store
            .expect_filter_movies()
            .returning(move |_| Ok(movies.clone()));
        let mut manager = manager(store);
        let load = manager.load_page(PageContext::Trending).await;
        assert!(load.is_complete());
        manager
    }

    #[tokio::test]
    async fn stale_reference_never_reaches_the_store() {
        let mut store = MockMovieStore::new();
        store.expect_update_movie().never();
        let mut manager = loaded(store, vec![movie(1, &[])]).await;

        let err = manager
            .toggle_favorite(&MovieId::from(99), CollectionKey::Trending)
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::StaleReference { .. }));
        assert!(manager.presenter().alerts().is_empty());
    }

    #[tokio::test]
    async fn toggle_sends_only_the_new_set() {
        let mut store = MockMovieStore::new();
        store
            .expect_update_movie()
            .with(eq(MovieId::from(7)), mockall::predicate::always())
            .times(1)
            .returning(|_, patch| {
                assert_eq!(*patch, MoviePatch::favorites(ViewerSet::from([VIEWER])));
                let mut saved = movie(7, &[]);
                saved.apply_patch(patch);
                Ok(saved)
            });
        let mut manager = loaded(store, vec![movie(7, &[])]).await;

        let membership = manager
            .toggle_favorite(&MovieId::from(7), CollectionKey::Trending)
            .await
            .unwrap();

        assert_eq!(membership, Membership::Added);
        let record = manager.collections().get(&MovieId::from(7)).unwrap();
        assert_eq!(record.favorites.as_slice(), &[VIEWER]);
    }

    #[tokio::test]
    async fn failed_toggle_restores_previous_set() {
        let mut store = MockMovieStore::new();
        store.expect_update_movie().times(1).returning(|_, _| {
            Err(StoreError::Status {
                status: 500,
                body: "down".into(),
            })
        });
        let mut manager = loaded(store, vec![movie(7, &[2])]).await;

        let err = manager
            .toggle_favorite(&MovieId::from(7), CollectionKey::Trending)
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::RemoteWrite { .. }));
        let record = manager.collections().get(&MovieId::from(7)).unwrap();
        assert_eq!(record.favorites.as_slice(), &[ViewerId(2)]);
        assert_eq!(manager.presenter().alerts().len(), 1);
    }

    #[tokio::test]
    async fn saved_record_without_id_rolls_back() {
        let mut store = MockMovieStore::new();
        store
            .expect_update_movie()
            .times(1)
            .returning(|_, _| Ok(Movie::default()));
        let mut manager = loaded(store, vec![movie(7, &[2])]).await;

        let err = manager
            .toggle_favorite(&MovieId::from(7), CollectionKey::Trending)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::RemoteWrite {
                source: StoreError::Decode(_),
                ..
            }
        ));
        let record = manager.collections().get(&MovieId::from(7)).unwrap();
        assert_eq!(record.favorites.as_slice(), &[ViewerId(2)]);
        assert_eq!(manager.presenter().alerts().len(), 1);
    }

    #[tokio::test]
    async fn invalid_drafts_are_not_sent() {
        let mut store = MockMovieStore::new();
        store.expect_create_movie().never();
        let mut manager = manager(store);

        let err = manager.submit_movie(MovieDraft::default()).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(manager.presenter().alerts().len(), 1);
    }

    #[tokio::test]
    async fn created_movie_without_id_is_a_failure() {
        let mut store = MockMovieStore::new();
        store
            .expect_create_movie()
            .returning(|draft| Ok(draft.to_new_movie()));
        let mut manager = manager(store);

        let draft = MovieDraft {
            title: "Heat".into(),
            image: "heat.png".into(),
            kind: "Crime".into(),
            video: "heat.mp4".into(),
            description: "Crime".into(),
            release: 1995,
            rating: 8.3,
            ..MovieDraft::default()
        };
        let err = manager.submit_movie(draft).await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::RemoteWrite {
                source: StoreError::Decode(_),
                ..
            }
        ));
    }
}
