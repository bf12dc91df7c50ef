//! Shared fixtures for core integration tests.
#![allow(dead_code)]

use cinelist_core::{
    InMemoryMovieStore, ListConsistencyManager, ManagerConfig, PageContext,
    RecordingPresenter,
};
use cinelist_model::{Category, Movie, MovieDraft, MovieId, ViewerId, ViewerSet};

pub const VIEWER: ViewerId = ViewerId(1);
pub const OTHER_VIEWER: ViewerId = ViewerId(2);
pub const TRENDING_LIMIT: usize = 4;

pub type TestManager = ListConsistencyManager<InMemoryMovieStore, RecordingPresenter>;

pub fn init_tracing() {
    cinelist_config::telemetry::init_tracing("warn,cinelist_core=debug");
}

/// Builder for seeded catalog records.
#[derive(Debug, Clone)]
pub struct MovieFixture(Movie);

impl MovieFixture {
    pub fn new(id: u64, title: &str) -> Self {
        Self(Movie {
            id: Some(MovieId::from(id)),
            title: title.to_string(),
            image: format!("./images/{id}.png"),
            kind: "Drama".to_string(),
            release: 2020,
            rating: 7.5,
            video: format!("./videos/{id}.mp4"),
            duration: "2h".to_string(),
            description: format!("About {title}"),
            ..Movie::default()
        })
    }

    pub fn category(mut self, category: Category) -> Self {
        self.0.category = category;
        self
    }

    pub fn trending(mut self) -> Self {
        self.0.is_trending = true;
        self
    }

    pub fn favorite_of(mut self, viewers: &[ViewerId]) -> Self {
        self.0.favorites = viewers.iter().copied().collect::<ViewerSet>();
        self
    }

    pub fn in_progress_for(mut self, viewers: &[ViewerId]) -> Self {
        self.0.incompleteness = viewers.iter().copied().collect::<ViewerSet>();
        self
    }

    pub fn build(self) -> Movie {
        self.0
    }
}

/// A catalog where movie 7 is trending, in progress and nobody's favorite.
pub fn sample_catalog() -> Vec<Movie> {
    vec![
        MovieFixture::new(7, "Arrival")
            .trending()
            .in_progress_for(&[VIEWER])
            .build(),
        MovieFixture::new(8, "Dark")
            .category(Category::Series)
            .trending()
            .in_progress_for(&[VIEWER])
            .favorite_of(&[VIEWER])
            .build(),
        MovieFixture::new(9, "Planet Earth")
            .category(Category::Documentaries)
            .trending()
            .favorite_of(&[VIEWER, OTHER_VIEWER])
            .build(),
        MovieFixture::new(10, "Chernobyl")
            .category(Category::Series)
            .favorite_of(&[ViewerId(11)])
            .in_progress_for(&[ViewerId(11)])
            .build(),
        MovieFixture::new(11, "Heat").trending().build(),
    ]
}

pub fn manager_with(store: InMemoryMovieStore) -> TestManager {
    init_tracing();
    ListConsistencyManager::new(
        store,
        RecordingPresenter::new(),
        ManagerConfig {
            viewer: VIEWER,
            trending_limit: TRENDING_LIMIT,
        },
    )
}

pub async fn loaded_manager(movies: Vec<Movie>, page: PageContext) -> TestManager {
    let mut manager = manager_with(InMemoryMovieStore::with_movies(movies));
    let load = manager.load_page(page).await;
    assert!(load.is_complete(), "page load failed: {:?}", load.failures);
    manager
}

pub fn valid_draft(title: &str) -> MovieDraft {
    MovieDraft {
        id: None,
        title: title.to_string(),
        image: "./images/new.png".to_string(),
        category: Category::Movies,
        kind: "Thriller".to_string(),
        release: 2021,
        rating: 6.5,
        video: "./videos/new.mp4".to_string(),
        duration: "1h 50m".to_string(),
        description: "A new movie".to_string(),
        is_trending: true,
    }
}

pub fn ids(movies: &[&Movie]) -> Vec<MovieId> {
    movies.iter().filter_map(|m| m.id.clone()).collect()
}
