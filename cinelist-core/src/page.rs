//! Which page the manager serves, and the queries that fill it.

use std::fmt;

use cinelist_model::{Category, ViewerId};

use crate::collections::CollectionKey;
use crate::constants::routes;
use crate::store::MovieFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageContext {
    /// Continue watching plus trending.
    #[default]
    Home,
    Favorites,
    Trending,
}

impl PageContext {
    /// Maps a location path to its page. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path {
            routes::ROOT | routes::HOME => Some(PageContext::Home),
            routes::FAVORITES => Some(PageContext::Favorites),
            routes::TRENDING => Some(PageContext::Trending),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            PageContext::Home => routes::HOME,
            PageContext::Favorites => routes::FAVORITES,
            PageContext::Trending => routes::TRENDING,
        }
    }

    /// Lists shown on this page, in load order.
    pub fn collections(&self) -> &'static [CollectionKey] {
        match self {
            PageContext::Home => &[
                CollectionKey::ContinueWatching,
                CollectionKey::Trending,
            ],
            PageContext::Favorites => &[CollectionKey::Favorites],
            PageContext::Trending => &[CollectionKey::Trending],
        }
    }

    pub fn shows(&self, key: CollectionKey) -> bool {
        self.collections().contains(&key)
    }

    /// The filter that loads `key` on this page. `category: None` gives
    /// the page's unfiltered default.
    pub fn filter_for(
        &self,
        key: CollectionKey,
        category: Option<Category>,
        viewer: ViewerId,
        trending_limit: usize,
    ) -> MovieFilter {
        let filter = MovieFilter::new().category(category);
        match key {
            CollectionKey::Trending => filter.trending().limit(trending_limit),
            CollectionKey::Favorites => filter.favorite_of(viewer),
            CollectionKey::ContinueWatching => filter.in_progress_for(viewer),
        }
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageContext::Home => "home",
            PageContext::Favorites => "favorites",
            PageContext::Trending => "trending",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_map_to_pages() {
        assert_eq!(PageContext::from_path("/"), Some(PageContext::Home));
        assert_eq!(PageContext::from_path("/index.html"), Some(PageContext::Home));
        assert_eq!(
            PageContext::from_path("/favorites.html?category=series"),
            Some(PageContext::Favorites)
        );
        assert_eq!(
            PageContext::from_path("/trending.html"),
            Some(PageContext::Trending)
        );
        assert_eq!(PageContext::from_path("/about.html"), None);
    }

    #[test]
    fn home_filters_scope_both_lists() {
        let viewer = ViewerId(1);
        let watching = PageContext::Home.filter_for(
            CollectionKey::ContinueWatching,
            Some(Category::Series),
            viewer,
            4,
        );
        assert_eq!(watching.category, Some(Category::Series));
        assert_eq!(watching.incompleteness, Some(viewer));
        assert_eq!(watching.limit, None);

        let trending =
            PageContext::Home.filter_for(CollectionKey::Trending, None, viewer, 4);
        assert_eq!(trending.is_trending, Some(true));
        assert_eq!(trending.limit, Some(4));
        assert_eq!(trending.category, None);
    }

    #[test]
    fn favorites_page_shows_only_favorites() {
        assert!(PageContext::Favorites.shows(CollectionKey::Favorites));
        assert!(!PageContext::Favorites.shows(CollectionKey::Trending));
        assert_eq!(
            PageContext::Home.collections(),
            &[CollectionKey::ContinueWatching, CollectionKey::Trending]
        );
    }
}
