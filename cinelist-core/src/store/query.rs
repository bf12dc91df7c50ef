//! Query descriptions for `GET /movies`, rendered to query pairs in one
//! place so every adapter agrees on the wire form.

use std::fmt;

use cinelist_model::{Category, ViewerId};

use crate::constants::query as param;

/// Fields a [`MovieQuery`] can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    Id,
    Title,
    Category,
    IsTrending,
    Favorites,
    Incompleteness,
}

impl MovieField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieField::Id => param::ID,
            MovieField::Title => param::TITLE,
            MovieField::Category => param::CATEGORY,
            MovieField::IsTrending => param::IS_TRENDING,
            MovieField::Favorites => param::FAVORITES,
            MovieField::Incompleteness => param::INCOMPLETENESS,
        }
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-field lookup, optionally a substring match and capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub field: MovieField,
    pub value: String,
    pub like: bool,
    pub limit: Option<usize>,
}

impl MovieQuery {
    pub fn exact(field: MovieField, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
            like: false,
            limit: None,
        }
    }

    pub fn like(field: MovieField, value: impl ToString) -> Self {
        Self {
            like: true,
            ..Self::exact(field, value)
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            pairs.push((param::LIMIT.to_string(), limit.to_string()));
        }
        let key = if self.like {
            format!("{}{}", self.field, param::LIKE_SUFFIX)
        } else {
            self.field.to_string()
        };
        pairs.push((key, self.value.clone()));
        pairs
    }
}

/// Combined category / trending / membership filter. Unset parts are not
/// sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub category: Option<Category>,
    pub is_trending: Option<bool>,
    pub favorites: Option<ViewerId>,
    pub incompleteness: Option<ViewerId>,
    pub limit: Option<usize>,
}

impl MovieFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn trending(mut self) -> Self {
        self.is_trending = Some(true);
        self
    }

    pub fn favorite_of(mut self, viewer: ViewerId) -> Self {
        self.favorites = Some(viewer);
        self
    }

    pub fn in_progress_for(mut self, viewer: ViewerId) -> Self {
        self.incompleteness = Some(viewer);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push((param::CATEGORY.to_string(), category.to_string()));
        }
        if let Some(trending) = self.is_trending {
            pairs.push((param::IS_TRENDING.to_string(), trending.to_string()));
        }
        if let Some(viewer) = self.favorites {
            pairs.push((like_key(param::FAVORITES), viewer.to_string()));
        }
        if let Some(viewer) = self.incompleteness {
            pairs.push((like_key(param::INCOMPLETENESS), viewer.to_string()));
        }
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            pairs.push((param::LIMIT.to_string(), limit.to_string()));
        }
        pairs
    }
}

fn like_key(field: &str) -> String {
    format!("{field}{}", param::LIKE_SUFFIX)
}
