use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Catalog section a movie is filed under.
///
/// A category filter is modelled as `Option<Category>`, where `None` means
/// "all categories".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Movies,
    Series,
    Documentaries,
}

impl Category {
    pub const ALL: [Category; 3] =
        [Category::Movies, Category::Series, Category::Documentaries];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Series => "series",
            Category::Documentaries => "documentaries",
        }
    }

    /// Navbar label.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Series => "Series",
            Category::Documentaries => "Documentaries",
        }
    }

    /// Parses a filter value where an empty string selects every category.
    pub fn parse_filter(value: &str) -> Result<Option<Category>, ModelError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
