use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::ids::{MovieId, ViewerId};
use crate::viewers::ViewerSet;

pub const DEFAULT_TITLE: &str = "Title";
pub const DEFAULT_IMAGE: &str = "./images/default.png";
pub const DEFAULT_TYPE: &str = "This is default type ";
pub const DEFAULT_VIDEO: &str = "#";
pub const DEFAULT_DURATION: &str = "0";
pub const DEFAULT_DESCRIPTION: &str = "This is default description";
pub const DEFAULT_RATING: f32 = 0.0;

/// A catalog title as stored under `/movies`.
///
/// Field names follow the wire format (camelCase, `type` for the
/// descriptor). Older records spell the favorites array `favourites`; both
/// spellings deserialize into [`Movie::favorites`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// `None` until the remote store assigns an id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient::category")]
    pub category: Category,
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::year")]
    pub release: u16,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: f32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub video: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_trending: bool,
    #[serde(default, alias = "favourites")]
    pub favorites: ViewerSet,
    /// Viewers with partial progress ("continue watching").
    #[serde(default)]
    pub incompleteness: ViewerSet,
}

impl Movie {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_favorite_of(&self, viewer: ViewerId) -> bool {
        self.favorites.contains(viewer)
    }

    pub fn is_in_progress_for(&self, viewer: ViewerId) -> bool {
        self.incompleteness.contains(viewer)
    }

    /// Fills blank fields with display defaults.
    pub fn normalized(mut self) -> Self {
        fill(&mut self.title, DEFAULT_TITLE);
        fill(&mut self.image, DEFAULT_IMAGE);
        fill(&mut self.kind, DEFAULT_TYPE);
        fill(&mut self.video, DEFAULT_VIDEO);
        fill(&mut self.duration, DEFAULT_DURATION);
        fill(&mut self.description, DEFAULT_DESCRIPTION);
        if self.release == 0 {
            self.release = current_year();
        }
        if !self.rating.is_finite() {
            self.rating = DEFAULT_RATING;
        }
        self
    }

    /// Overwrites every field the patch carries. The id never changes.
    pub fn apply_patch(&mut self, patch: &MoviePatch) {
        let MoviePatch {
            title,
            image,
            category,
            kind,
            release,
            rating,
            video,
            duration,
            description,
            is_trending,
            favorites,
            incompleteness,
        } = patch;

        if let Some(title) = title {
            self.title.clone_from(title);
        }
        if let Some(image) = image {
            self.image.clone_from(image);
        }
        if let Some(category) = category {
            self.category = *category;
        }
        if let Some(kind) = kind {
            self.kind.clone_from(kind);
        }
        if let Some(release) = release {
            self.release = *release;
        }
        if let Some(rating) = rating {
            self.rating = *rating;
        }
        if let Some(video) = video {
            self.video.clone_from(video);
        }
        if let Some(duration) = duration {
            self.duration.clone_from(duration);
        }
        if let Some(description) = description {
            self.description.clone_from(description);
        }
        if let Some(is_trending) = is_trending {
            self.is_trending = *is_trending;
        }
        if let Some(favorites) = favorites {
            self.favorites.clone_from(favorites);
        }
        if let Some(incompleteness) = incompleteness {
            self.incompleteness.clone_from(incompleteness);
        }
    }
}

fn fill(field: &mut String, default: &str) {
    if field.trim().is_empty() {
        *field = default.to_string();
    }
}

fn current_year() -> u16 {
    u16::try_from(chrono::Utc::now().year()).unwrap_or(u16::MAX)
}

/// Payload of the create/edit movie form.
///
/// Membership sets are not editable from the form; a new movie starts with
/// nobody in either set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    /// Present when editing an existing movie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    pub title: String,
    pub image: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: String,
    pub release: u16,
    #[serde(default)]
    pub rating: f32,
    pub video: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub is_trending: bool,
}

impl MovieDraft {
    /// Prefills the form from an existing record.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            image: movie.image.clone(),
            category: movie.category,
            kind: movie.kind.clone(),
            release: movie.release,
            rating: movie.rating,
            video: movie.video.clone(),
            duration: movie.duration.clone(),
            description: movie.description.clone(),
            is_trending: movie.is_trending,
        }
    }

    /// The record posted when creating a movie. The id is left to the store.
    pub fn to_new_movie(&self) -> Movie {
        Movie {
            id: None,
            title: self.title.clone(),
            image: self.image.clone(),
            category: self.category,
            kind: self.kind.clone(),
            release: self.release,
            rating: self.rating,
            video: self.video.clone(),
            duration: self.duration.clone(),
            description: self.description.clone(),
            is_trending: self.is_trending,
            favorites: ViewerSet::new(),
            incompleteness: ViewerSet::new(),
        }
    }
}

/// Partial movie record sent with `PATCH /movies/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trending: Option<bool>,
    #[serde(alias = "favourites", skip_serializing_if = "Option::is_none")]
    pub favorites: Option<ViewerSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incompleteness: Option<ViewerSet>,
}

impl MoviePatch {
    pub fn favorites(favorites: ViewerSet) -> Self {
        Self {
            favorites: Some(favorites),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&MovieDraft> for MoviePatch {
    fn from(draft: &MovieDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            image: Some(draft.image.clone()),
            category: Some(draft.category),
            kind: Some(draft.kind.clone()),
            release: Some(draft.release),
            rating: Some(draft.rating),
            video: Some(draft.video.clone()),
            duration: Some(draft.duration.clone()),
            description: Some(draft.description.clone()),
            is_trending: Some(draft.is_trending),
            favorites: None,
            incompleteness: None,
        }
    }
}

/// Deserializers that tolerate the loosely typed records the mock API
/// accumulates (numbers as strings, `null` for missing values).
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use crate::category::Category;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn loose<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Loose>, D::Error> {
        Option::<Loose>::deserialize(d)
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match loose(d)? {
            None => String::new(),
            Some(Loose::Text(s)) => s,
            Some(Loose::Int(n)) => n.to_string(),
            Some(Loose::Float(n)) => n.to_string(),
            Some(Loose::Bool(b)) => b.to_string(),
        })
    }

    pub fn year<'de, D: Deserializer<'de>>(d: D) -> Result<u16, D::Error> {
        match loose(d)? {
            None => Ok(0),
            Some(Loose::Int(n)) => u16::try_from(n)
                .map_err(|_| D::Error::custom(format!("release year {n} out of range"))),
            Some(Loose::Float(n)) if n.is_finite() && n >= 0.0 => {
                Ok(n.min(f64::from(u16::MAX)) as u16)
            }
            Some(Loose::Text(s)) if s.trim().is_empty() => Ok(0),
            Some(Loose::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid release year {s:?}"))),
            Some(_) => Err(D::Error::custom("invalid release year")),
        }
    }

    pub fn rating<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
        match loose(d)? {
            None => Ok(0.0),
            Some(Loose::Int(n)) => Ok(n as f32),
            Some(Loose::Float(n)) => Ok(n as f32),
            Some(Loose::Text(s)) if s.trim().is_empty() => Ok(0.0),
            Some(Loose::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid rating {s:?}"))),
            Some(Loose::Bool(_)) => Err(D::Error::custom("invalid rating")),
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match loose(d)? {
            None => Ok(false),
            Some(Loose::Bool(b)) => Ok(b),
            Some(Loose::Text(s)) => Ok(s.trim().eq_ignore_ascii_case("true")),
            Some(Loose::Int(n)) => Ok(n != 0),
            Some(Loose::Float(_)) => Err(D::Error::custom("invalid flag")),
        }
    }

    /// Unknown or blank categories fall back to the default section.
    pub fn category<'de, D: Deserializer<'de>>(d: D) -> Result<Category, D::Error> {
        Ok(match loose(d)? {
            Some(Loose::Text(s)) => s.parse().unwrap_or_default(),
            _ => Category::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_record() {
        let json = r#"{
            "id": 7,
            "title": "Arrival",
            "image": "data:image/png;base64,AAA",
            "category": "movies",
            "type": "Sci-fi",
            "release": 2016,
            "rating": 7.9,
            "video": "arrival.mp4",
            "duration": "1h 56m",
            "description": "Linguist meets heptapods.",
            "isTrending": true,
            "favorites": [1],
            "incompleteness": []
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, Some(MovieId::from(7)));
        assert_eq!(movie.kind, "Sci-fi");
        assert!(movie.is_trending);
        assert!(movie.is_favorite_of(ViewerId(1)));
        assert!(!movie.is_in_progress_for(ViewerId(1)));
    }

    #[test]
    fn accepts_british_spelling_and_loose_values() {
        let json = r#"{
            "id": "12",
            "release": "1999",
            "rating": null,
            "duration": 120,
            "category": "",
            "favourites": [2, 2]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release, 1999);
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.duration, "120");
        assert_eq!(movie.category, Category::Movies);
        assert_eq!(movie.favorites.len(), 1);

        let out = serde_json::to_value(&movie).unwrap();
        assert!(out.get("favorites").is_some());
        assert!(out.get("favourites").is_none());
        assert_eq!(out["id"], serde_json::json!(12));
    }

    #[test]
    fn normalized_fills_blank_fields() {
        let movie = Movie::default().normalized();
        assert_eq!(movie.title, DEFAULT_TITLE);
        assert_eq!(movie.image, DEFAULT_IMAGE);
        assert_eq!(movie.video, DEFAULT_VIDEO);
        assert!(movie.release >= 2024);
        assert!(movie.favorites.is_empty());
    }

    #[test]
    fn draft_patch_leaves_membership_alone() {
        let mut movie = Movie {
            id: Some(MovieId::from(3)),
            title: "Old".into(),
            favorites: ViewerSet::from([ViewerId(1)]),
            ..Movie::default()
        };
        let draft = MovieDraft {
            title: "New".into(),
            is_trending: true,
            ..MovieDraft::from_movie(&movie)
        };

        movie.apply_patch(&MoviePatch::from(&draft));

        assert_eq!(movie.title, "New");
        assert!(movie.is_trending);
        assert!(movie.is_favorite_of(ViewerId(1)));
        assert_eq!(movie.id, Some(MovieId::from(3)));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = MoviePatch::favorites(ViewerSet::from([ViewerId(1)]));
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"favorites":[1]}"#
        );
        assert!(MoviePatch::default().is_empty());
    }

    #[test]
    fn new_movie_payload_has_no_id() {
        let draft = MovieDraft {
            id: Some(MovieId::from(9)),
            title: "Draft".into(),
            ..MovieDraft::default()
        };
        let value = serde_json::to_value(draft.to_new_movie()).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["favorites"], serde_json::json!([]));
    }
}
