//! Resource paths and query parameter names of the catalog API.

/// The single REST resource the catalog talks to.
pub const MOVIES: &str = "movies";

/// Query parameters understood by the json-server style API.
pub mod query {
    /// Suffix turning a field match into a substring match.
    pub const LIKE_SUFFIX: &str = "_like";
    /// Caps the number of returned records.
    pub const LIMIT: &str = "_limit";

    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const CATEGORY: &str = "category";
    pub const IS_TRENDING: &str = "isTrending";
    pub const FAVORITES: &str = "favorites";
    pub const INCOMPLETENESS: &str = "incompleteness";
}

/// Page routes a presentation layer can report.
pub mod routes {
    pub const ROOT: &str = "/";
    pub const HOME: &str = "/index.html";
    pub const FAVORITES: &str = "/favorites.html";
    pub const TRENDING: &str = "/trending.html";
}

/// Alert texts for failed remote operations.
pub mod messages {
    pub const CREATE_FAILED: &str = "Movie creation failed";
    pub const UPDATE_FAILED: &str = "Movie update failed";
    pub const LIST_FAILED: &str = "Displaying movie list failed";
    pub const DETAILS_FAILED: &str = "Displaying movie details failed";
}
