//! Core data model definitions shared across cinelist crates.
#![allow(missing_docs)]

pub mod category;
pub mod error;
pub mod ids;
pub mod movie;
pub mod prelude;
pub mod validation;
pub mod viewers;

// Intentionally curated re-exports for downstream consumers.
pub use category::Category;
pub use error::{ModelError, Result as ModelResult};
pub use ids::{MovieId, ViewerId};
pub use movie::{Movie, MovieDraft, MoviePatch};
pub use validation::{ValidationError, ValidationErrors};
pub use viewers::{Membership, ViewerSet};
