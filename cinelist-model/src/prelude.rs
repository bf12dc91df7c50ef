//! Snapshot of the types surface used by the catalog client and its
//! presentation layers.

pub use super::category::Category;
pub use super::ids::{MovieId, ViewerId};
pub use super::movie::{Movie, MovieDraft, MoviePatch};
pub use super::validation::{
    MAX_YEAR, MIN_YEAR, ValidationError, ValidationErrors,
};
pub use super::viewers::{Membership, ViewerSet};
