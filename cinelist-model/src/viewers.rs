//! Viewer membership sets.
//!
//! `favorites` and `incompleteness` on a movie record are JSON arrays of
//! viewer ids. They are sets in meaning: a viewer appears at most once and
//! membership is tested by id equality. [`ViewerSet`] keeps the array order
//! the server sent so re-serialized records stay stable, and collapses any
//! duplicates on the way in.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ViewerId;

/// Outcome of flipping a viewer's membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Membership {
    Added,
    Removed,
}

impl Membership {
    pub fn is_member(self) -> bool {
        matches!(self, Membership::Added)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViewerSet(Vec<ViewerId>);

impl ViewerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, viewer: ViewerId) -> bool {
        self.0.contains(&viewer)
    }

    /// Returns `false` when the viewer was already present.
    pub fn insert(&mut self, viewer: ViewerId) -> bool {
        if self.contains(viewer) {
            return false;
        }
        self.0.push(viewer);
        true
    }

    /// Returns `false` when the viewer was not present.
    pub fn remove(&mut self, viewer: ViewerId) -> bool {
        let before = self.0.len();
        self.0.retain(|v| *v != viewer);
        before != self.0.len()
    }

    /// Removes the viewer if present, inserts it otherwise.
    pub fn toggle(&mut self, viewer: ViewerId) -> Membership {
        if self.remove(viewer) {
            Membership::Removed
        } else {
            self.0.push(viewer);
            Membership::Added
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[ViewerId] {
        &self.0
    }
}

impl FromIterator<ViewerId> for ViewerSet {
    fn from_iter<I: IntoIterator<Item = ViewerId>>(iter: I) -> Self {
        let mut set = ViewerSet::new();
        for viewer in iter {
            set.insert(viewer);
        }
        set
    }
}

impl<const N: usize> From<[ViewerId; N]> for ViewerSet {
    fn from(viewers: [ViewerId; N]) -> Self {
        viewers.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for ViewerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `null` shows up on records created by older form builds.
        let raw = Option::<Vec<ViewerId>>::deserialize(deserializer)?;
        Ok(raw.unwrap_or_default().into_iter().collect())
    }
}
