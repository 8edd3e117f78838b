// crates/pipegeo-core/src/common.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier type shared by every backend entity.
pub type EntityId = i64;

/// The kinds of records the core knows about.
///
/// Used to tag errors and to describe the canonical hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Country,
    State,
    District,
    Locality,
    Location,
    Zone,
}

/// The canonical administrative chain, root first.
///
/// Countries and zones are independent and sit outside this chain.
pub const HIERARCHY: [EntityKind; 4] = [
    EntityKind::State,
    EntityKind::District,
    EntityKind::Locality,
    EntityKind::Location,
];

impl EntityKind {
    /// Structural parent in [`HIERARCHY`], if any.
    pub fn parent(self) -> Option<EntityKind> {
        let pos = HIERARCHY.iter().position(|k| *k == self)?;
        pos.checked_sub(1).map(|p| HIERARCHY[p])
    }

    /// Structural child in [`HIERARCHY`], if any.
    pub fn child(self) -> Option<EntityKind> {
        let pos = HIERARCHY.iter().position(|k| *k == self)?;
        HIERARCHY.get(pos + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Country => "country",
            EntityKind::State => "state",
            EntityKind::District => "district",
            EntityKind::Locality => "locality",
            EntityKind::Location => "location",
            EntityKind::Zone => "zone",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simple aggregate statistics for a [`HierarchyIndex`](crate::HierarchyIndex).
///
/// Counts reflect the records actually indexed, after duplicate ids were
/// dropped at construction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub countries: usize,
    pub states: usize,
    pub districts: usize,
    pub localities: usize,
    pub locations: usize,
}
