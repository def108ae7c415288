//! Entity Handles
//!
//! Generation-checked keys for creatures and plants. A handle outlives the
//! entity it names; resolving a stale handle yields `None`, never another
//! entity that happens to reuse the slot.

use slotmap::{new_key_type, Key};

new_key_type! {
    /// Handle to a creature in the ecosystem arena.
    pub struct CreatureId;
    /// Handle to a plant in the ecosystem arena.
    pub struct PlantId;
}

/// Anything a creature may target as food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodRef {
    Plant(PlantId),
    Creature(CreatureId),
}

impl FoodRef {
    /// Numeric tag used in events and snapshots.
    pub fn tag(self) -> u64 {
        match self {
            FoodRef::Plant(id) => id.tag(),
            FoodRef::Creature(id) => id.tag(),
        }
    }
}

/// Stable numeric form of a handle for serialized output.
pub trait HandleTag {
    fn tag(self) -> u64;
}

impl HandleTag for CreatureId {
    fn tag(self) -> u64 {
        self.data().as_ffi()
    }
}

impl HandleTag for PlantId {
    fn tag(self) -> u64 {
        self.data().as_ffi()
    }
}
