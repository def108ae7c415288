//! Environment
//!
//! The services a creature consumes from the world it lives in: sensing,
//! routing, exploration, tile geometry and occupancy bookkeeping. The
//! behavior engine only ever talks to the world through [`Environment`].
//!
//! [`Ecosystem`] is the in-repo implementation used by the simulation driver.

pub mod ecosystem;
pub mod routing;
pub mod terrain;

#[cfg(test)]
pub(crate) mod testing;

use glam::Vec3;
use sim_events::{CauseOfDeath, Cell, Diet, Species};

use crate::behavior::interaction::FeedRequest;
use crate::components::{CreatureId, FoodRef};

pub use ecosystem::{CreatureSpec, Ecosystem};
pub use routing::find_route;
pub use terrain::{TerrainError, TerrainMap, Tile};

/// Who is looking, for sensing queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub id: CreatureId,
    pub species: Species,
    pub diet: Diet,
    pub cell: Cell,
}

/// Scores a sensed candidate for `viewer`; the lowest score wins.
pub type PenaltyFn = fn(&Viewer, Cell) -> i32;

/// Default penalty: squared distance on the grid.
pub fn distance_penalty(viewer: &Viewer, candidate: Cell) -> i32 {
    viewer.cell.sqr_distance(candidate)
}

/// World services consumed by creatures.
///
/// Lookups taking a handle check liveness and return `None` for anything
/// that has died or been removed since the handle was taken.
pub trait Environment {
    /// Nearest visible food the viewer's diet allows.
    fn sense_food(&self, from: Cell, viewer: &Viewer, penalty: PenaltyFn) -> Option<FoodRef>;

    /// Nearest visible drinkable tile.
    fn sense_water(&self, from: Cell) -> Option<Cell>;

    /// Nearest visible creature whose diet includes the viewer.
    fn sense_predator(&self, from: Cell, viewer: &Viewer, penalty: PenaltyFn)
        -> Option<CreatureId>;

    /// Shortest route from `from` to `to`, excluding `from` and ending at
    /// `to`. Empty when no route exists.
    fn route(&self, from: Cell, to: Cell) -> Vec<Cell>;

    /// A random walkable neighbour of `current`, biased to keep heading away
    /// from `previous`. Returns `current` when boxed in.
    fn next_exploration_cell(&mut self, current: Cell, previous: Cell) -> Cell;

    fn is_walkable(&self, cell: Cell) -> bool;

    /// World-space position of a tile's centre.
    fn cell_center(&self, cell: Cell) -> Vec3;

    /// Commits a completed hop to the occupancy grid.
    fn register_move(&mut self, creature: CreatureId, from: Cell, to: Cell);

    /// Removes a dead creature from the occupancy grid.
    fn register_death(&mut self, creature: CreatureId, cell: Cell, cause: CauseOfDeath);

    /// Current cell of a live food source.
    fn food_cell(&self, food: FoodRef) -> Option<Cell>;

    /// Current cell of a live creature.
    fn creature_cell(&self, creature: CreatureId) -> Option<Cell>;

    /// Feeds on `food` through its consumable capability and returns the
    /// nutrition granted, or `None` if the food is gone.
    fn feed_on(&mut self, food: FoodRef, request: FeedRequest) -> Option<f32>;
}
