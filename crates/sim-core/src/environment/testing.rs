//! Test Environment
//!
//! A scripted world for behavior unit tests: open terrain, plants and
//! registered creatures, distance-only sensing (no line of sight) and a
//! fixed exploration answer. Records moves, deaths and feed requests.

use std::collections::{BTreeSet, HashSet};

use glam::Vec3;
use slotmap::SlotMap;
use sim_events::{CauseOfDeath, Cell, Diet, Genes, Sex, Species};

use super::{find_route, Environment, PenaltyFn, Viewer};
use crate::behavior::interaction::{Consumable, FeedRequest};
use crate::components::{Creature, CreatureId, FoodRef, Plant, PlantId};
use crate::config::AnimalSettings;

#[derive(Debug, Clone, Copy)]
struct StubCreature {
    species: Species,
    diet: Diet,
    cell: Cell,
    alive: bool,
}

pub struct StubEnvironment {
    width: i32,
    height: i32,
    blocked: HashSet<Cell>,
    water: BTreeSet<Cell>,
    plants: SlotMap<PlantId, Plant>,
    creatures: SlotMap<CreatureId, StubCreature>,
    settings: AnimalSettings,
    /// Answer to every exploration query; `None` keeps the creature put
    pub next_exploration: Option<Cell>,
    pub feed_requests: Vec<FeedRequest>,
    pub moves: Vec<(Cell, Cell)>,
    pub deaths: Vec<(CreatureId, Cell, CauseOfDeath)>,
}

impl StubEnvironment {
    /// An all-grass `width` by `height` world.
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocked: HashSet::new(),
            water: BTreeSet::new(),
            plants: SlotMap::with_key(),
            creatures: SlotMap::with_key(),
            settings: AnimalSettings::default(),
            next_exploration: None,
            feed_requests: Vec::new(),
            moves: Vec::new(),
            deaths: Vec::new(),
        }
    }

    pub fn block(&mut self, cell: Cell) {
        self.blocked.insert(cell);
    }

    pub fn add_water(&mut self, cell: Cell) {
        self.water.insert(cell);
    }

    pub fn add_plant(&mut self, cell: Cell, amount: f32) -> PlantId {
        self.plants.insert(Plant::new(cell, amount))
    }

    pub fn remove_plant(&mut self, id: PlantId) {
        self.plants.remove(id);
    }

    pub fn plant_amount(&self, id: PlantId) -> Option<f32> {
        self.plants.get(id).map(Plant::amount_remaining)
    }

    /// Registers a creature with its species' default diet and returns it.
    pub fn creature(&mut self, species: Species, cell: Cell) -> Creature {
        let diet = species.default_diet();
        let id = self.creatures.insert(StubCreature {
            species,
            diet,
            cell,
            alive: true,
        });
        Creature::new(
            id,
            species,
            cell,
            Genes::new(Sex::Female),
            diet,
            self.settings,
            self.cell_center(cell),
        )
    }

    fn in_view(&self, from: Cell, candidate: Cell) -> bool {
        let radius = self.settings.max_view_distance;
        from.sqr_distance(candidate) <= radius * radius
    }
}

impl Environment for StubEnvironment {
    fn sense_food(&self, from: Cell, viewer: &Viewer, penalty: PenaltyFn) -> Option<FoodRef> {
        let plants = self
            .plants
            .iter()
            .filter(|_| viewer.diet.includes(Species::Plant))
            .map(|(id, plant)| (FoodRef::Plant(id), plant.cell));
        let prey = self
            .creatures
            .iter()
            .filter(|(id, c)| *id != viewer.id && c.alive && viewer.diet.includes(c.species))
            .map(|(id, c)| (FoodRef::Creature(id), c.cell));

        plants
            .chain(prey)
            .filter(|(_, cell)| self.in_view(from, *cell))
            .min_by_key(|(_, cell)| penalty(viewer, *cell))
            .map(|(food, _)| food)
    }

    fn sense_water(&self, from: Cell) -> Option<Cell> {
        self.water
            .iter()
            .copied()
            .filter(|&cell| self.in_view(from, cell))
            .min_by_key(|&cell| from.sqr_distance(cell))
    }

    fn sense_predator(&self, from: Cell, viewer: &Viewer, penalty: PenaltyFn) -> Option<CreatureId> {
        self.creatures
            .iter()
            .filter(|(id, c)| *id != viewer.id && c.alive && c.diet.includes(viewer.species))
            .filter(|(_, c)| self.in_view(from, c.cell))
            .min_by_key(|(_, c)| penalty(viewer, c.cell))
            .map(|(id, _)| id)
    }

    fn route(&self, from: Cell, to: Cell) -> Vec<Cell> {
        find_route(from, to, |cell| self.is_walkable(cell))
    }

    fn next_exploration_cell(&mut self, current: Cell, _previous: Cell) -> Cell {
        self.next_exploration.unwrap_or(current)
    }

    fn is_walkable(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width
            && cell.y < self.height
            && !self.blocked.contains(&cell)
            && !self.water.contains(&cell)
    }

    fn cell_center(&self, cell: Cell) -> Vec3 {
        Vec3::new(cell.x as f32, 0.0, cell.y as f32)
    }

    fn register_move(&mut self, creature: CreatureId, from: Cell, to: Cell) {
        if let Some(c) = self.creatures.get_mut(creature) {
            c.cell = to;
        }
        self.moves.push((from, to));
    }

    fn register_death(&mut self, creature: CreatureId, cell: Cell, cause: CauseOfDeath) {
        if let Some(c) = self.creatures.get_mut(creature) {
            c.alive = false;
        }
        self.deaths.push((creature, cell, cause));
    }

    fn food_cell(&self, food: FoodRef) -> Option<Cell> {
        match food {
            FoodRef::Plant(id) => self.plants.get(id).filter(|p| p.is_alive()).map(|p| p.cell),
            FoodRef::Creature(id) => self.creature_cell(id),
        }
    }

    fn creature_cell(&self, creature: CreatureId) -> Option<Cell> {
        self.creatures
            .get(creature)
            .filter(|c| c.alive)
            .map(|c| c.cell)
    }

    fn feed_on(&mut self, food: FoodRef, request: FeedRequest) -> Option<f32> {
        self.feed_requests.push(request);
        match food {
            FoodRef::Plant(id) => self.plants.get_mut(id).map(|plant| plant.consume(request)),
            FoodRef::Creature(id) => {
                let prey = self.creatures.get_mut(id).filter(|c| c.alive)?;
                prey.alive = false;
                Some(self.settings.prey_nutrition_fraction * request.eater_hunger)
            }
        }
    }
}
