//! Ecosystem
//!
//! The reference world: terrain, plants, creature storage, species occupancy,
//! sensing, exploration and the event record of everything that happened.
//!
//! Creatures live in a slot arena. While one ticks it is taken out of its
//! slot and handed `&mut Ecosystem` as its environment, then put back.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use bresenham::Bresenham;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use slotmap::{SecondaryMap, SlotMap};
use sim_events::{
    generate_event_id, ActionState, CauseOfDeath, Cell, Diet, Event, EventPayload, Genes,
    PlantSnapshot, PopulationSnapshot, SimTimestamp, Species, Subject,
};

use super::{Environment, PenaltyFn, TerrainMap, Viewer};
use crate::behavior::agent;
use crate::behavior::interaction::{Consumable, FeedRequest};
use crate::components::{Creature, CreatureId, FoodRef, HandleTag, Plant, PlantId};
use crate::config::{AnimalSettings, PlantConfig};

/// Chance of carrying straight on while exploring
const FORWARD_BIAS: f32 = 0.2;
/// Neighbours sampled when picking a non-forward exploration step
const EXPLORATION_SAMPLES: usize = 3;

/// Everything needed to place one creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureSpec {
    pub species: Species,
    pub cell: Cell,
    pub genes: Genes,
    pub diet: Diet,
    pub hunger: f32,
    pub thirst: f32,
}

impl CreatureSpec {
    /// A fully fed creature with its species' default diet.
    pub fn new(species: Species, cell: Cell, genes: Genes) -> Self {
        Self {
            species,
            cell,
            genes,
            diet: species.default_diet(),
            hunger: 0.0,
            thirst: 0.0,
        }
    }

    pub fn with_diet(mut self, diet: Diet) -> Self {
        self.diet = diet;
        self
    }

    pub fn with_vitals(mut self, hunger: f32, thirst: f32) -> Self {
        self.hunger = hunger;
        self.thirst = thirst;
        self
    }
}

#[derive(Debug, Resource)]
pub struct Ecosystem {
    terrain: TerrainMap,
    settings: AnimalSettings,
    plant_settings: PlantConfig,
    /// `None` while the creature is out of its slot being ticked
    creatures: SlotMap<CreatureId, Option<Creature>>,
    species_of: SecondaryMap<CreatureId, Species>,
    plants: SlotMap<PlantId, Plant>,
    occupancy: HashMap<Species, HashMap<Cell, Vec<FoodRef>>>,
    shore: Vec<Cell>,
    rng: SmallRng,
    now: SimTimestamp,
    events: Vec<Event>,
    event_sequence: u64,
}

impl Ecosystem {
    pub fn new(
        terrain: TerrainMap,
        settings: AnimalSettings,
        plant_settings: PlantConfig,
        seed: u64,
    ) -> Self {
        let shore = terrain.shore_water();
        Self {
            terrain,
            settings,
            plant_settings,
            creatures: SlotMap::with_key(),
            species_of: SecondaryMap::new(),
            plants: SlotMap::with_key(),
            occupancy: HashMap::new(),
            shore,
            rng: SmallRng::seed_from_u64(seed),
            now: SimTimestamp::start(),
            events: Vec::new(),
            event_sequence: 0,
        }
    }

    pub fn terrain(&self) -> &TerrainMap {
        &self.terrain
    }

    pub fn settings(&self) -> &AnimalSettings {
        &self.settings
    }

    pub fn now(&self) -> SimTimestamp {
        self.now
    }

    // --- Creatures ---

    /// Places a creature, records its birth and runs its first decision.
    pub fn spawn_creature(&mut self, spec: CreatureSpec) -> CreatureId {
        let id = self.creatures.insert(None);
        self.species_of.insert(id, spec.species);
        self.occupy(spec.species, spec.cell, FoodRef::Creature(id));
        self.record(
            Subject::new(id.tag(), spec.species),
            EventPayload::Spawned {
                cell: spec.cell,
                sex: Some(spec.genes.sex),
            },
        );

        let creature = Creature::new(
            id,
            spec.species,
            spec.cell,
            spec.genes,
            spec.diet,
            self.settings,
            self.terrain.cell_center(spec.cell),
        )
        .with_vitals(spec.hunger, spec.thirst);
        let creature = agent::activate(creature, self);
        tracing::debug!(creature = ?id, species = ?spec.species, cell = %spec.cell, action = %creature.action(), "spawned");

        if let Some(slot) = self.creatures.get_mut(id) {
            *slot = Some(creature);
        }
        id
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(id).and_then(Option::as_ref)
    }

    /// Live creatures, in arena order.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.creatures
            .values()
            .filter_map(Option::as_ref)
            .filter(|c| c.is_alive())
    }

    pub fn population(&self, species: Species) -> usize {
        if species == Species::Plant {
            return self.plants.len();
        }
        self.creatures().filter(|c| c.species() == species).count()
    }

    /// Ticks every creature once, in arena order, then clears out the dead.
    pub fn tick_creatures(&mut self, dt: f32) {
        let ids: Vec<CreatureId> = self.creatures.keys().collect();
        for id in ids {
            let Some(mut creature) = self.creatures.get_mut(id).and_then(Option::take) else {
                continue;
            };

            let before = creature.action();
            agent::tick(&mut creature, dt, self);
            if creature.is_alive() && creature.action() != before {
                self.record_action_change(&creature, before);
            }

            if let Some(slot) = self.creatures.get_mut(id) {
                *slot = Some(creature);
            }
        }
        self.sweep_dead();
    }

    fn sweep_dead(&mut self) {
        let dead: Vec<CreatureId> = self
            .creatures
            .iter()
            .filter(|(_, slot)| slot.as_ref().is_some_and(Creature::is_dead))
            .map(|(id, _)| id)
            .collect();
        for id in dead {
            self.creatures.remove(id);
            self.species_of.remove(id);
        }
    }

    fn record_action_change(&mut self, creature: &Creature, from: ActionState) {
        self.record(
            Subject::new(creature.id().tag(), creature.species()),
            EventPayload::ActionChanged {
                from,
                to: creature.action(),
            },
        );
    }

    // --- Plants ---

    /// Places a plant on a free walkable cell. Returns `None` if the cell
    /// is blocked or already holds a plant.
    pub fn spawn_plant(&mut self, cell: Cell, amount: f32) -> Option<PlantId> {
        if !self.terrain.is_walkable(cell) || self.occupants(Species::Plant, cell).is_some() {
            return None;
        }
        let id = self.plants.insert(Plant::new(cell, amount));
        self.occupy(Species::Plant, cell, FoodRef::Plant(id));
        self.record(
            Subject::new(id.tag(), Species::Plant),
            EventPayload::Spawned { cell, sex: None },
        );
        Some(id)
    }

    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(id)
    }

    pub fn plants(&self) -> impl Iterator<Item = (PlantId, &Plant)> + '_ {
        self.plants.iter()
    }

    /// Adds up to `regrow_count` plants on random free cells, stopping at
    /// the configured ceiling. Returns how many were added.
    pub fn regrow_plants(&mut self) -> usize {
        let PlantConfig {
            regrow_count,
            max_plants,
            initial_amount,
            ..
        } = self.plant_settings;

        let mut grown = 0;
        for _ in 0..regrow_count {
            if self.plants.len() >= max_plants {
                break;
            }
            let Some(cell) = self.random_free_cell() else {
                break;
            };
            if self.spawn_plant(cell, initial_amount).is_some() {
                grown += 1;
            }
        }
        if grown > 0 {
            tracing::debug!(grown, total = self.plants.len(), "plants regrew");
        }
        grown
    }

    fn remove_depleted_plant(&mut self, id: PlantId) {
        if let Some(plant) = self.plants.remove(id) {
            self.vacate(Species::Plant, plant.cell, FoodRef::Plant(id));
            self.record(
                Subject::new(id.tag(), Species::Plant),
                EventPayload::Died {
                    cell: plant.cell,
                    cause: CauseOfDeath::Eaten,
                },
            );
            tracing::trace!(plant = ?id, cell = %plant.cell, "plant depleted");
        }
    }

    /// A walkable cell holding neither a plant nor a creature.
    pub fn random_free_cell(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = self
            .terrain
            .walkable_cells()
            .into_iter()
            .filter(|&cell| Species::all().iter().all(|&s| self.occupants(s, cell).is_none()))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    // --- Clock, events, snapshots ---

    /// Moves the event clock one tick forward.
    pub fn begin_tick(&mut self, dt: f32) {
        self.now.advance(dt);
    }

    /// Events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        let creatures = self.creatures().map(Creature::snapshot).collect();
        let plants = self
            .plants
            .iter()
            .map(|(id, plant)| PlantSnapshot {
                id: id.tag(),
                cell: plant.cell,
                amount_remaining: plant.amount_remaining(),
            })
            .collect();
        PopulationSnapshot::new(self.now, creatures, plants)
    }

    fn record(&mut self, subject: Subject, payload: EventPayload) {
        self.event_sequence += 1;
        self.events.push(Event::new(
            generate_event_id(self.event_sequence),
            self.now,
            subject,
            payload,
        ));
    }

    // --- Occupancy ---

    fn occupants(&self, species: Species, cell: Cell) -> Option<&Vec<FoodRef>> {
        self.occupancy
            .get(&species)
            .and_then(|cells| cells.get(&cell))
            .filter(|entries| !entries.is_empty())
    }

    fn occupy(&mut self, species: Species, cell: Cell, entity: FoodRef) {
        self.occupancy
            .entry(species)
            .or_default()
            .entry(cell)
            .or_default()
            .push(entity);
    }

    /// Returns false if `entity` was not at `cell`.
    fn vacate(&mut self, species: Species, cell: Cell, entity: FoodRef) -> bool {
        let Some(cells) = self.occupancy.get_mut(&species) else {
            return false;
        };
        let Some(entries) = cells.get_mut(&cell) else {
            return false;
        };
        let Some(index) = entries.iter().position(|e| *e == entity) else {
            return false;
        };
        entries.remove(index);
        if entries.is_empty() {
            cells.remove(&cell);
        }
        true
    }

    // --- Sensing ---

    /// Cells within the view radius of `from`, row by row.
    fn cells_in_view(&self, from: Cell) -> impl Iterator<Item = Cell> {
        let radius = self.settings.max_view_distance;
        (-radius..=radius)
            .flat_map(move |dy| (-radius..=radius).map(move |dx| Cell::new(from.x + dx, from.y + dy)))
            .filter(move |&cell| from.sqr_distance(cell) <= radius * radius)
    }

    /// True when every tile on the line from `from` up to (not including)
    /// `to` is walkable.
    fn is_visible(&self, from: Cell, to: Cell) -> bool {
        let start = (from.x as isize, from.y as isize);
        let end = (to.x as isize, to.y as isize);
        Bresenham::new(start, end).all(|(x, y)| self.terrain.is_walkable(Cell::new(x as i32, y as i32)))
    }

    /// Entities of the given species in view, best penalty first, ties in
    /// scan order.
    fn ranked_in_view(&self, from: Cell, viewer: &Viewer, species: &[Species], penalty: PenaltyFn) -> Vec<(FoodRef, Cell)> {
        let mut found: Vec<(FoodRef, Cell)> = Vec::new();
        for cell in self.cells_in_view(from) {
            for &s in species {
                if let Some(entries) = self.occupants(s, cell) {
                    found.extend(entries.iter().map(|&e| (e, cell)));
                }
            }
        }
        found.retain(|(entity, _)| *entity != FoodRef::Creature(viewer.id));
        found.sort_by_key(|&(_, cell)| penalty(viewer, cell));
        found
    }

    fn live_creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creature(id).filter(|c| c.is_alive())
    }
}

impl Environment for Ecosystem {
    fn sense_food(&self, from: Cell, viewer: &Viewer, penalty: PenaltyFn) -> Option<FoodRef> {
        let diet: Vec<Species> = viewer.diet.species().collect();
        self.ranked_in_view(from, viewer, &diet, penalty)
            .into_iter()
            .filter(|&(food, _)| self.food_cell(food).is_some())
            .find(|&(_, cell)| self.is_visible(from, cell))
            .map(|(food, _)| food)
    }

    fn sense_water(&self, from: Cell) -> Option<Cell> {
        let radius = self.settings.max_view_distance;
        let mut in_view: Vec<Cell> = self
            .shore
            .iter()
            .copied()
            .filter(|&cell| from.sqr_distance(cell) <= radius * radius)
            .collect();
        in_view.sort_by_key(|&cell| from.sqr_distance(cell));
        in_view.into_iter().find(|&cell| self.is_visible(from, cell))
    }

    fn sense_predator(&self, from: Cell, viewer: &Viewer, penalty: PenaltyFn) -> Option<CreatureId> {
        let animals: Vec<Species> = Species::all().iter().copied().filter(|s| s.is_animal()).collect();
        self.ranked_in_view(from, viewer, &animals, penalty)
            .into_iter()
            .filter_map(|(entity, cell)| match entity {
                FoodRef::Creature(id) => Some((id, cell)),
                FoodRef::Plant(_) => None,
            })
            .filter(|&(id, _)| {
                self.live_creature(id)
                    .is_some_and(|c| c.diet().includes(viewer.species))
            })
            .find(|&(_, cell)| self.is_visible(from, cell))
            .map(|(id, _)| id)
    }

    fn route(&self, from: Cell, to: Cell) -> Vec<Cell> {
        super::find_route(from, to, |cell| self.terrain.is_walkable(cell))
    }

    fn next_exploration_cell(&mut self, current: Cell, previous: Cell) -> Cell {
        let options: Vec<Cell> = current
            .neighbours()
            .into_iter()
            .filter(|&cell| self.terrain.is_walkable(cell))
            .collect();
        if options.is_empty() {
            return current;
        }
        if current == previous {
            return options.choose(&mut self.rng).copied().unwrap_or(current);
        }

        let heading = current - previous;
        let forward = current + heading;
        if self.rng.gen::<f32>() < FORWARD_BIAS && self.terrain.is_walkable(forward) {
            return forward;
        }

        let direction = Vec2::new(heading.x as f32, heading.y as f32).normalize_or_zero();
        let mut best = current;
        let mut best_score = f32::NEG_INFINITY;
        for _ in 0..EXPLORATION_SAMPLES {
            let Some(&candidate) = options.choose(&mut self.rng) else {
                break;
            };
            let offset = candidate - current;
            let score = Vec2::new(offset.x as f32, offset.y as f32)
                .normalize_or_zero()
                .dot(direction);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        best
    }

    fn is_walkable(&self, cell: Cell) -> bool {
        self.terrain.is_walkable(cell)
    }

    fn cell_center(&self, cell: Cell) -> Vec3 {
        self.terrain.cell_center(cell)
    }

    fn register_move(&mut self, creature: CreatureId, from: Cell, to: Cell) {
        let Some(&species) = self.species_of.get(creature) else {
            return;
        };
        if self.vacate(species, from, FoodRef::Creature(creature)) {
            self.occupy(species, to, FoodRef::Creature(creature));
            self.record(
                Subject::new(creature.tag(), species),
                EventPayload::Moved { from, to },
            );
        }
    }

    fn register_death(&mut self, creature: CreatureId, cell: Cell, cause: CauseOfDeath) {
        let Some(&species) = self.species_of.get(creature) else {
            return;
        };
        if self.vacate(species, cell, FoodRef::Creature(creature)) {
            self.record(
                Subject::new(creature.tag(), species),
                EventPayload::Died { cell, cause },
            );
        }
    }

    fn food_cell(&self, food: FoodRef) -> Option<Cell> {
        match food {
            FoodRef::Plant(id) => self.plants.get(id).filter(|p| p.is_alive()).map(|p| p.cell),
            FoodRef::Creature(id) => self.creature_cell(id),
        }
    }

    fn creature_cell(&self, creature: CreatureId) -> Option<Cell> {
        self.live_creature(creature).map(Creature::position)
    }

    fn feed_on(&mut self, food: FoodRef, request: FeedRequest) -> Option<f32> {
        let (target, granted, cell, gone) = match food {
            FoodRef::Plant(id) => {
                let plant = self.plants.get_mut(id).filter(|p| p.is_alive())?;
                let granted = plant.consume(request);
                let target = Subject::new(id.tag(), Species::Plant);
                (target, granted, plant.cell, plant.is_depleted())
            }
            FoodRef::Creature(id) => {
                let prey = self
                    .creatures
                    .get_mut(id)
                    .and_then(Option::as_mut)
                    .filter(|c| c.is_alive())?;
                let granted = prey.consume(request);
                let target = Subject::new(id.tag(), prey.species());
                (target, granted, prey.position(), true)
            }
        };

        if let Some(&eater) = self.species_of.get(request.eater) {
            self.record(
                Subject::new(request.eater.tag(), eater),
                EventPayload::Fed {
                    target,
                    requested: request.amount,
                    granted,
                },
            );
        }

        if gone {
            match food {
                FoodRef::Plant(id) => self.remove_depleted_plant(id),
                FoodRef::Creature(id) => {
                    tracing::info!(prey = ?id, predator = ?request.eater, %cell, "prey eaten");
                    self.register_death(id, cell, CauseOfDeath::Eaten);
                }
            }
        }
        Some(granted)
    }
}
