//! Creature Components
//!
//! State of one animal: identity, vitals, targets, the cached route and the
//! in-flight hop.

use glam::Vec3;
use sim_events::{ActionState, CauseOfDeath, Cell, CreatureSnapshot, Diet, Genes, Species};

use super::handles::{CreatureId, FoodRef, HandleTag};
use crate::behavior::decision::DecisionPolicy;
use crate::behavior::interaction::{Consumable, FeedRequest, InteractionHandler};
use crate::behavior::movement::MovementController;
use crate::behavior::path::PathCache;
use crate::behavior::vitals::Vitals;
use crate::config::AnimalSettings;
use crate::environment::Viewer;

/// A living animal.
///
/// Only the creature's own tick moves it or changes its vitals; the one
/// outside mutation is being killed by a predator.
#[derive(Debug, Clone)]
pub struct Creature {
    id: CreatureId,
    species: Species,
    genes: Genes,
    diet: Diet,
    pub(crate) position: Cell,
    pub(crate) vitals: Vitals,
    pub(crate) action: ActionState,
    pub(crate) food_target: Option<FoodRef>,
    pub(crate) water_target: Option<Cell>,
    pub(crate) predator_target: Option<CreatureId>,
    pub(crate) path: PathCache,
    pub(crate) movement: MovementController,
    pub(crate) policy: DecisionPolicy,
    pub(crate) interaction: InteractionHandler,
    pub(crate) settings: AnimalSettings,
    /// Seconds this creature has been alive
    pub(crate) clock: f32,
    pub(crate) last_decision_time: f32,
    death: Option<CauseOfDeath>,
}

impl Creature {
    /// Builds a creature standing still at `cell`. No decision has been made
    /// yet; [`crate::behavior::agent::spawn`] runs the first one.
    pub fn new(
        id: CreatureId,
        species: Species,
        cell: Cell,
        genes: Genes,
        diet: Diet,
        settings: AnimalSettings,
        world_position: Vec3,
    ) -> Self {
        Self {
            id,
            species,
            genes,
            diet,
            position: cell,
            vitals: Vitals::from_settings(&settings),
            action: ActionState::Exploring,
            food_target: None,
            water_target: None,
            predator_target: None,
            path: PathCache::new(),
            movement: MovementController::new(
                cell,
                world_position,
                settings.move_speed,
                settings.move_arc_height,
            ),
            policy: DecisionPolicy::from_settings(&settings),
            interaction: InteractionHandler::from_settings(&settings),
            settings,
            clock: 0.0,
            last_decision_time: 0.0,
            death: None,
        }
    }

    /// Starts from the given hunger and thirst instead of zero.
    pub fn with_vitals(mut self, hunger: f32, thirst: f32) -> Self {
        self.vitals = self.vitals.with_levels(hunger, thirst);
        self
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn genes(&self) -> Genes {
        self.genes
    }

    pub fn diet(&self) -> Diet {
        self.diet
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn action(&self) -> ActionState {
        self.action
    }

    pub fn food_target(&self) -> Option<FoodRef> {
        self.food_target
    }

    pub fn water_target(&self) -> Option<Cell> {
        self.water_target
    }

    pub fn predator_target(&self) -> Option<CreatureId> {
        self.predator_target
    }

    pub fn path(&self) -> &PathCache {
        &self.path
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn settings(&self) -> &AnimalSettings {
        &self.settings
    }

    pub fn is_animating(&self) -> bool {
        self.movement.is_animating()
    }

    pub fn world_position(&self) -> Vec3 {
        self.movement.position()
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    pub fn cause_of_death(&self) -> Option<CauseOfDeath> {
        self.death
    }

    /// Records death. Returns false if the creature was already dead.
    pub(crate) fn mark_dead(&mut self, cause: CauseOfDeath) -> bool {
        if self.death.is_some() {
            return false;
        }
        self.death = Some(cause);
        true
    }

    pub fn viewer(&self) -> Viewer {
        Viewer {
            id: self.id,
            species: self.species,
            diet: self.diet,
            cell: self.position,
        }
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            id: self.id.tag(),
            species: self.species,
            sex: self.genes.sex,
            cell: self.position,
            action: self.action,
            hunger: self.vitals.hunger,
            thirst: self.vitals.thirst,
            moving: self.is_animating(),
        }
    }
}

/// Prey is killed outright and restores a fixed share of the eater's hunger.
impl Consumable for Creature {
    fn is_alive(&self) -> bool {
        Creature::is_alive(self)
    }

    fn consume(&mut self, request: FeedRequest) -> f32 {
        if !self.mark_dead(CauseOfDeath::Eaten) {
            return 0.0;
        }
        self.settings.prey_nutrition_fraction * request.eater_hunger
    }
}
