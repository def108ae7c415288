//! Decision Policy
//!
//! Priority rules choosing what a creature does next, and the act step that
//! turns the chosen state into a hop or an interaction.
//!
//! Priority, first match wins:
//! 1. a visible predator means flight,
//! 2. hunger vs thirst picks food or water (with hysteresis while eating),
//! 3. a sensed target means travel towards it, otherwise explore.

use sim_events::{ActionState, Cell};

use crate::components::Creature;
use crate::config::AnimalSettings;
use crate::environment::{distance_penalty, Environment, PenaltyFn};

/// Tunables for the decision pass.
#[derive(Debug, Clone, Copy)]
pub struct DecisionPolicy {
    /// Thirst at which a feeding creature leaves its meal to drink
    pub critical_percent: f32,
    /// Ranks sensed food and predators; lowest wins
    pub penalty: PenaltyFn,
}

impl DecisionPolicy {
    pub fn from_settings(settings: &AnimalSettings) -> Self {
        Self {
            critical_percent: settings.critical_percent,
            penalty: distance_penalty,
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::from_settings(&AnimalSettings::default())
    }
}

/// Runs a decision pass and immediately acts on the result.
pub fn decide_and_act<E: Environment + ?Sized>(creature: &mut Creature, env: &mut E) {
    decide(creature, env);
    act(creature, env);
}

/// Picks the next action state from the surroundings and vitals.
pub fn decide<E: Environment + ?Sized>(creature: &mut Creature, env: &E) -> ActionState {
    creature.last_decision_time = creature.clock;
    let previous = creature.action;
    let viewer = creature.viewer();
    let policy = creature.policy;

    if let Some(predator) = env.sense_predator(creature.position, &viewer, policy.penalty) {
        creature.action = ActionState::AvoidingPredator;
        creature.predator_target = Some(predator);
    } else {
        creature.predator_target = None;

        let vitals = creature.vitals;
        let currently_eating = creature.action == ActionState::Eating
            && creature.food_target.and_then(|f| env.food_cell(f)).is_some()
            && vitals.hunger > 0.0;

        if vitals.hunger >= vitals.thirst
            || (currently_eating && vitals.thirst < policy.critical_percent)
        {
            find_food(creature, env);
        } else {
            find_water(creature, env);
        }
    }

    if creature.action != previous {
        tracing::debug!(
            creature = ?creature.id(),
            from = %previous,
            to = %creature.action,
            hunger = creature.vitals.hunger,
            thirst = creature.vitals.thirst,
            "action changed"
        );
    }
    creature.action
}

fn find_food<E: Environment + ?Sized>(creature: &mut Creature, env: &E) {
    let viewer = creature.viewer();
    let sensed = env
        .sense_food(creature.position, &viewer, creature.policy.penalty)
        .and_then(|food| env.food_cell(food).map(|cell| (food, cell)));

    match sensed {
        Some((food, cell)) => {
            creature.action = ActionState::GoingToFood;
            creature.food_target = Some(food);
            request_path(creature, cell, env);
        }
        None => {
            creature.action = ActionState::Exploring;
            creature.food_target = None;
        }
    }
}

fn find_water<E: Environment + ?Sized>(creature: &mut Creature, env: &E) {
    match env.sense_water(creature.position) {
        Some(tile) => {
            creature.action = ActionState::GoingToWater;
            creature.water_target = Some(tile);
            request_path(creature, tile, env);
        }
        None => {
            creature.action = ActionState::Exploring;
            creature.water_target = None;
        }
    }
}

fn request_path<E: Environment + ?Sized>(creature: &mut Creature, target: Cell, env: &E) {
    let last_move_target = creature.movement.last_target();
    creature
        .path
        .ensure_path(creature.position, target, last_move_target, |from, to| env.route(from, to));
}

/// Acts on the current state: starts a hop, or switches to an interaction
/// when the target is within reach. Interactions themselves are a no-op here.
pub fn act<E: Environment + ?Sized>(creature: &mut Creature, env: &mut E) {
    match creature.action {
        ActionState::Exploring => explore_step(creature, env),
        ActionState::GoingToFood => {
            match creature.food_target.and_then(|food| env.food_cell(food)) {
                Some(cell) => approach(creature, cell, ActionState::Eating, env),
                None => lose_target(creature, env),
            }
        }
        ActionState::GoingToWater => match creature.water_target {
            Some(tile) => approach(creature, tile, ActionState::Drinking, env),
            None => lose_target(creature, env),
        },
        ActionState::AvoidingPredator => {
            match creature.predator_target.and_then(|p| env.creature_cell(p)) {
                Some(threat) => flee(creature, threat, env),
                None => lose_target(creature, env),
            }
        }
        ActionState::Eating | ActionState::Drinking => {}
    }
}

/// Steps along the cached route to `target`, or starts `arrival` when
/// already next to it.
fn approach<E: Environment + ?Sized>(
    creature: &mut Creature,
    target: Cell,
    arrival: ActionState,
    env: &mut E,
) {
    if creature.position.is_neighbour(target) {
        creature.movement.look_at(creature.position, target);
        creature.action = arrival;
        return;
    }

    request_path(creature, target, env);
    let step = match creature.path.next_step() {
        Some(step) if creature.position.is_neighbour(step) && step != creature.position => Some(step),
        _ => {
            // Stale or unusable route: force a fresh one before giving up
            creature.path.invalidate();
            request_path(creature, target, env);
            creature.path.next_step()
        }
    };

    match step {
        Some(step) if creature.position.is_neighbour(step) => start_move(creature, step, env),
        _ => {
            tracing::trace!(creature = ?creature.id(), %target, "no route to target, exploring");
            explore_step(creature, env);
        }
    }
}

/// One step directly away from the threat, or a random step if blocked.
fn flee<E: Environment + ?Sized>(creature: &mut Creature, threat: Cell, env: &mut E) {
    let retreat = creature.position.step_away_from(threat);
    if retreat != creature.position && env.is_walkable(retreat) {
        start_move(creature, retreat, env);
    } else {
        explore_step(creature, env);
    }
}

/// The target is gone: drop it and wander until the next decision.
fn lose_target<E: Environment + ?Sized>(creature: &mut Creature, env: &mut E) {
    tracing::debug!(creature = ?creature.id(), state = %creature.action, "target lost");
    creature.food_target = None;
    creature.water_target = None;
    creature.predator_target = None;
    creature.path.invalidate();
    creature.action = ActionState::Exploring;
    explore_step(creature, env);
}

fn explore_step<E: Environment + ?Sized>(creature: &mut Creature, env: &mut E) {
    let next = env.next_exploration_cell(creature.position, creature.movement.last_from());
    if next != creature.position {
        start_move(creature, next, env);
    }
}

fn start_move<E: Environment + ?Sized>(creature: &mut Creature, target: Cell, env: &mut E) {
    let from = creature.position;
    creature.movement.begin(from, target, |cell| env.cell_center(cell));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FoodRef;
    use crate::environment::testing::StubEnvironment;
    use sim_events::{CauseOfDeath, Species};

    #[test]
    fn test_hungry_creature_goes_to_adjacent_food_then_eats() {
        let mut env = StubEnvironment::open(12, 12);
        let plant = env.add_plant(Cell::new(5, 6), 1.0);
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.8, 0.2);

        let state = decide(&mut creature, &env);
        assert_eq!(state, ActionState::GoingToFood);
        assert_eq!(creature.food_target(), Some(FoodRef::Plant(plant)));
        assert_eq!(creature.path().cells(), &[Cell::new(5, 6)]);

        act(&mut creature, &mut env);
        assert_eq!(creature.action(), ActionState::Eating);
        assert!(!creature.is_animating());
        assert_eq!(creature.path().cursor(), 0);
    }

    #[test]
    fn test_distant_food_starts_a_hop_along_the_path() {
        let mut env = StubEnvironment::open(12, 12);
        env.add_plant(Cell::new(5, 9), 1.0);
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.5, 0.1);

        decide_and_act(&mut creature, &mut env);

        assert_eq!(creature.action(), ActionState::GoingToFood);
        assert!(creature.is_animating());
        let hop = creature.movement().state().unwrap();
        assert_eq!(hop.from, Cell::new(5, 5));
        assert_eq!(hop.to, Cell::new(5, 6));
        assert_eq!(creature.path().cursor(), 1);
    }

    #[test]
    fn test_thirsty_creature_goes_to_water() {
        let mut env = StubEnvironment::open(12, 12);
        env.add_water(Cell::new(8, 5));
        env.add_plant(Cell::new(5, 6), 1.0);
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.2, 0.5);

        assert_eq!(decide(&mut creature, &env), ActionState::GoingToWater);
        assert_eq!(creature.water_target(), Some(Cell::new(8, 5)));
        assert_eq!(creature.path().target(), Some(Cell::new(8, 5)));
    }

    #[test]
    fn test_predator_overrides_needs() {
        let mut env = StubEnvironment::open(12, 12);
        env.add_plant(Cell::new(5, 7), 1.0);
        let mut rabbit = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.9, 0.0);

        decide_and_act(&mut rabbit, &mut env);
        assert_eq!(rabbit.action(), ActionState::GoingToFood);

        let fox = env.creature(Species::Fox, Cell::new(3, 5)).id();
        assert_eq!(decide(&mut rabbit, &env), ActionState::AvoidingPredator);
        assert_eq!(rabbit.predator_target(), Some(fox));
    }

    #[test]
    fn test_flight_steps_directly_away() {
        let mut env = StubEnvironment::open(12, 12);
        let mut rabbit = env.creature(Species::Rabbit, Cell::new(5, 5));
        env.creature(Species::Fox, Cell::new(3, 3));

        decide_and_act(&mut rabbit, &mut env);

        assert_eq!(rabbit.action(), ActionState::AvoidingPredator);
        assert_eq!(rabbit.movement().state().unwrap().to, Cell::new(6, 6));
    }

    #[test]
    fn test_blocked_flight_falls_back_to_exploring_step() {
        let mut env = StubEnvironment::open(12, 12);
        env.block(Cell::new(6, 5));
        let mut rabbit = env.creature(Species::Rabbit, Cell::new(5, 5));
        env.creature(Species::Fox, Cell::new(3, 5));
        env.next_exploration = Some(Cell::new(5, 4));

        decide_and_act(&mut rabbit, &mut env);

        assert_eq!(rabbit.action(), ActionState::AvoidingPredator);
        assert_eq!(rabbit.movement().state().unwrap().to, Cell::new(5, 4));
    }

    #[test]
    fn test_meal_hysteresis_keeps_eating() {
        let mut env = StubEnvironment::open(12, 12);
        env.add_water(Cell::new(9, 9));
        let plant = env.add_plant(Cell::new(5, 6), 1.0);
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.4, 0.5);
        creature.action = ActionState::Eating;
        creature.food_target = Some(FoodRef::Plant(plant));

        // Thirstier than hungry, but mid-meal and below the critical level
        decide_and_act(&mut creature, &mut env);
        assert_eq!(creature.action(), ActionState::Eating);

        // Critically thirsty: the meal is abandoned
        creature.vitals = creature.vitals.with_levels(0.4, 0.75);
        decide(&mut creature, &env);
        assert_eq!(creature.action(), ActionState::GoingToWater);
    }

    #[test]
    fn test_nothing_sensed_means_exploring() {
        let mut env = StubEnvironment::open(12, 12);
        env.next_exploration = Some(Cell::new(2, 1));
        let mut creature = env.creature(Species::Rabbit, Cell::new(1, 1)).with_vitals(0.5, 0.1);

        decide_and_act(&mut creature, &mut env);

        assert_eq!(creature.action(), ActionState::Exploring);
        assert_eq!(creature.food_target(), None);
        assert_eq!(creature.movement().state().unwrap().to, Cell::new(2, 1));
    }

    #[test]
    fn test_vanished_food_falls_back_to_exploring() {
        let mut env = StubEnvironment::open(12, 12);
        let plant = env.add_plant(Cell::new(5, 9), 1.0);
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.5, 0.1);
        decide(&mut creature, &env);
        assert_eq!(creature.action(), ActionState::GoingToFood);

        env.remove_plant(plant);
        env.next_exploration = Some(Cell::new(4, 5));
        act(&mut creature, &mut env);

        assert_eq!(creature.action(), ActionState::Exploring);
        assert_eq!(creature.food_target(), None);
        assert_eq!(creature.movement().state().unwrap().to, Cell::new(4, 5));
    }

    #[test]
    fn test_vanished_predator_falls_back_to_exploring() {
        let mut env = StubEnvironment::open(12, 12);
        let mut rabbit = env.creature(Species::Rabbit, Cell::new(5, 5));
        let fox = env.creature(Species::Fox, Cell::new(3, 5)).id();
        assert_eq!(decide(&mut rabbit, &env), ActionState::AvoidingPredator);

        env.register_death(fox, Cell::new(3, 5), CauseOfDeath::Hunger);
        env.next_exploration = Some(Cell::new(5, 6));
        act(&mut rabbit, &mut env);

        assert_eq!(rabbit.action(), ActionState::Exploring);
        assert_eq!(rabbit.predator_target(), None);
        assert_eq!(rabbit.movement().state().unwrap().to, Cell::new(5, 6));
    }

    #[test]
    fn test_unreachable_food_explores_instead() {
        let mut env = StubEnvironment::open(12, 12);
        // Wall the plant in
        for cell in Cell::new(9, 9).neighbours() {
            env.block(cell);
        }
        env.add_plant(Cell::new(9, 9), 1.0);
        env.next_exploration = Some(Cell::new(6, 5));
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5)).with_vitals(0.5, 0.1);

        decide_and_act(&mut creature, &mut env);

        assert_eq!(creature.action(), ActionState::GoingToFood);
        assert!(creature.path().cells().is_empty());
        assert_eq!(creature.movement().state().unwrap().to, Cell::new(6, 5));
    }

    #[test]
    fn test_decision_time_recorded() {
        let mut env = StubEnvironment::open(12, 12);
        let mut creature = env.creature(Species::Rabbit, Cell::new(5, 5));
        creature.clock = 4.5;
        decide(&mut creature, &env);
        assert_eq!(creature.last_decision_time, 4.5);
    }
}
