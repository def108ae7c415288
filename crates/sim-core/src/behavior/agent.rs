//! Creature Agent
//!
//! The per-tick update tying vitals, movement, interactions and decisions
//! together. Death leaves the state machine: a dead creature's tick is a no-op.

use sim_events::{CauseOfDeath, Cell, Diet, Genes, Species};

use super::decision::{act, decide_and_act};
use super::interaction;
use super::movement::MovementOutcome;
use crate::components::{Creature, CreatureId};
use crate::config::AnimalSettings;
use crate::environment::Environment;

/// Creates a creature at `cell` and runs its first decision pass, which
/// picks the initial action state.
pub fn spawn<E: Environment + ?Sized>(
    id: CreatureId,
    species: Species,
    cell: Cell,
    genes: Genes,
    diet: Diet,
    settings: AnimalSettings,
    env: &mut E,
) -> Creature {
    let creature = Creature::new(
        id,
        species,
        cell,
        genes,
        diet,
        settings,
        env.cell_center(cell),
    );
    activate(creature, env)
}

/// Runs the first decision pass for a creature built by the caller, e.g.
/// one starting with non-zero vitals.
pub fn activate<E: Environment + ?Sized>(mut creature: Creature, env: &mut E) -> Creature {
    decide_and_act(&mut creature, env);
    creature
}

/// Advances one creature by `dt` seconds. Death is checked once the tick's
/// movement and interactions have run, so a last sip or bite still counts.
pub fn tick<E: Environment + ?Sized>(creature: &mut Creature, dt: f32, env: &mut E) {
    if creature.is_dead() {
        return;
    }

    creature.clock += dt;
    creature.vitals.advance(dt);
    update(creature, dt, env);

    if let Some(cause) = creature.vitals.cause_of_death() {
        die(creature, cause, env);
    }
}

fn update<E: Environment + ?Sized>(creature: &mut Creature, dt: f32, env: &mut E) {
    if creature.is_animating() {
        if let MovementOutcome::Completed { from, to } = creature.movement.advance(dt) {
            creature.position = to;
            env.register_move(creature.id(), from, to);
            tracing::trace!(creature = ?creature.id(), %from, %to, "hop completed");
            decide_and_act(creature, env);
        }
        return;
    }

    if creature.action.is_interacting() {
        interaction::handle(creature, dt, env);
    }

    let since_decision = creature.clock - creature.last_decision_time;
    if since_decision > creature.settings.time_between_action_choices {
        decide_and_act(creature, env);
    } else if creature.action.is_travelling() {
        act(creature, env);
    }
}

/// Marks the creature dead and notifies the world, once. Later calls do
/// nothing.
pub fn die<E: Environment + ?Sized>(creature: &mut Creature, cause: CauseOfDeath, env: &mut E) {
    if !creature.mark_dead(cause) {
        return;
    }
    tracing::info!(
        creature = ?creature.id(),
        species = ?creature.species(),
        cell = %creature.position,
        ?cause,
        "creature died"
    );
    env.register_death(creature.id(), creature.position, cause);
}
