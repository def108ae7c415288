//! ECS Systems
//!
//! The per-tick pipeline, run in this order:
//! advance clock, tick creatures, regrow plants, flush events, snapshots.

use bevy_ecs::prelude::*;

use crate::environment::Ecosystem;
use crate::events::EventLogger;
use crate::output::SnapshotWriter;

/// Global simulation state resource
#[derive(Resource, Debug, Clone)]
pub struct SimulationState {
    pub current_tick: u64,
    /// Simulated seconds per tick
    pub dt: f32,
    /// Ticks between plant regrowth rounds (0 disables regrowth)
    pub regrow_interval: u64,
}

impl SimulationState {
    pub fn new(dt: f32, regrow_interval: u64) -> Self {
        Self {
            current_tick: 0,
            dt,
            regrow_interval,
        }
    }
}

pub fn advance_clock(mut state: ResMut<SimulationState>, mut ecosystem: ResMut<Ecosystem>) {
    state.current_tick += 1;
    ecosystem.begin_tick(state.dt);
}

pub fn tick_creatures(state: Res<SimulationState>, mut ecosystem: ResMut<Ecosystem>) {
    ecosystem.tick_creatures(state.dt);
}

pub fn regrow_plants(state: Res<SimulationState>, mut ecosystem: ResMut<Ecosystem>) {
    if state.regrow_interval > 0 && state.current_tick % state.regrow_interval == 0 {
        ecosystem.regrow_plants();
    }
}

pub fn flush_events(mut ecosystem: ResMut<Ecosystem>, mut logger: ResMut<EventLogger>) {
    let events = ecosystem.drain_events();
    if let Err(e) = logger.log_batch(&events) {
        tracing::warn!("Could not write {} events: {}", events.len(), e);
    }
}

pub fn take_snapshots(
    state: Res<SimulationState>,
    ecosystem: Res<Ecosystem>,
    writer: Option<ResMut<SnapshotWriter>>,
) {
    let Some(mut writer) = writer else {
        return;
    };
    if !writer.should_snapshot(state.current_tick) {
        return;
    }
    let snapshot = ecosystem.snapshot();
    match writer.write(&snapshot) {
        Ok(path) => tracing::debug!(tick = state.current_tick, path = %path.display(), "snapshot written"),
        Err(e) => tracing::warn!(
            "Could not write snapshot at tick {}: {}",
            state.current_tick,
            e
        ),
    }
}

/// The tick pipeline as a chained schedule.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            advance_clock,
            tick_creatures,
            regrow_plants,
            flush_events,
            take_snapshots,
        )
            .chain(),
    );
    schedule
}
