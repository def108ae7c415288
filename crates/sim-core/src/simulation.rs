//! Simulation Runner
//!
//! Owns the ECS world and schedule for one run.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::environment::Ecosystem;
use crate::error::SimError;
use crate::events::EventLogger;
use crate::output::SnapshotWriter;
use crate::setup::{self, SpawnSummary};
use crate::systems::{build_schedule, SimulationState};
use crate::SimRng;

/// File name of the event log inside the output directory
pub const EVENTS_FILE: &str = "events.jsonl";

pub struct Simulation {
    world: World,
    schedule: Schedule,
    summary: SpawnSummary,
}

impl Simulation {
    /// Builds the world from `config`. Setup events are flushed to `logger`
    /// and, when a writer is given, the tick-0 snapshot is written.
    pub fn new(
        config: &Config,
        logger: EventLogger,
        snapshots: Option<SnapshotWriter>,
    ) -> Result<Self, SimError> {
        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(config.simulation.seed)));

        let (ecosystem, summary) = {
            let mut rng = world.resource_mut::<SimRng>();
            setup::build_ecosystem(config, &mut rng.0)?
        };

        world.insert_resource(SimulationState::new(
            config.simulation.dt,
            config.plants.regrow_interval,
        ));
        world.insert_resource(ecosystem);
        world.insert_resource(logger);
        let setup_events = world.resource_mut::<Ecosystem>().drain_events();
        world
            .resource_mut::<EventLogger>()
            .log_batch(&setup_events)
            .map_err(|source| SimError::Output {
                path: EVENTS_FILE.into(),
                source,
            })?;

        if let Some(mut writer) = snapshots {
            let snapshot = world.resource::<Ecosystem>().snapshot();
            writer.write(&snapshot)?;
            world.insert_resource(writer);
        }

        Ok(Self {
            world,
            schedule: build_schedule(),
            summary,
        })
    }

    pub fn step(&mut self) {
        self.schedule.run(&mut self.world);
    }

    /// Runs `ticks` ticks, logging progress every tenth of the run.
    pub fn run(&mut self, ticks: u64) {
        let report_every = (ticks / 10).max(1);
        for _ in 0..ticks {
            self.step();
            let tick = self.current_tick();
            if tick % report_every == 0 {
                let ecosystem = self.ecosystem();
                tracing::info!(
                    tick,
                    rabbits = ecosystem.population(sim_events::Species::Rabbit),
                    foxes = ecosystem.population(sim_events::Species::Fox),
                    plants = ecosystem.population(sim_events::Species::Plant),
                    "progress"
                );
            }
        }
    }

    /// Writes a snapshot of the current state regardless of the interval.
    pub fn write_final_snapshot(&mut self) -> Result<(), SimError> {
        let snapshot = self.ecosystem().snapshot();
        if let Some(mut writer) = self.world.get_resource_mut::<SnapshotWriter>() {
            writer.write(&snapshot)?;
        }
        Ok(())
    }

    /// Flushes buffered event output to disk.
    pub fn flush(&mut self) -> Result<(), SimError> {
        let mut logger = self.world.resource_mut::<EventLogger>();
        logger.flush().map_err(|source| SimError::Output {
            path: EVENTS_FILE.into(),
            source,
        })
    }

    pub fn current_tick(&self) -> u64 {
        self.world.resource::<SimulationState>().current_tick
    }

    pub fn ecosystem(&self) -> &Ecosystem {
        self.world.resource::<Ecosystem>()
    }

    pub fn logger(&self) -> &EventLogger {
        self.world.resource::<EventLogger>()
    }

    pub fn snapshots(&self) -> Option<&SnapshotWriter> {
        self.world.get_resource::<SnapshotWriter>()
    }

    pub fn spawn_summary(&self) -> &SpawnSummary {
        &self.summary
    }
}
