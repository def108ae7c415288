//! Movement Controller
//!
//! Animates a single tile-to-tile hop. The logical cell only changes when the
//! hop completes; until then the creature is "in flight" and does not decide.

use glam::Vec3;
use sim_events::Cell;
use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};

/// An in-flight transition between two neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub from: Cell,
    pub to: Cell,
    pub start_pos: Vec3,
    pub target_pos: Vec3,
    /// Fraction of the hop travelled, 0.0 to 1.0
    pub elapsed_fraction: f32,
    pub speed_factor: f32,
    pub arc_height_factor: f32,
}

impl MovementState {
    /// Diagonal hops are longer, so they move slower and arc higher.
    fn new(from: Cell, to: Cell, start_pos: Vec3, target_pos: Vec3) -> Self {
        let diagonal = from.sqr_distance(to) > 1;
        Self {
            from,
            to,
            start_pos,
            target_pos,
            elapsed_fraction: 0.0,
            speed_factor: if diagonal { FRAC_1_SQRT_2 } else { 1.0 },
            arc_height_factor: if diagonal { SQRT_2 } else { 1.0 },
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.from.sqr_distance(self.to) > 1
    }
}

/// Result of advancing the controller by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementOutcome {
    /// Nothing in flight.
    Idle,
    InProgress,
    /// The hop just finished. Reported once per `begin`.
    Completed { from: Cell, to: Cell },
}

/// Drives hops and tracks the creature's world-space pose.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementController {
    state: Option<MovementState>,
    move_speed: f32,
    arc_height: f32,
    position: Vec3,
    /// Facing around the vertical axis, radians
    yaw: f32,
    /// Source of the most recent hop
    last_from: Cell,
    /// Destination of the most recent hop
    last_target: Cell,
}

impl MovementController {
    pub fn new(cell: Cell, position: Vec3, move_speed: f32, arc_height: f32) -> Self {
        Self {
            state: None,
            move_speed,
            arc_height,
            position,
            yaw: 0.0,
            last_from: cell,
            last_target: cell,
        }
    }

    /// Starts a hop from `from` to `to`, beginning at the current pose.
    pub fn begin<F>(&mut self, from: Cell, to: Cell, cell_center: F)
    where
        F: FnOnce(Cell) -> Vec3,
    {
        let target_pos = cell_center(to);
        self.state = Some(MovementState::new(from, to, self.position, target_pos));
        self.last_from = from;
        self.last_target = to;
        self.look_at(from, to);
    }

    /// Advances the hop by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> MovementOutcome {
        let Some(state) = self.state.as_mut() else {
            return MovementOutcome::Idle;
        };

        state.elapsed_fraction =
            (state.elapsed_fraction + dt * self.move_speed * state.speed_factor).min(1.0);
        let t = state.elapsed_fraction;
        let height = (1.0 - 4.0 * (t - 0.5) * (t - 0.5)) * self.arc_height * state.arc_height_factor;
        self.position = state.start_pos.lerp(state.target_pos, t) + Vec3::Y * height;

        if t >= 1.0 {
            let (from, to) = (state.from, state.to);
            self.position = state.target_pos;
            self.state = None;
            MovementOutcome::Completed { from, to }
        } else {
            MovementOutcome::InProgress
        }
    }

    /// Turns to face `target` when it differs from `current`.
    pub fn look_at(&mut self, current: Cell, target: Cell) {
        if target != current {
            let offset = target - current;
            self.yaw = (offset.x as f32).atan2(offset.y as f32);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&MovementState> {
        self.state.as_ref()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn last_from(&self) -> Cell {
        self.last_from
    }

    pub fn last_target(&self) -> Cell {
        self.last_target
    }
}
