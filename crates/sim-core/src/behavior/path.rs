//! Path Cache
//!
//! Memoizes the route to the current travel target so a multi-tile trek does
//! not re-run the router every tick. Recomputing from a moving start cell with
//! a greedy router can oscillate, so reuse is required for correctness.

use sim_events::Cell;

/// Cached route plus a cursor to the next cell to step onto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathCache {
    cells: Vec<Cell>,
    cursor: usize,
    /// Cell the route was computed from.
    origin: Cell,
    computed: bool,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a route to `target`, reusing the cached one when it still
    /// applies and asking `route` for a fresh one otherwise.
    ///
    /// The cache applies when the route ends at `target`, the cursor is not
    /// past its end, and the cell behind the cursor is `last_move_target`
    /// (the tile the creature last moved onto). A route that has not been
    /// stepped on yet applies only from the cell it was computed from.
    pub fn ensure_path<F>(
        &mut self,
        current: Cell,
        target: Cell,
        last_move_target: Cell,
        route: F,
    ) -> &[Cell]
    where
        F: FnOnce(Cell, Cell) -> Vec<Cell>,
    {
        if !self.is_reusable(current, target, last_move_target) {
            self.cells = route(current, target);
            self.cursor = 0;
            self.origin = current;
            self.computed = true;
        }
        &self.cells
    }

    fn is_reusable(&self, current: Cell, target: Cell, last_move_target: Cell) -> bool {
        if !self.computed || self.cursor >= self.cells.len() {
            return false;
        }
        if self.cells.last() != Some(&target) {
            return false;
        }
        match self.cursor.checked_sub(1) {
            Some(behind) => self.cells[behind] == last_move_target,
            None => self.origin == current,
        }
    }

    /// Takes the cell under the cursor and advances past it.
    pub fn next_step(&mut self) -> Option<Cell> {
        let step = self.cells.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(step)
    }

    pub fn invalidate(&mut self) {
        self.cells.clear();
        self.cursor = 0;
        self.computed = false;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    pub fn target(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as Counter;

    fn straight_route(from: Cell, to: Cell) -> Vec<Cell> {
        // Walks x first, then y; good enough for tests on open ground.
        let mut out = Vec::new();
        let mut c = from;
        while c != to {
            c = Cell::new(c.x + (to.x - c.x).signum(), c.y + (to.y - c.y).signum());
            out.push(c);
        }
        out
    }

    #[test]
    fn test_reuses_unchanged_target() {
        let calls = Counter::new(0);
        let router = |a, b| {
            calls.set(calls.get() + 1);
            straight_route(a, b)
        };

        let mut cache = PathCache::new();
        let start = Cell::new(0, 0);
        let target = Cell::new(4, 0);

        let first = cache.ensure_path(start, target, start, router).to_vec();
        let second = cache.ensure_path(start, target, start, router).to_vec();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reuses_mid_trek() {
        let calls = Counter::new(0);
        let router = |a, b| {
            calls.set(calls.get() + 1);
            straight_route(a, b)
        };

        let mut cache = PathCache::new();
        let target = Cell::new(4, 0);
        cache.ensure_path(Cell::new(0, 0), target, Cell::new(0, 0), router);
        let step = cache.next_step().unwrap();
        assert_eq!(step, Cell::new(1, 0));

        // The creature arrived on `step`; asking again keeps the same route.
        cache.ensure_path(step, target, step, router);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.cursor(), 1);
        assert_eq!(cache.next_step(), Some(Cell::new(2, 0)));
    }

    #[test]
    fn test_recomputes_on_target_change() {
        let calls = Counter::new(0);
        let router = |a, b| {
            calls.set(calls.get() + 1);
            straight_route(a, b)
        };

        let mut cache = PathCache::new();
        let start = Cell::new(0, 0);
        cache.ensure_path(start, Cell::new(4, 0), start, router);
        cache.ensure_path(start, Cell::new(0, 4), start, router);

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.target(), Some(Cell::new(0, 4)));
        assert_eq!(cache.cursor(), 0);
    }

    #[test]
    fn test_recomputes_when_last_move_diverged() {
        let calls = Counter::new(0);
        let router = |a, b| {
            calls.set(calls.get() + 1);
            straight_route(a, b)
        };

        let mut cache = PathCache::new();
        let target = Cell::new(4, 0);
        cache.ensure_path(Cell::new(0, 0), target, Cell::new(0, 0), router);
        cache.next_step();

        // The creature fled sideways instead of following the route.
        let detour = Cell::new(0, 1);
        cache.ensure_path(detour, target, detour, router);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.cells()[0], Cell::new(1, 0));
    }

    #[test]
    fn test_exhausted_path_is_recomputed() {
        let calls = Counter::new(0);
        let router = |a, b| {
            calls.set(calls.get() + 1);
            straight_route(a, b)
        };

        let mut cache = PathCache::new();
        let target = Cell::new(1, 0);
        cache.ensure_path(Cell::new(0, 0), target, Cell::new(0, 0), router);
        assert_eq!(cache.next_step(), Some(target));
        assert!(cache.is_exhausted());
        assert_eq!(cache.next_step(), None);

        cache.ensure_path(target, target, target, router);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_empty_route_never_reused() {
        let calls = Counter::new(0);
        let router = |_, _| {
            calls.set(calls.get() + 1);
            Vec::new()
        };

        let mut cache = PathCache::new();
        let start = Cell::new(0, 0);
        assert!(cache.ensure_path(start, Cell::new(9, 9), start, router).is_empty());
        assert!(cache.ensure_path(start, Cell::new(9, 9), start, router).is_empty());
        assert_eq!(calls.get(), 2);
    }
}
