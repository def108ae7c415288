//! Routing
//!
//! A* over the 8-connected tile grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use sim_events::Cell;

const STRAIGHT_COST: i32 = 10;
const DIAGONAL_COST: i32 = 14;

#[derive(Copy, Clone, Eq, PartialEq)]
struct OpenNode {
    cost: i32,
    estimate: i32,
    cell: Cell,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on cost, then on remaining estimate, then on cell
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.estimate.cmp(&self.estimate))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Octile distance, scaled like the step costs.
fn heuristic(from: Cell, to: Cell) -> i32 {
    let dx = (from.x - to.x).abs();
    let dy = (from.y - to.y).abs();
    STRAIGHT_COST * dx.max(dy) + (DIAGONAL_COST - STRAIGHT_COST) * dx.min(dy)
}

/// Shortest route from `from` to `to`.
///
/// The result excludes `from` and ends at `to`; it is empty when `to` cannot
/// be reached or equals `from`. Intermediate cells must satisfy `walkable`,
/// the goal need not (water is approached, never entered). `walkable` must be
/// false outside the map so the search stays finite.
pub fn find_route<F>(from: Cell, to: Cell, walkable: F) -> Vec<Cell>
where
    F: Fn(Cell) -> bool,
{
    if from == to {
        return Vec::new();
    }

    let mut g_score: HashMap<Cell, i32> = HashMap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut open = BinaryHeap::new();

    g_score.insert(from, 0);
    open.push(OpenNode {
        cost: heuristic(from, to),
        estimate: heuristic(from, to),
        cell: from,
    });

    while let Some(OpenNode { cost, cell, .. }) = open.pop() {
        if cell == to {
            let mut route = vec![to];
            let mut cursor = to;
            while let Some(&prev) = came_from.get(&cursor) {
                if prev == from {
                    break;
                }
                route.push(prev);
                cursor = prev;
            }
            route.reverse();
            return route;
        }

        let current_g = g_score.get(&cell).copied().unwrap_or(i32::MAX);
        if cost - heuristic(cell, to) > current_g {
            // Stale heap entry
            continue;
        }

        for next in cell.neighbours() {
            if next != to && !walkable(next) {
                continue;
            }
            let step = if next.sqr_distance(cell) > 1 {
                DIAGONAL_COST
            } else {
                STRAIGHT_COST
            };
            let tentative = current_g + step;
            if tentative < g_score.get(&next).copied().unwrap_or(i32::MAX) {
                g_score.insert(next, tentative);
                came_from.insert(next, cell);
                let estimate = heuristic(next, to);
                open.push(OpenNode {
                    cost: tentative + estimate,
                    estimate,
                    cell: next,
                });
            }
        }
    }

    Vec::new()
}
