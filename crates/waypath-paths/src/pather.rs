use waypath_core::{Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Cost of one orthogonal step.
pub const STEP_COST: i32 = 10;

/// Four-directional, uniform-cost view of a [`Grid`].
///
/// Only reachable cells are passable, and a wall has no passable neighbours,
/// so a search seeded on a wall exhausts immediately.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a Grid,
}

impl<'a> GridPather<'a> {
    /// Wrap a grid.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// The wrapped grid.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let Ok(id) = self.grid.id_at(p) else {
            return;
        };
        if !self.grid.cell(id).reachable {
            return;
        }
        buf.extend(
            self.grid
                .neighbors(id)
                .map(|n| self.grid.cell(n))
                .filter(|c| c.reachable)
                .map(|c| c.pos),
        );
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        STEP_COST
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        STEP_COST * manhattan(from, to)
    }
}
