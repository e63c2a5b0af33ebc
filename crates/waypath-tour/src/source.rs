//! Where each leg of a tour gets its grid from.

use rand::Rng;
use waypath_core::{Grid, GridError, Point};

use crate::walls::sample_walls;

/// Supplies the grid a tour leg is searched on.
///
/// The runner overwrites the returned grid's start and end before searching,
/// so implementations only need to provide walls and dimensions.
pub trait GridSource {
    /// Grid for leg number `leg`, which will run from `from` to `to`.
    fn grid_for_leg(&mut self, leg: usize, from: Point, to: Point) -> Result<&mut Grid, GridError>;
}

/// The same grid for every leg.
#[derive(Debug, Clone)]
pub struct FixedGrid {
    grid: Grid,
}

impl FixedGrid {
    /// Reuse `grid` for every leg.
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// The shared grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take the grid back.
    pub fn into_inner(self) -> Grid {
        self.grid
    }
}

impl GridSource for FixedGrid {
    fn grid_for_leg(
        &mut self,
        _leg: usize,
        _from: Point,
        _to: Point,
    ) -> Result<&mut Grid, GridError> {
        Ok(&mut self.grid)
    }
}

/// A fresh square grid with randomly sampled walls for every leg.
pub struct RandomWalls<R: Rng> {
    pub rng: R,
    /// Side length of each generated grid.
    pub size: i32,
    /// Number of wall samples per leg (with replacement).
    pub count: usize,
    /// Drop sampled walls that land on the leg's endpoints.
    pub protect_endpoints: bool,
    grid: Option<Grid>,
}

impl<R: Rng> RandomWalls<R> {
    /// Create a generator of `size × size` grids with `count` wall samples.
    /// Endpoints are protected by default.
    pub fn new(rng: R, size: i32, count: usize) -> Self {
        Self {
            rng,
            size,
            count,
            protect_endpoints: true,
            grid: None,
        }
    }

    /// Allow walls on the leg's endpoints (builder).
    pub fn with_protect_endpoints(mut self, protect: bool) -> Self {
        self.protect_endpoints = protect;
        self
    }

    /// The grid generated for the most recent leg.
    pub fn last_grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }
}

impl<R: Rng> GridSource for RandomWalls<R> {
    fn grid_for_leg(
        &mut self,
        _leg: usize,
        from: Point,
        to: Point,
    ) -> Result<&mut Grid, GridError> {
        let mut walls = sample_walls(&mut self.rng, self.size, self.size, self.count);
        if self.protect_endpoints {
            walls.retain(|&w| w != from && w != to);
        }
        let grid = Grid::new(self.size, self.size, walls)?;
        Ok(self.grid.insert(grid))
    }
}
