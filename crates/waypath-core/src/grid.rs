//! The [`Grid`] type, a fixed-size 2D arena of walled or open [`Cell`]s.
//!
//! Every `(x, y)` inside the grid owns exactly one cell, stored row-major and
//! addressed by a [`CellId`]. Reachability is fixed at construction; the only
//! mutable state is the pair of endpoints a search runs between.

use crate::error::GridError;
use crate::geom::{Point, Range};

/// Stable index of a cell inside its grid's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub usize);

/// One lattice position of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    /// `false` for walls.
    pub reachable: bool,
}

/// A rectangular grid of cells with an immutable wall set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    start: CellId,
    end: CellId,
}

impl Grid {
    /// Build a `width × height` grid. A cell is a wall iff its coordinate
    /// appears in `walls`; wall coordinates outside the grid are ignored.
    ///
    /// The start defaults to the top-left corner and the end to the
    /// bottom-right corner.
    pub fn new(
        width: i32,
        height: i32,
        walls: impl IntoIterator<Item = Point>,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        let bounds = Range::with_size(width, height);
        let mut cells: Vec<Cell> = bounds
            .iter()
            .map(|pos| Cell {
                pos,
                reachable: true,
            })
            .collect();
        for w in walls {
            if bounds.contains(w) {
                cells[(w.y * width + w.x) as usize].reachable = false;
            }
        }
        let last = CellId(cells.len() - 1);
        Ok(Self {
            cells,
            width,
            height,
            start: CellId(0),
            end: last,
        })
    }

    /// Build a grid with no walls.
    pub fn open(width: i32, height: i32) -> Result<Self, GridError> {
        Self::new(width, height, std::iter::empty())
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a constructed grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// The id of the cell at `p`.
    pub fn id_at(&self, p: Point) -> Result<CellId, GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds {
                pos: p,
                bounds: self.bounds(),
            });
        }
        Ok(CellId((p.y * self.width + p.x) as usize))
    }

    /// The cell at `p`.
    pub fn cell_at(&self, p: Point) -> Result<&Cell, GridError> {
        let id = self.id_at(p)?;
        Ok(&self.cells[id.0])
    }

    /// The cell with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this grid.
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    /// Position of the cell with the given id.
    #[inline]
    pub fn point(&self, id: CellId) -> Point {
        self.cells[id.0].pos
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_reachable(&self, p: Point) -> bool {
        self.cell_at(p).is_ok_and(|c| c.reachable)
    }

    /// Orthogonal neighbours of `id` in east, north, west, south order.
    /// Off-grid positions are skipped; walls are included.
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.point(id)
            .neighbors_4()
            .into_iter()
            .filter_map(move |n| self.id_at(n).ok())
    }

    /// Positions of every wall, row-major.
    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().filter(|c| !c.reachable).map(|c| c.pos)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.reachable).count()
    }

    /// Set the search origin. The cell need not be reachable.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.start = self.id_at(p)?;
        Ok(())
    }

    /// Set the search goal. The cell need not be reachable.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        self.end = self.id_at(p)?;
        Ok(())
    }

    /// Current search origin.
    #[inline]
    pub fn start(&self) -> Point {
        self.point(self.start)
    }

    /// Current search goal.
    #[inline]
    pub fn end(&self) -> Point {
        self.point(self.end)
    }
}
