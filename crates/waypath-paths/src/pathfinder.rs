use waypath_core::{Point, Range};

use crate::config::SearchConfig;
use crate::frontier::Frontier;

// ---------------------------------------------------------------------------
// Per-run search records
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Membership {
    Open,
    Closed,
}

/// Search bookkeeping for one cell. Only meaningful when `generation`
/// matches the finder's current generation; anything else reads as unseen.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) membership: Membership,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: NO_PARENT,
            generation: 0,
            membership: Membership::Open,
        }
    }
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// Lifecycle of the most recent run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No run yet, or the frontier has just been seeded.
    #[default]
    Ready,
    /// The expand loop is in progress.
    Running,
    /// The goal was reached.
    Found,
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// The expansion budget ran out.
    BudgetExceeded,
}

/// Counters for the most recent run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells whose neighbours were enumerated.
    pub expanded: usize,
    /// Cells inserted into the frontier, the start included.
    pub pushed: usize,
    /// Frontier entries improved in place.
    pub decreased: usize,
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// A* search engine.
///
/// `PathFinder` owns the search records, the frontier and a neighbour
/// scratch buffer. Records are invalidated lazily by bumping a generation
/// counter, so a finder can be reused across independent searches and grids
/// without carrying costs or parents from one run into the next.
pub struct PathFinder {
    pub(crate) config: SearchConfig,
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) frontier: Frontier,
    pub(crate) nbuf: Vec<Point>,
    pub(crate) state: SearchState,
    pub(crate) stats: SearchStats,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl PathFinder {
    /// Create a finder with the given configuration. Caches are sized on the
    /// first search.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: Range::default(),
            width: 0,
            nodes: Vec::new(),
            generation: 0,
            frontier: Frontier::new(),
            nbuf: Vec::with_capacity(4),
            state: SearchState::Ready,
            stats: SearchStats::default(),
        }
    }

    /// The configuration in use.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration for subsequent runs.
    #[inline]
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// State reached by the most recent run.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters of the most recent run.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The rectangle the caches are currently laid out for.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Lay the caches out for `rng`.
    ///
    /// If the new size fits within existing capacity, records are kept and
    /// only the generation is bumped. Otherwise they are reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= self.nodes.len() {
            self.next_generation();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
        self.frontier = Frontier::with_capacity(new_len);
    }

    /// Start a new generation, invalidating every record.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with the new ones.
            for n in &mut self.nodes {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}
