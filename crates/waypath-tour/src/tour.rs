//! Sequencing of point-to-point searches into a tour.

use std::fmt;

use log::{info, warn};
use waypath_core::{Grid, GridError, Point};
use waypath_paths::{PathError, PathFinder, SearchConfig, path_cost};

use crate::source::GridSource;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Tour runner options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourConfig {
    /// Search settings applied to every leg.
    pub search: SearchConfig,
    /// Drop the waypoint repeated where one leg ends and the next begins,
    /// so the concatenated path is itself a valid walk.
    pub dedup_seams: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            dedup_seams: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One resolved point-to-point search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub from: Point,
    pub to: Point,
    /// Path from `from` to `to`, both included.
    pub path: Vec<Point>,
    pub cost: i32,
}

/// A completed tour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    pub start: Point,
    pub legs: Vec<Leg>,
    /// All legs concatenated in order.
    pub path: Vec<Point>,
}

impl Tour {
    fn from_legs(start: Point, legs: Vec<Leg>, dedup_seams: bool) -> Self {
        let mut path = vec![start];
        for (i, leg) in legs.iter().enumerate() {
            let skip = if dedup_seams || i == 0 { 1 } else { 0 };
            path.extend_from_slice(&leg.path[skip..]);
        }
        Self { start, legs, path }
    }

    /// Sum of the leg costs.
    pub fn cost(&self) -> i32 {
        self.legs.iter().map(|l| l.cost).sum()
    }

    /// Where the tour finished.
    pub fn end(&self) -> Point {
        self.legs.last().map_or(self.start, |l| l.to)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a tour stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourError {
    /// A grid could not be produced or a waypoint was off the grid.
    Grid(GridError),
    /// The search for one leg failed; no later leg was attempted.
    Leg {
        leg: usize,
        from: Point,
        to: Point,
        source: PathError,
    },
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "tour grid: {e}"),
            Self::Leg {
                leg,
                from,
                to,
                source,
            } => write!(f, "tour leg {leg} from {from} to {to} failed: {source}"),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Leg { source, .. } => Some(source),
        }
    }
}

impl From<GridError> for TourError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Runs legs one after another, each starting where the previous one ended.
pub struct TourRunner {
    config: TourConfig,
    finder: PathFinder,
}

impl Default for TourRunner {
    fn default() -> Self {
        Self::new(TourConfig::default())
    }
}

impl TourRunner {
    /// Create a runner.
    pub fn new(config: TourConfig) -> Self {
        Self {
            config,
            finder: PathFinder::new(config.search),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// The underlying search engine, e.g. to read the last leg's stats.
    pub fn finder(&self) -> &PathFinder {
        &self.finder
    }

    /// Visit `waypoints` in order starting from `start`.
    ///
    /// The first failing leg aborts the tour; there is no partial result.
    pub fn run<S: GridSource + ?Sized>(
        &mut self,
        source: &mut S,
        start: Point,
        waypoints: &[Point],
    ) -> Result<Tour, TourError> {
        self.run_with(source, start, waypoints, |_, _, _| {})
    }

    /// Like [`run`](Self::run), calling `observe(leg, grid, path)` after
    /// every successful leg with the grid it was searched on.
    pub fn run_with<S, F>(
        &mut self,
        source: &mut S,
        start: Point,
        waypoints: &[Point],
        mut observe: F,
    ) -> Result<Tour, TourError>
    where
        S: GridSource + ?Sized,
        F: FnMut(usize, &Grid, &[Point]),
    {
        let mut legs = Vec::with_capacity(waypoints.len());
        let mut from = start;

        for (leg, &to) in waypoints.iter().enumerate() {
            let grid = source.grid_for_leg(leg, from, to)?;
            grid.set_start(from)?;
            grid.set_end(to)?;

            let path = match self.finder.run(grid) {
                Ok(path) => path,
                Err(e) => {
                    warn!("leg {leg}: {from} -> {to} failed: {e}");
                    return Err(TourError::Leg {
                        leg,
                        from,
                        to,
                        source: e,
                    });
                }
            };
            let cost = path_cost(&path);
            info!("leg {leg}: {from} -> {to}, {} steps, cost {cost}", path.len() - 1);
            observe(leg, grid, &path);

            legs.push(Leg {
                from,
                to,
                path,
                cost,
            });
            from = to;
        }

        Ok(Tour::from_legs(start, legs, self.config.dedup_seams))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tour_round_trip() {
        let tour = Tour::from_legs(
            Point::new(0, 0),
            vec![Leg {
                from: Point::new(0, 0),
                to: Point::new(1, 0),
                path: vec![Point::new(0, 0), Point::new(1, 0)],
                cost: 10,
            }],
            true,
        );
        let json = serde_json::to_string(&tour).unwrap();
        let back: Tour = serde_json::from_str(&json).unwrap();
        assert_eq!(tour, back);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: TourConfig = serde_json::from_str(r#"{"dedup_seams":false}"#).unwrap();
        assert!(!cfg.dedup_seams);
        assert_eq!(cfg.search, SearchConfig::default());
    }
}
