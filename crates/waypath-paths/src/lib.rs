//! A* shortest-path search on uniform 2D grids.
//!
//! The engine is [`PathFinder`], which owns its per-run search records and
//! an indexed [`Frontier`] so that repeated searches reuse their allocations
//! and never see values left over from a previous run.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | positive step costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |
//!
//! [`GridPather`] implements all three for a [`waypath_core::Grid`]: four
//! directions, every step costs [`STEP_COST`], and the heuristic is the
//! Manhattan distance scaled by the same cost.

mod astar;
mod config;
mod distance;
mod error;
mod frontier;
mod pather;
mod pathfinder;
mod traits;

pub use config::SearchConfig;
pub use distance::{manhattan, path_cost};
pub use error::PathError;
pub use frontier::Frontier;
pub use pather::{GridPather, STEP_COST};
pub use pathfinder::{PathFinder, SearchState, SearchStats};
pub use traits::{AstarPather, Pather, WeightedPather};
