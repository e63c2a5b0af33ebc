//! Waypoint tours: sequential A* legs where each goal becomes the next start.
//!
//! Also hosts the glue the tour needs around the search: grid sources that
//! reuse or regenerate the map for every leg, random wall sampling, and
//! ASCII rendering for diagnostics.

pub mod render;
pub mod source;
pub mod tour;
pub mod walls;

pub use render::{LEGEND, render, render_tour};
pub use source::{FixedGrid, GridSource, RandomWalls};
pub use tour::{Leg, Tour, TourConfig, TourError, TourRunner};
pub use walls::sample_walls;
