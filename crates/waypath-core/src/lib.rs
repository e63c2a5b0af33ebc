//! **waypath-core**: the grid model used by the waypath search crates.
//!
//! This crate provides geometry primitives ([`Point`], [`Range`]) and the
//! walled [`Grid`] of [`Cell`]s that searches run over. Cells live in a flat
//! arena and are addressed by [`CellId`], so equality is by index rather than
//! by reference identity.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Cell, CellId, Grid};
