//! **stepgrid-core** — Grid model and stepping protocol for the stepgrid
//! search engine.
//!
//! This crate provides the types shared by the search and maze crates: the
//! [`Point`]/[`Range`] geometry primitives, the [`Cell`] occupancy states,
//! the owned [`Grid`] snapshot, and the stepping-protocol types
//! ([`CellEvent`], [`SearchStep`], [`Batches`]) through which a caller-owned
//! render loop consumes engine output.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod step;

pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
pub use step::{Batches, CellEvent, SearchStep};
