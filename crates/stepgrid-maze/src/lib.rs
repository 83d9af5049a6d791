//! **stepgrid-maze** — Recursive-division maze generation.
//!
//! [`MazeGen`] carves a maze over a [`Grid`](stepgrid_core::Grid)
//! snapshot's dimensions by recursive division: seed the outer border,
//! then repeatedly split each region with a wall that leaves a single
//! gap, biased toward vertical or horizontal cuts. The output is the
//! same pull-based event stream the searches use, so one render loop
//! serves both.

mod division;

pub use division::{DEFAULT_SKEW_STRENGTH, MazeGen, MazeRun, Skew};
