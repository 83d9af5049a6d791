//! **stepgrid-search** — Pausable pathfinding over 2D occupancy grids.
//!
//! Four searches over a [`Grid`](stepgrid_core::Grid) snapshot:
//!
//! - **BFS** ([`Bfs`]) — FIFO discovery, shortest path in hop count
//! - **DFS** ([`Dfs`]) — depth-first exploration, *a* path, not shortest
//! - **Dijkstra** ([`Dijkstra`]) — min-cost settling with a lazy heap
//! - **A\*** ([`Astar`]) — Dijkstra plus a Manhattan-distance heuristic
//!
//! Each run borrows the snapshot immutably and implements
//! `Iterator<Item = SearchStep>`: every pull yields one cell-state change,
//! and the final item carries the found/not-found verdict. The caller owns
//! all pacing; dropping a run mid-stream cancels it with nothing to tear
//! down. Runs allocate their own visit/distance/predecessor state, so runs
//! over independent snapshots never interfere.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod heap;
mod state;
mod trace;

#[cfg(test)]
mod fixtures;

pub use astar::Astar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use distance::manhattan;
pub use heap::MinHeap;
