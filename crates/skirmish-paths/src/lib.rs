//! Deterministic grid pathfinding for lockstep RTS simulations.
//!
//! Every client of a lockstep game runs the same simulation, so route
//! requests must produce bit-identical answers everywhere. This crate keeps
//! all costs in integers, expands neighbours in a fixed order and breaks
//! queue ties by insertion order.
//!
//! - [`PathSearch`] is one best-first search session: seeds, a heuristic,
//!   blocking rules and a single-step [`expand`](PathSearch::expand).
//! - [`PathFinder`] drives sessions to a [`Route`], alone or as a
//!   bidirectional pair meeting in the middle.
//! - [`ArenaPool`] recycles the per-cell state arrays sessions work on, so
//!   many units can search concurrently without allocating per request.
//!
//! # Trait seams
//!
//! | Trait | Supplies |
//! |---|---|
//! | [`MapBounds`] | the map extent |
//! | [`Mobility`] | per-cell movement cost and occupancy rules |
//!
//! [`Locomotor`] implements [`Mobility`] over a
//! [`TerrainGrid`](skirmish_core::TerrainGrid).

mod cellinfo;
mod config;
mod distance;
mod error;
mod finder;
mod locomotor;
mod pool;
mod queue;
mod route;
mod search;
mod traits;

pub use cellinfo::{CellInfo, CellInfoGrid, UNVISITED};
pub use config::SearchConfig;
pub use distance::{STRAIGHT_COST, default_estimator, octile, zero_estimator};
pub use error::PathError;
pub use finder::{PathFinder, adjacent_cells};
pub use locomotor::{Locomotor, LocomotorInfo};
pub use pool::ArenaPool;
pub use queue::FrontierQueue;
pub use route::Route;
pub use search::{Blocker, Heuristic, PathSearch};
pub use traits::{MapBounds, Mobility};
