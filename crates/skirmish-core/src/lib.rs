//! **skirmish-core**: shared types for the skirmish simulation.
//!
//! This crate provides the foundational types the pathfinding engine works
//! on: integer grid geometry, player and actor identities, and a reference
//! terrain/occupancy map.

pub mod actor;
pub mod geom;
pub mod grid;
pub mod terrain;

pub use actor::{ActorId, Occupant, OccupantKind, PlayerId};
pub use geom::{Point, Range};
pub use grid::{ParseGridError, TerrainGrid};
pub use terrain::TerrainKind;
