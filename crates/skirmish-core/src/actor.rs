//! Identities of players and actors, and what an actor occupying a cell
//! looks like to movement.

use std::fmt;

/// A participant of the match. Blocking rules can depend on who owns what.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

/// A simulated object: a unit or a structure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// How an occupant blocks movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OccupantKind {
    /// Static obstacle; blocks regardless of dynamic-occupant checks.
    Structure,
    /// Mobile unit; blocks only when dynamic occupants are checked.
    /// Crushable units can be driven over by enemies that crush.
    Unit { crushable: bool },
}

/// An actor standing on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub actor: ActorId,
    pub owner: PlayerId,
    pub kind: OccupantKind,
}

impl Occupant {
    /// A structure owned by `owner`.
    pub const fn structure(actor: ActorId, owner: PlayerId) -> Self {
        Self {
            actor,
            owner,
            kind: OccupantKind::Structure,
        }
    }

    /// A unit owned by `owner`.
    pub const fn unit(actor: ActorId, owner: PlayerId, crushable: bool) -> Self {
        Self {
            actor,
            owner,
            kind: OccupantKind::Unit { crushable },
        }
    }
}
