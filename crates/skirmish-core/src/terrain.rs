//! The [`TerrainKind`] type: what the ground of a cell is made of.

use std::fmt;

/// Terrain class of a single map cell.
///
/// How expensive (or impossible) a kind is to cross is decided by the unit's
/// locomotor, not by the terrain itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Clear,
    Road,
    Rough,
    Water,
    Rock,
}

impl TerrainKind {
    /// Number of terrain kinds.
    pub const COUNT: usize = 5;

    /// Every kind, in declaration order.
    pub const ALL: [TerrainKind; Self::COUNT] = [
        TerrainKind::Clear,
        TerrainKind::Road,
        TerrainKind::Rough,
        TerrainKind::Water,
        TerrainKind::Rock,
    ];

    /// Dense index, suitable for per-kind lookup tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// ASCII glyph used by the map text format.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            TerrainKind::Clear => '.',
            TerrainKind::Road => '=',
            TerrainKind::Rough => ',',
            TerrainKind::Water => '~',
            TerrainKind::Rock => '#',
        }
    }

    /// Parse a glyph back into a kind.
    #[inline]
    pub fn from_glyph(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.glyph() == c)
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
