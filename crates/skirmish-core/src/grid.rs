//! The [`TerrainGrid`] type: terrain plus occupancy for every cell of a map.
//!
//! A `TerrainGrid` is plain owned data (no interior mutability), so a shared
//! reference can be handed to any number of path searches running on
//! different threads.
//!
//! Grids can be written and read back as ASCII, one row per line, using the
//! glyphs of [`TerrainKind::glyph`]. Occupants are not part of the text form.

use std::fmt;
use std::str::FromStr;

use crate::actor::Occupant;
use crate::geom::{Point, Range, RangeIter};
use crate::terrain::TerrainKind;

/// Error returned when parsing a [`TerrainGrid`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseGridError {
    #[error("map text contains no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown terrain glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: Point },
}

// ---------------------------------------------------------------------------
// TerrainGrid
// ---------------------------------------------------------------------------

/// A rectangular map of [`TerrainKind`]s with at most one [`Occupant`] per
/// cell, anchored at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    bounds: Range,
    terrain: Vec<TerrainKind>,
    occupants: Vec<Option<Occupant>>,
}

impl TerrainGrid {
    /// Create a new grid of the given dimensions, filled with clear ground.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width.max(0), height.max(0));
        Self {
            bounds,
            terrain: vec![TerrainKind::default(); bounds.len()],
            occupants: vec![None; bounds.len()],
        }
    }

    /// The extent of the map.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is on the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Terrain at `p`, or `None` off the map.
    #[inline]
    pub fn terrain(&self, p: Point) -> Option<TerrainKind> {
        self.bounds.index_of(p).map(|i| self.terrain[i])
    }

    /// Set the terrain at `p`. No-op if `p` is off the map.
    pub fn set_terrain(&mut self, p: Point, kind: TerrainKind) {
        if let Some(i) = self.bounds.index_of(p) {
            self.terrain[i] = kind;
        }
    }

    /// Set the terrain of every cell of `r` that lies on the map.
    pub fn fill(&mut self, r: Range, kind: TerrainKind) {
        for p in self.bounds.intersect(r) {
            self.set_terrain(p, kind);
        }
    }

    /// The actor standing on `p`, if any.
    #[inline]
    pub fn occupant(&self, p: Point) -> Option<Occupant> {
        self.bounds.index_of(p).and_then(|i| self.occupants[i])
    }

    /// Put `occupant` on `p`, returning whatever stood there before.
    /// No-op (returns `None`) if `p` is off the map.
    pub fn place(&mut self, p: Point, occupant: Occupant) -> Option<Occupant> {
        let i = self.bounds.index_of(p)?;
        self.occupants[i].replace(occupant)
    }

    /// Clear the occupant of `p`, returning it.
    pub fn remove(&mut self, p: Point) -> Option<Occupant> {
        let i = self.bounds.index_of(p)?;
        self.occupants[i].take()
    }

    /// Row-major iterator over `(Point, TerrainKind)` pairs.
    pub fn iter(&self) -> TerrainIter<'_> {
        TerrainIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

impl FromStr for TerrainGrid {
    type Err = ParseGridError;

    /// Parse one row per non-blank line. Leading and trailing whitespace of
    /// each line is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(ParseGridError::Empty);
        };
        let width = first.chars().count();

        let mut grid = TerrainGrid::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseGridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let at = Point::new(x as i32, y as i32);
                let kind =
                    TerrainKind::from_glyph(glyph).ok_or(ParseGridError::UnknownGlyph { glyph, at })?;
                grid.set_terrain(at, kind);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let kind = self.terrain(Point::new(x, y)).unwrap_or_default();
                write!(f, "{}", kind.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TerrainIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, TerrainKind)` pairs in a [`TerrainGrid`].
pub struct TerrainIter<'a> {
    grid: &'a TerrainGrid,
    inner: RangeIter,
}

impl<'a> Iterator for TerrainIter<'a> {
    type Item = (Point, TerrainKind);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        Some((p, self.grid.terrain(p).unwrap_or_default()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorId, PlayerId};

    #[test]
    fn grid_new_and_terrain() {
        let g = TerrainGrid::new(4, 3);
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.terrain(Point::new(0, 0)), Some(TerrainKind::Clear));
        assert_eq!(g.terrain(Point::new(4, 0)), None);
        assert_eq!(g.iter().count(), 12);
    }

    #[test]
    fn grid_set_and_fill() {
        let mut g = TerrainGrid::new(4, 3);
        g.set_terrain(Point::new(2, 1), TerrainKind::Water);
        assert_eq!(g.terrain(Point::new(2, 1)), Some(TerrainKind::Water));

        // Fill is clipped to the map.
        g.fill(Range::new(3, 0, 10, 10), TerrainKind::Rock);
        assert_eq!(g.terrain(Point::new(3, 2)), Some(TerrainKind::Rock));
        assert_eq!(g.terrain(Point::new(2, 2)), Some(TerrainKind::Clear));
    }

    #[test]
    fn grid_occupants() {
        let mut g = TerrainGrid::new(3, 3);
        let p = Point::new(1, 1);
        let tank = Occupant::unit(ActorId(7), PlayerId(1), false);
        assert_eq!(g.place(p, tank), None);
        assert_eq!(g.occupant(p), Some(tank));
        assert_eq!(g.remove(p), Some(tank));
        assert_eq!(g.occupant(p), None);
        assert_eq!(g.place(Point::new(9, 9), tank), None);
        assert_eq!(g.occupant(Point::new(9, 9)), None);
    }

    #[test]
    fn grid_parse_and_display() {
        let text = "
            ..#
            ~=,
        ";
        let g: TerrainGrid = text.parse().unwrap();
        assert_eq!(g.size(), Point::new(3, 2));
        assert_eq!(g.terrain(Point::new(2, 0)), Some(TerrainKind::Rock));
        assert_eq!(g.terrain(Point::new(0, 1)), Some(TerrainKind::Water));
        assert_eq!(g.terrain(Point::new(1, 1)), Some(TerrainKind::Road));
        assert_eq!(g.terrain(Point::new(2, 1)), Some(TerrainKind::Rough));
        assert_eq!(g.to_string(), "..#\n~=,\n");
    }

    #[test]
    fn grid_parse_errors() {
        assert_eq!("".parse::<TerrainGrid>(), Err(ParseGridError::Empty));
        assert_eq!(
            "...\n..".parse::<TerrainGrid>(),
            Err(ParseGridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "..\n.x".parse::<TerrainGrid>(),
            Err(ParseGridError::UnknownGlyph {
                glyph: 'x',
                at: Point::new(1, 1)
            })
        );
    }
}
