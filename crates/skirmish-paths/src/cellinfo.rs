use skirmish_core::{Point, Range};

/// Sentinel `min_cost` of a cell no search has reached.
pub const UNVISITED: u32 = u32::MAX;

/// Search progress of one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    /// Best known accumulated cost from the seeds.
    pub min_cost: u32,
    /// Cell this one was reached from. Equal to the cell itself until the
    /// cell is relaxed, and for seeds.
    pub path: Point,
    /// Closed: popped and finalized.
    pub seen: bool,
}

impl CellInfo {
    /// The state every cell starts in.
    #[inline]
    pub const fn unvisited(at: Point) -> Self {
        Self {
            min_cost: UNVISITED,
            path: at,
            seen: false,
        }
    }

    /// Whether some search reached this cell.
    #[inline]
    pub const fn is_reached(&self) -> bool {
        self.min_cost != UNVISITED
    }
}

// ---------------------------------------------------------------------------
// CellInfoGrid
// ---------------------------------------------------------------------------

/// One [`CellInfo`] per cell of a map extent.
///
/// Arenas are large and short-lived sessions need one each, so they are
/// recycled through an [`ArenaPool`](crate::ArenaPool) instead of being
/// allocated per search.
#[derive(Debug, Clone, Default)]
pub struct CellInfoGrid {
    rng: Range,
    cells: Vec<CellInfo>,
}

impl CellInfoGrid {
    /// Allocate an arena for `rng`, every entry unvisited.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            cells: rng.iter().map(CellInfo::unvisited).collect(),
        }
    }

    /// The extent this arena covers.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the arena covers no cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Put every entry back into the unvisited state.
    pub fn reset(&mut self) {
        let rng = self.rng;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = CellInfo::unvisited(rng.point_at(i));
        }
    }

    /// Whether every entry is unvisited.
    pub fn is_pristine(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, c)| *c == CellInfo::unvisited(self.rng.point_at(i)))
    }

    /// State of `p`, or `None` when `p` is outside the arena.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&CellInfo> {
        self.rng.index_of(p).map(|i| &self.cells[i])
    }

    /// Mutable state of `p`, or `None` when `p` is outside the arena.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut CellInfo> {
        self.rng.index_of(p).map(|i| &mut self.cells[i])
    }

    /// Whether `p` is closed. Cells outside the arena are never closed.
    #[inline]
    pub fn is_closed(&self, p: Point) -> bool {
        self.get(p).is_some_and(|c| c.seen)
    }

    /// Accumulated cost of `p`, `UNVISITED` when unreached or outside.
    #[inline]
    pub fn min_cost(&self, p: Point) -> u32 {
        self.get(p).map_or(UNVISITED, |c| c.min_cost)
    }

    /// Follow predecessor links from `end` back to a seed. The returned
    /// points run from `end` to the seed, both included.
    pub(crate) fn trace_back(&self, end: Point) -> Vec<Point> {
        let mut chain = vec![end];
        let mut cur = end;
        while let Some(cell) = self.get(cur) {
            if cell.path == cur {
                break;
            }
            cur = cell.path;
            chain.push(cur);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_arena_is_pristine() {
        let arena = CellInfoGrid::new(Range::new(0, 0, 4, 3));
        assert_eq!(arena.len(), 12);
        assert!(arena.is_pristine());
        let c = arena.get(Point::new(2, 1)).unwrap();
        assert_eq!(c.min_cost, UNVISITED);
        assert_eq!(c.path, Point::new(2, 1));
        assert!(!c.seen);
        assert!(!c.is_reached());
    }

    #[test]
    fn offset_range_addressing() {
        let mut arena = CellInfoGrid::new(Range::new(5, 5, 8, 8));
        assert!(arena.get(Point::new(4, 5)).is_none());
        arena.get_mut(Point::new(7, 7)).unwrap().seen = true;
        assert!(arena.is_closed(Point::new(7, 7)));
        assert!(!arena.is_closed(Point::new(0, 0)));
        assert_eq!(arena.min_cost(Point::new(0, 0)), UNVISITED);
    }

    #[test]
    fn reset_restores_every_entry() {
        let mut arena = CellInfoGrid::new(Range::with_size(3, 3));
        for p in Range::with_size(3, 3) {
            let c = arena.get_mut(p).unwrap();
            c.min_cost = 7;
            c.path = Point::ZERO;
            c.seen = true;
        }
        assert!(!arena.is_pristine());
        arena.reset();
        assert!(arena.is_pristine());
    }

    #[test]
    fn trace_back_follows_predecessors() {
        let mut arena = CellInfoGrid::new(Range::with_size(4, 1));
        arena.get_mut(Point::new(0, 0)).unwrap().min_cost = 0;
        for x in 1..4 {
            let c = arena.get_mut(Point::new(x, 0)).unwrap();
            c.path = Point::new(x - 1, 0);
            c.min_cost = x as u32 * 100;
        }
        assert_eq!(
            arena.trace_back(Point::new(3, 0)),
            vec![
                Point::new(3, 0),
                Point::new(2, 0),
                Point::new(1, 0),
                Point::new(0, 0)
            ]
        );
        assert_eq!(arena.trace_back(Point::new(0, 0)), vec![Point::new(0, 0)]);
    }
}
