use skirmish_core::Point;

/// A found route: the cells from origin to destination, both included, and
/// the accumulated movement cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    cells: Vec<Point>,
    cost: u32,
}

impl Route {
    pub fn new(cells: Vec<Point>, cost: u32) -> Self {
        Self { cells, cost }
    }

    /// The route of a unit already standing at its goal.
    pub fn stay(at: Point) -> Self {
        Self::new(vec![at], 0)
    }

    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of cells, origin and destination included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn origin(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    #[inline]
    pub fn destination(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Number of moves needed to walk the route.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Where a unit standing on `current` should move next.
    ///
    /// A unit that strayed off the route is sent back to its first cell.
    /// Returns `None` at the destination and for an empty route.
    pub fn next_step(&self, current: Point) -> Option<Point> {
        match self.cells.iter().position(|&p| p == current) {
            Some(i) => self.cells.get(i + 1).copied(),
            None => self.origin(),
        }
    }
}

impl IntoIterator for Route {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
