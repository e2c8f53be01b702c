use skirmish_core::{ActorId, PlayerId, Point, Range, TerrainGrid};

/// The map extent a search runs on.
pub trait MapBounds {
    /// Rectangle containing every cell of the map.
    fn bounds(&self) -> Range;

    /// Whether `p` is a cell of the map.
    fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}

impl MapBounds for Range {
    fn bounds(&self) -> Range {
        *self
    }
}

impl MapBounds for TerrainGrid {
    fn bounds(&self) -> Range {
        TerrainGrid::bounds(self)
    }
}

/// Per-unit-type traversal rules. Searches only ever read from it.
pub trait Mobility {
    /// Cost of entering `p`, in the fixed-point units of the heuristics
    /// (100 = one orthogonal step over clear ground). `None` means the
    /// terrain cannot be crossed at all.
    fn movement_cost(&self, p: Point) -> Option<u32>;

    /// Whether a unit of `owner` may stand on `p`.
    ///
    /// `ignored` names one obstacle to treat as absent. When
    /// `check_for_blocked` is false, other mobile units are not considered.
    fn can_enter(
        &self,
        p: Point,
        owner: PlayerId,
        ignored: Option<ActorId>,
        check_for_blocked: bool,
    ) -> bool;
}

impl<M: Mobility + ?Sized> Mobility for &M {
    fn movement_cost(&self, p: Point) -> Option<u32> {
        (**self).movement_cost(p)
    }

    fn can_enter(
        &self,
        p: Point,
        owner: PlayerId,
        ignored: Option<ActorId>,
        check_for_blocked: bool,
    ) -> bool {
        (**self).can_enter(p, owner, ignored, check_for_blocked)
    }
}
