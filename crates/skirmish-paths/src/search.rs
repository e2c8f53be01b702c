use skirmish_core::{ActorId, PlayerId, Point, Range};

use crate::cellinfo::{CellInfo, CellInfoGrid, UNVISITED};
use crate::config::SearchConfig;
use crate::distance::{default_estimator, zero_estimator};
use crate::pool::ArenaPool;
use crate::queue::FrontierQueue;
use crate::traits::{MapBounds, Mobility};

/// Estimate of the remaining cost from a cell; `None` prunes the cell.
pub type Heuristic<'a> = Box<dyn Fn(Point) -> Option<u32> + 'a>;

/// Extra blocking rule; `true` means the cell may not be entered.
pub type Blocker<'a> = Box<dyn Fn(Point) -> bool + 'a>;

/// Neighbour offsets in expansion order. Changing this order changes which
/// of several equally cheap routes is returned, so it is fixed.
const DIRECTIONS: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
];

/// Diagonal steps cost 34/24 of the cell cost (≈ √2 in 1/24ths).
const DIAGONAL_NUM: u32 = 34;
const DIAGONAL_DEN: u32 = 24;

const LANE_BIAS: u32 = 1;

/// One best-first search over a map: a cell-state arena, a frontier queue
/// and the rules deciding which cells may be entered.
///
/// A session is created per route request. Its arena comes from an
/// [`ArenaPool`] and goes back there when the session is dropped (or
/// [`dispose`](Self::dispose)d, which is the same thing spelled out).
///
/// Drive it with [`expand`](Self::expand), directly or through a
/// [`PathFinder`](crate::PathFinder).
pub struct PathSearch<'a> {
    bounds: Range,
    mobility: &'a dyn Mobility,
    owner: PlayerId,
    pool: &'a ArenaPool,
    cells: CellInfoGrid,
    queue: FrontierQueue,
    heuristic: Heuristic<'a>,
    custom_block: Option<Blocker<'a>>,
    ignored: Option<ActorId>,
    check_for_blocked: bool,
    in_reverse: bool,
    lane_bias: u32,
    expanded: usize,
}

impl<'a> PathSearch<'a> {
    /// Start an unseeded search whose arena comes from the global pool.
    ///
    /// The heuristic defaults to zero (uniform-cost search) and dynamic
    /// occupants are not checked.
    pub fn new(map: &impl MapBounds, mobility: &'a dyn Mobility, owner: PlayerId) -> Self {
        Self::new_in(map, mobility, owner, ArenaPool::global())
    }

    /// Like [`new`](Self::new), taking the arena from `pool`.
    pub fn new_in(
        map: &impl MapBounds,
        mobility: &'a dyn Mobility,
        owner: PlayerId,
        pool: &'a ArenaPool,
    ) -> Self {
        let bounds = map.bounds();
        Self {
            bounds,
            mobility,
            owner,
            pool,
            cells: pool.acquire(bounds),
            queue: FrontierQueue::new(),
            heuristic: Box::new(zero_estimator()),
            custom_block: None,
            ignored: None,
            check_for_blocked: false,
            in_reverse: false,
            lane_bias: LANE_BIAS,
            expanded: 0,
        }
    }

    /// A search from `from` toward `target`, using the octile heuristic.
    pub fn from_point(
        map: &impl MapBounds,
        mobility: &'a dyn Mobility,
        owner: PlayerId,
        from: Point,
        target: Point,
        check_for_blocked: bool,
    ) -> Self {
        Self::from_points(map, mobility, owner, [from], target, check_for_blocked)
    }

    /// A search from any of `froms` toward `target`.
    pub fn from_points(
        map: &impl MapBounds,
        mobility: &'a dyn Mobility,
        owner: PlayerId,
        froms: impl IntoIterator<Item = Point>,
        target: Point,
        check_for_blocked: bool,
    ) -> Self {
        let mut search = Self::new(map, mobility, owner)
            .with_heuristic(default_estimator(target))
            .with_check_for_blocked(check_for_blocked);
        search.add_initial_cells(froms);
        search
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Run as the destination side of a bidirectional search. This flips
    /// which cell parity the lane bias penalizes so both sides favour the
    /// same lanes.
    pub fn in_reverse(mut self) -> Self {
        self.in_reverse = true;
        self
    }

    /// Refuse cells for which `block` returns `true`.
    pub fn with_custom_blocker(mut self, block: impl Fn(Point) -> bool + 'a) -> Self {
        self.custom_block = Some(Box::new(block));
        self
    }

    /// Treat `obstacle` as if it were not on the map.
    pub fn with_ignored_obstacle(mut self, obstacle: ActorId) -> Self {
        self.ignored = Some(obstacle);
        self
    }

    /// Replace the heuristic. Cells already seeded keep their queue keys.
    pub fn with_heuristic(mut self, heuristic: impl Fn(Point) -> Option<u32> + 'a) -> Self {
        self.set_heuristic(heuristic);
        self
    }

    /// Drop the lane bias, leaving pure terrain costs.
    pub fn without_lane_bias(mut self) -> Self {
        self.lane_bias = 0;
        self
    }

    /// Whether cells held by other mobile units count as blocked.
    pub fn with_check_for_blocked(mut self, check: bool) -> Self {
        self.check_for_blocked = check;
        self
    }

    /// Apply the per-session parts of `config`.
    pub fn with_config(mut self, config: &SearchConfig) -> Self {
        self.check_for_blocked = config.check_for_blocked;
        self.lane_bias = if config.lane_bias { LANE_BIAS } else { 0 };
        self
    }

    /// In-place form of [`with_heuristic`](Self::with_heuristic).
    pub fn set_heuristic(&mut self, heuristic: impl Fn(Point) -> Option<u32> + 'a) {
        self.heuristic = Box::new(heuristic);
    }

    // -----------------------------------------------------------------------
    // Seeding and expansion
    // -----------------------------------------------------------------------

    /// Register `p` as a start cell with zero cost. Cells off the map are
    /// ignored.
    pub fn add_initial_cell(&mut self, p: Point) {
        if !self.bounds.contains(p) {
            return;
        }
        let key = (self.heuristic)(p).unwrap_or(u32::MAX);
        if let Some(cell) = self.cells.get_mut(p) {
            *cell = CellInfo {
                min_cost: 0,
                path: p,
                seen: false,
            };
            self.queue.push(p, key);
        }
    }

    /// Register several start cells.
    pub fn add_initial_cells(&mut self, cells: impl IntoIterator<Item = Point>) {
        for p in cells {
            self.add_initial_cell(p);
        }
    }

    /// Close the cheapest open cell and relax its neighbours.
    ///
    /// Returns the closed cell. If only stale queue entries were left, the
    /// last of them is returned even though it was closed earlier; `None`
    /// means the queue was already empty.
    pub fn expand(&mut self) -> Option<Point> {
        let (mut p, _) = self.queue.pop()?;
        while self.cells.is_closed(p) {
            match self.queue.pop() {
                Some((next, _)) => p = next,
                None => return Some(p),
            }
        }

        let here = match self.cells.get_mut(p) {
            Some(cell) => {
                cell.seen = true;
                cell.min_cost
            }
            None => return Some(p),
        };
        self.expanded += 1;

        if self.mobility.movement_cost(p).is_none() {
            return Some(p);
        }

        for d in DIRECTIONS {
            let n = p + d;
            if !self.bounds.contains(n) || self.cells.is_closed(n) {
                continue;
            }

            let Some(cell_cost) = self.step_cost(p, n) else {
                continue;
            };
            if !self
                .mobility
                .can_enter(n, self.owner, self.ignored, self.check_for_blocked)
            {
                continue;
            }
            if self.custom_block.as_ref().is_some_and(|block| block(n)) {
                continue;
            }
            let Some(est) = (self.heuristic)(n) else {
                continue;
            };

            let new_cost = here.saturating_add(cell_cost);
            let Some(cell) = self.cells.get_mut(n) else {
                continue;
            };
            if new_cost >= cell.min_cost {
                continue;
            }
            cell.path = p;
            cell.min_cost = new_cost;
            self.queue.push(n, new_cost.saturating_add(est));
        }

        Some(p)
    }

    /// Cost this search charges for stepping from `from` onto the adjacent
    /// cell `to`: the terrain cost of `to`, scaled for diagonals, plus the
    /// lane bias. `None` when `to` cannot be crossed.
    pub fn step_cost(&self, from: Point, to: Point) -> Option<u32> {
        let d = to - from;
        let mut cost = self.mobility.movement_cost(to)?;
        if d.is_diagonal() {
            cost = cost.saturating_mul(DIAGONAL_NUM) / DIAGONAL_DEN;
        }
        Some(cost.saturating_add(self.lane_penalty(to, d)))
    }

    /// Bias against entering `n` by step `d`, so that units heading the same
    /// way fan out over alternating lanes instead of queueing on one.
    fn lane_penalty(&self, n: Point, d: Point) -> u32 {
        let flip = i32::from(self.in_reverse);
        let ux = (n.x + flip) & 1;
        let uy = (n.y + flip) & 1;

        let mut bias = 0;
        if (ux == 0 && d.y < 0) || (ux == 1 && d.y > 0) {
            bias += self.lane_bias;
        }
        if (uy == 0 && d.x < 0) || (uy == 1 && d.x > 0) {
            bias += self.lane_bias;
        }
        bias
    }

    /// Give the arena back to the pool now instead of at end of scope.
    pub fn dispose(self) {
        drop(self);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether nothing is left to expand.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether `p` has been closed by this search.
    #[inline]
    pub fn is_closed(&self, p: Point) -> bool {
        self.cells.is_closed(p)
    }

    /// Best known cost of reaching `p`, `None` when unreached.
    #[inline]
    pub fn min_cost(&self, p: Point) -> Option<u32> {
        match self.cells.min_cost(p) {
            UNVISITED => None,
            c => Some(c),
        }
    }

    /// The cell `p` was reached from. Seeds and unreached cells are their
    /// own predecessor.
    #[inline]
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        self.cells.get(p).map(|c| c.path)
    }

    /// Heuristic estimate for `p`.
    #[inline]
    pub fn estimate(&self, p: Point) -> Option<u32> {
        (self.heuristic)(p)
    }

    /// Read access to the whole arena.
    #[inline]
    pub fn cells(&self) -> &CellInfoGrid {
        &self.cells
    }

    /// Number of cells closed so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of queued frontier entries, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.in_reverse
    }

    #[inline]
    pub fn ignored_obstacle(&self) -> Option<ActorId> {
        self.ignored
    }
}

impl Drop for PathSearch<'_> {
    fn drop(&mut self) {
        let cells = std::mem::take(&mut self.cells);
        if !cells.is_empty() {
            self.pool.release(cells);
        }
    }
}
