//! Drivers that run [`PathSearch`] sessions to completion.

use skirmish_core::{ActorId, PlayerId, Point, Range};

use crate::config::SearchConfig;
use crate::distance::{default_estimator, zero_estimator};
use crate::error::PathError;
use crate::pool::ArenaPool;
use crate::route::Route;
use crate::search::PathSearch;
use crate::traits::{MapBounds, Mobility};

/// Route requests for one map and one kind of unit.
///
/// A finder is cheap to build and holds no search state itself: every call
/// opens fresh sessions (arenas from the pool) and drops them before
/// returning, on success and failure alike.
///
/// ```
/// use skirmish_core::{PlayerId, Point, TerrainGrid};
/// use skirmish_paths::{Locomotor, LocomotorInfo, PathFinder, SearchConfig};
///
/// let grid: TerrainGrid = "
///     ......
///     .###..
///     ...#..
///     ......
/// ".parse().unwrap();
/// let foot = Locomotor::new(&grid, LocomotorInfo::foot());
/// let finder = PathFinder::new(&grid, &foot).with_config(SearchConfig::exact());
/// let route = finder
///     .find_unit_path(PlayerId(1), Point::new(0, 0), Point::new(2, 2))
///     .unwrap();
/// assert_eq!(route.origin(), Some(Point::new(0, 0)));
/// assert_eq!(route.destination(), Some(Point::new(2, 2)));
/// ```
#[derive(Clone, Copy)]
pub struct PathFinder<'a> {
    bounds: Range,
    mobility: &'a dyn Mobility,
    pool: &'a ArenaPool,
    config: SearchConfig,
}

impl<'a> PathFinder<'a> {
    /// A finder using the default [`SearchConfig`] and the global pool.
    pub fn new(map: &impl MapBounds, mobility: &'a dyn Mobility) -> Self {
        Self {
            bounds: map.bounds(),
            mobility,
            pool: ArenaPool::global(),
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Take arenas from `pool` instead of the global one.
    pub fn with_pool(mut self, pool: &'a ArenaPool) -> Self {
        self.pool = pool;
        self
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// An unseeded session configured like the ones this finder runs.
    pub fn search(&self, owner: PlayerId) -> PathSearch<'a> {
        PathSearch::new_in(&self.bounds, self.mobility, owner, self.pool).with_config(&self.config)
    }

    // -----------------------------------------------------------------------
    // Generic drivers
    // -----------------------------------------------------------------------

    /// Expand `search` until it closes `destination`.
    pub fn find_path(
        &self,
        search: &mut PathSearch<'_>,
        destination: Point,
    ) -> Result<Route, PathError> {
        self.find_path_where(search, |p| p == destination)
    }

    /// Expand `search` until it closes a cell accepted by `is_goal`.
    pub fn find_path_where(
        &self,
        search: &mut PathSearch<'_>,
        is_goal: impl Fn(Point) -> bool,
    ) -> Result<Route, PathError> {
        let mut expanded = 0;
        loop {
            self.check_budget(expanded)?;
            let Some(p) = search.expand() else {
                break;
            };
            expanded += 1;
            if is_goal(p) {
                let mut cells = search.cells().trace_back(p);
                cells.reverse();
                let route = Route::new(cells, search.min_cost(p).unwrap_or(0));
                log::trace!(
                    "route to {p}: {} cells, cost {}, {expanded} expansions",
                    route.len(),
                    route.cost()
                );
                return Ok(route);
            }
        }
        log::debug!("no route after {expanded} expansions");
        Err(PathError::NoRoute)
    }

    /// Alternate single expansions of `forward` (seeded at the origin) and
    /// `reverse` (seeded at the destination) until they meet.
    ///
    /// A side whose frontier is empty is skipped. The meeting cell is the
    /// first cell one side closes that the other side has already closed.
    pub fn find_bidi_path(
        &self,
        forward: &mut PathSearch<'_>,
        reverse: &mut PathSearch<'_>,
    ) -> Result<Route, PathError> {
        let mut expanded = 0;
        while !forward.is_exhausted() || !reverse.is_exhausted() {
            if !forward.is_exhausted() {
                self.check_budget(expanded)?;
                expanded += 1;
                if let Some(p) = forward.expand() {
                    if meets(reverse, p) {
                        return Ok(join(forward, reverse, p, expanded));
                    }
                }
            }

            if !reverse.is_exhausted() {
                self.check_budget(expanded)?;
                expanded += 1;
                if let Some(p) = reverse.expand() {
                    if meets(forward, p) {
                        return Ok(join(forward, reverse, p, expanded));
                    }
                }
            }
        }
        log::debug!("no route after {expanded} expansions");
        Err(PathError::NoRoute)
    }

    fn check_budget(&self, expanded: usize) -> Result<(), PathError> {
        match self.config.max_expansions {
            Some(max) if expanded >= max => {
                log::debug!("search abandoned after {expanded} expansions");
                Err(PathError::ExpansionLimit { expanded })
            }
            _ => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Unit movement
    // -----------------------------------------------------------------------

    /// Route a unit of `owner` from `from` to `target`.
    pub fn find_unit_path(
        &self,
        owner: PlayerId,
        from: Point,
        target: Point,
    ) -> Result<Route, PathError> {
        self.unit_path(owner, from, target, None)
    }

    /// Like [`find_unit_path`](Self::find_unit_path), treating `obstacle`
    /// as absent. Used to route into a structure's cell, e.g. a unit
    /// entering a building.
    pub fn find_unit_path_ignoring(
        &self,
        owner: PlayerId,
        from: Point,
        target: Point,
        obstacle: ActorId,
    ) -> Result<Route, PathError> {
        self.unit_path(owner, from, target, Some(obstacle))
    }

    fn unit_path(
        &self,
        owner: PlayerId,
        from: Point,
        target: Point,
        ignored: Option<ActorId>,
    ) -> Result<Route, PathError> {
        if !self.bounds.contains(from) || !self.bounds.contains(target) {
            log::debug!("route {from} -> {target} leaves the map");
            return Err(PathError::NoRoute);
        }
        if from == target {
            return Ok(Route::stay(from));
        }

        let mut forward = self.search(owner).with_heuristic(default_estimator(target));
        let mut reverse = self
            .search(owner)
            .with_heuristic(default_estimator(from))
            .in_reverse();
        if let Some(actor) = ignored {
            forward = forward.with_ignored_obstacle(actor);
            reverse = reverse.with_ignored_obstacle(actor);
        }
        forward.add_initial_cell(from);
        reverse.add_initial_cell(target);

        self.find_bidi_path(&mut forward, &mut reverse)
    }

    /// Route a unit from `from` to any free cell next to `footprint`, such
    /// as a building it is ordered to attack or repair.
    ///
    /// A unit already adjacent stays where it is.
    pub fn find_adjacent_path(
        &self,
        owner: PlayerId,
        from: Point,
        footprint: &[Point],
    ) -> Result<Route, PathError> {
        let targets = adjacent_cells(footprint, self.bounds);
        if targets.contains(&from) {
            return Ok(Route::stay(from));
        }
        let Some(&anchor) = footprint.first() else {
            return Err(PathError::NoRoute);
        };
        if !self.bounds.contains(from) {
            log::debug!("adjacent route from {from} leaves the map");
            return Err(PathError::NoRoute);
        }

        // Seeds are queued under the zero heuristic so that every one of
        // them is tried before any expansion; only then aim at the unit.
        let mut reverse = self
            .search(owner)
            .with_heuristic(zero_estimator())
            .in_reverse();
        reverse.add_initial_cells(targets);
        reverse.set_heuristic(default_estimator(from));

        let mut forward = self.search(owner).with_heuristic(default_estimator(anchor));
        forward.add_initial_cell(from);

        self.find_bidi_path(&mut forward, &mut reverse)
    }
}

/// Whether `p` has been finalized by `other`.
fn meets(other: &PathSearch<'_>, p: Point) -> bool {
    other.is_closed(p) && other.min_cost(p).is_some()
}

/// Stitch the two halves of a bidirectional search at `meet`.
///
/// The reverse half's costs were accumulated walking toward the origin, so
/// they charge the wrong cell of every step. That half is re-priced as the
/// forward search would walk it.
fn join(forward: &PathSearch<'_>, reverse: &PathSearch<'_>, meet: Point, expanded: usize) -> Route {
    let mut cells = forward.cells().trace_back(meet);
    cells.reverse();
    let meet_at = cells.len() - 1;
    cells.extend(reverse.cells().trace_back(meet).into_iter().skip(1));

    let cost = cells[meet_at..]
        .windows(2)
        .fold(forward.min_cost(meet).unwrap_or(0), |acc, step| {
            acc.saturating_add(forward.step_cost(step[0], step[1]).unwrap_or(0))
        });
    log::trace!(
        "bidirectional route met at {meet}: {} cells, cost {cost}, {expanded} expansions",
        cells.len()
    );
    Route::new(cells, cost)
}

/// The in-bounds cells 8-adjacent to some cell of `footprint` that are not
/// part of it, in row-major order.
pub fn adjacent_cells(footprint: &[Point], bounds: Range) -> Vec<Point> {
    let mut cells: Vec<Point> = footprint
        .iter()
        .flat_map(|c| Range::new(c.x - 1, c.y - 1, c.x + 2, c.y + 2))
        .filter(|&p| bounds.contains(p) && !footprint.contains(&p))
        .collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotor::{Locomotor, LocomotorInfo};
    use skirmish_core::{Occupant, TerrainGrid, TerrainKind};

    const ME: PlayerId = PlayerId(1);
    const ENEMY: PlayerId = PlayerId(2);

    fn assert_connected(route: &Route) {
        for pair in route.cells().windows(2) {
            assert!(
                pair[0].is_adjacent(pair[1]),
                "{} and {} are not adjacent",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn optimal_diagonal_on_open_grid() {
        let grid = TerrainGrid::new(5, 5);
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let pool = ArenaPool::new();
        let finder = PathFinder::new(&grid, &foot)
            .with_config(SearchConfig::exact())
            .with_pool(&pool);

        let route = finder
            .find_unit_path(ME, Point::new(0, 0), Point::new(4, 4))
            .unwrap();
        assert_eq!(route.cost(), 4 * 141);
        assert_eq!(
            route.cells(),
            &[
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 2),
                Point::new(3, 3),
                Point::new(4, 4),
            ]
        );
        // Both sessions went back to the pool.
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn single_direction_matches() {
        let grid = TerrainGrid::new(5, 5);
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot).with_config(SearchConfig::exact());
        let mut search = finder
            .search(ME)
            .with_heuristic(default_estimator(Point::new(4, 4)));
        search.add_initial_cell(Point::ZERO);
        let route = finder.find_path(&mut search, Point::new(4, 4)).unwrap();
        assert_eq!(route.cost(), 564);
        assert_eq!(route.len(), 5);
        assert_connected(&route);
    }

    #[test]
    fn bidirectional_cost_charges_each_entered_cell_once() {
        let grid: TerrainGrid = ".,.".parse().unwrap();
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot).with_config(SearchConfig::exact());
        let (from, to) = (Point::new(0, 0), Point::new(2, 0));

        let route = finder.find_unit_path(ME, from, to).unwrap();
        assert_eq!(route.cells(), &[from, Point::new(1, 0), to]);
        assert_eq!(route.cost(), 125 + 100);

        let mut search = finder.search(ME);
        search.add_initial_cell(from);
        assert_eq!(finder.find_path(&mut search, to).unwrap().cost(), route.cost());
    }

    #[test]
    fn bidirectional_cost_on_mixed_terrain_matches_walk() {
        let grid: TerrainGrid = "
            ..,,,..=..
            .,~~~,.=..
            .,~~~,.=,,
            ..,,,..=..
        "
        .parse()
        .unwrap();
        let jeep = Locomotor::new(&grid, LocomotorInfo::wheeled());
        let finder = PathFinder::new(&grid, &jeep).with_config(SearchConfig::exact());
        let walker = finder.search(ME);

        for (from, to) in [
            (Point::new(0, 0), Point::new(9, 3)),
            (Point::new(0, 3), Point::new(9, 0)),
            (Point::new(9, 2), Point::new(0, 1)),
        ] {
            let route = finder.find_unit_path(ME, from, to).unwrap();
            let walked: u32 = route
                .cells()
                .windows(2)
                .map(|w| walker.step_cost(w[0], w[1]).unwrap())
                .sum();
            assert_eq!(route.cost(), walked, "{from} -> {to}");
        }
    }

    #[test]
    fn wall_without_gap_has_no_route() {
        let mut grid = TerrainGrid::new(5, 5);
        grid.fill(Range::new(2, 0, 3, 5), TerrainKind::Rock);
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot);
        assert_eq!(
            finder.find_unit_path(ME, Point::new(0, 2), Point::new(4, 2)),
            Err(PathError::NoRoute)
        );

        let mut search = finder.search(ME);
        search.add_initial_cell(Point::new(0, 2));
        assert_eq!(
            finder.find_path(&mut search, Point::new(4, 2)),
            Err(PathError::NoRoute)
        );
    }

    #[test]
    fn route_goes_around_obstacles() {
        let grid: TerrainGrid = "
            .......
            .#####.
            .....#.
            ####.#.
            .......
        "
        .parse()
        .unwrap();
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot);
        let route = finder
            .find_unit_path(ME, Point::new(0, 2), Point::new(0, 4))
            .unwrap();
        assert_eq!(route.origin(), Some(Point::new(0, 2)));
        assert_eq!(route.destination(), Some(Point::new(0, 4)));
        assert_connected(&route);
        for p in &route {
            assert_eq!(grid.terrain(*p), Some(TerrainKind::Clear));
        }
    }

    #[test]
    fn costs_are_symmetric_under_uniform_cost() {
        let grid: TerrainGrid = "
            ........
            ..#.....
            ..#..#..
            .....#..
            ###..#..
            ........
        "
        .parse()
        .unwrap();
        let foot = Locomotor::new(&grid, LocomotorInfo::uniform(100));
        let finder = PathFinder::new(&grid, &foot).with_config(SearchConfig::exact());
        let cost = |a: Point, b: Point| {
            let mut search = finder.search(ME);
            search.add_initial_cell(a);
            finder.find_path(&mut search, b).map(|r| r.cost())
        };
        let pairs = [
            (Point::new(0, 0), Point::new(7, 5)),
            (Point::new(1, 2), Point::new(6, 3)),
            (Point::new(0, 5), Point::new(4, 0)),
        ];
        let reverse_cost = |a: Point, b: Point| {
            let mut search = finder.search(ME).in_reverse();
            search.add_initial_cell(b);
            finder.find_path(&mut search, a).map(|r| r.cost())
        };
        for (a, b) in pairs {
            let there = cost(a, b).unwrap();
            let back = cost(b, a).unwrap();
            assert_eq!(there, back, "{a} <-> {b}");
            assert_eq!(reverse_cost(a, b).unwrap(), there, "reverse from {b} to {a}");
        }
    }

    #[test]
    fn identical_requests_give_identical_routes() {
        let grid: TerrainGrid = "
            ..,,..=====..
            .,,,.....,...
            ..~~~..#..,,.
            ..~~~..#.....
            =====..#..,..
        "
        .parse()
        .unwrap();
        let jeep = Locomotor::new(&grid, LocomotorInfo::wheeled());
        let finder = PathFinder::new(&grid, &jeep);
        let a = finder.find_unit_path(ME, Point::new(0, 4), Point::new(12, 0));
        let b = finder.find_unit_path(ME, Point::new(0, 4), Point::new(12, 0));
        assert!(a.is_ok());
        assert_eq!(a, b);
    }

    #[test]
    fn expansion_cap_is_reported() {
        let grid = TerrainGrid::new(20, 20);
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot)
            .with_config(SearchConfig::default().with_max_expansions(3));
        assert_eq!(
            finder.find_unit_path(ME, Point::new(0, 0), Point::new(19, 19)),
            Err(PathError::ExpansionLimit { expanded: 3 })
        );
    }

    #[test]
    fn trivial_and_off_map_requests() {
        let grid = TerrainGrid::new(3, 3);
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot);
        assert_eq!(
            finder.find_unit_path(ME, Point::new(1, 1), Point::new(1, 1)),
            Ok(Route::stay(Point::new(1, 1)))
        );
        assert_eq!(
            finder.find_unit_path(ME, Point::new(1, 1), Point::new(3, 1)),
            Err(PathError::NoRoute)
        );
    }

    #[test]
    fn ignored_obstacle_opens_the_corridor() {
        let mut grid = TerrainGrid::new(5, 1);
        grid.place(Point::new(2, 0), Occupant::structure(ActorId(7), ENEMY));
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot);
        let (from, to) = (Point::new(0, 0), Point::new(4, 0));

        assert_eq!(finder.find_unit_path(ME, from, to), Err(PathError::NoRoute));
        let route = finder
            .find_unit_path_ignoring(ME, from, to, ActorId(7))
            .unwrap();
        assert!(route.cells().contains(&Point::new(2, 0)));
        assert_eq!(route.len(), 5);
    }

    #[test]
    fn crushers_pass_crushable_enemies() {
        let mut grid = TerrainGrid::new(5, 1);
        grid.place(Point::new(2, 0), Occupant::unit(ActorId(3), ENEMY, true));
        let (from, to) = (Point::new(0, 0), Point::new(4, 0));

        let tank = Locomotor::new(&grid, LocomotorInfo::tracked());
        assert!(PathFinder::new(&grid, &tank).find_unit_path(ME, from, to).is_ok());

        let jeep = Locomotor::new(&grid, LocomotorInfo::wheeled());
        let finder = PathFinder::new(&grid, &jeep);
        assert_eq!(finder.find_unit_path(ME, from, to), Err(PathError::NoRoute));
        // Without occupant checks other units are ignored entirely.
        let relaxed = finder.with_config(SearchConfig {
            check_for_blocked: false,
            ..SearchConfig::default()
        });
        assert!(relaxed.find_unit_path(ME, from, to).is_ok());
    }

    #[test]
    fn adjacent_cells_ring() {
        let bounds = Range::with_size(6, 6);
        let ring = adjacent_cells(&[Point::new(2, 2), Point::new(3, 2)], bounds);
        assert_eq!(ring.len(), 10);
        assert_eq!(ring.first(), Some(&Point::new(1, 1)));
        assert_eq!(ring.last(), Some(&Point::new(4, 3)));
        assert!(!ring.contains(&Point::new(2, 2)));

        // Clipped at the map edge.
        assert_eq!(adjacent_cells(&[Point::ZERO], bounds).len(), 3);
        assert!(adjacent_cells(&[], bounds).is_empty());
    }

    #[test]
    fn adjacent_path_stops_next_to_the_footprint() {
        let mut grid = TerrainGrid::new(7, 7);
        let footprint = [Point::new(3, 3), Point::new(4, 3)];
        for p in footprint {
            grid.place(p, Occupant::structure(ActorId(40), ENEMY));
        }
        let foot = Locomotor::new(&grid, LocomotorInfo::foot());
        let finder = PathFinder::new(&grid, &foot);

        let route = finder
            .find_adjacent_path(ME, Point::new(0, 0), &footprint)
            .unwrap();
        assert_eq!(route.origin(), Some(Point::new(0, 0)));
        assert_connected(&route);
        let end = route.destination().unwrap();
        assert!(!footprint.contains(&end));
        assert!(footprint.iter().any(|f| f.is_adjacent(end)));

        assert_eq!(
            finder.find_adjacent_path(ME, Point::new(5, 4), &footprint),
            Ok(Route::stay(Point::new(5, 4)))
        );
        assert_eq!(
            finder.find_adjacent_path(ME, Point::new(0, 0), &[]),
            Err(PathError::NoRoute)
        );
    }
}
