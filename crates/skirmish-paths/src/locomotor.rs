//! Terrain-based movement costs for a [`TerrainGrid`].

use skirmish_core::{ActorId, OccupantKind, PlayerId, Point, TerrainGrid, TerrainKind};

use crate::traits::Mobility;

/// How a class of unit moves: the cost of each terrain kind (`None` when it
/// cannot be crossed) and whether it drives over crushable enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocomotorInfo {
    pub costs: [Option<u32>; TerrainKind::COUNT],
    pub crushes: bool,
}

impl LocomotorInfo {
    /// Cost of crossing `kind`.
    #[inline]
    pub fn cost(&self, kind: TerrainKind) -> Option<u32> {
        self.costs[kind.index()]
    }

    /// Builder: override the cost of one terrain kind.
    pub fn with_cost(mut self, kind: TerrainKind, cost: Option<u32>) -> Self {
        self.costs[kind.index()] = cost;
        self
    }

    /// Infantry: slow on roads, fine on rough ground.
    pub const fn foot() -> Self {
        // Clear, Road, Rough, Water, Rock
        Self {
            costs: [Some(100), Some(100), Some(125), None, None],
            crushes: false,
        }
    }

    /// Wheeled vehicles: fast on roads, struggle on rough ground.
    pub const fn wheeled() -> Self {
        Self {
            costs: [Some(100), Some(75), Some(200), None, None],
            crushes: false,
        }
    }

    /// Tracked vehicles: crush infantry.
    pub const fn tracked() -> Self {
        Self {
            costs: [Some(100), Some(90), Some(140), None, None],
            crushes: true,
        }
    }

    /// Ships: water only.
    pub const fn naval() -> Self {
        Self {
            costs: [None, None, None, Some(100), None],
            crushes: false,
        }
    }

    /// Every crossable kind costs `cost`; water and rock are impassable.
    pub const fn uniform(cost: u32) -> Self {
        Self {
            costs: [Some(cost), Some(cost), Some(cost), None, None],
            crushes: false,
        }
    }
}

impl Default for LocomotorInfo {
    fn default() -> Self {
        Self::foot()
    }
}

/// [`Mobility`] of one locomotor over one terrain grid.
#[derive(Debug, Clone, Copy)]
pub struct Locomotor<'a> {
    grid: &'a TerrainGrid,
    info: LocomotorInfo,
}

impl<'a> Locomotor<'a> {
    pub fn new(grid: &'a TerrainGrid, info: LocomotorInfo) -> Self {
        Self { grid, info }
    }

    /// The grid this locomotor reads.
    #[inline]
    pub fn grid(&self) -> &'a TerrainGrid {
        self.grid
    }

    #[inline]
    pub fn info(&self) -> &LocomotorInfo {
        &self.info
    }
}

impl Mobility for Locomotor<'_> {
    fn movement_cost(&self, p: Point) -> Option<u32> {
        self.grid.terrain(p).and_then(|kind| self.info.cost(kind))
    }

    fn can_enter(
        &self,
        p: Point,
        owner: PlayerId,
        ignored: Option<ActorId>,
        check_for_blocked: bool,
    ) -> bool {
        let Some(occupant) = self.grid.occupant(p) else {
            return true;
        };
        if ignored == Some(occupant.actor) {
            return true;
        }
        match occupant.kind {
            OccupantKind::Structure => false,
            OccupantKind::Unit { crushable } => {
                !check_for_blocked || (crushable && self.info.crushes && occupant.owner != owner)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::Occupant;

    const ME: PlayerId = PlayerId(1);
    const ENEMY: PlayerId = PlayerId(2);

    #[test]
    fn terrain_costs() {
        let grid: TerrainGrid = ".=,~#".parse().unwrap();
        let jeep = Locomotor::new(&grid, LocomotorInfo::wheeled());
        assert_eq!(jeep.movement_cost(Point::new(0, 0)), Some(100));
        assert_eq!(jeep.movement_cost(Point::new(1, 0)), Some(75));
        assert_eq!(jeep.movement_cost(Point::new(2, 0)), Some(200));
        assert_eq!(jeep.movement_cost(Point::new(3, 0)), None);
        assert_eq!(jeep.movement_cost(Point::new(4, 0)), None);
        // Off the map is never crossable.
        assert_eq!(jeep.movement_cost(Point::new(5, 0)), None);

        let boat = Locomotor::new(&grid, LocomotorInfo::naval());
        assert_eq!(boat.movement_cost(Point::new(3, 0)), Some(100));
        assert_eq!(boat.movement_cost(Point::new(0, 0)), None);
    }

    #[test]
    fn with_cost_overrides_one_kind() {
        let info = LocomotorInfo::foot().with_cost(TerrainKind::Water, Some(300));
        assert_eq!(info.cost(TerrainKind::Water), Some(300));
        assert_eq!(info.cost(TerrainKind::Clear), Some(100));
    }

    #[test]
    fn structures_always_block_unless_ignored() {
        let mut grid = TerrainGrid::new(3, 1);
        let p = Point::new(1, 0);
        grid.place(p, Occupant::structure(ActorId(5), ENEMY));
        let loco = Locomotor::new(&grid, LocomotorInfo::foot());
        assert!(!loco.can_enter(p, ME, None, false));
        assert!(!loco.can_enter(p, ME, None, true));
        assert!(loco.can_enter(p, ME, Some(ActorId(5)), true));
        assert!(!loco.can_enter(p, ME, Some(ActorId(6)), true));
        assert!(loco.can_enter(Point::new(0, 0), ME, None, true));
    }

    #[test]
    fn units_block_only_when_checked() {
        let mut grid = TerrainGrid::new(3, 1);
        let p = Point::new(1, 0);
        grid.place(p, Occupant::unit(ActorId(9), ME, false));
        let loco = Locomotor::new(&grid, LocomotorInfo::tracked());
        assert!(loco.can_enter(p, ME, None, false));
        assert!(!loco.can_enter(p, ME, None, true));
        assert!(loco.can_enter(p, ME, Some(ActorId(9)), true));
    }

    #[test]
    fn crushers_drive_over_crushable_enemies() {
        let mut grid = TerrainGrid::new(3, 1);
        let enemy_infantry = Point::new(1, 0);
        let own_infantry = Point::new(2, 0);
        grid.place(enemy_infantry, Occupant::unit(ActorId(1), ENEMY, true));
        grid.place(own_infantry, Occupant::unit(ActorId(2), ME, true));

        let tank = Locomotor::new(&grid, LocomotorInfo::tracked());
        assert!(tank.can_enter(enemy_infantry, ME, None, true));
        assert!(!tank.can_enter(own_infantry, ME, None, true));

        let jeep = Locomotor::new(&grid, LocomotorInfo::wheeled());
        assert!(!jeep.can_enter(enemy_infantry, ME, None, true));
    }
}
