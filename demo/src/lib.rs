//! Random skirmish battlefield shared by the demo binary and its tests.
//!
//! Demonstrates: per-locomotor costs, bidirectional unit routes, crushing,
//! approaching a building, and many searches sharing the arena pool from
//! separate threads.

use std::fmt;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rand::prelude::*;
use rand::rngs::StdRng;
use skirmish_core::{
    ActorId, Occupant, OccupantKind, PlayerId, Point, Range, TerrainGrid, TerrainKind,
};
use skirmish_paths::{Locomotor, LocomotorInfo, PathError, PathFinder, Route, SearchConfig};

pub const WIDTH: i32 = 64;
pub const HEIGHT: i32 = 22;

const PLAYER: PlayerId = PlayerId(1);
const ENEMY: PlayerId = PlayerId(2);
const REFINERY: ActorId = ActorId(1000);
const ENEMY_SQUAD: u32 = 6;

// Colours
const COL_CLEAR: Color = Color::Rgb { r: 70, g: 90, b: 50 };
const COL_ROAD: Color = Color::Rgb { r: 150, g: 140, b: 110 };
const COL_ROUGH: Color = Color::Rgb { r: 110, g: 80, b: 50 };
const COL_WATER: Color = Color::Rgb { r: 40, g: 90, b: 200 };
const COL_ROCK: Color = Color::Rgb { r: 120, g: 120, b: 130 };
const COL_STRUCTURE: Color = Color::Rgb { r: 220, g: 50, b: 50 };
const COL_ENEMY: Color = Color::Rgb { r: 255, g: 120, b: 80 };
const COL_UNITS: [Color; 4] = [
    Color::Rgb { r: 255, g: 220, b: 80 },
    Color::Rgb { r: 80, g: 220, b: 255 },
    Color::Rgb { r: 120, g: 255, b: 120 },
    Color::Rgb { r: 255, g: 120, b: 255 },
];

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Infantry,
    Jeep,
    Tank,
}

impl UnitKind {
    pub fn locomotor(self) -> LocomotorInfo {
        match self {
            UnitKind::Infantry => LocomotorInfo::foot(),
            UnitKind::Jeep => LocomotorInfo::wheeled(),
            UnitKind::Tank => LocomotorInfo::tracked(),
        }
    }

    fn glyph(self) -> char {
        match self {
            UnitKind::Infantry => 'I',
            UnitKind::Jeep => 'J',
            UnitKind::Tank => 'T',
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Infantry => "infantry",
            UnitKind::Jeep => "jeep",
            UnitKind::Tank => "tank",
        };
        f.write_str(name)
    }
}

/// What a unit was told to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Move(Point),
    /// Walk up to the enemy refinery.
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub actor: ActorId,
    pub kind: UnitKind,
    pub pos: Point,
    pub order: Order,
}

// ---------------------------------------------------------------------------
// Skirmish
// ---------------------------------------------------------------------------

/// A generated battlefield with the player's units and their orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skirmish {
    pub grid: TerrainGrid,
    pub units: Vec<Unit>,
    pub refinery: Vec<Point>,
    pub config: SearchConfig,
}

impl Skirmish {
    /// Generate a battlefield. The same seed always gives the same map.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = TerrainGrid::new(WIDTH, HEIGHT);

        for _ in 0..12 {
            blob(&mut rng, &mut grid, TerrainKind::Rough, 2..5);
        }
        for _ in 0..2 {
            blob(&mut rng, &mut grid, TerrainKind::Water, 3..6);
        }
        for _ in 0..10 {
            blob(&mut rng, &mut grid, TerrainKind::Rock, 1..3);
        }
        let road_y = rng.random_range(3..HEIGHT - 3);
        grid.fill(Range::new(0, road_y, WIDTH, road_y + 1), TerrainKind::Road);

        let (cx, cy) = (WIDTH / 2, HEIGHT / 2);
        let refinery_area = Range::new(cx - 1, cy - 1, cx + 2, cy + 1);
        grid.fill(refinery_area.intersect(grid.bounds()), TerrainKind::Clear);
        let refinery: Vec<Point> = refinery_area.iter().collect();
        for &p in &refinery {
            grid.place(p, Occupant::structure(REFINERY, ENEMY));
        }

        // A crushable enemy squad guarding the middle of the map.
        for i in 0..ENEMY_SQUAD {
            if let Some(p) = random_free(&mut rng, &grid, WIDTH / 2 - 8..WIDTH / 2 + 8) {
                grid.place(p, Occupant::unit(ActorId(2000 + i), ENEMY, true));
            }
        }

        let kinds = [
            UnitKind::Infantry,
            UnitKind::Jeep,
            UnitKind::Tank,
            UnitKind::Infantry,
            UnitKind::Tank,
            UnitKind::Jeep,
        ];
        let mut units = Vec::new();
        for (i, &kind) in kinds.iter().enumerate() {
            let Some(pos) = random_free(&mut rng, &grid, 0..6) else {
                continue;
            };
            let order = if i == 0 {
                Order::Attack
            } else {
                match random_free(&mut rng, &grid, WIDTH - 6..WIDTH) {
                    Some(goal) => Order::Move(goal),
                    None => continue,
                }
            };
            let actor = ActorId(i as u32 + 1);
            grid.place(
                pos,
                Occupant::unit(actor, PLAYER, kind == UnitKind::Infantry),
            );
            units.push(Unit {
                actor,
                kind,
                pos,
                order,
            });
        }

        let budget = (WIDTH * HEIGHT * 4) as usize;
        Self {
            grid,
            units,
            refinery,
            config: SearchConfig::default().with_max_expansions(budget),
        }
    }

    /// Route one unit according to its order.
    pub fn route(&self, unit: &Unit) -> Result<Route, PathError> {
        let loco = Locomotor::new(&self.grid, unit.kind.locomotor());
        let finder = PathFinder::new(&self.grid, &loco).with_config(self.config);
        match unit.order {
            Order::Move(goal) => finder.find_unit_path(PLAYER, unit.pos, goal),
            Order::Attack => finder.find_adjacent_path(PLAYER, unit.pos, &self.refinery),
        }
    }

    /// Route every unit, each on its own thread.
    pub fn route_all(&self) -> Vec<Result<Route, PathError>> {
        std::thread::scope(|s| {
            let handles: Vec<_> = self
                .units
                .iter()
                .map(|unit| s.spawn(move || self.route(unit)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }

    /// Draw the map with every route overlaid, followed by one summary line
    /// per unit.
    pub fn render(
        &self,
        routes: &[Result<Route, PathError>],
        out: &mut impl Write,
    ) -> io::Result<()> {
        let bounds = self.grid.bounds();
        let mut overlay: Vec<Option<usize>> = vec![None; bounds.len()];
        for (i, route) in routes.iter().enumerate() {
            let Ok(route) = route else {
                continue;
            };
            for &p in route {
                if let Some(idx) = bounds.index_of(p) {
                    overlay[idx] = Some(i);
                }
            }
        }

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let p = Point::new(x, y);
                let (ch, color) = self.cell_look(p, &overlay);
                queue!(out, SetForegroundColor(color), Print(ch))?;
            }
            queue!(out, ResetColor, Print('\n'))?;
        }

        for (i, (unit, route)) in self.units.iter().zip(routes).enumerate() {
            let color = COL_UNITS[i % COL_UNITS.len()];
            let order = match unit.order {
                Order::Move(goal) => format!("move to {goal}"),
                Order::Attack => "attack refinery".to_string(),
            };
            let outcome = match route {
                Ok(route) => format!("{} steps, cost {}", route.steps(), route.cost()),
                Err(e) => e.to_string(),
            };
            queue!(
                out,
                SetForegroundColor(color),
                Print(format!(
                    "{} {} at {}: {order}: {outcome}",
                    unit.kind.glyph(),
                    unit.kind,
                    unit.pos
                )),
                ResetColor,
                Print('\n'),
            )?;
        }
        out.flush()
    }

    fn cell_look(&self, p: Point, overlay: &[Option<usize>]) -> (char, Color) {
        if let Some(i) = self.units.iter().position(|u| u.pos == p) {
            return (self.units[i].kind.glyph(), COL_UNITS[i % COL_UNITS.len()]);
        }
        match self.grid.occupant(p).map(|o| o.kind) {
            Some(OccupantKind::Structure) => return ('R', COL_STRUCTURE),
            Some(OccupantKind::Unit { .. }) => return ('e', COL_ENEMY),
            None => {}
        }
        if let Some(i) = self.grid.bounds().index_of(p).and_then(|idx| overlay[idx]) {
            return ('*', COL_UNITS[i % COL_UNITS.len()]);
        }
        let kind = self.grid.terrain(p).unwrap_or_default();
        let color = match kind {
            TerrainKind::Clear => COL_CLEAR,
            TerrainKind::Road => COL_ROAD,
            TerrainKind::Rough => COL_ROUGH,
            TerrainKind::Water => COL_WATER,
            TerrainKind::Rock => COL_ROCK,
        };
        (kind.glyph(), color)
    }
}

/// Paint a rough disc of `kind` at a random spot.
fn blob(rng: &mut StdRng, grid: &mut TerrainGrid, kind: TerrainKind, radius: std::ops::Range<i32>) {
    let center = Point::new(rng.random_range(0..grid.width()), rng.random_range(0..grid.height()));
    let r = rng.random_range(radius);
    let area = Range::new(center.x - r, center.y - r, center.x + r + 1, center.y + r + 1);
    for p in area.intersect(grid.bounds()) {
        let d = p - center;
        if d.x * d.x + d.y * d.y <= r * r {
            grid.set_terrain(p, kind);
        }
    }
}

/// A random unoccupied land cell with `x` in `xs`.
fn random_free(rng: &mut StdRng, grid: &TerrainGrid, xs: std::ops::Range<i32>) -> Option<Point> {
    for _ in 0..500 {
        let p = Point::new(rng.random_range(xs.clone()), rng.random_range(0..grid.height()));
        let land = matches!(
            grid.terrain(p),
            Some(TerrainKind::Clear | TerrainKind::Road | TerrainKind::Rough)
        );
        if land && grid.occupant(p).is_none() {
            return Some(p);
        }
    }
    None
}
