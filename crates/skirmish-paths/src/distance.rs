use skirmish_core::Point;

/// Cost of one orthogonal step over clear ground.
pub const STRAIGHT_COST: u32 = 100;

/// Octile distance from `a` to `b` in movement-cost units.
///
/// Diagonal steps are weighted 3400/24 (≈ 100·√2), straight steps 100.
#[inline]
pub fn octile(a: Point, b: Point) -> u32 {
    let d = (a - b).abs();
    let diag = d.x.min(d.y) as u32;
    let straight = (d.x - d.y).unsigned_abs();
    3400 * diag / 24 + STRAIGHT_COST * straight
}

/// Heuristic estimating the remaining cost to `destination` by octile
/// distance.
pub fn default_estimator(destination: Point) -> impl Fn(Point) -> Option<u32> + Clone {
    move |p| Some(octile(p, destination))
}

/// Heuristic that always answers zero, turning a search into a uniform-cost
/// flood.
pub fn zero_estimator() -> impl Fn(Point) -> Option<u32> + Clone {
    |_| Some(0)
}
