/// Knobs shared by every search a [`PathFinder`](crate::PathFinder) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Treat cells occupied by other mobile units as blocked.
    pub check_for_blocked: bool,
    /// Add the lane bias penalty that spreads parallel routes over
    /// alternating lanes. Disable when exact costs matter.
    pub lane_bias: bool,
    /// Give up after this many expansions (both sides counted together for
    /// bidirectional searches). `None` searches until the frontier empties.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            check_for_blocked: true,
            lane_bias: true,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// Exact-cost settings: no lane bias, no dynamic occupants, no cap.
    pub const fn exact() -> Self {
        Self {
            check_for_blocked: false,
            lane_bias: false,
            max_expansions: None,
        }
    }

    /// Builder: cap the number of expansions.
    pub const fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }
}
