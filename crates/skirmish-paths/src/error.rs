use thiserror::Error;

/// Why a [`PathFinder`](crate::PathFinder) gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// Every frontier ran dry without reaching the goal.
    #[error("no route to the destination")]
    NoRoute,
    /// The configured expansion cap was reached first.
    #[error("search abandoned after {expanded} expansions")]
    ExpansionLimit { expanded: usize },
}
