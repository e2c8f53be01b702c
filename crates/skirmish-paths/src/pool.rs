//! Recycling of [`CellInfoGrid`] arenas between searches.

use std::collections::VecDeque;

use parking_lot::Mutex;
use skirmish_core::Range;

use crate::cellinfo::CellInfoGrid;

static GLOBAL: ArenaPool = ArenaPool::new();

/// A thread-safe pool of cell-state arenas.
///
/// Many units may ask for routes during the same simulation tick, each on
/// its own worker thread. The pool lock is only held while an arena is
/// pushed or popped; resetting a reused arena happens outside of it.
pub struct ArenaPool {
    arenas: Mutex<VecDeque<CellInfoGrid>>,
}

impl ArenaPool {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self {
            arenas: parking_lot::const_mutex(VecDeque::new()),
        }
    }

    /// The process-wide pool used by sessions that were not given one.
    pub fn global() -> &'static ArenaPool {
        &GLOBAL
    }

    /// Take an arena covering `rng` with every entry unvisited.
    ///
    /// Pooled arenas of another extent (left over from a previous map) are
    /// dropped on the way. A fresh arena is allocated when nothing fits.
    pub fn acquire(&self, rng: Range) -> CellInfoGrid {
        loop {
            let next = self.arenas.lock().pop_front();
            let Some(mut arena) = next else {
                break;
            };
            if arena.range() != rng {
                log::debug!(
                    "discarding pooled cell arena for {} (wanted {})",
                    arena.range(),
                    rng
                );
                continue;
            }
            arena.reset();
            return arena;
        }

        log::debug!("allocating cell arena for {rng}");
        CellInfoGrid::new(rng)
    }

    /// Return an arena for later reuse. It is reset on its next
    /// [`acquire`](Self::acquire), not now.
    pub fn release(&self, arena: CellInfoGrid) {
        self.arenas.lock().push_back(arena);
    }

    /// Number of idle arenas.
    pub fn len(&self) -> usize {
        self.arenas.lock().len()
    }

    /// Whether no arena is idle.
    pub fn is_empty(&self) -> bool {
        self.arenas.lock().is_empty()
    }

    /// Drop every idle arena.
    pub fn clear(&self) {
        self.arenas.lock().clear();
    }
}

impl Default for ArenaPool {
    fn default() -> Self {
        Self::new()
    }
}
