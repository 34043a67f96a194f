//! Collaborator seams of the grid.
//!
//! - [`ChangeListener`] is pushed every committed tile mutation, in
//!   mutation order. The renderer coalesces these into dirty rectangles.
//! - [`ProtectedProvider`] tells the decay process which tiles are
//!   guarded by something else (a building site, a flag) and must not
//!   grow back.
//! - [`BlockingProvider`] is the read-only predicate pathfinding and
//!   connectivity code evaluate per candidate tile.

/// Receives a call after every committed tile mutation.
///
/// Calls are synchronous and arrive in exactly the order the grid was
/// mutated. Implementations must not assume two calls belong to the
/// same tick.
pub trait ChangeListener: Send {
    /// `line_length` tiles starting at `(x, y)` and running along the row
    /// changed.
    fn on_row_changed(&mut self, x: u16, y: u16, line_length: u16);
}

/// Listener that ignores every notification.
///
/// Installed by default so the grid works headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl ChangeListener for NullListener {
    fn on_row_changed(&mut self, _x: u16, _y: u16, _line_length: u16) {}
}

/// Answers whether a tile is currently protected from decay.
pub trait ProtectedProvider: Send {
    /// True if the tile must keep its current ground.
    fn is_protected(&self, x: u16, y: u16) -> bool;
}

/// Provider under which no tile is ever protected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unprotected;

impl ProtectedProvider for Unprotected {
    fn is_protected(&self, _x: u16, _y: u16) -> bool {
        false
    }
}

/// Read-only blocking predicate for pathfinding and connectivity.
pub trait BlockingProvider {
    /// True if the tile cannot be entered at all.
    fn is_blocked(&self, x: u16, y: u16) -> bool;
}
