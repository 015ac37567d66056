//! Port traits — the boundary between dispatch logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Dispatcher (domain)
//! ```
//!
//! Driven adapters implement these traits; the dispatch core consumes
//! them and never touches hardware directly.

use log::warn;

/// Board side-effect boundary. The `reset` builtin calls this; on real
/// hardware execution does not return.
pub trait BoardPort {
    /// Hardware/process reset.
    fn reset(&mut self);
}

/// No-op board for hosts without hardware attached.
pub struct NullBoard;

impl BoardPort for NullBoard {
    fn reset(&mut self) {
        warn!("board: reset requested but no board attached");
    }
}
