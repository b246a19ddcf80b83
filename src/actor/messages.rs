//! Message types for the rotator loop.
//!
//! Every actor feeds the same channel; the loop reacts to one
//! [`LoopEvent`] at a time.

use std::time::Duration;

/// A frame pulse from the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Events consumed by the rotator loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// Time to poll the orchestrator and redraw.
    Frame(Tick),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// The user pressed a quit key.
    Quit,

    /// A [`RotatorHandle`](crate::rotator::RotatorHandle) asked the loop to exit.
    Stop,

    /// The input thread hit an error.
    InputError(String),
}

impl LoopEvent {
    /// Whether the loop should exit on this event.
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Quit | Self::Stop)
    }
}
