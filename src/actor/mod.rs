//! Actor threads feeding the rotator loop.
//!
//! Each actor runs on its own thread and sends into one shared
//! crossbeam channel; the loop owning the orchestrator drains it.
//!
//! ```text
//! ┌──────────────┐   Frame(Tick)    ┌──────────────┐
//! │ Frame Ticker │ ───────────────▶ │              │
//! └──────────────┘                  │  Rotator     │
//! ┌──────────────┐   Resize / Quit  │  loop        │──▶ Orchestrator
//! │ Input Thread │ ───────────────▶ │              │
//! └──────────────┘                  │              │
//! ┌──────────────┐   Stop           │              │
//! │RotatorHandle │ ───────────────▶ │              │
//! └──────────────┘                  └──────────────┘
//! ```

mod input;
mod messages;
mod ticker;

pub use input::InputActor;
pub use messages::{LoopEvent, Tick};
pub use ticker::FrameTicker;
