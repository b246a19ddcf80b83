//! The rotator: configuration, the clock-driven orchestrator and the
//! terminal runtime around it.

mod config;
mod orchestrator;
mod runtime;

pub use config::RotatorConfig;
pub use orchestrator::{Orchestrator, RotatorState, TickTimer};
pub use runtime::{Rotator, RotatorHandle};
