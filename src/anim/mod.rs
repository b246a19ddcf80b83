//! Animation sequencing.
//!
//! An [`EditPlan`](crate::plan::EditPlan) is animated by spawning one
//! [`AnimationTask`] per action. The [`Sequencer`] owns the tasks and feeds
//! them settle-delay wake-ups and transition completions.

mod sequencer;
mod task;

pub use sequencer::Sequencer;
pub use task::{AnimationTask, Step, TaskId, TaskKind, TaskState};
