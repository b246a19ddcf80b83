//! Plan module: word-level edit planning between sentences.
//!
//! - [`plan`]: the greedy lookahead planner producing an [`EditPlan`]
//! - [`TourBuilder`]: orders all sentences into a low-cost rotation [`Tour`]

mod action;
mod planner;
mod tour;

pub use action::{EditAction, EditPlan};
pub use planner::plan;
pub use tour::{Tour, TourBuilder, TourLeg};
