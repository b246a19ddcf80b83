//! # Wordwheel
//!
//! Word-level sentence rotation for terminal widgets.
//!
//! A rotator cycles a row of text through a fixed set of sentences. Rather
//! than swapping whole sentences it animates each word: kept words stay
//! put, changed words cross-fade, removed words collapse and new words
//! expand into place.
//!
//! ## Core Concepts
//!
//! - **Tokenizer**: sentences become word and punctuation tokens
//! - **Edit planner**: greedy lookahead alignment into keep, substitute,
//!   remove and insert actions with a cost
//! - **Tour builder**: nearest-neighbour cycle through all sentences over
//!   the pairwise cost matrix
//! - **Sequencer**: one small state machine per action, advanced by
//!   settle timers and transition completions
//! - **Stage**: the rendering collaborator; a headless [`MemoryStage`] and
//!   a [`TerminalStage`] ship with the crate
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::{Duration, Instant};
//! use wordwheel::{MemoryStage, Orchestrator, RotatorConfig};
//!
//! let mut rotator = Orchestrator::new(
//!     RotatorConfig::default(),
//!     &["Build fast.", "Ship faster.", "Sleep well."],
//!     MemoryStage::new(),
//! )?;
//! let start = Instant::now();
//! rotator.start(start)?;
//! rotator.poll(start + Duration::from_millis(16))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod anim;
pub mod error;
pub mod layout;
pub mod plan;
pub mod rotator;
pub mod stage;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use anim::{Sequencer, TaskKind};
pub use error::{Error, Result};
pub use layout::{Layout, Mount, Rect};
pub use plan::{plan, EditAction, EditPlan, Tour, TourBuilder};
pub use rotator::{Orchestrator, Rotator, RotatorConfig, RotatorHandle, RotatorState};
pub use stage::{ElementId, MemoryStage, Stage, Width};
pub use terminal::{Palette, Rgb, TerminalStage};
pub use text::{tokenize, Token, TokenSequence};
