//! Stage: the rendering collaborator the animation core drives.
//!
//! The core never draws anything itself. It creates and detaches word
//! elements, mutates their text, opacity and width, moves their position
//! labels, and waits for the stage to report that a started transition has
//! finished. Two stages ship with the crate:
//!
//! - [`MemoryStage`]: headless, records every operation, finishes all
//!   transitions on the next [`Stage::advance`]
//! - [`TerminalStage`](crate::terminal::TerminalStage): draws a mounted
//!   terminal row with timed fades and width animations

mod memory;
mod registry;

pub use memory::{MemoryElement, MemoryStage, StageOp};
pub use registry::{LabelRegistry, Side, WordLabel};

use std::io;
use std::time::Instant;

/// Opaque handle to one word element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Horizontal extent of a word element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Width {
    /// Natural width of the current text.
    #[default]
    Auto,
    /// Explicit width in columns.
    Fixed(u16),
}

/// A surface that displays word elements.
///
/// Transition contract: every call to [`set_opacity`](Stage::set_opacity)
/// and every [`set_width`](Stage::set_width) with [`Width::Fixed`] starts a
/// transition that later yields exactly one completion for that element
/// from [`advance`](Stage::advance), even if the value did not change.
/// Text changes and [`Width::Auto`] apply immediately and yield nothing.
pub trait Stage {
    /// Create an element placed right after `after`, or first.
    ///
    /// New elements start with no text, zero opacity and a fixed width of
    /// zero, without any transition.
    fn create(&mut self, after: Option<ElementId>) -> ElementId;

    /// Remove an element from the display.
    fn detach(&mut self, element: ElementId);

    /// Replace an element's text.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Start an opacity transition (0.0 hidden, 1.0 fully visible).
    fn set_opacity(&mut self, element: ElementId, opacity: f32);

    /// Start a width transition, or snap back to the natural width.
    fn set_width(&mut self, element: ElementId, width: Width);

    /// Rendered width of `text`, in the stage's width units.
    fn measure(&self, text: &str) -> u16;

    /// Live elements in display order.
    fn elements(&self) -> Vec<ElementId>;

    /// Position labels of the live elements.
    fn labels(&self) -> &LabelRegistry;

    /// Mutable access to the position labels.
    fn labels_mut(&mut self) -> &mut LabelRegistry;

    /// Move the stage clock to `now` and return the elements whose
    /// transitions finished.
    fn advance(&mut self, now: Instant) -> Vec<ElementId>;

    /// Push the current state to the output device.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}
