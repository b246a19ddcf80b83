//! Terminal output: colours, the frame buffer and the terminal stage.

mod color;
mod output;
mod stage;

pub use color::{Palette, Rgb};
pub use output::OutputBuffer;
pub use stage::{TerminalStage, Transitions};
