//! Layout module: named mount points on the terminal.
//!
//! A rotator attaches to a mount by id, the way a widget attaches to a
//! container element. Mount areas are recomputed on terminal resize; there
//! is no tree, just a flat list.

mod mount;
mod rect;

pub use mount::{Layout, Mount};
pub use rect::Rect;
