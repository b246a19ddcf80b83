//! Mount and Layout: named places a rotator can attach to.

use super::rect::Rect;
use crate::error::{Error, Result};

/// A named row on screen that can host a rotator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mount {
    /// Name the rotator looks the mount up by.
    pub id: String,
    /// Requested position and size.
    pub rect: Rect,
    /// Text shown before the rotator starts.
    pub content: Option<String>,
    /// Stretch to the right edge of the screen on resize.
    pub fill: bool,
}

impl Mount {
    /// A mount at `rect` with no prior content.
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            content: None,
            fill: false,
        }
    }

    /// Set the text shown before the rotator starts.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Stretch the mount to the right edge of the screen.
    #[must_use]
    pub const fn fill(mut self) -> Self {
        self.fill = true;
        self
    }
}

/// Flat list of mounts for one screen size.
#[derive(Clone, Debug)]
pub struct Layout {
    mounts: Vec<Mount>,
    terminal_size: (u16, u16),
}

impl Layout {
    /// Create an empty layout for the given terminal size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            mounts: Vec::new(),
            terminal_size: (width, height),
        }
    }

    /// Add a mount, replacing any mount with the same id.
    pub fn add_mount(&mut self, mount: Mount) {
        self.mounts.retain(|existing| existing.id != mount.id);
        self.mounts.push(mount);
    }

    /// Builder form of [`add_mount`](Self::add_mount).
    #[must_use]
    pub fn with_mount(mut self, mount: Mount) -> Self {
        self.add_mount(mount);
        self
    }

    /// Look up a mount by id.
    pub fn mount(&self, id: &str) -> Result<&Mount> {
        self.mounts
            .iter()
            .find(|mount| mount.id == id)
            .ok_or_else(|| Error::MissingContainer(id.to_string()))
    }

    /// Area a mount occupies at the current terminal size.
    pub fn area(&self, id: &str) -> Result<Rect> {
        let mount = self.mount(id)?;
        let (width, height) = self.terminal_size;
        let mut rect = mount.rect;
        if mount.fill {
            rect.width = width.saturating_sub(rect.x);
        }
        Ok(rect.clamp_to(width, height))
    }

    /// Terminal size the layout was computed for.
    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Record a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mount() {
        let layout = Layout::new(80, 24);
        let err = layout.mount("hero").unwrap_err();
        assert!(matches!(err, Error::MissingContainer(ref id) if id == "hero"));
    }

    #[test]
    fn test_mount_lookup_and_replace() {
        let mut layout = Layout::new(80, 24).with_mount(Mount::new("hero", Rect::row(0, 0, 20)));
        layout.add_mount(Mount::new("hero", Rect::row(2, 3, 30)).with_content("Loading"));
        let mount = layout.mount("hero").unwrap();
        assert_eq!(mount.rect, Rect::row(2, 3, 30));
        assert_eq!(mount.content.as_deref(), Some("Loading"));
    }

    #[test]
    fn test_fill_tracks_resize() {
        let mut layout = Layout::new(80, 24)
            .with_mount(Mount::new("wide", Rect::row(10, 0, 5)).fill())
            .with_mount(Mount::new("narrow", Rect::row(10, 1, 50)));
        assert_eq!(layout.area("wide").unwrap().width, 70);

        layout.resize(40, 24);
        assert_eq!(layout.terminal_size(), (40, 24));
        assert_eq!(layout.area("wide").unwrap().width, 30);
        assert_eq!(layout.area("narrow").unwrap().width, 30);
    }
}
