//! `TerminalStage`: draws word elements into one row of a terminal.
//!
//! Opacity is rendered as a blend from the row background to the
//! foreground colour. Widths are whole columns; a word narrower than its
//! text is clipped at a grapheme boundary. Transitions run for a fixed
//! `speed` and are sampled whenever the stage clock moves.

use super::color::Palette;
use super::output::OutputBuffer;
use crate::layout::Rect;
use crate::stage::{ElementId, LabelRegistry, Stage, Width};
use crate::text::ATTACHED_SPACE;
use bitflags::bitflags;
use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

bitflags! {
    /// Properties of a word with a transition in flight.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Transitions: u8 {
        /// Fading in or out.
        const OPACITY = 0b01;
        /// Growing or shrinking.
        const WIDTH = 0b10;
    }
}

/// Linear interpolation between two values over the stage speed.
#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    started: Instant,
}

impl Tween {
    const fn settled(value: f32, at: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: at,
        }
    }

    fn progress(&self, now: Instant, speed: Duration) -> f32 {
        if speed.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / speed.as_secs_f32()).min(1.0)
    }

    fn value(&self, now: Instant, speed: Duration) -> f32 {
        (self.to - self.from).mul_add(self.progress(now, speed), self.from)
    }

    fn finished(&self, now: Instant, speed: Duration) -> bool {
        now.saturating_duration_since(self.started) >= speed
    }
}

#[derive(Debug)]
struct Word {
    text: String,
    opacity: Tween,
    /// `None` while the width is automatic.
    width: Option<Tween>,
    running: Transitions,
}

impl Word {
    fn columns(&self, now: Instant, speed: Duration) -> u16 {
        self.width.map_or_else(
            || measure(&self.text),
            |width| to_columns(width.value(now, speed)),
        )
    }
}

fn measure(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_columns(width: f32) -> u16 {
    width.round().clamp(0.0, f32::from(u16::MAX)) as u16
}

/// Write at most `columns` columns of `text`, returning the columns used.
fn write_clipped(out: &mut OutputBuffer, text: &str, columns: u16) -> u16 {
    let mut used = 0u16;
    for grapheme in text.graphemes(true) {
        let width = measure(grapheme);
        if used.saturating_add(width) > columns {
            break;
        }
        if grapheme.starts_with(ATTACHED_SPACE) {
            out.write_str(" ");
        } else {
            out.write_str(grapheme);
        }
        used += width;
    }
    used
}

/// Stage rendering into a row of a terminal.
pub struct TerminalStage<W: Write> {
    writer: W,
    output: OutputBuffer,
    area: Rect,
    palette: Palette,
    speed: Duration,
    clock: Instant,
    next_id: u32,
    order: Vec<ElementId>,
    words: HashMap<ElementId, Word>,
    labels: LabelRegistry,
    interrupted: Vec<ElementId>,
    dirty: bool,
}

impl<W: Write> TerminalStage<W> {
    /// A stage drawing into `area` of `writer`, with transitions lasting
    /// `speed`.
    pub fn new(writer: W, area: Rect, speed: Duration) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            area,
            palette: Palette::default(),
            speed,
            clock: Instant::now(),
            next_id: 0,
            order: Vec::new(),
            words: HashMap::new(),
            labels: LabelRegistry::new(),
            interrupted: Vec::new(),
            dirty: true,
        }
    }

    /// Show `content` as a single visible element.
    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        let element = self.allocate(None);
        if let Some(word) = self.words.get_mut(&element) {
            word.text = content.to_string();
            word.opacity = Tween::settled(1.0, self.clock);
            word.width = None;
        }
        self
    }

    /// Use `palette` for the row.
    #[must_use]
    pub const fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Move the row, e.g. after a terminal resize.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.dirty = true;
    }

    /// Current row.
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Transition length.
    pub const fn speed(&self) -> Duration {
        self.speed
    }

    /// Transitions in flight for `element`.
    pub fn transitions(&self, element: ElementId) -> Transitions {
        self.words
            .get(&element)
            .map_or(Transitions::empty(), |word| word.running)
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Mutable access to the underlying writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Give back the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn allocate(&mut self, after: Option<ElementId>) -> ElementId {
        let element = ElementId(self.next_id);
        self.next_id += 1;

        let position = after
            .and_then(|anchor| self.order.iter().position(|id| *id == anchor))
            .map_or(0, |index| index + 1);
        self.order.insert(position, element);
        self.words.insert(
            element,
            Word {
                text: String::new(),
                opacity: Tween::settled(0.0, self.clock),
                width: Some(Tween::settled(0.0, self.clock)),
                running: Transitions::empty(),
            },
        );
        self.dirty = true;
        element
    }

    fn render(&mut self) {
        let now = self.clock;
        let out = &mut self.output;
        out.clear();
        if self.area.is_empty() {
            return;
        }

        out.cursor_move(self.area.x, self.area.y);
        out.set_bg(self.palette.bg);
        let mut remaining = self.area.width;
        for id in &self.order {
            let Some(word) = self.words.get(id) else {
                continue;
            };
            let columns = word.columns(now, self.speed).min(remaining);
            if columns == 0 {
                continue;
            }
            out.set_fg(self.palette.ink(word.opacity.value(now, self.speed)));
            let used = write_clipped(out, &word.text, columns);
            out.write_spaces(columns - used);
            remaining -= columns;
        }
        out.write_spaces(remaining);
        out.reset_attrs();
    }
}

impl<W: Write> Stage for TerminalStage<W> {
    fn create(&mut self, after: Option<ElementId>) -> ElementId {
        self.allocate(after)
    }

    fn detach(&mut self, element: ElementId) {
        self.order.retain(|id| *id != element);
        self.words.remove(&element);
        self.interrupted.retain(|id| *id != element);
        self.dirty = true;
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(word) = self.words.get_mut(&element) {
            word.text = text.to_string();
            self.dirty = true;
        }
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        let Some(word) = self.words.get_mut(&element) else {
            return;
        };
        if word.running.contains(Transitions::OPACITY) {
            // The replaced transition still owes its completion.
            self.interrupted.push(element);
        }
        let current = word.opacity.value(self.clock, self.speed);
        word.opacity = Tween {
            from: current,
            to: opacity.clamp(0.0, 1.0),
            started: self.clock,
        };
        word.running.insert(Transitions::OPACITY);
        self.dirty = true;
    }

    fn set_width(&mut self, element: ElementId, width: Width) {
        let Some(word) = self.words.get_mut(&element) else {
            return;
        };
        if word.running.contains(Transitions::WIDTH) {
            self.interrupted.push(element);
        }
        match width {
            Width::Auto => {
                word.width = None;
                word.running.remove(Transitions::WIDTH);
            }
            Width::Fixed(columns) => {
                let current = f32::from(word.columns(self.clock, self.speed));
                word.width = Some(Tween {
                    from: current,
                    to: f32::from(columns),
                    started: self.clock,
                });
                word.running.insert(Transitions::WIDTH);
            }
        }
        self.dirty = true;
    }

    fn measure(&self, text: &str) -> u16 {
        measure(text)
    }

    fn elements(&self) -> Vec<ElementId> {
        self.order.clone()
    }

    fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    fn labels_mut(&mut self) -> &mut LabelRegistry {
        &mut self.labels
    }

    fn advance(&mut self, now: Instant) -> Vec<ElementId> {
        self.clock = now;
        let mut done = std::mem::take(&mut self.interrupted);
        for id in &self.order {
            let Some(word) = self.words.get_mut(id) else {
                continue;
            };
            if word.running.is_empty() {
                continue;
            }
            self.dirty = true;
            if word.running.contains(Transitions::OPACITY)
                && word.opacity.finished(now, self.speed)
            {
                word.running.remove(Transitions::OPACITY);
                done.push(*id);
            }
            let width_done = word
                .width
                .is_some_and(|width| width.finished(now, self.speed));
            if word.running.contains(Transitions::WIDTH) && width_done {
                word.running.remove(Transitions::WIDTH);
                done.push(*id);
            }
        }
        done
    }

    fn present(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.render();
        self.dirty = false;
        self.output.flush_to(&mut self.writer)
    }
}
