//! `MemoryStage`: a headless stage that records what it was asked to do.

use super::{ElementId, LabelRegistry, Stage, Width};
use crate::text::ATTACHED_SPACE;
use std::collections::HashMap;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// One recorded stage operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOp {
    /// An element was created.
    Create {
        /// The new element.
        element: ElementId,
        /// The element it was placed after.
        after: Option<ElementId>,
    },
    /// An element was detached.
    Detach(ElementId),
    /// An element's text changed.
    SetText(ElementId, String),
    /// An opacity transition started.
    SetOpacity(ElementId, f32),
    /// A width change was requested.
    SetWidth(ElementId, Width),
}

/// State of one element held by a [`MemoryStage`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryElement {
    /// Current text.
    pub text: String,
    /// Current opacity.
    pub opacity: f32,
    /// Current width.
    pub width: Width,
}

/// Stage that keeps everything in memory.
///
/// Transitions complete on the next call to [`Stage::advance`], in the
/// order they were started.
#[derive(Debug, Default)]
pub struct MemoryStage {
    next_id: u32,
    order: Vec<ElementId>,
    elements: HashMap<ElementId, MemoryElement>,
    labels: LabelRegistry,
    pending: Vec<ElementId>,
    log: Vec<StageOp>,
}

impl MemoryStage {
    /// An empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stage already showing `content` as a single element.
    pub fn with_content(content: &str) -> Self {
        let mut stage = Self::new();
        let element = stage.allocate(None);
        if let Some(state) = stage.elements.get_mut(&element) {
            state.text = content.to_string();
            state.opacity = 1.0;
            state.width = Width::Auto;
        }
        stage
    }

    /// State of `element`, if it is live.
    pub fn element(&self, element: ElementId) -> Option<&MemoryElement> {
        self.elements.get(&element)
    }

    /// Text of every live element, in display order.
    pub fn text(&self) -> String {
        self.collect_text(|_| true)
    }

    /// Text of the live elements that are at least partly visible.
    pub fn visible_text(&self) -> String {
        self.collect_text(|state| state.opacity > 0.0)
    }

    /// Operations recorded so far.
    pub fn log(&self) -> &[StageOp] {
        &self.log
    }

    /// Take and clear the recorded operations.
    pub fn take_log(&mut self) -> Vec<StageOp> {
        std::mem::take(&mut self.log)
    }

    /// Elements with a transition waiting to complete.
    pub fn pending(&self) -> &[ElementId] {
        &self.pending
    }

    fn collect_text(&self, keep: impl Fn(&MemoryElement) -> bool) -> String {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter(|state| keep(state))
            .map(|state| state.text.replace(ATTACHED_SPACE, " "))
            .collect()
    }

    fn allocate(&mut self, after: Option<ElementId>) -> ElementId {
        let element = ElementId(self.next_id);
        self.next_id += 1;

        let position = after
            .and_then(|anchor| self.order.iter().position(|id| *id == anchor))
            .map_or(0, |index| index + 1);
        self.order.insert(position, element);
        self.elements.insert(
            element,
            MemoryElement {
                text: String::new(),
                opacity: 0.0,
                width: Width::Fixed(0),
            },
        );
        element
    }
}

impl Stage for MemoryStage {
    fn create(&mut self, after: Option<ElementId>) -> ElementId {
        let element = self.allocate(after);
        self.log.push(StageOp::Create { element, after });
        element
    }

    fn detach(&mut self, element: ElementId) {
        self.order.retain(|id| *id != element);
        self.elements.remove(&element);
        self.pending.retain(|id| *id != element);
        self.log.push(StageOp::Detach(element));
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.text = text.to_string();
        }
        self.log.push(StageOp::SetText(element, text.to_string()));
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.opacity = opacity;
            self.pending.push(element);
        }
        self.log.push(StageOp::SetOpacity(element, opacity));
    }

    fn set_width(&mut self, element: ElementId, width: Width) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.width = width;
            if matches!(width, Width::Fixed(_)) {
                self.pending.push(element);
            }
        }
        self.log.push(StageOp::SetWidth(element, width));
    }

    fn measure(&self, text: &str) -> u16 {
        u16::try_from(text.width()).unwrap_or(u16::MAX)
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

    fn advance(&mut self, _now: Instant) -> Vec<ElementId> {
        std::mem::take(&mut self.pending)
    }
}
