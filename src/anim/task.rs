//! Animation tasks: one small state machine per edit action.
//!
//! A task is a fixed list of steps chosen by its kind and a cursor into
//! that list. Each step either finishes on the spot (relabelling, cleanup,
//! detaching) or starts a stage transition and parks the task until the
//! stage reports that transition complete. Width changes first sleep for a
//! short settle delay. Steps are never skipped or reordered.
//!
//! ```text
//! Remove      FadeOut → Collapse → Detach
//! Substitute  Relabel → FadeOut → Resize → Reveal → Cleanup
//! Insert      Expand → Reveal → Cleanup
//! Keep        Relabel
//! ```

use crate::stage::{ElementId, Stage, Width, WordLabel};
use std::time::{Duration, Instant};

/// Identifier of a live task.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// The edit action a task animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Word stays; only its label moves.
    Keep,
    /// Word is swapped for another in place.
    Substitute,
    /// Word fades away and collapses.
    Remove,
    /// Word expands and fades in.
    Insert,
}

impl TaskKind {
    /// The ordered steps for this kind.
    pub const fn steps(self) -> &'static [Step] {
        match self {
            Self::Keep => &[Step::Relabel],
            Self::Substitute => &[
                Step::Relabel,
                Step::FadeOut,
                Step::Resize,
                Step::Reveal,
                Step::Cleanup,
            ],
            Self::Remove => &[Step::FadeOut, Step::Collapse, Step::Detach],
            Self::Insert => &[Step::Expand, Step::Reveal, Step::Cleanup],
        }
    }
}

/// One step of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Move the element from its source label to its destination label.
    Relabel,
    /// Fade to fully transparent.
    FadeOut,
    /// Shrink to zero width.
    Collapse,
    /// Resize to the replacement text's width.
    Resize,
    /// Grow from zero to the new text's width.
    Expand,
    /// Set the new text and fade in.
    Reveal,
    /// Drop the explicit width.
    Cleanup,
    /// Remove the element and its labels.
    Detach,
}

impl Step {
    /// Whether the step sleeps for the settle delay before starting.
    pub const fn changes_width(self) -> bool {
        matches!(self, Self::Collapse | Self::Resize | Self::Expand)
    }

    /// Whether the step waits for a transition-complete notification.
    pub const fn awaits_transition(self) -> bool {
        matches!(
            self,
            Self::FadeOut | Self::Collapse | Self::Resize | Self::Expand | Self::Reveal
        )
    }
}

/// Where a task currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// About to run the step under the cursor.
    Ready,
    /// Waiting out the settle delay before a width step.
    Sleeping(Instant),
    /// Waiting for the element's transition to complete.
    Awaiting,
    /// All steps done.
    Finished,
}

/// State machine animating one action against one element.
#[derive(Debug)]
pub struct AnimationTask {
    id: TaskId,
    kind: TaskKind,
    cursor: usize,
    state: TaskState,
    element: ElementId,
    release: Option<WordLabel>,
    assign: Option<WordLabel>,
    text: Option<String>,
    settled: bool,
}

impl AnimationTask {
    pub(crate) const fn new(id: TaskId, kind: TaskKind, element: ElementId) -> Self {
        Self {
            id,
            kind,
            cursor: 0,
            state: TaskState::Ready,
            element,
            release: None,
            assign: None,
            text: None,
            settled: false,
        }
    }

    /// Labels moved by the relabel step.
    #[must_use]
    pub(crate) fn relabel(mut self, from: WordLabel, to: WordLabel) -> Self {
        self.release = Some(from);
        self.assign = Some(to);
        self
    }

    /// Text shown by the resize and reveal steps.
    #[must_use]
    pub(crate) fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    /// Task identifier.
    #[inline]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Action kind.
    #[inline]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Element the task drives.
    #[inline]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Step under the cursor, or `None` once finished.
    pub fn current_step(&self) -> Option<Step> {
        self.kind.steps().get(self.cursor).copied()
    }

    /// Run steps from the cursor until the task has to wait or is done.
    pub(crate) fn run<S: Stage + ?Sized>(
        &mut self,
        stage: &mut S,
        now: Instant,
        settle: Duration,
    ) -> TaskState {
        self.state = TaskState::Ready;
        while let Some(step) = self.current_step() {
            if step.changes_width() && !self.settled && !settle.is_zero() {
                self.settled = true;
                self.state = TaskState::Sleeping(now + settle);
                return self.state;
            }
            self.settled = false;

            self.apply(step, stage);
            if step.awaits_transition() {
                self.state = TaskState::Awaiting;
                return self.state;
            }
            self.cursor += 1;
        }
        self.state = TaskState::Finished;
        self.state
    }

    /// The settle delay is over.
    pub(crate) fn wake<S: Stage + ?Sized>(
        &mut self,
        stage: &mut S,
        now: Instant,
        settle: Duration,
    ) -> TaskState {
        if !matches!(self.state, TaskState::Sleeping(_)) {
            return self.state;
        }
        self.run(stage, now, settle)
    }

    /// The awaited transition finished.
    pub(crate) fn complete<S: Stage + ?Sized>(
        &mut self,
        stage: &mut S,
        now: Instant,
        settle: Duration,
    ) -> TaskState {
        if self.state != TaskState::Awaiting {
            return self.state;
        }
        self.cursor += 1;
        self.run(stage, now, settle)
    }

    fn apply<S: Stage + ?Sized>(&mut self, step: Step, stage: &mut S) {
        let element = self.element;
        match step {
            Step::Relabel => {
                let labels = stage.labels_mut();
                if let Some(label) = self.release.take() {
                    labels.release(&label);
                }
                if let Some(label) = self.assign.clone() {
                    labels.assign(label, element);
                }
            }
            Step::FadeOut => stage.set_opacity(element, 0.0),
            Step::Collapse => stage.set_width(element, Width::Fixed(0)),
            Step::Resize | Step::Expand => {
                let width = self.text.as_deref().map_or(0, |text| stage.measure(text));
                stage.set_width(element, Width::Fixed(width));
            }
            Step::Reveal => {
                if let Some(text) = self.text.as_deref() {
                    stage.set_text(element, text);
                }
                stage.set_opacity(element, 1.0);
            }
            Step::Cleanup => stage.set_width(element, Width::Auto),
            Step::Detach => {
                stage.labels_mut().forget(element);
                stage.detach(element);
            }
        }
    }
}
