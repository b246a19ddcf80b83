//! Sequencer: turns edit plans into running animation tasks.
//!
//! The sequencer owns every in-flight [`AnimationTask`] and routes the two
//! kinds of wake-up a task can wait for: the settle delay before a width
//! change, and the stage's transition-complete notification for the task's
//! element. Tasks from the same plan interleave freely; nothing is locked,
//! each task only touches its own element.

use super::task::{AnimationTask, TaskId, TaskKind, TaskState};
use crate::plan::{EditAction, EditPlan};
use crate::stage::{ElementId, Stage, WordLabel};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Dispatches plans and drives their tasks.
#[derive(Debug)]
pub struct Sequencer {
    namespace: Arc<str>,
    settle: Duration,
    verbose: bool,
    next_id: u64,
    tasks: HashMap<TaskId, AnimationTask>,
    awaiting: HashMap<ElementId, Vec<TaskId>>,
    sleeping: BinaryHeap<Reverse<(Instant, TaskId)>>,
}

impl Sequencer {
    /// Create a sequencer labelling elements under `namespace`.
    ///
    /// `settle` is the delay inserted before each width change.
    pub fn new(namespace: &str, settle: Duration) -> Self {
        Self {
            namespace: Arc::from(namespace),
            settle,
            verbose: false,
            next_id: 0,
            tasks: HashMap::new(),
            awaiting: HashMap::new(),
            sleeping: BinaryHeap::new(),
        }
    }

    /// Emit per-task diagnostics at debug level.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Label namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is running.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Earliest pending settle deadline.
    pub fn next_wake(&self) -> Option<Instant> {
        self.sleeping.peek().map(|Reverse((at, _))| *at)
    }

    /// Start animating `plan` on `stage`.
    ///
    /// Destination labels from the previous plan are swept back to source
    /// labels first, then keeps, substitutions, removals and insertions are
    /// started in that order.
    pub fn dispatch<S: Stage + ?Sized>(&mut self, plan: &EditPlan, stage: &mut S, now: Instant) {
        stage.labels_mut().sweep(&self.namespace);

        if self.verbose {
            debug!(
                from = %plan.from().to_plain_string(),
                to = %plan.to().to_plain_string(),
                cost = plan.cost(),
                "dispatching plan"
            );
        }

        for action in plan.keeps().iter().chain(plan.substitutions()) {
            let (from_index, to_index, kind) = match action {
                EditAction::Keep {
                    from_index,
                    to_index,
                    ..
                } => (*from_index, *to_index, TaskKind::Keep),
                EditAction::Substitute {
                    from_index,
                    to_index,
                    ..
                } => (*from_index, *to_index, TaskKind::Substitute),
                _ => continue,
            };
            let source = WordLabel::source(&self.namespace, from_index);
            let Some(element) = stage.labels().resolve(&source) else {
                warn!(label = %source, "no element for label, skipping {kind:?}");
                continue;
            };
            let mut task = self
                .task(kind, element)
                .relabel(source, WordLabel::dest(&self.namespace, to_index));
            if let Some(word) = action.to_word() {
                if kind == TaskKind::Substitute {
                    task = task.with_text(word.display());
                }
            }
            self.start(task, stage, now);
        }

        for action in plan.removals() {
            let EditAction::Remove { from_index, .. } = action else {
                continue;
            };
            let source = WordLabel::source(&self.namespace, *from_index);
            let Some(element) = stage.labels().resolve(&source) else {
                warn!(label = %source, "no element for label, skipping removal");
                continue;
            };
            let task = self.task(TaskKind::Remove, element);
            self.start(task, stage, now);
        }

        for action in plan.insertions() {
            let EditAction::Insert { to_index, to_word } = action else {
                continue;
            };
            let anchor = to_index
                .checked_sub(1)
                .and_then(|prev| stage.labels().resolve(&WordLabel::dest(&self.namespace, prev)));
            let element = stage.create(anchor);
            stage
                .labels_mut()
                .assign(WordLabel::dest(&self.namespace, *to_index), element);
            let task = self
                .task(TaskKind::Insert, element)
                .with_text(to_word.display());
            self.start(task, stage, now);
        }
    }

    /// Fade out and detach elements that carry no labels, such as content
    /// that was on display before the first sentence.
    pub fn retire<S: Stage + ?Sized>(
        &mut self,
        elements: &[ElementId],
        stage: &mut S,
        now: Instant,
    ) {
        for &element in elements {
            let task = self.task(TaskKind::Remove, element);
            self.start(task, stage, now);
        }
    }

    /// Deliver a transition-complete notification for `element`.
    ///
    /// Every task waiting on that element moves on; a notification nobody
    /// waits for is dropped.
    pub fn on_transition_end<S: Stage + ?Sized>(
        &mut self,
        element: ElementId,
        stage: &mut S,
        now: Instant,
    ) {
        let Some(waiting) = self.awaiting.remove(&element) else {
            return;
        };
        for id in waiting {
            if let Some(mut task) = self.tasks.remove(&id) {
                task.complete(stage, now, self.settle);
                self.file(task);
            }
        }
    }

    /// Wake every task whose settle delay has passed by `now`.
    pub fn wake<S: Stage + ?Sized>(&mut self, stage: &mut S, now: Instant) {
        while let Some(Reverse((at, id))) = self.sleeping.peek().copied() {
            if at > now {
                break;
            }
            self.sleeping.pop();
            if let Some(mut task) = self.tasks.remove(&id) {
                task.wake(stage, now, self.settle);
                self.file(task);
            }
        }
    }

    fn task(&mut self, kind: TaskKind, element: ElementId) -> AnimationTask {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        AnimationTask::new(id, kind, element)
    }

    fn start<S: Stage + ?Sized>(&mut self, mut task: AnimationTask, stage: &mut S, now: Instant) {
        task.run(stage, now, self.settle);
        self.file(task);
    }

    /// Park a task according to its state, or drop it once finished.
    fn file(&mut self, task: AnimationTask) {
        if self.verbose {
            debug!(
                task = task.id().0,
                kind = ?task.kind(),
                element = task.element().0,
                step = ?task.current_step(),
                state = ?task.state(),
                "task step"
            );
        }
        match task.state() {
            TaskState::Finished => {}
            TaskState::Awaiting => {
                self.awaiting.entry(task.element()).or_default().push(task.id());
                self.tasks.insert(task.id(), task);
            }
            TaskState::Sleeping(at) => {
                self.sleeping.push(Reverse((at, task.id())));
                self.tasks.insert(task.id(), task);
            }
            // `run` only returns once the task waits or finishes.
            TaskState::Ready => {
                self.tasks.insert(task.id(), task);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan;
    use crate::stage::{MemoryStage, Side, StageOp, Width};
    use crate::text::{tokenize, Token, TokenSequence};

    const SETTLE: Duration = Duration::from_millis(10);

    /// Pump the stage and timers until every task is done.
    fn settle_all(sequencer: &mut Sequencer, stage: &mut MemoryStage, mut now: Instant) -> Instant {
        for _ in 0..64 {
            if sequencer.is_idle() {
                return now;
            }
            now += SETTLE;
            sequencer.wake(stage, now);
            for element in stage.advance(now) {
                sequencer.on_transition_end(element, stage, now);
            }
        }
        panic!("sequencer did not go idle");
    }

    fn show(
        sequencer: &mut Sequencer,
        stage: &mut MemoryStage,
        sentence: &TokenSequence,
        now: Instant,
    ) -> Instant {
        let initial = plan(&TokenSequence::empty(), sentence);
        sequencer.dispatch(&initial, stage, now);
        settle_all(sequencer, stage, now)
    }

    #[test]
    fn test_initial_plan_builds_sentence() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let sentence = tokenize("Hello there, world!").unwrap();

        show(&mut sequencer, &mut stage, &sentence, Instant::now());

        assert_eq!(stage.visible_text(), "Hello there, world!");
        assert_eq!(stage.elements().len(), sentence.len());
        for (index, element) in stage.elements().into_iter().enumerate() {
            let labels = stage.labels().labels_of(element);
            assert_eq!(labels.len(), 1);
            assert_eq!(labels[0].side(), Side::Dest);
            assert_eq!(labels[0].index(), index);
            assert_eq!(stage.element(element).unwrap().width, Width::Auto);
        }
    }

    #[test]
    fn test_transition_between_sentences() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let first = tokenize("The quick brown fox is very cool, supposedly.").unwrap();
        let second = tokenize("The brown color is very very pretty, no?").unwrap();

        let now = show(&mut sequencer, &mut stage, &first, Instant::now());
        sequencer.dispatch(&plan(&first, &second), &mut stage, now);
        settle_all(&mut sequencer, &mut stage, now);

        assert_eq!(stage.text(), "The brown color is very very pretty, no?");
        assert_eq!(stage.elements().len(), second.len());
    }

    #[test]
    fn test_rotating_back_and_forth() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let a = tokenize("We're here (in Wilkes-Barre), finally!").unwrap();
        let b = tokenize("Finally, we're here.").unwrap();

        let mut now = show(&mut sequencer, &mut stage, &a, Instant::now());
        for _ in 0..3 {
            sequencer.dispatch(&plan(&a, &b), &mut stage, now);
            now = settle_all(&mut sequencer, &mut stage, now);
            assert_eq!(stage.text(), "Finally, we're here.");
            sequencer.dispatch(&plan(&b, &a), &mut stage, now);
            now = settle_all(&mut sequencer, &mut stage, now);
            assert_eq!(stage.text(), "We're here (in Wilkes-Barre), finally!");
        }
    }

    #[test]
    fn test_keep_relabels_without_animating() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let sentence = tokenize("Stay put.").unwrap();
        let now = show(&mut sequencer, &mut stage, &sentence, Instant::now());
        stage.take_log();

        sequencer.dispatch(&plan(&sentence, &sentence), &mut stage, now);

        assert!(sequencer.is_idle());
        assert!(stage.log().is_empty());
        let ns: Arc<str> = Arc::from("ww");
        assert!(stage.labels().resolve(&WordLabel::dest(&ns, 2)).is_some());
    }

    #[test]
    fn test_substitute_step_order() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let from = TokenSequence::new(vec![Token::new("cat")]);
        let to = TokenSequence::new(vec![Token::new("horse")]);
        let now = show(&mut sequencer, &mut stage, &from, Instant::now());
        let element = stage.elements()[0];
        stage.take_log();

        sequencer.dispatch(&plan(&from, &to), &mut stage, now);
        // Nothing beyond the fade starts before the fade completes.
        assert_eq!(stage.log(), &[StageOp::SetOpacity(element, 0.0)]);
        settle_all(&mut sequencer, &mut stage, now);

        assert_eq!(
            stage.take_log(),
            vec![
                StageOp::SetOpacity(element, 0.0),
                StageOp::SetWidth(element, Width::Fixed(5)),
                StageOp::SetText(element, "horse".to_string()),
                StageOp::SetOpacity(element, 1.0),
                StageOp::SetWidth(element, Width::Auto),
            ]
        );
    }

    #[test]
    fn test_width_step_waits_for_settle_delay() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let start = Instant::now();
        let to = TokenSequence::new(vec![Token::new("hi")]);

        sequencer.dispatch(&plan(&TokenSequence::empty(), &to), &mut stage, start);
        assert_eq!(sequencer.next_wake(), Some(start + SETTLE));

        sequencer.wake(&mut stage, start + Duration::from_millis(5));
        assert!(stage.pending().is_empty());

        sequencer.wake(&mut stage, start + SETTLE);
        assert_eq!(stage.pending().len(), 1);
        assert_eq!(sequencer.next_wake(), None);
    }

    #[test]
    fn test_removal_detaches_element() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let from = TokenSequence::new(vec![Token::spaced("gone"), Token::new("stays")]);
        let to = TokenSequence::new(vec![Token::new("stays")]);
        let now = show(&mut sequencer, &mut stage, &from, Instant::now());
        let gone = stage.elements()[0];

        sequencer.dispatch(&plan(&from, &to), &mut stage, now);
        settle_all(&mut sequencer, &mut stage, now);

        assert!(stage.element(gone).is_none());
        assert!(stage.labels().labels_of(gone).is_empty());
        assert_eq!(stage.text(), "stays");
    }

    #[test]
    fn test_retire_fades_unlabelled_content() {
        let mut stage = MemoryStage::with_content("Loading...");
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let original = stage.elements();

        sequencer.retire(&original, &mut stage, Instant::now());
        assert_eq!(stage.visible_text(), "");
        settle_all(&mut sequencer, &mut stage, Instant::now());
        assert!(stage.elements().is_empty());
    }

    #[test]
    fn test_missing_label_is_skipped() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let from = TokenSequence::new(vec![Token::new("a")]);
        let to = TokenSequence::new(vec![Token::new("b")]);

        // Nothing on stage: the substitution has no element to drive.
        sequencer.dispatch(&plan(&from, &to), &mut stage, Instant::now());
        assert!(sequencer.is_idle());
        assert!(stage.elements().is_empty());
    }

    #[test]
    fn test_overlapping_plans_share_elements() {
        let mut stage = MemoryStage::new();
        let mut sequencer = Sequencer::new("ww", SETTLE);
        let a = TokenSequence::new(vec![Token::new("one")]);
        let b = TokenSequence::new(vec![Token::new("two")]);
        let now = show(&mut sequencer, &mut stage, &a, Instant::now());
        let element = stage.elements()[0];

        // Second plan starts before the first one finishes.
        sequencer.dispatch(&plan(&a, &b), &mut stage, now);
        sequencer.dispatch(&plan(&b, &a), &mut stage, now);
        assert_eq!(sequencer.in_flight(), 2);

        settle_all(&mut sequencer, &mut stage, now);
        assert_eq!(stage.elements(), vec![element]);
    }
}
