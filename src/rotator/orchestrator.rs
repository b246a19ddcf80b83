//! Orchestrator: the cyclic plan queue and its clock.
//!
//! The orchestrator never sleeps or spawns anything. Whoever owns it calls
//! [`Orchestrator::poll`] with the current time, often enough for the
//! animation to look smooth; everything else (ticks, settle delays,
//! transition completions) is derived from those calls.

use super::config::RotatorConfig;
use crate::anim::Sequencer;
use crate::error::{Error, Result};
use crate::plan::{plan, EditPlan, Tour, TourBuilder};
use crate::stage::Stage;
use crate::text::{tokenize, TokenSequence};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lifecycle of an orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatorState {
    /// Built but not started, or started with nothing to show.
    Idle,
    /// Ticking.
    Running,
    /// Not ticking because the viewport is too narrow.
    Paused,
    /// Stopped for good.
    Stopped,
}

/// Fixed-interval deadline that can be armed and disarmed.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl TickTimer {
    /// A disarmed timer firing every `interval` once armed.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Schedule the first tick one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Cancel any scheduled tick.
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Whether a tick is scheduled.
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the next tick is due.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume a due tick, scheduling the next one.
    ///
    /// Missed ticks are not replayed: at most one tick fires per call.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                let next = deadline + self.interval;
                self.deadline = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }
}

/// Tokenize `sentences` and order them the way `config` asks.
pub(crate) fn build_tour<T: AsRef<str>>(config: &RotatorConfig, sentences: &[T]) -> Result<Tour> {
    let sequences = sentences
        .iter()
        .map(|sentence| tokenize(sentence.as_ref()))
        .collect::<Result<Vec<TokenSequence>>>()?;
    Ok(TourBuilder::new()
        .best(config.best)
        .random(config.random)
        .build(&sequences))
}

/// Drives a [`Stage`] through a tour of sentences.
pub struct Orchestrator<S: Stage> {
    config: RotatorConfig,
    queue: VecDeque<EditPlan>,
    sequencer: Sequencer,
    stage: S,
    timer: TickTimer,
    state: RotatorState,
}

impl<S: Stage> Orchestrator<S> {
    /// Tokenize `sentences`, order them into a tour and prepare to drive
    /// `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a bad configuration and
    /// [`Error::InvalidInput`] for an empty sentence.
    pub fn new<T: AsRef<str>>(config: RotatorConfig, sentences: &[T], stage: S) -> Result<Self> {
        let tour = build_tour(&config, sentences)?;
        Self::with_tour(config, tour, stage)
    }

    /// Drive `stage` through an already built tour.
    pub fn with_tour(config: RotatorConfig, tour: Tour, stage: S) -> Result<Self> {
        config.validate()?;
        if config.verbose {
            debug!(
                sentences = tour.len(),
                order = ?tour.order(),
                total_cost = tour.total_cost(),
                "tour built"
            );
        }
        let sequencer =
            Sequencer::new(&config.namespace, config.resize_delay).verbose(config.verbose);
        Ok(Self {
            timer: TickTimer::new(config.interval),
            queue: tour.into_plans().into(),
            sequencer,
            stage,
            state: RotatorState::Idle,
            config,
        })
    }

    /// Show the first sentence and start ticking.
    ///
    /// Whatever the stage displayed before is either dropped at once or
    /// faded out while the first sentence fades in, depending on
    /// [`RotatorConfig::clear_original_content`]. With no sentences the
    /// orchestrator stays idle.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.state != RotatorState::Idle {
            return Ok(());
        }
        self.deliver(now);

        let Some(first) = self.queue.front().map(|leg| leg.from().clone()) else {
            info!(container = %self.config.container_id, "no sentences to rotate");
            return Ok(());
        };

        let original = self.stage.elements();
        if self.config.clear_original_content {
            for element in original {
                self.stage.labels_mut().forget(element);
                self.stage.detach(element);
            }
        } else {
            self.sequencer.retire(&original, &mut self.stage, now);
        }

        let initial = plan(&TokenSequence::empty(), &first);
        self.sequencer.dispatch(&initial, &mut self.stage, now);
        self.timer.arm(now);
        self.state = RotatorState::Running;
        info!(
            container = %self.config.container_id,
            sentences = self.queue.len(),
            "rotator started"
        );
        Ok(())
    }

    /// Advance everything to `now`: transition completions, settle
    /// delays and, when due, the next tick.
    pub fn poll(&mut self, now: Instant) -> Result<()> {
        self.deliver(now);
        self.sequencer.wake(&mut self.stage, now);
        if self.state == RotatorState::Running && self.timer.fire(now) {
            self.tick(now)?;
        }
        Ok(())
    }

    /// Dispatch the next plan right away and rotate it to the back of
    /// the queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] when there is nothing to dispatch.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        let next = self.queue.pop_front().ok_or(Error::EmptyQueue)?;
        if self.config.verbose {
            debug!(
                to = %next.to().to_plain_string(),
                cost = next.cost(),
                in_flight = self.sequencer.in_flight(),
                "tick"
            );
        }
        self.sequencer.dispatch(&next, &mut self.stage, now);
        self.queue.push_back(next);
        Ok(())
    }

    /// React to a viewport width change.
    ///
    /// Below [`RotatorConfig::mobile_width`] the timer is disarmed; at or
    /// above it a paused orchestrator resumes with a fresh interval.
    pub fn on_resize(&mut self, width: u16, now: Instant) {
        let threshold = self.config.mobile_width;
        if threshold == 0 {
            return;
        }
        match self.state {
            RotatorState::Running if width < threshold => {
                self.timer.disarm();
                self.state = RotatorState::Paused;
                info!(width, threshold, "rotator paused");
            }
            RotatorState::Paused if width >= threshold => {
                self.timer.arm(now);
                self.state = RotatorState::Running;
                info!(width, threshold, "rotator resumed");
            }
            _ => {}
        }
    }

    /// Stop ticking. Tasks already in flight still finish when polled.
    pub fn stop(&mut self) {
        if self.state == RotatorState::Stopped {
            return;
        }
        self.timer.disarm();
        self.state = RotatorState::Stopped;
        info!(container = %self.config.container_id, "rotator stopped");
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> RotatorState {
        self.state
    }

    /// The configuration in use.
    pub const fn config(&self) -> &RotatorConfig {
        &self.config
    }

    /// The plan the next tick will dispatch.
    pub fn upcoming(&self) -> Option<&EditPlan> {
        self.queue.front()
    }

    /// Number of plans in the cycle.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Earliest instant at which polling can change anything, not
    /// counting stage transitions.
    pub fn next_wake(&self) -> Option<Instant> {
        match (self.timer.deadline(), self.sequencer.next_wake()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The animation sequencer.
    pub const fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// The stage being driven.
    pub const fn stage(&self) -> &S {
        &self.stage
    }

    /// Mutable access to the stage being driven.
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// Hand the stage back.
    pub fn into_stage(self) -> S {
        self.stage
    }

    fn deliver(&mut self, now: Instant) {
        for element in self.stage.advance(now) {
            self.sequencer
                .on_transition_end(element, &mut self.stage, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::MemoryStage;

    const STEP: Duration = Duration::from_millis(10);
    const INTERVAL: Duration = Duration::from_millis(1000);

    fn config() -> RotatorConfig {
        RotatorConfig::default()
            .with_interval(INTERVAL)
            .with_resize_delay(STEP)
    }

    /// Poll in small steps until no task is in flight.
    fn settle(orchestrator: &mut Orchestrator<MemoryStage>, mut now: Instant) -> Instant {
        for _ in 0..100 {
            orchestrator.poll(now).unwrap();
            if orchestrator.sequencer().is_idle() {
                return now;
            }
            now += STEP;
        }
        panic!("animation did not settle");
    }

    fn first_sentence(orchestrator: &Orchestrator<MemoryStage>) -> String {
        orchestrator.upcoming().unwrap().from().to_plain_string()
    }

    const SENTENCES: [&str; 3] = [
        "The quick brown fox is very cool, supposedly.",
        "The brown color is very very pretty, no?",
        "We're here (in Wilkes-Barre), finally!",
    ];

    #[test]
    fn test_start_shows_first_sentence() {
        let stage = MemoryStage::with_content("Loading...");
        let mut orchestrator = Orchestrator::new(config(), &SENTENCES, stage).unwrap();
        let first = orchestrator.upcoming().unwrap().from().to_plain_string();
        let start = Instant::now();

        orchestrator.start(start).unwrap();
        assert_eq!(orchestrator.state(), RotatorState::Running);
        assert!(!orchestrator.stage().text().contains("Loading"));

        settle(&mut orchestrator, start);
        assert_eq!(orchestrator.stage().text(), first);
        assert!(SENTENCES.contains(&first.as_str()));
    }

    #[test]
    fn test_fades_through_original_content() {
        let stage = MemoryStage::with_content("Loading...");
        let original = stage.elements()[0];
        let mut orchestrator = Orchestrator::new(
            config().with_clear_original_content(false),
            &SENTENCES,
            stage,
        )
        .unwrap();
        let first = first_sentence(&orchestrator);
        let start = Instant::now();

        orchestrator.start(start).unwrap();
        // Still attached while fading out.
        assert!(orchestrator.stage().element(original).is_some());
        assert_eq!(orchestrator.stage().element(original).unwrap().opacity, 0.0);

        settle(&mut orchestrator, start);
        assert!(orchestrator.stage().element(original).is_none());
        assert_eq!(orchestrator.stage().text(), first);
    }

    #[test]
    fn test_ticks_cycle_through_tour() {
        let mut orchestrator =
            Orchestrator::new(config(), &SENTENCES, MemoryStage::new()).unwrap();
        let first = first_sentence(&orchestrator);
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        let mut now = settle(&mut orchestrator, start);
        let mut seen = vec![orchestrator.stage().text()];
        assert_eq!(seen[0], first);

        for tick in 1..=3 {
            let expected = orchestrator.upcoming().unwrap().to().to_plain_string();
            now = settle(&mut orchestrator, start + INTERVAL * tick);
            assert_eq!(orchestrator.stage().text(), expected);
            seen.push(expected);
        }
        assert!(now >= start + INTERVAL * 3);

        // Three ticks over three sentences land back on the first one.
        assert_eq!(seen[3], seen[0]);
        seen.pop();
        seen.sort();
        let mut all: Vec<String> = SENTENCES.iter().map(ToString::to_string).collect();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_no_tick_before_interval() {
        let mut orchestrator =
            Orchestrator::new(config(), &SENTENCES, MemoryStage::new()).unwrap();
        let first = first_sentence(&orchestrator);
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        settle(&mut orchestrator, start);

        orchestrator.poll(start + INTERVAL - STEP).unwrap();
        assert!(orchestrator.sequencer().is_idle());
        assert_eq!(orchestrator.stage().text(), first);
        assert_eq!(orchestrator.next_wake(), Some(start + INTERVAL));
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut orchestrator =
            Orchestrator::new(config(), &SENTENCES, MemoryStage::new()).unwrap();
        let first = first_sentence(&orchestrator);
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        settle(&mut orchestrator, start);

        orchestrator.stop();
        assert_eq!(orchestrator.state(), RotatorState::Stopped);
        settle(&mut orchestrator, start + INTERVAL * 2);
        assert_eq!(orchestrator.stage().text(), first);

        // A stopped rotator does not restart.
        orchestrator.start(start + INTERVAL * 3).unwrap();
        assert_eq!(orchestrator.state(), RotatorState::Stopped);
    }

    #[test]
    fn test_stop_lets_in_flight_tasks_finish() {
        let mut orchestrator =
            Orchestrator::new(config(), &SENTENCES, MemoryStage::new()).unwrap();
        let first = first_sentence(&orchestrator);
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        orchestrator.stop();
        settle(&mut orchestrator, start);
        assert_eq!(orchestrator.stage().text(), first);
    }

    #[test]
    fn test_pause_and_resume_on_resize() {
        let mut orchestrator = Orchestrator::new(
            config().with_mobile_width(60),
            &SENTENCES,
            MemoryStage::new(),
        )
        .unwrap();
        let first = first_sentence(&orchestrator);
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        settle(&mut orchestrator, start);

        orchestrator.on_resize(40, start + STEP);
        assert_eq!(orchestrator.state(), RotatorState::Paused);
        settle(&mut orchestrator, start + INTERVAL * 2);
        assert_eq!(orchestrator.stage().text(), first);

        let resumed = start + INTERVAL * 3;
        orchestrator.on_resize(80, resumed);
        assert_eq!(orchestrator.state(), RotatorState::Running);
        assert_eq!(orchestrator.next_wake(), Some(resumed + INTERVAL));

        let expected = orchestrator.upcoming().unwrap().to().to_plain_string();
        settle(&mut orchestrator, resumed + INTERVAL);
        assert_eq!(orchestrator.stage().text(), expected);
    }

    #[test]
    fn test_resize_ignored_without_threshold() {
        let mut orchestrator =
            Orchestrator::new(config(), &SENTENCES, MemoryStage::new()).unwrap();
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        orchestrator.on_resize(10, start);
        assert_eq!(orchestrator.state(), RotatorState::Running);
    }

    #[test]
    fn test_no_sentences_stays_idle() {
        let sentences: [&str; 0] = [];
        let mut orchestrator =
            Orchestrator::new(config(), &sentences, MemoryStage::with_content("keep me")).unwrap();
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        orchestrator.poll(start + INTERVAL * 2).unwrap();

        assert_eq!(orchestrator.state(), RotatorState::Idle);
        assert_eq!(orchestrator.stage().text(), "keep me");
        assert!(matches!(orchestrator.tick(start), Err(Error::EmptyQueue)));
    }

    #[test]
    fn test_single_sentence_keeps_words() {
        let mut orchestrator =
            Orchestrator::new(config(), &["Only one."], MemoryStage::new()).unwrap();
        let start = Instant::now();
        orchestrator.start(start).unwrap();
        settle(&mut orchestrator, start);
        orchestrator.stage_mut().take_log();

        orchestrator.tick(start + INTERVAL).unwrap();
        assert!(orchestrator.sequencer().is_idle());
        assert!(orchestrator.stage().log().is_empty());
        assert_eq!(orchestrator.queue_len(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        let empty = Orchestrator::new(config(), &["fine", ""], MemoryStage::new());
        assert!(matches!(empty, Err(Error::InvalidInput(_))));

        let bad = Orchestrator::new(
            config().with_interval(Duration::ZERO),
            &SENTENCES,
            MemoryStage::new(),
        );
        assert!(matches!(bad, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_tick_timer() {
        let start = Instant::now();
        let mut timer = TickTimer::new(INTERVAL);
        assert!(!timer.fire(start + INTERVAL));

        timer.arm(start);
        assert!(!timer.fire(start + INTERVAL - STEP));
        assert!(timer.fire(start + INTERVAL));
        assert_eq!(timer.deadline(), Some(start + INTERVAL * 2));

        // A long stall fires once, then reschedules from now.
        let late = start + INTERVAL * 5;
        assert!(timer.fire(late));
        assert!(!timer.fire(late));
        assert_eq!(timer.deadline(), Some(late + INTERVAL));

        timer.disarm();
        assert!(!timer.is_armed());
    }
}
