//! Terminal runtime: mounts a rotator on stdout and drives it.

use super::config::RotatorConfig;
use super::orchestrator::{build_tour, Orchestrator};
use crate::actor::{FrameTicker, InputActor, LoopEvent};
use crate::error::Result;
use crate::layout::Layout;
use crate::plan::Tour;
use crate::stage::Stage;
use crate::terminal::{Palette, TerminalStage};
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How long the input thread waits for an event before checking for shutdown.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Asks a running [`Rotator`] to exit.
#[derive(Debug, Clone)]
pub struct RotatorHandle {
    sender: Sender<LoopEvent>,
}

impl RotatorHandle {
    /// Stop the rotator loop. Does nothing once the loop has exited.
    pub fn stop(&self) {
        let _ = self.sender.send(LoopEvent::Stop);
    }
}

/// A rotator mounted on the terminal.
///
/// ```rust,ignore
/// use wordwheel::{Layout, Mount, Rect, Rotator, RotatorConfig};
///
/// let layout = Layout::new(80, 24).with_mount(Mount::new("hero", Rect::row(2, 1, 60)));
/// let rotator = Rotator::new(
///     RotatorConfig::default().with_container_id("hero"),
///     ["Fast builds.", "Fast tests.", "Fast everything."],
///     layout,
/// )?;
/// rotator.run()?;
/// ```
pub struct Rotator {
    config: RotatorConfig,
    tour: Tour,
    content: Option<String>,
    layout: Layout,
    palette: Palette,
    events_tx: Sender<LoopEvent>,
    events_rx: Receiver<LoopEvent>,
}

impl Rotator {
    /// Prepare a rotator; nothing touches the terminal until [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingContainer`](crate::Error::MissingContainer)
    /// when the layout has no mount named by the configuration,
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) for a bad
    /// configuration and [`Error::InvalidInput`](crate::Error::InvalidInput)
    /// for an empty sentence.
    pub fn new<I, T>(config: RotatorConfig, sentences: I, layout: Layout) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        config.validate()?;
        let content = layout.mount(&config.container_id)?.content.clone();
        let sentences: Vec<T> = sentences.into_iter().collect();
        let tour = build_tour(&config, &sentences)?;
        let (events_tx, events_rx) = bounded(64);
        Ok(Self {
            config,
            tour,
            content,
            layout,
            palette: Palette::default(),
            events_tx,
            events_rx,
        })
    }

    /// Draw with `palette`.
    #[must_use]
    pub const fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// A handle that can stop the loop from another thread.
    pub fn handle(&self) -> RotatorHandle {
        RotatorHandle {
            sender: self.events_tx.clone(),
        }
    }

    /// Run until a quit key is pressed or a handle calls stop.
    ///
    /// # Errors
    ///
    /// Fails when the terminal cannot be queried, switched to raw mode or
    /// written to.
    pub fn run(self) -> Result<()> {
        let Self {
            config,
            tour,
            content,
            mut layout,
            palette,
            events_tx,
            events_rx,
        } = self;

        let (width, height) = terminal::size()?;
        layout.resize(width, height);
        let area = layout.area(&config.container_id)?;

        let mut stage = TerminalStage::new(io::stdout(), area, config.speed).with_palette(palette);
        if let Some(content) = content.as_deref() {
            stage = stage.with_content(content);
        }
        let mut orchestrator = Orchestrator::with_tour(config.clone(), tour, stage)?;

        let _guard = TerminalGuard::enter()?;
        let ticker = FrameTicker::spawn(events_tx.clone(), config.frame_interval)?;
        let input = InputActor::spawn(events_tx, INPUT_POLL_TIMEOUT)?;

        let now = Instant::now();
        orchestrator.start(now)?;
        orchestrator.on_resize(width, now);
        orchestrator.stage_mut().present()?;

        let result = event_loop(&mut orchestrator, &mut layout, &events_rx);

        orchestrator.stop();
        input.join();
        ticker.join();
        result
    }
}

/// React to loop events until asked to exit.
fn event_loop<W: Write>(
    orchestrator: &mut Orchestrator<TerminalStage<W>>,
    layout: &mut Layout,
    events: &Receiver<LoopEvent>,
) -> Result<()> {
    for event in events {
        if event.is_exit() {
            info!(?event, "rotator loop exiting");
            break;
        }
        match event {
            LoopEvent::Frame(_) => {
                orchestrator.poll(Instant::now())?;
                orchestrator.stage_mut().present()?;
            }
            LoopEvent::Resize { width, height } => {
                layout.resize(width, height);
                let area = layout.area(&orchestrator.config().container_id)?;
                orchestrator.stage_mut().set_area(area);
                orchestrator.on_resize(width, Instant::now());
            }
            LoopEvent::InputError(message) => {
                warn!(%message, "input error");
            }
            LoopEvent::Quit | LoopEvent::Stop => {}
        }
    }
    Ok(())
}

/// Raw mode and a hidden cursor for as long as the guard lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
