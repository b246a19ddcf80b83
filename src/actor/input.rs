//! Input actor: dedicated thread for polling terminal events.
//!
//! Only two kinds of input matter to a rotator: viewport resizes, which
//! may pause or resume it, and quit keys. Everything else is dropped on
//! the input thread.

use super::messages::LoopEvent;
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(sender: Sender<LoopEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("wordwheel-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<LoopEvent>, shutdown: &Arc<AtomicBool>, poll_timeout: Duration) {
        while !shutdown.load(Ordering::Relaxed) {
            let event = match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => convert_event(event),
                    Err(e) => Some(LoopEvent::InputError(e.to_string())),
                },
                Ok(false) => None,
                Err(e) => Some(LoopEvent::InputError(e.to_string())),
            };

            if let Some(event) = event {
                if sender.send(event).is_err() {
                    break;
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Map a crossterm event to a loop event, if the loop cares about it.
pub(crate) fn convert_event(event: Event) -> Option<LoopEvent> {
    match event {
        Event::Resize(width, height) => Some(LoopEvent::Resize { width, height }),
        Event::Key(key) if is_quit_key(&key) => Some(LoopEvent::Quit),
        _ => None,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_resize_is_forwarded() {
        assert_eq!(
            convert_event(Event::Resize(100, 30)),
            Some(LoopEvent::Resize {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(convert_event(press(KeyCode::Esc, KeyModifiers::NONE)), Some(LoopEvent::Quit));
        assert_eq!(
            convert_event(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(LoopEvent::Quit)
        );
        assert_eq!(
            convert_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(LoopEvent::Quit)
        );
    }

    #[test]
    fn test_other_input_ignored() {
        assert_eq!(convert_event(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(convert_event(press(KeyCode::Enter, KeyModifiers::NONE)), None);
        assert_eq!(convert_event(Event::FocusGained), None);
    }
}
