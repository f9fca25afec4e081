//! Event handling for a view session.
//!
//! Two sources feed one channel: an input thread polling the terminal and
//! a ticker that fires a refresh on a fixed interval. The receiving loop
//! sees them strictly in arrival order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Events a view session reacts to.
#[derive(Debug)]
pub enum Event {
    /// Key press from the terminal.
    Key(KeyEvent),
    /// Time to re-poll the backend.
    Refresh,
    /// Terminal resize.
    Resize(u16, u16),
}

/// Multiplexes terminal input and the refresh ticker onto one channel.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
    stop: Arc<AtomicBool>,
    input_handle: Option<thread::JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(refresh_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        // Input thread. Polls with a short timeout so it notices the stop
        // flag; it must release stdin before the prompt reads it again.
        let input_sender = sender.clone();
        let input_stop = Arc::clone(&stop);
        let input_handle = thread::spawn(move || {
            while !input_stop.load(Ordering::Acquire) {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };

                        if let Some(event) = event {
                            if input_sender.send(event).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        // Refresh ticker. Never touches the terminal, so it is left to exit
        // on its next tick once the receiver is gone.
        let refresh_sender = sender;
        thread::spawn(move || loop {
            thread::sleep(refresh_interval);
            if refresh_sender.send(Event::Refresh).is_err() {
                break;
            }
        });

        Self {
            receiver,
            stop,
            input_handle: Some(input_handle),
        }
    }

    /// Get the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.input_handle.take() {
            let _ = handle.join();
        }
    }
}
