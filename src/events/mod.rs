//! Event system with bounded channels
//!
//! Uses crossbeam bounded channels for backpressure to prevent memory bloat.

use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::event::{Event as TermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input (presses only)
    Key(KeyEvent),

    /// Mouse input
    Mouse(MouseEvent),

    /// Terminal resize (width, height)
    Resize(u16, u16),
}

impl Event {
    /// Convert a terminal event, dropping key releases/repeats and anything else we ignore
    pub fn from_terminal(event: TermEvent) -> Option<Self> {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            TermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            TermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }
}

/// Event bus using bounded crossbeam channels
///
/// Bounded channels provide backpressure - if the receiver is slow,
/// senders will block, preventing unbounded memory growth.
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// Get a sender clone for spawning event producers
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receive next event, blocking until available or timeout
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Event> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Drain up to max events from the queue
    pub fn drain(&self, max: usize) -> Vec<Event> {
        let mut events = Vec::with_capacity(max);
        while events.len() < max {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(_) => break,
            }
        }
        events
    }
}
