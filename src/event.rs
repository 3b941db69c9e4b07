use crate::error::HistoryResult;
use crate::store::{LoadOutcome, Snapshot};
use color_eyre::eyre::OptionExt;
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// The frequency at which tick events are emitted.
const TICK_FPS: f64 = 30.0;

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    Tick,
    /// Crossterm events.
    Crossterm(CrosstermEvent),
    /// Application events.
    App(AppEvent),
}

/// Application events. Results of spawned store operations come back here so
/// the state they touch is only ever changed from the main loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// The history screen became visible; a reload is due.
    HistoryVisible,
    /// A history load finished.
    HistoryLoaded(HistoryResult<LoadOutcome>),
    /// A history clear finished.
    HistoryCleared(HistoryResult<()>),
    /// Recording a lookup finished.
    LookupRecorded(HistoryResult<Snapshot>),
}

/// Cloneable handle for queueing application events from other tasks.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    pub fn send(&self, app_event: AppEvent) {
        // The receiver lives as long as the app; a failed send only happens during shutdown.
        let _ = self.sender.send(Event::App(app_event));
    }
}

/// Terminal event handler.
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Creates the handler and starts forwarding terminal input and ticks.
    pub fn new() -> Self {
        let handler = Self::detached();
        tokio::spawn(forward_terminal(handler.sender.clone()));
        handler
    }

    /// Constructs a handler without the terminal task. Only application events arrive.
    pub fn detached() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Receives the next event, waiting until one is available.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver.recv().await.ok_or_eyre("Failed to receive event")
    }

    /// Returns the next event if one is already queued.
    pub fn try_next(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }
}

/// Feeds crossterm input and frame ticks into the queue until the app drops
/// its receiver.
async fn forward_terminal(queue: mpsc::UnboundedSender<Event>) {
    let mut input = crossterm::event::EventStream::new();
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / TICK_FPS));
    loop {
        let next = tokio::select! {
            _ = queue.closed() => return,
            _ = frames.tick() => Event::Tick,
            Some(Ok(terminal_event)) = input.next().fuse() => Event::Crossterm(terminal_event),
        };
        if queue.send(next).is_err() {
            return;
        }
    }
}
