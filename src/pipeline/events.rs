//! Typed change notifications.
//!
//! The pipeline chain is fixed by [`PipelineEvent::stage`] and
//! [`Stage::completion_event`] rather than by subscriber registration order:
//!
//! ```text
//! FilterChanged ──► Filter ──► FilteredDataChanged ──► Index ──► IndexedDataChanged ──► Render
//!                                 IndexModeChanged ──┘
//! ```
//!
//! Events travel through a crossbeam queue and are handled one at a time in
//! FIFO order by whoever owns the bus.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::fmt;

/// A change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineEvent {
    /// The filter configuration changed
    FilterChanged,
    /// The filtered flow points were rebuilt
    FilteredDataChanged,
    /// The index mode changed
    IndexModeChanged,
    /// The indexed data was rebuilt and is ready to draw
    IndexedDataChanged,
}

/// Work triggered by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Filter,
    Index,
    Render,
}

impl PipelineEvent {
    /// Dispatch table: the stage that must run in response to this event
    pub fn stage(self) -> Stage {
        match self {
            PipelineEvent::FilterChanged => Stage::Filter,
            PipelineEvent::FilteredDataChanged | PipelineEvent::IndexModeChanged => Stage::Index,
            PipelineEvent::IndexedDataChanged => Stage::Render,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PipelineEvent::FilterChanged => "filter:changed",
            PipelineEvent::FilteredDataChanged => "filteredData:changed",
            PipelineEvent::IndexModeChanged => "indexMode:changed",
            PipelineEvent::IndexedDataChanged => "indexedData:changed",
        }
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Stage {
    /// Event published once this stage has finished, if any
    pub fn completion_event(self) -> Option<PipelineEvent> {
        match self {
            Stage::Filter => Some(PipelineEvent::FilteredDataChanged),
            Stage::Index => Some(PipelineEvent::IndexedDataChanged),
            Stage::Render => None,
        }
    }
}

/// Cloneable handle for publishing events onto a bus
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: Sender<PipelineEvent>,
}

impl EventPublisher {
    /// Queue an event. Returns `false` if the bus is gone.
    pub fn publish(&self, event: PipelineEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

type Observer = Box<dyn FnMut(PipelineEvent)>;

/// Single-consumer publish/subscribe channel for [`PipelineEvent`]s
pub struct EventBus {
    tx: Sender<PipelineEvent>,
    rx: Receiver<PipelineEvent>,
    observers: Vec<Observer>,
    delivered: u64,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            observers: Vec::new(),
            delivered: 0,
        }
    }

    /// Register an observer that sees every event as it is taken off the queue
    pub fn subscribe(&mut self, observer: impl FnMut(PipelineEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn publish(&self, event: PipelineEvent) {
        tracing::trace!("publish {}", event);
        // the bus holds its own receiver, so the send cannot fail
        let _ = self.tx.send(event);
    }

    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            tx: self.tx.clone(),
        }
    }

    /// Take the next queued event and notify observers
    pub fn next(&mut self) -> Option<PipelineEvent> {
        let event = self.rx.try_recv().ok()?;
        self.delivered += 1;
        for observer in &mut self.observers {
            observer(event);
        }
        Some(event)
    }

    /// Take every queued event without notifying observers
    pub fn drain(&self) -> Vec<PipelineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    pub fn is_idle(&self) -> bool {
        self.rx.is_empty()
    }

    /// Events handed out by [`EventBus::next`] so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.pending())
            .field("observers", &self.observers.len())
            .field("delivered", &self.delivered)
            .finish()
    }
}
