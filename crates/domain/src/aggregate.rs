//! Core aggregate and domain event traits.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent:
    Serialize + DeserializeOwned + Send + Sync + Clone + std::fmt::Debug
{
    /// Returns the event type name.
    ///
    /// This is used when the event is wrapped for publication.
    fn event_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Ordered mailbox of events recorded by an aggregate but not yet published.
///
/// Draining hands the events over exactly once and leaves the log empty.
/// Events that are never drained are lost with the aggregate instance.
#[derive(Debug, Clone)]
pub struct EventLog<E> {
    pending: Vec<E>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> EventLog<E> {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Removes and returns every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    /// Returns the pending events without removing them.
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Trait for aggregate roots that record domain events.
///
/// An aggregate is a consistency boundary whose invariants are enforced by a
/// single owning object. Aggregates compose an [`EventLog`] and expose it
/// through this trait; `record` and `drain_events` come for free.
pub trait AggregateRoot {
    /// The type of events this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identifier as a plain token.
    fn aggregate_id(&self) -> &str;

    /// Returns the aggregate's event log.
    fn event_log(&self) -> &EventLog<Self::Event>;

    /// Returns the aggregate's event log mutably.
    fn event_log_mut(&mut self) -> &mut EventLog<Self::Event>;

    /// Records an event.
    fn record(&mut self, event: Self::Event) {
        self.event_log_mut().record(event);
    }

    /// Removes and returns every recorded event, oldest first.
    fn drain_events(&mut self) -> Vec<Self::Event> {
        self.event_log_mut().drain()
    }

    /// Returns the recorded events without removing them.
    fn pending_events(&self) -> &[Self::Event] {
        self.event_log().pending()
    }
}
