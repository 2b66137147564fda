//! Operation event system.
//!
//! Write operations publish their outcome here instead of talking to a
//! notification surface directly. Publishing is a queue push — it never
//! blocks or fails the operation — and the notifier consumes the queue
//! into user-visible messages.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::cache::lock::mutex_lock;
use crate::domain::types::EntityKind;

const SOURCE: &str = "application::events";

/// Monotonic epoch for ordering events within this process.
pub type Epoch = u64;

/// The write operation an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Update,
    Delete,
    Generate,
}

impl Verb {
    pub fn past(self) -> &'static str {
        match self {
            Verb::Create => "created",
            Verb::Update => "updated",
            Verb::Delete => "deleted",
            Verb::Generate => "generated",
        }
    }

    pub fn gerund(self) -> &'static str {
        match self {
            Verb::Create => "creating",
            Verb::Update => "updating",
            Verb::Delete => "deleting",
            Verb::Generate => "generating",
        }
    }
}

/// Terminal outcome of one operation instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed { message: String },
}

impl Outcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// One operation outcome, published exactly once per operation instance.
#[derive(Debug, Clone)]
pub struct OperationEvent {
    /// Unique identifier for idempotency (UUIDv4).
    pub id: Uuid,
    /// Monotonic epoch for ordering within this process.
    pub epoch: Epoch,
    pub entity: EntityKind,
    pub verb: Verb,
    pub outcome: Outcome,
    pub timestamp: OffsetDateTime,
}

/// In-memory queue of operation events.
///
/// Services publish, the notifier drains. A mutex is enough here since
/// contention is expected to be low.
pub struct EventQueue {
    queue: Mutex<VecDeque<OperationEvent>>,
    epoch_counter: AtomicU64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            epoch_counter: AtomicU64::new(0),
        }
    }

    pub fn next_epoch(&self) -> Epoch {
        self.epoch_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Publish an operation outcome. Fire-and-forget for the caller.
    pub fn publish(&self, entity: EntityKind, verb: Verb, outcome: Outcome) {
        let event = OperationEvent {
            id: Uuid::new_v4(),
            epoch: self.next_epoch(),
            entity,
            verb,
            outcome,
            timestamp: OffsetDateTime::now_utc(),
        };

        info!(
            event_id = %event.id,
            event_epoch = event.epoch,
            entity = ?event.entity,
            verb = ?event.verb,
            success = event.outcome.is_success(),
            "Operation event enqueued"
        );

        mutex_lock(&self.queue, SOURCE, "publish").push_back(event);
    }

    /// Drain up to `limit` events in FIFO order.
    pub fn drain(&self, limit: usize) -> Vec<OperationEvent> {
        let mut queue = mutex_lock(&self.queue, SOURCE, "drain");
        let count = limit.min(queue.len());
        queue.drain(..count).collect()
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.queue, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        mutex_lock(&self.queue, SOURCE, "clear").clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_monotonicity() {
        let queue = EventQueue::new();

        let e1 = queue.next_epoch();
        let e2 = queue.next_epoch();
        let e3 = queue.next_epoch();

        assert!(e1 < e2);
        assert!(e2 < e3);
    }

    #[test]
    fn publish_and_drain_fifo() {
        let queue = EventQueue::new();

        queue.publish(EntityKind::Project, Verb::Create, Outcome::Succeeded);
        queue.publish(
            EntityKind::CaseStudy,
            Verb::Delete,
            Outcome::failed("gone"),
        );
        queue.publish(EntityKind::Project, Verb::Update, Outcome::Succeeded);

        assert_eq!(queue.len(), 3);

        let events = queue.drain(2);
        assert_eq!(events.len(), 2);
        assert_eq!(queue.len(), 1);

        assert_eq!(events[0].verb, Verb::Create);
        assert_eq!(events[1].verb, Verb::Delete);
        assert!(events[0].epoch < events[1].epoch);
    }

    #[test]
    fn drain_more_than_available() {
        let queue = EventQueue::new();
        queue.publish(EntityKind::Insight, Verb::Generate, Outcome::Succeeded);

        let events = queue.drain(100);
        assert_eq!(events.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn verb_copy_for_notifications() {
        assert_eq!(Verb::Create.past(), "created");
        assert_eq!(Verb::Create.gerund(), "creating");
        assert_eq!(Verb::Generate.gerund(), "generating");
    }
}
