//! Notification channel.
//!
//! Consumes operation events into short-lived user-visible messages.
//! Exactly one notification per operation outcome; delivery is decoupled
//! from the operation that produced the event, so services have no UI
//! dependency.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use metrics::counter;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cache::lock::mutex_lock;
use crate::domain::types::EntityKind;

use super::events::{EventQueue, OperationEvent, Outcome, Verb};

const SOURCE: &str = "application::notify";

const CONSUME_BATCH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

/// A user-visible message derived from one operation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub severity: Severity,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Notification {
    fn from_event(event: &OperationEvent) -> Self {
        let (title, description, severity) = match &event.outcome {
            Outcome::Succeeded => (
                format!(
                    "{} {} successfully",
                    capitalize(event.entity.label()),
                    event.verb.past()
                ),
                None,
                Severity::Success,
            ),
            Outcome::Failed { message } => (
                format!("Error {} {}", event.verb.gerund(), event.entity.label()),
                Some(message.clone()),
                Severity::Error,
            ),
        };

        Self {
            id: event.id,
            title,
            description,
            severity,
            created_at: event.timestamp,
        }
    }
}

/// Drains the event queue into a bounded feed of recent notifications.
pub struct Notifier {
    queue: Arc<EventQueue>,
    feed: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl Notifier {
    pub fn new(queue: Arc<EventQueue>, capacity: usize) -> Self {
        Self {
            queue,
            feed: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Convert pending events into notifications. Returns how many were
    /// produced. Safe to call from a timer and from request handlers; each
    /// event is consumed at most once.
    pub fn consume(&self) -> usize {
        let events = self.queue.drain(CONSUME_BATCH);
        if events.is_empty() {
            return 0;
        }

        let mut feed = mutex_lock(&self.feed, SOURCE, "consume");
        let count = events.len();
        for event in &events {
            let notification = Notification::from_event(event);
            counter!(
                "prospecta_notifications_total",
                "severity" => match notification.severity {
                    Severity::Success => "success",
                    Severity::Error => "error",
                }
            )
            .increment(1);
            feed.push_back(notification);
            while feed.len() > self.capacity {
                feed.pop_front();
            }
        }
        count
    }

    /// Most recent notifications, newest first.
    pub fn recent(&self, limit: usize) -> Vec<Notification> {
        let feed = mutex_lock(&self.feed, SOURCE, "recent");
        feed.iter().rev().take(limit).cloned().collect()
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Copy helpers shared with tests and the HTTP layer.
pub fn success_title(entity: EntityKind, verb: Verb) -> String {
    format!("{} {} successfully", capitalize(entity.label()), verb.past())
}

pub fn failure_title(entity: EntityKind, verb: Verb) -> String {
    format!("Error {} {}", verb.gerund(), entity.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_event_becomes_success_notification() {
        let queue = Arc::new(EventQueue::new());
        let notifier = Notifier::new(queue.clone(), 10);

        queue.publish(EntityKind::Project, Verb::Create, Outcome::Succeeded);
        assert_eq!(notifier.consume(), 1);

        let recent = notifier.recent(10);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].title, "Project created successfully");
        assert_eq!(recent[0].severity, Severity::Success);
        assert!(recent[0].description.is_none());
    }

    #[test]
    fn failure_event_carries_underlying_message() {
        let queue = Arc::new(EventQueue::new());
        let notifier = Notifier::new(queue.clone(), 10);

        queue.publish(
            EntityKind::CaseStudy,
            Verb::Delete,
            Outcome::failed("network unreachable"),
        );
        notifier.consume();

        let recent = notifier.recent(10);
        assert_eq!(recent[0].title, "Error deleting case study");
        assert_eq!(recent[0].description.as_deref(), Some("network unreachable"));
        assert_eq!(recent[0].severity, Severity::Error);
    }

    #[test]
    fn each_event_is_consumed_once() {
        let queue = Arc::new(EventQueue::new());
        let notifier = Notifier::new(queue.clone(), 10);

        queue.publish(EntityKind::Project, Verb::Update, Outcome::Succeeded);
        assert_eq!(notifier.consume(), 1);
        assert_eq!(notifier.consume(), 0);
        assert_eq!(notifier.recent(10).len(), 1);
    }

    #[test]
    fn feed_is_bounded_and_newest_first() {
        let queue = Arc::new(EventQueue::new());
        let notifier = Notifier::new(queue.clone(), 2);

        for _ in 0..3 {
            queue.publish(EntityKind::Project, Verb::Create, Outcome::Succeeded);
            notifier.consume();
        }
        queue.publish(EntityKind::Proposal, Verb::Delete, Outcome::Succeeded);
        notifier.consume();

        let recent = notifier.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "Proposal deleted successfully");
    }

    #[test]
    fn copy_helpers_match_notification_copy() {
        assert_eq!(
            success_title(EntityKind::CaseStudy, Verb::Create),
            "Case study created successfully"
        );
        assert_eq!(
            failure_title(EntityKind::Insight, Verb::Generate),
            "Error generating insight"
        );
    }
}
