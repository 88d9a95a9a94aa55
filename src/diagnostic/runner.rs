//! The diagnostic workflow runner
//!
//! Executes the scripted checklist against the log store: clear the
//! previous trace, append the ten steps with a pacing delay between
//! them, then resolve the first active connectivity event if one exists.
//! The sequence is strictly linear; there is no retry, no branching and
//! no cancellation once a run has started.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::steps::DIAGNOSTIC_STEPS;
use super::DiagnosticError;
use crate::notify::{Notification, Notifier};
use crate::storage::{LogEntry, PortalStorage, StorageResult, SystemEvent};

/// Default pacing delay between checklist steps
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(300);

/// Result of one completed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Number of log entries written
    pub steps_logged: u32,
    /// The connectivity event that was resolved, when one was found
    pub resolved_event: Option<Uuid>,
}

pub struct DiagnosticRunner {
    storage: Arc<dyn PortalStorage>,
    notifier: Arc<dyn Notifier>,
    step_delay: Duration,
}

impl DiagnosticRunner {
    pub fn new(
        storage: Arc<dyn PortalStorage>,
        notifier: Arc<dyn Notifier>,
        step_delay: Duration,
    ) -> Self {
        Self {
            storage,
            notifier,
            step_delay,
        }
    }

    /// Execute one run of the checklist.
    ///
    /// `events` is the caller's current view of the event list; the first
    /// active connectivity event in it is resolved after the trace has
    /// been written. When no such event exists the trace is still written
    /// and the run completes silently with no completion notification.
    ///
    /// A storage failure aborts the remaining sequence and reports the
    /// failing step; rows already inserted are left in place.
    pub async fn run(&self, events: &[SystemEvent]) -> Result<RunOutcome, DiagnosticError> {
        info!("Starting diagnostic checklist run");

        self.storage
            .log_store()
            .clear()
            .await
            .map_err(DiagnosticError::Clear)?;

        for step in DIAGNOSTIC_STEPS {
            tokio::time::sleep(self.step_delay).await;
            debug!(step = step.step_number, component = step.component, "Logging step");
            self.storage
                .log_store()
                .append(step.to_log_entry())
                .await
                .map_err(|source| DiagnosticError::Step {
                    step: step.step_number,
                    source,
                })?;
        }

        let resolved_event = match events.iter().find(|e| e.is_active_connectivity()) {
            Some(event) => {
                let resolved_at = chrono::Utc::now();
                self.storage
                    .event_store()
                    .resolve(event.id, resolved_at)
                    .await
                    .map_err(|source| DiagnosticError::Resolve {
                        id: event.id,
                        source,
                    })?;
                self.notifier.notify(Notification::success(
                    "\u{2705} Diagnostic Complete",
                    "Connection to localhost restored successfully!",
                ));
                info!(event = %event.id, "Resolved connectivity event");
                Some(event.id)
            }
            // No matching active event: nothing further, silently
            None => None,
        };

        Ok(RunOutcome {
            steps_logged: DIAGNOSTIC_STEPS.len() as u32,
            resolved_event,
        })
    }

    /// Read the current trace, ordered by step number ascending.
    /// Does not mutate any state.
    pub async fn fetch_logs(&self) -> StorageResult<Vec<LogEntry>> {
        self.storage.log_store().list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationQueue;
    use crate::storage::{EventStatus, MemoryBackend, NewLogEntry, NewSystemEvent};

    fn runner_with(
        storage: Arc<dyn PortalStorage>,
    ) -> (DiagnosticRunner, Arc<NotificationQueue>) {
        let queue = Arc::new(NotificationQueue::new());
        let runner = DiagnosticRunner::new(storage, queue.clone(), DEFAULT_STEP_DELAY);
        (runner, queue)
    }

    async fn seed_connectivity_event(storage: &dyn PortalStorage) -> SystemEvent {
        storage
            .event_store()
            .insert(NewSystemEvent {
                event_type: "connectivity".to_string(),
                status: EventStatus::Active,
                description: "Connection to localhost down".to_string(),
                severity: "high".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn run_writes_exactly_ten_steps_in_order() {
        let storage: Arc<dyn PortalStorage> = Arc::new(MemoryBackend::new());
        // Junk rows from a previous run must be cleared
        storage
            .log_store()
            .append(NewLogEntry {
                step_number: 99,
                component: "stale".to_string(),
                action: "stale".to_string(),
                details: "stale".to_string(),
            })
            .await
            .unwrap();

        let (runner, _queue) = runner_with(storage.clone());
        let outcome = runner.run(&[]).await.unwrap();
        assert_eq!(outcome.steps_logged, 10);

        let logs = runner.fetch_logs().await.unwrap();
        assert_eq!(logs.len(), 10);
        for (entry, step) in logs.iter().zip(DIAGNOSTIC_STEPS) {
            assert_eq!(entry.step_number, step.step_number);
            assert_eq!(entry.component, step.component);
            assert_eq!(entry.action, step.action);
            assert_eq!(entry.details, step.details);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_resolves_first_active_connectivity_event_and_notifies() {
        let storage: Arc<dyn PortalStorage> = Arc::new(MemoryBackend::new());
        let event = seed_connectivity_event(storage.as_ref()).await;

        let (runner, queue) = runner_with(storage.clone());
        let events = storage.event_store().list().await.unwrap();
        let outcome = runner.run(&events).await.unwrap();
        assert_eq!(outcome.resolved_event, Some(event.id));

        let refreshed = storage.event_store().list().await.unwrap();
        assert_eq!(refreshed[0].status, EventStatus::Resolved);
        assert!(refreshed[0].resolved_at.is_some());

        let notifications = queue.drain();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].title.contains("Diagnostic Complete"));
    }

    #[tokio::test(start_paused = true)]
    async fn run_without_matching_event_is_silent() {
        let storage: Arc<dyn PortalStorage> = Arc::new(MemoryBackend::new());
        // A resolved connectivity event and an active event of another
        // type must both be ignored
        storage
            .event_store()
            .insert(NewSystemEvent {
                event_type: "intrusion".to_string(),
                status: EventStatus::Active,
                description: "Suspicious login attempt".to_string(),
                severity: "medium".to_string(),
            })
            .await
            .unwrap();

        let (runner, queue) = runner_with(storage.clone());
        let events = storage.event_store().list().await.unwrap();
        let before = events.clone();
        let outcome = runner.run(&events).await.unwrap();

        assert_eq!(outcome.resolved_event, None);
        assert!(queue.is_empty());

        let after = storage.event_store().list().await.unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0].status, EventStatus::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_logs_does_not_mutate_the_trace() {
        let storage: Arc<dyn PortalStorage> = Arc::new(MemoryBackend::new());
        let (runner, _queue) = runner_with(storage.clone());
        runner.run(&[]).await.unwrap();

        let first = runner.fetch_logs().await.unwrap();
        let second = runner.fetch_logs().await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(
            first.iter().map(|l| l.id).collect::<Vec<_>>(),
            second.iter().map(|l| l.id).collect::<Vec<_>>()
        );
    }
}
