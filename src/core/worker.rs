//! Background execution of scans and deletions.
//!
//! Each operation runs on its own thread. Progress and completion reach the
//! caller as [`Event`]s on a channel, so the caller's thread owns all display
//! state and nothing calls back into it from the worker.

use crate::core::control::CancellationToken;
use crate::core::deleter::{Deleter, DeletionReport, RetentionPolicy};
use crate::core::finder::{DuplicateFinder, ScanReport};
use crate::core::grouper::DuplicateGroup;
use crate::error::{DuplicateFinderError, Result};
use crate::events::{
    DeleteEvent, Event, EventChannel, EventReceiver, EventSender, PipelineEvent, PipelinePhase,
    PipelineSummary, ScanEvent,
};
use std::any::Any;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::error;

/// Handle to an operation running on a worker thread
pub struct WorkerHandle<T> {
    cancel: CancellationToken,
    events: EventReceiver,
    handle: JoinHandle<Result<T>>,
}

/// Handle to a background scan
pub type ScanHandle = WorkerHandle<ScanReport>;

/// Handle to a background deletion
pub type DeleteHandle = WorkerHandle<DeletionReport>;

impl<T> WorkerHandle<T> {
    /// Request cancellation at the next checkpoint
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The token the worker polls
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Events emitted by the worker. The stream ends when the worker exits.
    pub fn events(&self) -> &EventReceiver {
        &self.events
    }

    /// Wait for the worker and return its result.
    ///
    /// A worker that panicked surfaces as [`DuplicateFinderError::Internal`].
    pub fn join(self) -> Result<T> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(%message, "worker thread panicked");
                Err(DuplicateFinderError::Internal(format!(
                    "worker thread panicked: {message}"
                )))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn spawn_worker<T, F>(name: &str, cancel: CancellationToken, work: F) -> Result<WorkerHandle<T>>
where
    T: Send + 'static,
    F: FnOnce(EventSender, CancellationToken) -> Result<T> + Send + 'static,
{
    let (sender, receiver) = EventChannel::new();
    let worker_token = cancel.clone();

    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || work(sender, worker_token))
        .map_err(|e| DuplicateFinderError::Internal(format!("failed to spawn {name} thread: {e}")))?;

    Ok(WorkerHandle {
        cancel,
        events: receiver,
        handle,
    })
}

/// Run `finder.scan(root)` on a worker thread.
///
/// `cancel` is polled before every batch; pass a clone of a token the UI
/// keeps, or a fresh one and cancel through the handle.
pub fn spawn_scan(
    finder: DuplicateFinder,
    root: PathBuf,
    cancel: CancellationToken,
) -> Result<ScanHandle> {
    spawn_worker("duplicate-scan", cancel, move |events, cancel| {
        events.send(Event::Pipeline(PipelineEvent::Started));
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));
        events.send(Event::Scan(ScanEvent::Started { root: root.clone() }));

        let report = match finder.scan(&root, &events, &cancel) {
            Ok(report) => report,
            Err(e) => {
                events.send(Event::Pipeline(PipelineEvent::Error {
                    message: e.to_string(),
                }));
                return Err(e.into());
            }
        };

        if report.cancelled {
            events.send(Event::Pipeline(PipelineEvent::Cancelled));
            return Ok(report);
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: report.total_files,
            duplicate_groups: report.groups.len(),
            diagnostics: report.diagnostics.len(),
        }));
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_files: report.total_files,
                duplicate_groups: report.groups.len(),
                duplicate_count: report.duplicate_count(),
                diagnostics: report.diagnostics.len(),
                duration_ms: report.duration_ms,
            },
        }));

        Ok(report)
    })
}

/// Delete duplicates from `groups` on a worker thread.
pub fn spawn_delete(
    groups: Vec<DuplicateGroup>,
    policy: RetentionPolicy,
    deleter: Deleter,
    cancel: CancellationToken,
) -> Result<DeleteHandle> {
    spawn_worker("duplicate-delete", cancel, move |events, cancel| {
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Deleting,
        }));
        events.send(Event::Delete(DeleteEvent::Started {
            planned: Deleter::planned(&groups, policy),
        }));

        let report = deleter.delete(&groups, policy, &cancel);

        events.send(Event::Delete(DeleteEvent::Completed {
            deleted: report.deleted.len(),
            failed: report.diagnostics.len(),
            cancelled: report.cancelled,
        }));

        Ok(report)
    })
}
