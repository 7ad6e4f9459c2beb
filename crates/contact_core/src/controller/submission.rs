//! Bounded async form-submission controller.
//!
//! # Responsibility
//! - Apply field edits and validate on submit.
//! - Gate the outbound send so only one is ever in flight.
//! - Auto-dismiss the success notice after the display window.
//!
//! # Invariants
//! - `Submitting` is only entered from a validation-passing submit.
//! - While `Submitting`, further submits are ignored and never reach the sender.
//! - Fields are cleared only after a successful send; failures keep them.
//! - The state lock is never held across the outbound await.
//! - After `dispose`, state is frozen and late send outcomes are dropped.

use crate::controller::reset_timer::ScheduledReset;
use crate::model::form::{FormField, FormFields, FormSnapshot, SubmissionStatus};
use crate::model::validation::{validate_fields, ValidationError};
use crate::send::SendCapability;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// How long a success notice stays before the form returns to idle.
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(4);

/// Failure reason shown when the send capability fails.
pub const SEND_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

/// Result of one `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Sender succeeded; status is `Succeeded` and fields were cleared.
    Sent,
    /// Sender failed; status is `Failed` and fields were kept.
    SendFailed,
    /// Validation failed; nothing was sent.
    Rejected(ValidationError),
    /// Another submit was in flight, or the form is disposed.
    Ignored,
    /// The form was disposed while the send was in flight.
    Discarded,
}

struct FormState {
    fields: FormFields,
    status: SubmissionStatus,
    // Bumped on every transition into `Succeeded`.
    success_generation: u64,
    pending_reset: Option<ScheduledReset>,
    disposed: bool,
}

struct Shared {
    state: Mutex<FormState>,
    updates: watch::Sender<FormSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &FormState) {
        self.updates.send_replace(FormSnapshot {
            fields: state.fields.clone(),
            status: state.status.clone(),
        });
    }

    fn expire_success(&self, generation: u64) {
        let mut state = self.lock();
        if state.disposed
            || state.status != SubmissionStatus::Succeeded
            || state.success_generation != generation
        {
            return;
        }
        state.status = SubmissionStatus::Idle;
        // Our own handle; the callback is already running.
        let finished = state.pending_reset.take();
        self.publish(&state);
        drop(state);
        drop(finished);
        debug!("event=success_expired module=controller status=ok generation={generation}");
    }
}

/// Owns one form's fields and status and drives its outbound send.
pub struct FormSubmissionController {
    shared: Arc<Shared>,
    sender: Arc<dyn SendCapability>,
    display_window: Duration,
    // Runtime current at construction, if any; hosts timed resets.
    runtime: Option<Handle>,
}

impl FormSubmissionController {
    /// Creates an idle, empty form using the default display window.
    pub fn new(sender: Arc<dyn SendCapability>) -> Self {
        Self::with_display_window(sender, DEFAULT_DISPLAY_WINDOW)
    }

    /// Creates an idle, empty form with a custom display window.
    pub fn with_display_window(sender: Arc<dyn SendCapability>, display_window: Duration) -> Self {
        let (updates, _) = watch::channel(FormSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(FormState {
                    fields: FormFields::default(),
                    status: SubmissionStatus::Idle,
                    success_generation: 0,
                    pending_reset: None,
                    disposed: false,
                }),
                updates,
            }),
            sender,
            display_window,
            runtime: Handle::try_current().ok(),
        }
    }

    pub fn display_window(&self) -> Duration {
        self.display_window
    }

    pub fn fields(&self) -> FormFields {
        self.shared.lock().fields.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.shared.lock().status.clone()
    }

    /// Returns fields and status read under one lock.
    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.shared.lock();
        FormSnapshot {
            fields: state.fields.clone(),
            status: state.status.clone(),
        }
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.shared.lock();
        !state.disposed && !state.status.is_submitting()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// Subscribes to state changes.
    ///
    /// Receivers may be dropped at any time; publishing never depends on them.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Sets one field verbatim.
    ///
    /// A displayed failure is cleared back to `Idle`; other statuses are kept.
    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let mut state = self.shared.lock();
        if state.disposed {
            return;
        }
        let changed = state.fields.set(field, value);
        let cleared_failure = state.status.is_failed();
        if cleared_failure {
            state.status = SubmissionStatus::Idle;
        }
        if changed || cleared_failure {
            self.shared.publish(&state);
        }
    }

    /// Validates and, when valid, sends the form once.
    ///
    /// The success reset runs on the runtime current at construction, else the
    /// one driving this call. Without either, the success notice stays until the
    /// next submit.
    pub async fn submit(&self) -> SubmitOutcome {
        let fields = {
            let mut state = self.shared.lock();
            if state.disposed {
                return SubmitOutcome::Ignored;
            }
            if state.status.is_submitting() {
                debug!("event=submit_ignored module=controller status=in_flight");
                return SubmitOutcome::Ignored;
            }
            if let Some(pending) = state.pending_reset.take() {
                pending.cancel();
            }
            if let Err(err) = validate_fields(&state.fields) {
                info!(
                    "event=submit_rejected module=controller status=invalid reason={}",
                    err.code()
                );
                state.status = SubmissionStatus::failed(err.message());
                self.shared.publish(&state);
                return SubmitOutcome::Rejected(err);
            }
            state.status = SubmissionStatus::Submitting;
            self.shared.publish(&state);
            state.fields.clone()
        };

        info!(
            "event=submit_start module=controller status=ok provider={} \
             name_len={} email_len={} message_len={}",
            self.sender.provider_id(),
            fields.name.chars().count(),
            fields.email.chars().count(),
            fields.message.chars().count()
        );
        let result = self.sender.send(&fields).await;

        let mut state = self.shared.lock();
        if state.disposed {
            info!(
                "event=submit_discarded module=controller status=disposed delivered={}",
                result.is_ok()
            );
            return SubmitOutcome::Discarded;
        }
        match result {
            Ok(()) => {
                let generation = state.success_generation + 1;
                let reset = self.schedule_reset(generation);
                state.fields.clear();
                state.status = SubmissionStatus::Succeeded;
                state.success_generation = generation;
                state.pending_reset = reset;
                self.shared.publish(&state);
                info!("event=submit_done module=controller status=ok");
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!("event=submit_done module=controller status=error error={err}");
                state.status = SubmissionStatus::failed(SEND_FAILURE_MESSAGE);
                self.shared.publish(&state);
                SubmitOutcome::SendFailed
            }
        }
    }

    /// Tears the form down: cancels the pending reset and freezes state.
    ///
    /// Idempotent. A send already in flight still completes, but its outcome is dropped.
    pub fn dispose(&self) {
        let pending = {
            let mut state = self.shared.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.pending_reset.take()
        };
        if let Some(pending) = pending {
            pending.cancel();
        }
        debug!("event=form_disposed module=controller status=ok");
    }

    fn schedule_reset(&self, generation: u64) -> Option<ScheduledReset> {
        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!("event=reset_schedule module=controller status=error reason=no_runtime");
            return None;
        };
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Some(ScheduledReset::after(&runtime, self.display_window, move || {
            if let Some(shared) = shared.upgrade() {
                shared.expire_success(generation);
            }
        }))
    }
}

impl Drop for FormSubmissionController {
    fn drop(&mut self) {
        self.dispose();
    }
}
