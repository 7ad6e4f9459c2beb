//! FFI contact-form API for the Flutter landing page.
//!
//! # Responsibility
//! - Expose one submission controller per open contact modal to Dart via FRB.
//! - Flatten controller state into plain view envelopes the UI renders verbatim.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - A closed form id is forgotten; late send outcomes for it are dropped.
//! - Submits run on one process-wide tokio runtime owned by this crate.

use contact_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_form_field,
    EmailJsConfig, EmailJsSender, FormSubmissionController, NoticeKind, SendCapability,
    SubmitOutcome, DEFAULT_DISPLAY_WINDOW,
};
use log::{info, warn};
use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

type FormRegistry = HashMap<String, Arc<FormSubmissionController>>;

static RUNTIME: OnceCell<Runtime> = OnceCell::new();
static OPEN_FORMS: Lazy<Mutex<FormRegistry>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may create `log_dir`.
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Response envelope for opening a contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOpenResponse {
    pub ok: bool,
    /// Handle for later calls; present when `ok`.
    pub form_id: Option<String>,
    pub message: String,
}

/// Render-ready state of one contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormView {
    /// Whether the request addressed an open form and a known field.
    pub ok: bool,
    pub form_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// `idle|submitting|succeeded|failed`, empty when `ok` is false.
    pub status: String,
    /// Error banner text.
    pub error: Option<String>,
    /// Toast text.
    pub notice: Option<String>,
    pub notice_is_error: bool,
    /// Whether the submit button is enabled.
    pub can_submit: bool,
    /// Diagnostic text, not for end users.
    pub diagnostic: String,
}

impl ContactFormView {
    fn of(
        form_id: &str,
        controller: &FormSubmissionController,
        diagnostic: impl Into<String>,
    ) -> Self {
        let snapshot = controller.snapshot();
        let notice = snapshot.status.notice();
        Self {
            ok: true,
            form_id: form_id.to_string(),
            name: snapshot.fields.name,
            email: snapshot.fields.email,
            message: snapshot.fields.message,
            status: snapshot.status.label().to_string(),
            error: snapshot.status.error_message().map(str::to_string),
            notice_is_error: matches!(&notice, Some(notice) if notice.kind == NoticeKind::Error),
            notice: notice.map(|notice| notice.text),
            can_submit: controller.can_submit(),
            diagnostic: diagnostic.into(),
        }
    }

    fn rejected(form_id: &str, diagnostic: impl Into<String>) -> Self {
        Self {
            ok: false,
            form_id: form_id.to_string(),
            name: String::new(),
            email: String::new(),
            message: String::new(),
            status: String::new(),
            error: None,
            notice: None,
            notice_is_error: false,
            can_submit: false,
            diagnostic: diagnostic.into(),
        }
    }
}

/// Opens a contact form backed by EmailJS.
///
/// `success_display_ms = None` (or `0`) uses the default display window.
///
/// # FFI contract
/// - Sync call, no network traffic.
/// - Never panics; blank credentials return `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_open_form(
    service_id: String,
    template_id: String,
    public_key: String,
    success_display_ms: Option<u32>,
) -> ContactOpenResponse {
    let config = match EmailJsConfig::new(service_id, template_id, public_key) {
        Ok(config) => config,
        Err(err) => return open_failure(format!("contact_open_form failed: {err}")),
    };
    let sender = match EmailJsSender::new(config) {
        Ok(sender) => sender,
        Err(err) => return open_failure(format!("contact_open_form failed: {err}")),
    };
    let display_window = match success_display_ms {
        Some(0) | None => DEFAULT_DISPLAY_WINDOW,
        Some(ms) => Duration::from_millis(u64::from(ms)),
    };
    let form_id = register_form(Arc::new(sender), display_window);
    ContactOpenResponse {
        ok: true,
        form_id: Some(form_id),
        message: "Contact form opened.".to_string(),
    }
}

/// Sets one field by input id (`name|email|message`).
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Unknown form or field ids return `ok = false` and change nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_update_field(form_id: String, field: String, value: String) -> ContactFormView {
    let Some(controller) = find_form(&form_id) else {
        return ContactFormView::rejected(&form_id, "contact form is not open");
    };
    match parse_form_field(&field) {
        Ok(field) => {
            controller.update_field(field, value);
            ContactFormView::of(&form_id, &controller, "")
        }
        Err(err) => {
            ContactFormView::rejected(&form_id, format!("contact_update_field failed: {err}"))
        }
    }
}

/// Returns the current state of one form.
///
/// Polled by the view to pick up timed transitions such as success auto-dismiss.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_form_view(form_id: String) -> ContactFormView {
    match find_form(&form_id) {
        Some(controller) => ContactFormView::of(&form_id, &controller, ""),
        None => ContactFormView::rejected(&form_id, "contact form is not open"),
    }
}

/// Submits one form and resolves once the send outcome is known.
///
/// # FFI contract
/// - Async call; resolves immediately for validation failures and ignored repeats.
/// - Never panics; `diagnostic` carries the submit outcome label.
pub async fn contact_submit(form_id: String) -> ContactFormView {
    let Some(controller) = find_form(&form_id) else {
        return ContactFormView::rejected(&form_id, "contact form is not open");
    };
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            let diagnostic = format!("contact_submit failed: {err}");
            return ContactFormView::of(&form_id, &controller, diagnostic);
        }
    };

    let task = runtime.spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit().await }
    });
    match task.await {
        Ok(outcome) => ContactFormView::of(&form_id, &controller, outcome_label(outcome)),
        Err(err) => {
            warn!("event=submit_task module=ffi status=error");
            ContactFormView::of(&form_id, &controller, format!("contact_submit failed: {err}"))
        }
    }
}

/// Closes a form; the modal was dismissed.
///
/// Returns `false` when the id was not open.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_close_form(form_id: String) -> bool {
    let removed = open_forms().remove(&form_id);
    match removed {
        Some(controller) => {
            controller.dispose();
            info!("event=form_closed module=ffi status=ok open_forms={}", open_forms().len());
            true
        }
        None => false,
    }
}

fn register_form(sender: Arc<dyn SendCapability>, display_window: Duration) -> String {
    let form_id = Uuid::new_v4().to_string();
    let controller = Arc::new(FormSubmissionController::with_display_window(
        sender,
        display_window,
    ));
    let mut forms = open_forms();
    forms.insert(form_id.clone(), controller);
    info!("event=form_opened module=ffi status=ok open_forms={}", forms.len());
    form_id
}

fn find_form(form_id: &str) -> Option<Arc<FormSubmissionController>> {
    open_forms().get(form_id).cloned()
}

fn open_forms() -> MutexGuard<'static, FormRegistry> {
    OPEN_FORMS.lock().unwrap_or_else(PoisonError::into_inner)
}

fn runtime() -> Result<&'static Runtime, String> {
    RUNTIME.get_or_try_init(|| {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("contact-ffi")
            .enable_all()
            .build()
            .map_err(|err| format!("failed to start async runtime: {err}"))
    })
}

fn open_failure(message: String) -> ContactOpenResponse {
    warn!("event=form_open module=ffi status=error");
    ContactOpenResponse {
        ok: false,
        form_id: None,
        message,
    }
}

fn outcome_label(outcome: SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Sent => "sent",
        SubmitOutcome::SendFailed => "send_failed",
        SubmitOutcome::Rejected(_) => "rejected",
        SubmitOutcome::Ignored => "ignored",
        SubmitOutcome::Discarded => "discarded",
    }
}
