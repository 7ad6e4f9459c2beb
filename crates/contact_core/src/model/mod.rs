//! Contact form domain model.
//!
//! # Responsibility
//! - Define the field record and submission status shared by controller and views.
//! - Own the local validation rules applied before any outbound call.
//!
//! # Invariants
//! - Field values are stored verbatim; trimming only happens while validating.
//! - Every status a view can observe has a stable string label.

pub mod form;
pub mod validation;
