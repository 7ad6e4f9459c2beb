//! Submission controller for one contact form instance.
//!
//! # Responsibility
//! - Own field state and submission status for one mounted form.
//! - Drive the single outbound send and translate its outcome into status.
//!
//! # Invariants
//! - At most one send is in flight per controller.
//! - No status update is applied after the controller is disposed.

pub mod reset_timer;
pub mod submission;
