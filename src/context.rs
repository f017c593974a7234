//! Invocation context
//!
//! Carries the request id, an optional deadline and a cancellation flag down to
//! resource callbacks. The router never enforces either; callbacks may consult them.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InvocationContext {
    request_id: String,
    deadline: Option<DateTime<Utc>>,
    cancelled: Arc<AtomicBool>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Context with no id, no deadline and no way to be cancelled from outside
    pub fn background() -> Self {
        Self::new("")
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline relative to now
    #[must_use]
    pub fn with_timeout(self, timeout: TimeDelta) -> Self {
        self.with_deadline(Utc::now() + timeout)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self) -> Option<TimeDelta> {
        self.deadline
            .map(|deadline| (deadline - Utc::now()).max(TimeDelta::zero()))
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Utc::now() >= deadline)
    }

    /// Signal cancellation to every clone of this context
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::background()
    }
}
