// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::warn;

use crate::RemoteCallError;

/// Surfaces a failed remote call to the user. Implementations must not fail
/// and must not swallow repeats: one call, one notification.
pub trait FailureNotifier {
    fn notify(&mut self, error: &RemoteCallError);
}

/// Collects notifications until the UI drains them into its status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQueue {
    pending: Vec<RemoteCallError>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<RemoteCallError> {
        std::mem::take(&mut self.pending)
    }
}

impl FailureNotifier for NotificationQueue {
    fn notify(&mut self, error: &RemoteCallError) {
        warn!(code = error.code, message = %error.message, "remote call failed");
        self.pending.push(error.clone());
    }
}

/// One-line, user-facing rendering of a failure.
pub fn notification_text(error: &RemoteCallError) -> String {
    if error.is_transport() {
        return format!(
            "server unreachable: {}; check [remote].base_url and press r to retry",
            error.message
        );
    }
    format!("server error {}: {}", error.code, error.message)
}
