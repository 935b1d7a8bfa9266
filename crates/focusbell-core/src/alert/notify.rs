use notify_rust::{Notification, Urgency};

use super::Notifier;
use crate::error::{CoreError, Result};

/// Desktop notifications through the freedesktop notification daemon.
///
/// There is no runtime permission prompt on this platform: "granted" is the
/// user's configuration toggle, and an unreachable daemon surfaces as a
/// `show` failure, which the dispatcher treats as a degraded condition.
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for DesktopNotifier {
    fn is_granted(&self) -> bool {
        self.enabled
    }

    fn show(&self, title: &str, body: &str) -> Result<()> {
        Notification::new()
            .summary(title)
            .body(body)
            .appname("focusbell")
            .icon("alarm-clock")
            .urgency(Urgency::Critical)
            .show()
            .map(|_| ())
            .map_err(|e| CoreError::Notification(e.to_string()))
    }
}
