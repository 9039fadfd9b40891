//! Blocking user notifications.
//!
//! The controller raises these for validation failures the user must
//! acknowledge. Store failures never go through here; they are logged.

pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr, where the console prompt will not overwrite them.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// Keeps every alert, for inspection.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
