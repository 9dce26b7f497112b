//! Side channel for surfacing storage failures to whoever is driving the catalog.
//!
//! Cache operations do not return repository errors to their callers. They
//! hand them to a [`Reporter`] and carry on with whatever they could load.
//! A desktop shell would show a dialog; the CLI logs; tests record or ignore.

use std::sync::Mutex;

/// Buttons offered alongside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buttons {
    Ok,
    OkCancel,
    YesNo,
    RetryCancel,
}

impl Buttons {
    /// The answer a non-interactive reporter gives.
    pub fn default_response(&self) -> Response {
        match self {
            Self::Ok | Self::OkCancel => Response::Ok,
            Self::YesNo => Response::No,
            Self::RetryCancel => Response::Cancel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    None,
    Ok,
    Cancel,
    Yes,
    No,
    Retry,
}

pub trait Reporter: Send + Sync {
    fn show(&self, message: &str, caption: &str, buttons: Buttons, severity: Severity) -> Response;

    fn error(&self, message: &str, caption: &str) {
        self.show(message, caption, Buttons::Ok, Severity::Error);
    }
}

/// Emits every report as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn show(&self, message: &str, caption: &str, buttons: Buttons, severity: Severity) -> Response {
        match severity {
            Severity::Information => tracing::info!("{}: {}", caption, message),
            Severity::Warning => tracing::warn!("{}: {}", caption, message),
            Severity::Error => tracing::error!("{}: {}", caption, message),
        }
        buttons.default_response()
    }
}

/// Swallows reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn show(&self, _: &str, _: &str, _: Buttons, _: Severity) -> Response {
        Response::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub message: String,
    pub caption: String,
    pub severity: Severity,
}

/// Keeps reports in memory so they can be inspected after the fact.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().expect("reporter lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().expect("reporter lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Reporter for RecordingReporter {
    fn show(&self, message: &str, caption: &str, buttons: Buttons, severity: Severity) -> Response {
        self.reports
            .lock()
            .expect("reporter lock poisoned")
            .push(Report {
                message: message.to_string(),
                caption: caption.to_string(),
                severity,
            });
        buttons.default_response()
    }
}
