use crate::config::WidgetConfig;
use crate::consts::FORM_STATUS_HOLD;
use egui_overlay::StatusLine;
use std::time::Instant;

mod config;
pub use config::{ButtonFields, ConfigFormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Result line under the configuration form, cleared after a few seconds.
#[derive(Debug, Clone)]
pub struct FormStatus {
    line: StatusLine,
    kind: StatusKind,
}

impl Default for FormStatus {
    fn default() -> Self {
        Self {
            line: StatusLine::new("", FORM_STATUS_HOLD),
            kind: StatusKind::Success,
        }
    }
}

impl FormStatus {
    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.kind = StatusKind::Success;
        self.line.show(message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.kind = StatusKind::Error;
        self.line.show(message, now);
    }

    pub fn text(&self) -> &str {
        self.line.text()
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn tick(&mut self, now: Instant) {
        self.line.tick(now);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.line.deadline()
    }
}

pub struct FormStateManager {
    pub config_form: ConfigFormState,
    pub form_status: FormStatus,
}

impl FormStateManager {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            config_form: ConfigFormState::from_config(config),
            form_status: FormStatus::default(),
        }
    }
}
