use std::time::{Duration, Instant};

/// A status text that falls back to a baseline message after a hold time.
///
/// Only one revert is ever pending: showing a new message replaces the
/// previous deadline, so an older message can never cut a newer one short.
#[derive(Debug, Clone)]
pub struct StatusLine {
    baseline: String,
    text: String,
    hold: Duration,
    revert_at: Option<Instant>,
}

impl StatusLine {
    pub fn new(baseline: impl Into<String>, hold: Duration) -> Self {
        let baseline = baseline.into();
        Self {
            text: baseline.clone(),
            baseline,
            hold,
            revert_at: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn is_transient(&self) -> bool {
        self.revert_at.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.revert_at
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.text = message.into();
        self.revert_at = Some(now + self.hold);
    }

    /// Changes the text shown between messages. A pending message stays
    /// visible until its own deadline.
    pub fn set_baseline(&mut self, baseline: impl Into<String>) {
        self.baseline = baseline.into();
        if self.revert_at.is_none() {
            self.text = self.baseline.clone();
        }
    }

    /// Reverts to the baseline once the deadline passed. Returns `true` if
    /// the text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(at) if now >= at => {
                self.revert_at = None;
                self.text = self.baseline.clone();
                true
            }
            _ => false,
        }
    }
}

/// Short-lived visual feedback on a button.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pulse {
    until: Option<Instant>,
}

impl Pulse {
    pub fn trigger(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.until
    }

    pub fn tick(&mut self, now: Instant) {
        if !self.is_active(now) {
            self.until = None;
        }
    }
}
