use egui::{Pos2, Vec2};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// State of one press on the toggle button, from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer_offset: Vec2,
    origin: Pos2,
    moved: bool,
    source: PointerSource,
}

impl DragSession {
    pub fn begin(pointer: Pos2, button_min: Pos2, source: PointerSource) -> Self {
        Self {
            pointer_offset: pointer - button_min,
            origin: pointer,
            moved: false,
            source,
        }
    }

    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn source(&self) -> PointerSource {
        self.source
    }

    /// Records `pointer` and reports whether the press has become a drag.
    /// Once a drag, always a drag: coming back near the origin does not turn
    /// it into a click again.
    pub fn track(&mut self, pointer: Pos2, threshold: f32) -> bool {
        let delta = pointer - self.origin;
        if delta.x.abs() > threshold || delta.y.abs() > threshold {
            self.moved = true;
        }
        self.moved
    }

    /// Unclamped button position that keeps the grab point under `pointer`.
    pub fn target(&self, pointer: Pos2) -> Pos2 {
        pointer - self.pointer_offset
    }
}

/// How a press on the toggle button ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// No press was in progress.
    None,
    Click,
    Drag,
}

/// Swallows the click a platform synthesizes right after a pointer release.
///
/// The release already decided between click and drag, so the follow-up
/// click must not toggle the panel a second time. This holds for mouse and
/// touch alike. Clicks outside the window (keyboard activation) pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickGate {
    armed_at: Option<Instant>,
}

impl ClickGate {
    pub const WINDOW: Duration = Duration::from_millis(500);

    pub fn arm(&mut self, now: Instant) {
        self.armed_at = Some(now);
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Returns `true` when the click should be acted upon.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.armed_at.take() {
            Some(armed_at) => now.saturating_duration_since(armed_at) > Self::WINDOW,
            None => true,
        }
    }
}
