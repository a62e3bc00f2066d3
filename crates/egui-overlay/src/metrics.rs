use crate::errors::OverlayError;
use egui::Vec2;
use std::time::Duration;

/// Geometry and timing of the floating widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMetrics {
    /// Edge length of the square toggle button.
    pub button_size: f32,
    pub panel_size: Vec2,
    /// Minimum distance kept between the toggle button and the viewport edges.
    pub margin: f32,
    /// Space between the toggle button and a panel opened above or below it.
    pub panel_gap: f32,
    /// Movement in pixels on either axis before a press becomes a drag.
    pub drag_threshold: f32,
    pub status_hold: Duration,
    pub pulse: Duration,
    pub pulse_scale: f32,
}

impl OverlayMetrics {
    pub const BUTTON_SIZE: f32 = 48.0;
    pub const PANEL_WIDTH: f32 = 260.0;
    pub const PANEL_HEIGHT: f32 = 290.0;
    pub const MARGIN: f32 = 10.0;
    pub const PANEL_GAP: f32 = 8.0;
    pub const DRAG_THRESHOLD: f32 = 3.0;
    pub const STATUS_HOLD: Duration = Duration::from_secs(2);
    pub const PULSE: Duration = Duration::from_millis(100);
    pub const PULSE_SCALE: f32 = 0.9;

    pub fn validate(&self) -> Result<(), OverlayError> {
        if !(self.button_size > 0.0) {
            return Err(OverlayError::InvalidMetrics("button size must be positive"));
        }
        if !(self.panel_size.x > 0.0 && self.panel_size.y > 0.0) {
            return Err(OverlayError::InvalidMetrics("panel size must be positive"));
        }
        if !(self.margin >= 0.0) || !(self.panel_gap >= 0.0) {
            return Err(OverlayError::InvalidMetrics("margin and gap must not be negative"));
        }
        if !(self.drag_threshold >= 0.0) {
            return Err(OverlayError::InvalidMetrics("drag threshold must not be negative"));
        }
        if !(self.pulse_scale > 0.0 && self.pulse_scale <= 1.0) {
            return Err(OverlayError::InvalidMetrics("pulse scale must be within (0, 1]"));
        }
        Ok(())
    }
}

impl Default for OverlayMetrics {
    fn default() -> Self {
        Self {
            button_size: Self::BUTTON_SIZE,
            panel_size: Vec2::new(Self::PANEL_WIDTH, Self::PANEL_HEIGHT),
            margin: Self::MARGIN,
            panel_gap: Self::PANEL_GAP,
            drag_threshold: Self::DRAG_THRESHOLD,
            status_hold: Self::STATUS_HOLD,
            pulse: Self::PULSE,
            pulse_scale: Self::PULSE_SCALE,
        }
    }
}
