use crate::action::{ActionButton, ActionId, OverlayAction, ACTION_COUNT};
use crate::drag::{ClickGate, DragSession, Gesture, PointerSource};
use crate::errors::OverlayError;
use crate::metrics::OverlayMetrics;
use crate::placement::{clamp_position, PanelPlacement};
use crate::status::{Pulse, StatusLine};
use egui::{Pos2, Rect, Vec2};
use std::time::Instant;
use tracing::debug;

/// Interaction state of one floating widget: where the toggle button sits,
/// whether the panel is open, the press in progress and the status line.
///
/// All coordinates are local to the viewport the widget floats in.
pub struct OverlayController {
    metrics: OverlayMetrics,
    viewport: Vec2,
    position: Option<Pos2>,
    drag: Option<DragSession>,
    click_gate: ClickGate,
    placement: Option<PanelPlacement>,
    pulses: [Pulse; ACTION_COUNT],
    text: String,
    status: StatusLine,
    actions: Vec<OverlayAction>,
}

impl OverlayController {
    pub fn new(metrics: OverlayMetrics, baseline: impl Into<String>) -> Result<Self, OverlayError> {
        metrics.validate()?;
        Ok(Self {
            status: StatusLine::new(baseline, metrics.status_hold),
            metrics,
            viewport: Vec2::ZERO,
            position: None,
            drag: None,
            click_gate: ClickGate::default(),
            placement: None,
            pulses: [Pulse::default(); ACTION_COUNT],
            text: String::new(),
            actions: vec![],
        })
    }

    pub fn metrics(&self) -> &OverlayMetrics {
        &self.metrics
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Updates the viewport size. The first call parks the button in the
    /// bottom-right corner; later calls pull it back inside if the viewport
    /// shrank.
    pub fn fit_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        let position = self.position.unwrap_or_else(|| {
            let inset = self.metrics.button_size + self.metrics.margin * 2.0;
            Pos2::new(viewport.x - inset, viewport.y - inset)
        });
        self.position = Some(clamp_position(position, viewport, &self.metrics));
    }

    /// Moves the button to `position`, clamped to the current viewport.
    pub fn place_at(&mut self, position: Pos2) {
        self.position = Some(clamp_position(position, self.viewport, &self.metrics));
    }

    pub fn position(&self) -> Pos2 {
        self.position
            .unwrap_or(Pos2::new(self.metrics.margin, self.metrics.margin))
    }

    pub fn button_rect(&self) -> Rect {
        Rect::from_min_size(self.position(), Vec2::splat(self.metrics.button_size))
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::moved)
    }

    /// Starts tracking a press. Ignored unless the pointer is on the visible
    /// toggle button.
    pub fn press(&mut self, pointer: Pos2, source: PointerSource) -> bool {
        if self.is_open() || !self.button_rect().contains(pointer) {
            return false;
        }
        self.click_gate.disarm();
        self.drag = Some(DragSession::begin(pointer, self.position(), source));
        true
    }

    /// Follows the pointer while a press is in progress. Returns `true` when
    /// the button was repositioned, in which case the platform's default
    /// handling of the move (scrolling, selection) should be suppressed.
    pub fn move_pointer(&mut self, pointer: Pos2) -> bool {
        let threshold = self.metrics.drag_threshold;
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        if !session.track(pointer, threshold) {
            return false;
        }
        let target = session.target(pointer);
        self.position = Some(clamp_position(target, self.viewport, &self.metrics));
        true
    }

    /// Ends the press. A press that never became a drag toggles the panel.
    pub fn release(&mut self, now: Instant) -> Gesture {
        let Some(session) = self.drag.take() else {
            return Gesture::None;
        };
        self.click_gate.arm(now);
        if session.moved() {
            debug!(
                "widget dragged to {:?} ({:?})",
                self.position(),
                session.source()
            );
            Gesture::Drag
        } else {
            self.toggle_panel();
            Gesture::Click
        }
    }

    /// Abandons the press without treating it as a click.
    pub fn cancel_press(&mut self) {
        self.drag = None;
    }

    /// A click delivered separately from the press/release pair. The click a
    /// platform emits right after a release is swallowed, since the release
    /// already handled it.
    pub fn click(&mut self, now: Instant) -> bool {
        if self.drag.is_some() || !self.click_gate.admit(now) {
            return false;
        }
        self.toggle_panel();
        true
    }

    pub fn is_open(&self) -> bool {
        self.placement.is_some()
    }

    pub fn placement(&self) -> Option<PanelPlacement> {
        self.placement
    }

    pub fn panel_rect(&self) -> Option<Rect> {
        self.placement
            .map(|placement| placement.panel_rect(self.position(), &self.metrics))
    }

    pub fn toggle_panel(&mut self) {
        if self.is_open() {
            self.close_panel();
        } else {
            self.open_panel();
        }
    }

    pub fn open_panel(&mut self) {
        if self.is_open() {
            return;
        }
        let placement = PanelPlacement::choose(self.button_rect(), self.viewport, &self.metrics);
        debug!("opening panel {placement:?}");
        self.placement = Some(placement);
    }

    pub fn close_panel(&mut self) {
        self.placement = None;
    }

    pub fn trigger_action(&mut self, button: &ActionButton, now: Instant) {
        self.pulses[button.id.index()].trigger(now, self.metrics.pulse);
        self.status.show(format!("{} activated", button.label), now);
        self.actions.push(OverlayAction::Button(button.id));
    }

    pub fn pulse_scale(&self, id: ActionId, now: Instant) -> f32 {
        if self.pulses[id.index()].is_active(now) {
            self.metrics.pulse_scale
        } else {
            1.0
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Sends the text field. Blank input is ignored and left untouched.
    pub fn submit_text(&mut self, now: Instant) -> bool {
        let text = self.text.trim();
        if text.is_empty() {
            return false;
        }
        let text = text.to_owned();
        self.text.clear();
        self.status.show("Message sent", now);
        self.actions.push(OverlayAction::Text(text));
        true
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn show_status(&mut self, message: impl Into<String>, now: Instant) {
        self.status.show(message, now);
    }

    pub fn set_baseline(&mut self, baseline: impl Into<String>) {
        self.status.set_baseline(baseline);
    }

    pub fn take_actions(&mut self) -> Vec<OverlayAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn tick(&mut self, now: Instant) {
        self.status.tick(now);
        for pulse in self.pulses.iter_mut() {
            pulse.tick(now);
        }
    }

    /// Earliest moment at which `tick` will change something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pulses
            .iter()
            .filter_map(Pulse::deadline)
            .chain(self.status.deadline())
            .min()
    }
}
