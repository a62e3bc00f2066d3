use crate::config::WidgetConfig;
use crate::consts::{FEEDBACK_HOLD, PANEL_PULSE, STATUS_CONNECTED, STATUS_ERROR, STATUS_LOCAL};
use egui::{Button, Grid, Id, Key, Modifiers, RichText, TextEdit, TopBottomPanel, Ui};
use egui_overlay::{ActionButton, OverlayAction, Pulse, StatusLine, ACTION_COUNT};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Local,
    Connected,
    Error,
}

impl Connection {
    pub fn label(self) -> &'static str {
        match self {
            Connection::Local => STATUS_LOCAL,
            Connection::Connected => STATUS_CONNECTED,
            Connection::Error => STATUS_ERROR,
        }
    }
}

/// The docked panel variant: six action buttons, a text area and a
/// connection status bar.
pub struct ActionPanel {
    connection: Connection,
    status: StatusLine,
    pulses: [Pulse; ACTION_COUNT],
    text: String,
    focus_text: bool,
    actions: Vec<OverlayAction>,
}

impl ActionPanel {
    pub const DEFAULT_WIDTH: f32 = 240.0;
    pub const MIN_WIDTH: f32 = 200.0;
    pub const MAX_WIDTH: f32 = 360.0;
    const BUTTON_HEIGHT: f32 = 40.0;
    const TEXT_ID: &'static str = "side-panel-text";

    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            status: StatusLine::new(connection.label(), FEEDBACK_HOLD),
            pulses: [Pulse::default(); ACTION_COUNT],
            text: String::new(),
            focus_text: false,
            actions: vec![],
        }
    }

    pub fn connection(&self) -> Connection {
        self.connection
    }

    pub fn set_connection(&mut self, connection: Connection) {
        self.connection = connection;
        self.status.set_baseline(connection.label());
    }

    pub fn status_text(&self) -> &str {
        self.status.text()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn is_pulsing(&self, button: &ActionButton, now: Instant) -> bool {
        self.pulses[button.id.index()].is_active(now)
    }

    pub fn press(&mut self, button: &ActionButton, now: Instant) {
        info!("button {} pressed", button.id);
        self.pulses[button.id.index()].trigger(now, PANEL_PULSE);
        let label = if button.label.is_empty() {
            ActionButton::default_label(button.id)
        } else {
            button.label.clone()
        };
        self.status.show(format!("{label} activated!"), now);
        self.actions.push(OverlayAction::Button(button.id));
    }

    /// Sends the text area. Blank input keeps the text, shows a hint and
    /// moves focus back to the text area.
    pub fn submit(&mut self, now: Instant) -> bool {
        let text = self.text.trim();
        if text.is_empty() {
            self.status.show("Type a message first", now);
            self.focus_text = true;
            return false;
        }
        let text = text.to_owned();
        self.text.clear();
        self.status.show("Message sent!", now);
        self.actions.push(OverlayAction::Text(text));
        true
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

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pulses
            .iter()
            .filter_map(Pulse::deadline)
            .chain(self.status.deadline())
            .min()
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &WidgetConfig, now: Instant) {
        TopBottomPanel::bottom("side_panel_status").show_inside(ui, |ui| {
            let text = RichText::new(self.status.text()).small();
            if self.connection == Connection::Error {
                ui.label(text.color(ui.visuals().error_fg_color));
            } else {
                ui.label(text.weak());
            }
        });

        ui.label(RichText::new("Actions").strong());
        ui.separator();

        let width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
        Grid::new("side_panel_actions")
            .num_columns(2)
            .show(ui, |ui| {
                for (i, button) in config.buttons.iter().enumerate() {
                    let text = format!("{} {}", button.icon, button.label);
                    let pulsing = self.is_pulsing(button, now);
                    let response = ui.add_sized(
                        [width, Self::BUTTON_HEIGHT],
                        Button::new(text).selected(pulsing),
                    );
                    if response.clicked() {
                        self.press(button, now);
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(8.0);
        let text_id = Id::new(Self::TEXT_ID);
        let send_on_enter = ui.ctx().memory(|m| m.has_focus(text_id))
            && ui.input_mut(|i| !i.modifiers.shift && i.consume_key(Modifiers::NONE, Key::Enter));
        let response = ui.add(
            TextEdit::multiline(&mut self.text)
                .id(text_id)
                .hint_text(config.default_text.as_str())
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        if self.focus_text {
            response.request_focus();
            self.focus_text = false;
        }
        if ui.button("Send").clicked() || send_on_enter {
            self.submit(now);
        }
    }
}
