use crate::app::Companion;
use crate::config::{ConfigDocument, RawId, WidgetConfig};
use crate::consts::{CONFIG_VERSION, LOCAL_CONFIG_KEY};
use crate::errors::{error_toast, CompanionError};
use crate::host::ConfigSegment;
use crate::ui::form::StatusKind;
use egui::{
    Align, Align2, CentralPanel, Context, Grid, Layout, Order, RichText, TextEdit, TopBottomPanel,
    Window,
};
use egui_form::garde::GardeReport;
use egui_form::{Form, FormField};
use egui_overlay::{ActionButton, ActionId, DEFAULT_ICON};
use egui_toast::Toasts;
use garde::Validate;
use std::time::Instant;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ButtonFields {
    #[garde(length(max = 16))]
    pub icon: String,
    #[garde(length(max = 32))]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ConfigFormState {
    #[garde(dive)]
    pub buttons: Vec<ButtonFields>,
    #[garde(length(max = 200))]
    pub default_text: String,
}

impl Default for ConfigFormState {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

impl ConfigFormState {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            buttons: config
                .buttons
                .iter()
                .map(|button| ButtonFields {
                    icon: button.icon.clone(),
                    label: button.label.clone(),
                })
                .collect(),
            default_text: config.default_text.clone(),
        }
    }

    /// Fills the inputs from a stored document. Empty values in the document
    /// leave the inputs alone.
    pub fn apply(&mut self, doc: ConfigDocument) {
        for patch in doc.buttons.unwrap_or_default() {
            let Some(id) = patch.id.and_then(RawId::action_id) else {
                continue;
            };
            let Some(fields) = self.buttons.get_mut(id.index()) else {
                continue;
            };
            if let Some(icon) = patch.icon.filter(|s| !s.is_empty()) {
                fields.icon = icon;
            }
            if let Some(label) = patch.label.filter(|s| !s.is_empty()) {
                fields.label = label;
            }
        }
        if let Some(text) = doc.default_text.filter(|s| !s.is_empty()) {
            self.default_text = text;
        }
    }

    /// Document to save. Empty icons and labels fall back to the defaults.
    pub fn to_config(&self) -> WidgetConfig {
        let buttons = ActionId::all()
            .zip(&self.buttons)
            .map(|(id, fields)| {
                let icon = match fields.icon.trim() {
                    "" => DEFAULT_ICON.to_string(),
                    icon => icon.to_string(),
                };
                let label = match fields.label.trim() {
                    "" => ActionButton::default_label(id),
                    label => label.to_string(),
                };
                ActionButton::new(id, label, icon)
            })
            .collect();
        WidgetConfig {
            buttons,
            default_text: self.default_text.clone(),
        }
    }
}

impl Companion {
    pub fn show_config_window(&mut self, ctx: &Context, toasts: &mut Toasts, now: Instant) {
        let mut open = self.opts.show_config_window;
        let mut save = false;
        let mut reset = false;

        Window::new("Extension Configuration")
            .order(Order::Middle)
            .open(&mut open)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([460., 400.])
            .show(ctx, |ui| {
                let form_state = &mut self.state_manager.config_form;
                let validator = form_state.validate();
                let mut form = Form::new().add_report(GardeReport::new(validator));

                TopBottomPanel::bottom("config_window_bottom_panel").show_inside(ui, |ui| {
                    ui.with_layout(Layout::right_to_left(Align::TOP), |ui| {
                        if let Some(Ok(())) = form.handle_submit(&ui.button("Save"), ui) {
                            save = true;
                        }
                        if ui.button("Reset").clicked() {
                            reset = true;
                        }

                        let status = &self.state_manager.form_status;
                        let text = RichText::new(status.text()).small();
                        match status.kind() {
                            StatusKind::Success => ui.label(text.color(ui.visuals().hyperlink_color)),
                            StatusKind::Error => ui.label(text.color(ui.visuals().error_fg_color)),
                        };
                    });
                });

                CentralPanel::default().show_inside(ui, |ui| {
                    ui.add_space(10.);
                    config_form(ui, &mut form, form_state);
                });
            });

        self.opts.show_config_window = open;

        if save {
            if let Err(err) = self.save_config(now) {
                error!("failed to save configuration: {err}");
                toasts.add(error_toast(err.to_string()));
                self.state_manager.form_status.error("Save failed", now);
            }
        }
        if reset {
            self.reset_config_form(now);
        }
    }

    /// Saves the form through the host when it is authorized, otherwise into
    /// the local store.
    pub fn save_config(&mut self, now: Instant) -> Result<(), CompanionError> {
        let config = self.state_manager.config_form.to_config();
        let json = config.to_json()?;
        info!("saving configuration: {json}");

        match self.host.as_mut() {
            Some(host) if self.auth.is_some() => {
                host.set_configuration(ConfigSegment::Broadcaster, CONFIG_VERSION, &json)?;
                self.state_manager
                    .form_status
                    .success("Configuration saved", now);
            }
            _ => {
                self.db.set(LOCAL_CONFIG_KEY, &json)?;
                self.config = config;
                self.state_manager.form_status.success("Saved locally", now);
            }
        }
        Ok(())
    }

    pub fn reset_config_form(&mut self, now: Instant) {
        self.state_manager.config_form = ConfigFormState::default();
        self.state_manager
            .form_status
            .success("Configuration reset", now);
    }
}

fn config_form(ui: &mut egui::Ui, form: &mut Form<GardeReport>, state: &mut ConfigFormState) {
    Grid::new("config_form_grid")
        .num_columns(3)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label("");
            ui.strong("Icon");
            ui.strong("Label");
            ui.end_row();

            for (id, fields) in ActionId::all().zip(state.buttons.iter_mut()) {
                let i = id.index();
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format!("Button {id}:"));
                });
                FormField::new(form, format!("buttons[{i}].icon")).ui(
                    ui,
                    TextEdit::singleline(&mut fields.icon)
                        .hint_text(DEFAULT_ICON)
                        .desired_width(48.0),
                );
                FormField::new(form, format!("buttons[{i}].label")).ui(
                    ui,
                    TextEdit::singleline(&mut fields.label)
                        .hint_text(ActionButton::default_label(id)),
                );
                ui.end_row();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label("Default text:");
            });
            FormField::new(form, "default_text".to_string())
                .ui(ui, TextEdit::singleline(&mut state.default_text));
            ui.end_row();
        });
}
