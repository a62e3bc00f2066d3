use crate::app::Companion;
use crate::ui::side_panel::Connection;
use eframe::egui;
use egui::{Align, Button, Checkbox, Key, KeyboardShortcut, Layout, Modifiers, RichText};

const BTN_WIDTH: f32 = 200.0;

impl Companion {
    pub fn menubar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            // View
            self.view_menu(ui);
            // Connection
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let connection = self.connection();
                let text = RichText::new(connection.label()).small();
                if connection == Connection::Error {
                    ui.label(text.color(ui.visuals().error_fg_color));
                } else {
                    ui.label(text.weak());
                }
            });
        });
    }

    fn view_menu(&mut self, ui: &mut egui::Ui) {
        let config_shortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Comma);
        if ui.input_mut(|i| i.consume_shortcut(&config_shortcut)) {
            self.opts.show_config_window = true;
        }
        ui.menu_button("View", |ui| {
            ui.add(Checkbox::new(&mut self.opts.show_side_panel, "Side Panel"));
            let config_shortcut = ui.ctx().format_shortcut(&config_shortcut);
            let config_btn = Button::new("Configuration…")
                .min_size((BTN_WIDTH, 0.).into())
                .shortcut_text(config_shortcut);
            if ui.add(config_btn).clicked() {
                self.opts.show_config_window = true;
                ui.close();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}
