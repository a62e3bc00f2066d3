use crate::action::{ActionButton, ACTION_COUNT};
use crate::controller::OverlayController;
use egui::{
    Align, Align2, Area, Button, Context, CursorIcon, FontId, Frame, Grid, Id, Layout, Margin,
    Order, Rect, Response, RichText, Sense, TextEdit, Ui, Vec2, Widget,
};
use std::time::Instant;

const TOGGLE_ICON: &str = "💬";
const PANEL_PADDING: i8 = 8;
const ACTION_CELL: Vec2 = Vec2::new(74.0, 44.0);

/// Ids of every interactive part of one overlay widget, derived once from a
/// base id so the same widget keeps its focus and memory across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementIds {
    pub toggle: Id,
    pub panel: Id,
    pub close: Id,
    pub actions: [Id; ACTION_COUNT],
    pub text: Id,
    pub send: Id,
    pub status: Id,
}

impl ElementIds {
    pub fn new(base: Id) -> Self {
        Self {
            toggle: base.with("toggle-btn"),
            panel: base.with("widget-panel"),
            close: base.with("close-btn"),
            actions: std::array::from_fn(|i| base.with(("action-btn", i + 1))),
            text: base.with("text-area"),
            send: base.with("send-btn"),
            status: base.with("status-text"),
        }
    }
}

/// Renders an [`OverlayController`] floating over the area given to it.
///
/// The widget takes the whole available rect as its viewport: the toggle
/// button and the panel are placed in foreground areas relative to it.
pub struct OverlayView<'a> {
    pub(crate) ids: &'a ElementIds,
    pub(crate) controller: &'a mut OverlayController,
    buttons: &'a [ActionButton],
    placeholder: &'a str,
    pub(crate) now: Instant,
}

impl<'a> OverlayView<'a> {
    pub fn new(
        ids: &'a ElementIds,
        controller: &'a mut OverlayController,
        buttons: &'a [ActionButton],
    ) -> Self {
        Self {
            ids,
            controller,
            buttons,
            placeholder: "",
            now: Instant::now(),
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn now(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

impl Widget for OverlayView<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let viewport = ui.max_rect();
        let response = ui.allocate_rect(viewport, Sense::hover());

        self.controller.fit_viewport(viewport.size());
        self.process_input(ui, viewport);

        if self.controller.is_open() {
            self.show_panel(ui.ctx(), viewport);
        } else {
            self.show_toggle(ui.ctx(), viewport);
        }

        self.controller.tick(self.now);
        if let Some(deadline) = self.controller.next_deadline() {
            ui.ctx()
                .request_repaint_after(deadline.saturating_duration_since(self.now));
        }
        response
    }
}

impl OverlayView<'_> {
    fn show_toggle(&mut self, ctx: &Context, viewport: Rect) {
        let rect = self
            .controller
            .button_rect()
            .translate(viewport.min.to_vec2());
        let dragging = self.controller.is_dragging();
        let now = self.now;

        Area::new(self.ids.toggle)
            .order(Order::Foreground)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(rect.size(), Sense::click());
                let visuals = ui.style().interact(&response);
                let fill = if dragging {
                    visuals.bg_fill.gamma_multiply(0.8)
                } else {
                    ui.visuals().selection.bg_fill
                };
                let painter = ui.painter();
                painter.circle_filled(rect.center(), rect.width() / 2.0, fill);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    TOGGLE_ICON,
                    FontId::proportional(rect.width() * 0.45),
                    visuals.text_color(),
                );

                if dragging {
                    ctx.set_cursor_icon(CursorIcon::Grabbing);
                } else if response.hovered() {
                    ctx.set_cursor_icon(CursorIcon::Grab);
                }
                if response.clicked() {
                    self.controller.click(now);
                }
            });
    }

    fn show_panel(&mut self, ctx: &Context, viewport: Rect) {
        let Some(panel) = self.controller.panel_rect() else {
            return;
        };
        let panel = panel.translate(viewport.min.to_vec2());
        let now = self.now;
        let ids = self.ids;
        let buttons = self.buttons;
        let placeholder = self.placeholder;

        let mut close = false;
        let mut fired = None;
        let mut send = false;

        Area::new(ids.panel)
            .order(Order::Foreground)
            .fixed_pos(panel.min)
            .show(ctx, |ui| {
                Frame::popup(ui.style())
                    .inner_margin(Margin::same(PANEL_PADDING))
                    .show(ui, |ui| {
                        let inner = panel.size() - Vec2::splat(2.0 * PANEL_PADDING as f32);
                        ui.set_width(inner.x);
                        ui.set_min_height(inner.y);

                        ui.horizontal(|ui| {
                            ui.strong("Quick actions");
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.push_id(ids.close, |ui| {
                                    if ui.small_button("✕").clicked() {
                                        close = true;
                                    }
                                });
                            });
                        });
                        ui.separator();

                        Grid::new(ids.panel.with("actions"))
                            .num_columns(3)
                            .spacing([6.0, 6.0])
                            .show(ui, |ui| {
                                for (i, button) in buttons.iter().enumerate() {
                                    let scale = self.controller.pulse_scale(button.id, now);
                                    let text = format!("{}\n{}", button.icon, button.label);
                                    let clicked = ui
                                        .push_id(ids.actions[button.id.index()], |ui| {
                                            ui.add_sized(
                                                ACTION_CELL * scale,
                                                Button::new(RichText::new(text).small()),
                                            )
                                            .clicked()
                                        })
                                        .inner;
                                    if clicked {
                                        fired = Some(button.clone());
                                    }
                                    if (i + 1) % 3 == 0 {
                                        ui.end_row();
                                    }
                                }
                            });

                        ui.add_space(6.0);
                        ui.add(
                            TextEdit::multiline(self.controller.text_mut())
                                .id(ids.text)
                                .hint_text(placeholder)
                                .desired_rows(3)
                                .desired_width(f32::INFINITY),
                        );
                        ui.horizontal(|ui| {
                            ui.push_id(ids.status, |ui| {
                                ui.label(
                                    RichText::new(self.controller.status().text())
                                        .small()
                                        .weak(),
                                );
                            });
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.push_id(ids.send, |ui| {
                                    if ui.button("Send").clicked() {
                                        send = true;
                                    }
                                });
                            });
                        });
                    });
            });

        if let Some(button) = fired {
            self.controller.trigger_action(&button, now);
        }
        if send {
            self.controller.submit_text(now);
        }
        if close {
            self.controller.close_panel();
        }
    }
}
