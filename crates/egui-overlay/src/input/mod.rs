use crate::drag::{Gesture, PointerSource};
use crate::OverlayView;
use egui::{Event, PointerButton, Rect, TouchPhase, Ui};
use tracing::trace;

impl OverlayView<'_> {
    /// Feeds this frame's raw pointer events into the controller.
    ///
    /// Presses only count on the toggle button, but moves and releases are
    /// followed anywhere in the window so a fast drag cannot lose the button.
    /// egui mirrors the first touch as pointer events, so touches arrive here
    /// as pointer events tagged with [`PointerSource::Touch`]; only a touch
    /// cancellation is read from the touch events themselves. A pointer that
    /// leaves the window ends the press, since its release may never arrive.
    pub(crate) fn process_input(&mut self, ui: &Ui, viewport: Rect) {
        let (events, touching) = ui.input(|i| (i.events.clone(), i.any_touches()));
        let source = if touching {
            PointerSource::Touch
        } else {
            PointerSource::Mouse
        };
        let origin = viewport.min.to_vec2();

        for event in events {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if self.controller.press(pos - origin, source) {
                        trace!("press at {pos:?} ({source:?})");
                    }
                }
                Event::PointerMoved(pos) => {
                    self.controller.move_pointer(pos - origin);
                }
                Event::PointerButton {
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    if self.controller.release(self.now) != Gesture::None {
                        trace!("release ({source:?})");
                    }
                }
                Event::Touch {
                    phase: TouchPhase::Cancel,
                    ..
                }
                | Event::PointerGone => {
                    self.controller.cancel_press();
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ActionButton, ElementIds, OverlayController, OverlayMetrics, OverlayView};
    use egui::{
        CentralPanel, Context, Event, Frame, Id, Modifiers, PointerButton, Pos2, RawInput, Rect,
        Vec2,
    };

    fn frame(ctx: &Context, controller: &mut OverlayController, ids: &ElementIds, events: Vec<Event>) {
        let buttons = ActionButton::defaults();
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            CentralPanel::default().frame(Frame::NONE).show(ctx, |ui| {
                ui.add(OverlayView::new(ids, controller, &buttons));
            });
        });
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn pointer_drag_moves_the_button() {
        let ctx = Context::default();
        let ids = ElementIds::new(Id::new("overlay"));
        let mut controller = OverlayController::new(OverlayMetrics::default(), "Local mode").unwrap();

        frame(&ctx, &mut controller, &ids, vec![]);
        let start = controller.position();
        let grab = start + Vec2::splat(10.0);

        frame(&ctx, &mut controller, &ids, vec![Event::PointerMoved(grab), button(grab, true)]);
        frame(&ctx, &mut controller, &ids, vec![Event::PointerMoved(grab + Vec2::new(-200.0, -100.0))]);
        frame(&ctx, &mut controller, &ids, vec![button(grab + Vec2::new(-200.0, -100.0), false)]);

        assert_eq!(controller.position(), start + Vec2::new(-200.0, -100.0));
        assert!(!controller.is_open());
    }

    #[test]
    fn pointer_leaving_the_window_ends_the_drag() {
        let ctx = Context::default();
        let ids = ElementIds::new(Id::new("overlay"));
        let mut controller = OverlayController::new(OverlayMetrics::default(), "Local mode").unwrap();

        frame(&ctx, &mut controller, &ids, vec![]);
        let grab = controller.position() + Vec2::splat(10.0);
        frame(&ctx, &mut controller, &ids, vec![Event::PointerMoved(grab), button(grab, true)]);
        frame(&ctx, &mut controller, &ids, vec![Event::PointerMoved(grab - Vec2::splat(100.0))]);
        frame(&ctx, &mut controller, &ids, vec![Event::PointerGone]);

        let dropped_at = controller.position();
        assert!(controller.drag_session().is_none());

        frame(&ctx, &mut controller, &ids, vec![Event::PointerMoved(Pos2::new(100.0, 100.0))]);
        assert_eq!(controller.position(), dropped_at);
        assert!(!controller.is_open());
    }

    #[test]
    fn pointer_tap_opens_the_panel() {
        let ctx = Context::default();
        let ids = ElementIds::new(Id::new("overlay"));
        let mut controller = OverlayController::new(OverlayMetrics::default(), "Local mode").unwrap();

        frame(&ctx, &mut controller, &ids, vec![]);
        let tap = controller.position() + Vec2::splat(20.0);
        frame(&ctx, &mut controller, &ids, vec![Event::PointerMoved(tap), button(tap, true)]);
        frame(&ctx, &mut controller, &ids, vec![button(tap + Vec2::new(2.0, 1.0), false)]);
        frame(&ctx, &mut controller, &ids, vec![]);

        assert!(controller.is_open());
    }
}
