use egui::{Pos2, Vec2};
use egui_overlay::{
    Gesture, OverlayController, OverlayMetrics, PointerSource, VerticalPlacement,
};
use std::time::Instant;

fn controller(viewport: Vec2) -> OverlayController {
    let mut controller = OverlayController::new(OverlayMetrics::default(), "Connected").unwrap();
    controller.fit_viewport(viewport);
    controller
}

#[test]
fn moves_within_threshold_always_click() {
    let now = Instant::now();
    let press = Pos2::new(420.0, 320.0);
    let steps = [-3.0, -2.5, -1.0, 0.0, 0.5, 2.0, 3.0];

    for dx in steps {
        for dy in steps {
            for source in [PointerSource::Mouse, PointerSource::Touch] {
                let mut controller = controller(Vec2::new(1280.0, 720.0));
                controller.place_at(Pos2::new(400.0, 300.0));
                assert!(controller.press(press, source));
                controller.move_pointer(press + Vec2::new(dy, dx));
                controller.move_pointer(press + Vec2::new(dx, dy));

                assert_eq!(controller.release(now), Gesture::Click, "({dx}, {dy})");
                assert!(controller.is_open());
                assert_eq!(controller.position(), Pos2::new(400.0, 300.0));
            }
        }
    }
}

#[test]
fn drag_ends_stay_inside_viewport() {
    let now = Instant::now();
    let viewport = Vec2::new(640.0, 360.0);
    let metrics = OverlayMetrics::default();
    let max = viewport - Vec2::splat(metrics.button_size + metrics.margin);

    let mut x = -400.0;
    while x <= 1100.0 {
        let mut y = -400.0;
        while y <= 800.0 {
            let mut controller = controller(viewport);
            controller.place_at(Pos2::new(300.0, 150.0));
            controller.press(Pos2::new(320.0, 170.0), PointerSource::Mouse);
            controller.move_pointer(Pos2::new(x, y));
            controller.release(now);

            let pos = controller.position();
            assert!(pos.x >= metrics.margin && pos.x <= max.x, "x={x} -> {pos:?}");
            assert!(pos.y >= metrics.margin && pos.y <= max.y, "y={y} -> {pos:?}");
            y += 37.0;
        }
        x += 41.0;
    }
}

#[test]
fn panel_opens_above_near_bottom_edge() {
    let now = Instant::now();
    let mut controller = controller(Vec2::new(1000.0, 800.0));
    controller.place_at(Pos2::new(100.0, 700.0));
    controller.press(Pos2::new(110.0, 710.0), PointerSource::Mouse);
    controller.release(now);

    let placement = controller.placement().unwrap();
    assert_eq!(placement.vertical, VerticalPlacement::Above);
    let panel = controller.panel_rect().unwrap();
    assert!(panel.top() >= 0.0);
}

#[test]
fn overlapping_statuses_keep_the_latest() {
    let now = Instant::now();
    let mut controller = controller(Vec2::new(800.0, 600.0));
    controller.show_status("first", now);
    controller.show_status("second", now + std::time::Duration::from_millis(1900));

    controller.tick(now + std::time::Duration::from_millis(2000));
    assert_eq!(controller.status().text(), "second");
    controller.tick(now + std::time::Duration::from_millis(3900));
    assert_eq!(controller.status().text(), "Connected");
}
