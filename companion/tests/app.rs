use companion::app::Companion;
use companion::config::WidgetConfig;
use companion::consts::{DEFAULT_TEXT, LOCAL_CONFIG_KEY, STATUS_CONNECTED, STATUS_ERROR, STATUS_LOCAL};
use companion::db::DbConn;
use companion::host::{AuthRecord, ChannelHost, ConfigSegment, ExtensionHost, HostHandle};
use companion::ui::form::StatusKind;
use companion::ui::side_panel::Connection;
use egui_overlay::{ActionId, OverlayAction};
use std::time::Instant;

fn host_app() -> (Companion, HostHandle) {
    let (host, handle) = ChannelHost::new();
    let db = DbConn::open_in_memory().unwrap();
    let app = Companion::new(Some(Box::new(host) as Box<dyn ExtensionHost>), db).unwrap();
    (app, handle)
}

fn auth() -> AuthRecord {
    AuthRecord {
        channel_id: "1234".to_string(),
        client_id: "client".to_string(),
        user_id: None,
        token: "token".to_string(),
    }
}

fn id(n: u8) -> ActionId {
    ActionId::new(n).unwrap()
}

#[test]
fn local_mode_loads_stored_configuration() {
    let db = DbConn::open_in_memory().unwrap();
    db.set(
        LOCAL_CONFIG_KEY,
        r#"{"buttons":[{"id":2,"label":"Clip","icon":"🎬"}],"defaultText":"Hello chat"}"#,
    )
    .unwrap();

    let app = Companion::new(None, db).unwrap();
    assert!(app.is_local());
    assert_eq!(app.connection(), Connection::Local);
    assert_eq!(app.panel.status_text(), STATUS_LOCAL);
    assert_eq!(app.config.button(id(2)).unwrap().label, "Clip");
    assert_eq!(app.config.default_text, "Hello chat");
    assert_eq!(app.state_manager.config_form.buttons[1].icon, "🎬");
}

#[test]
fn malformed_local_configuration_is_ignored() {
    let db = DbConn::open_in_memory().unwrap();
    db.set(LOCAL_CONFIG_KEY, "{oops").unwrap();

    let app = Companion::new(None, db).unwrap();
    assert_eq!(app.config, WidgetConfig::default());
}

#[test]
fn authorization_loads_broadcaster_configuration() {
    let (mut app, handle) = host_app();
    handle.publish(
        ConfigSegment::Broadcaster,
        "1",
        r#"{"buttons":[{"id":"1","label":"Hype"}]}"#,
    );
    handle.authorize(auth());

    let now = Instant::now();
    app.recv_event(now);

    assert_eq!(app.auth.as_ref().map(|a| a.channel_id.as_str()), Some("1234"));
    assert_eq!(app.connection(), Connection::Connected);
    assert_eq!(app.panel.status_text(), STATUS_CONNECTED);
    assert_eq!(app.overlay.status().text(), "Connected to host");
    assert_eq!(app.config.button(id(1)).unwrap().label, "Hype");
    assert_eq!(app.state_manager.config_form.buttons[0].label, "Hype");
    assert_eq!(app.config.default_text, DEFAULT_TEXT);
}

#[test]
fn configuration_change_without_default_text_keeps_placeholder() {
    let (mut app, handle) = host_app();
    handle.publish(ConfigSegment::Broadcaster, "1", r#"{"defaultText":"Ask away"}"#);
    app.recv_event(Instant::now());
    assert_eq!(app.config.default_text, "Ask away");

    handle.publish(ConfigSegment::Broadcaster, "1", r#"{"buttons":[]}"#);
    app.recv_event(Instant::now());
    assert_eq!(app.config.default_text, "Ask away");
}

#[test]
fn malformed_broadcaster_configuration_keeps_previous_values() {
    let (mut app, handle) = host_app();
    handle.publish(ConfigSegment::Broadcaster, "1", r#"{"buttons":[{"id":4,"label":"Four"}]}"#);
    app.recv_event(Instant::now());
    handle.publish(ConfigSegment::Broadcaster, "1", "not json");
    app.recv_event(Instant::now());

    assert_eq!(app.config.button(id(4)).unwrap().label, "Four");
}

#[test]
fn host_error_switches_status() {
    let (mut app, handle) = host_app();
    handle.fail("extension helper unavailable");
    app.recv_event(Instant::now());

    assert_eq!(app.connection(), Connection::Error);
    assert_eq!(app.panel.status_text(), STATUS_ERROR);
    assert_eq!(app.overlay.status().text(), STATUS_ERROR);
    assert_eq!(app.state_manager.form_status.text(), STATUS_ERROR);
    assert_eq!(app.state_manager.form_status.kind(), StatusKind::Error);
}

#[test]
fn broadcaster_configuration_present_at_startup_is_loaded() {
    let (host, handle) = ChannelHost::new();
    handle.publish(
        ConfigSegment::Broadcaster,
        "1",
        r#"{"buttons":[{"id":5,"label":"Poll"}],"defaultText":"Vote now"}"#,
    );
    let db = DbConn::open_in_memory().unwrap();
    let app = Companion::new(Some(Box::new(host) as Box<dyn ExtensionHost>), db).unwrap();

    assert_eq!(app.config.button(id(5)).unwrap().label, "Poll");
    assert_eq!(app.config.default_text, "Vote now");
}

#[test]
fn authorized_save_goes_through_host() {
    let (mut app, handle) = host_app();
    handle.authorize(auth());
    app.recv_event(Instant::now());

    app.state_manager.config_form.buttons[2].label = "Raid".to_string();
    app.state_manager.config_form.buttons[3].label.clear();
    let now = Instant::now();
    app.save_config(now).unwrap();
    assert_eq!(app.state_manager.form_status.text(), "Configuration saved");

    let segment = handle.segment(ConfigSegment::Broadcaster).unwrap();
    assert_eq!(segment.version, "1");
    assert!(segment.content.contains(r#""label":"Raid""#));
    assert!(segment.content.contains(r#""label":"Button 4""#));
    assert_eq!(app.db.get(LOCAL_CONFIG_KEY).unwrap(), None);

    app.recv_event(now);
    assert_eq!(app.config.button(id(3)).unwrap().label, "Raid");
}

#[test]
fn unauthorized_save_falls_back_to_local_store() {
    let (mut app, handle) = host_app();
    app.state_manager.config_form.default_text = "Local draft".to_string();
    app.save_config(Instant::now()).unwrap();

    assert_eq!(app.state_manager.form_status.text(), "Saved locally");
    assert_eq!(handle.segment(ConfigSegment::Broadcaster), None);
    let stored = app.db.get(LOCAL_CONFIG_KEY).unwrap().unwrap();
    assert!(stored.contains("Local draft"));
    assert_eq!(app.config.default_text, "Local draft");
}

#[test]
fn local_save_survives_a_restart() {
    let db = DbConn::open_in_memory().unwrap();
    let mut app = Companion::new(None, db).unwrap();
    app.state_manager.config_form.buttons[5].icon = "🎉".to_string();
    app.save_config(Instant::now()).unwrap();

    let db = app.db;
    let app = Companion::new(None, db).unwrap();
    assert_eq!(app.config.button(id(6)).unwrap().icon, "🎉");
}

#[test]
fn reset_restores_default_form() {
    let (mut app, _handle) = host_app();
    app.state_manager.config_form.buttons[0].label = "Changed".to_string();
    app.reset_config_form(Instant::now());

    assert_eq!(app.state_manager.config_form.buttons[0].label, "Button 1");
    assert_eq!(app.state_manager.form_status.text(), "Configuration reset");
}

#[test]
fn actions_from_both_surfaces_are_dispatched() {
    let (mut app, _handle) = host_app();
    let now = Instant::now();
    let button = app.config.button(id(2)).unwrap().clone();
    app.overlay.trigger_action(&button, now);
    *app.panel.text_mut() = "hello".to_string();
    app.panel.submit(now);

    assert_eq!(
        app.dispatch_actions(),
        vec![
            OverlayAction::Button(id(2)),
            OverlayAction::Text("hello".to_string()),
        ]
    );
    assert!(app.dispatch_actions().is_empty());
}
