use crate::config::{ConfigDocument, WidgetConfig};
use crate::consts::{DB_PATH, HOST_ENV, LOCAL_CONFIG_KEY, STATUS_CONNECTED, STATUS_ERROR};
use crate::db::DbConn;
use crate::errors::CompanionError;
use crate::host::{spawn_stdio_bridge, AuthRecord, ExtensionHost, HostEvent};
use crate::ui::form::FormStateManager;
use crate::ui::side_panel::{ActionPanel, Connection};
use eframe::{egui, NativeOptions};
use egui::{Align2, Id};
use egui_overlay::{ElementIds, OverlayAction, OverlayController, OverlayMetrics, OverlayView};
use egui_toast::Toasts;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct CompanionOptions {
    pub show_config_window: bool,
    pub show_side_panel: bool,
}

impl Default for CompanionOptions {
    fn default() -> Self {
        Self {
            show_config_window: false,
            show_side_panel: true,
        }
    }
}

pub struct Companion {
    pub(crate) host: Option<Box<dyn ExtensionHost>>,
    pub auth: Option<AuthRecord>,
    pub db: DbConn,
    pub config: WidgetConfig,
    pub overlay: OverlayController,
    overlay_ids: ElementIds,
    pub panel: ActionPanel,
    pub state_manager: FormStateManager,
    pub opts: CompanionOptions,
}

impl Companion {
    /// Builds the app around an optional platform host. Without one the app
    /// runs in local mode and reads its configuration from `db`.
    pub fn new(host: Option<Box<dyn ExtensionHost>>, db: DbConn) -> Result<Self, CompanionError> {
        let connection = if host.is_some() {
            Connection::Connected
        } else {
            Connection::Local
        };

        let mut config = WidgetConfig::default();
        if host.is_none() {
            if let Some(content) = db.get(LOCAL_CONFIG_KEY)? {
                if let Err(err) = config.apply_json(&content) {
                    warn!("ignoring malformed local configuration: {err}");
                }
            }
        }

        let overlay = OverlayController::new(OverlayMetrics::default(), connection.label())?;
        let state_manager = FormStateManager::new(&config);
        let mut app = Self {
            host,
            auth: None,
            db,
            config,
            overlay,
            overlay_ids: ElementIds::new(Id::new("companion-overlay")),
            panel: ActionPanel::new(connection),
            state_manager,
            opts: CompanionOptions::default(),
        };
        // a host may already hold the broadcaster segment at load time
        app.load_host_config(false);
        Ok(app)
    }

    pub fn start(options: NativeOptions) -> eframe::Result<()> {
        eframe::run_native(
            "Stream Companion",
            options,
            Box::new(|cc| {
                cc.egui_ctx
                    .options_mut(|opt| opt.zoom_with_keyboard = false);
                let host = connect_host(&cc.egui_ctx)?;
                let db = DbConn::open(DB_PATH)?;
                Ok(Box::new(Companion::new(host, db)?))
            }),
        )
    }

    pub fn is_local(&self) -> bool {
        self.host.is_none()
    }

    pub fn connection(&self) -> Connection {
        self.panel.connection()
    }

    /// Drains pending host events.
    pub fn recv_event(&mut self, now: Instant) {
        while let Some(event) = self.host.as_mut().and_then(|host| host.poll_event()) {
            match event {
                HostEvent::Authorized(auth) => {
                    info!("authorized for channel {}", auth.channel_id);
                    self.auth = Some(auth);
                    self.panel.set_connection(Connection::Connected);
                    self.overlay.set_baseline(STATUS_CONNECTED);
                    self.overlay.show_status("Connected to host", now);
                    self.load_host_config(true);
                }
                HostEvent::Error(message) => {
                    error!("host error: {message}");
                    self.panel.set_connection(Connection::Error);
                    self.overlay.set_baseline(STATUS_ERROR);
                    self.overlay.show_status(STATUS_ERROR, now);
                    self.state_manager.form_status.error(STATUS_ERROR, now);
                }
                HostEvent::ConfigurationChanged => self.load_host_config(false),
            }
        }
    }

    fn load_host_config(&mut self, into_form: bool) {
        let Some(content) = self.host.as_ref().and_then(|host| host.broadcaster_content()) else {
            return;
        };
        match ConfigDocument::parse(&content) {
            Ok(doc) => {
                if into_form {
                    self.state_manager.config_form.apply(doc.clone());
                }
                self.config.apply(doc);
            }
            Err(err) => warn!("ignoring malformed broadcaster configuration: {err}"),
        }
    }

    /// Collects the actions both button sets produced this frame.
    pub fn dispatch_actions(&mut self) -> Vec<OverlayAction> {
        let mut actions = self.overlay.take_actions();
        actions.extend(self.panel.take_actions());
        for action in &actions {
            match action {
                OverlayAction::Button(id) => {
                    let label = self.config.button(*id).map_or("", |b| b.label.as_str());
                    info!("action {id} ({label}) triggered")
                }
                OverlayAction::Text(text) => info!("message submitted: {text}"),
            }
        }
        actions
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.panel
            .next_deadline()
            .into_iter()
            .chain(self.state_manager.form_status.deadline())
            .min()
    }
}

impl eframe::App for Companion {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.recv_event(now);

        let mut toasts = Toasts::new()
            .anchor(Align2::CENTER_CENTER, (10.0, 10.0))
            .direction(egui::Direction::TopDown);

        egui::TopBottomPanel::top("main_top_panel").show(ctx, |ui| {
            self.menubar(ui);
        });
        if self.opts.show_side_panel {
            egui::SidePanel::right("main_right_panel")
                .resizable(true)
                .default_width(ActionPanel::DEFAULT_WIDTH)
                .width_range(ActionPanel::MIN_WIDTH..=ActionPanel::MAX_WIDTH)
                .show(ctx, |ui| {
                    self.panel.ui(ui, &self.config, now);
                });
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.add(
                    OverlayView::new(&self.overlay_ids, &mut self.overlay, &self.config.buttons)
                        .placeholder(&self.config.default_text)
                        .now(now),
                );
            });

        if self.opts.show_config_window {
            self.show_config_window(ctx, &mut toasts, now);
        }

        self.dispatch_actions();
        self.panel.tick(now);
        self.state_manager.form_status.tick(now);
        if let Some(deadline) = self.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        toasts.show(ctx);
    }
}

/// Whether the platform host is reached through the stdio bridge.
pub fn uses_stdio_host() -> bool {
    std::env::var(HOST_ENV).is_ok_and(|host| host == "stdio")
}

fn connect_host(ctx: &egui::Context) -> Result<Option<Box<dyn ExtensionHost>>, CompanionError> {
    if uses_stdio_host() {
        info!("connecting to host over stdio");
        return Ok(Some(Box::new(spawn_stdio_bridge(ctx.clone())?)));
    }
    if let Ok(host) = std::env::var(HOST_ENV) {
        warn!("unknown host integration {host:?}, running in local mode");
    }
    Ok(None)
}
