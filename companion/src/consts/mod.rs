use std::time::Duration;

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Key of the configuration document in the local store.
pub const LOCAL_CONFIG_KEY: &str = "twitch-ext-config";
pub const DB_PATH: &str = "companion.sqlite";

/// Environment variable selecting the host integration (`stdio` or unset).
pub const HOST_ENV: &str = "COMPANION_HOST";

/// Segment and version the configuration form writes to.
pub const CONFIG_VERSION: &str = "1";

pub const DEFAULT_TEXT: &str = "Type your message here...";

pub const STATUS_CONNECTED: &str = "Connected";
pub const STATUS_LOCAL: &str = "Local mode";
pub const STATUS_ERROR: &str = "Connection error";

pub const FEEDBACK_HOLD: Duration = Duration::from_secs(2);
pub const FORM_STATUS_HOLD: Duration = Duration::from_secs(3);
pub const PANEL_PULSE: Duration = Duration::from_millis(600);
