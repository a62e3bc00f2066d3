//! Integration with the streaming platform that embeds the widget.
//!
//! The platform authorizes the viewer, reports integration errors and syncs
//! configuration segments. The app receives it as an optional
//! [`ExtensionHost`]: `None` means local mode.

use crate::errors::CompanionError;
use serde::{Deserialize, Serialize};

mod channel;
mod stdio;

pub use channel::{ChannelHost, ConfigUpdate, HostHandle, Segment};
pub use stdio::{read_loop, spawn_stdio_bridge, write_loop, BridgeMessage};

/// Opaque authorization handed over by the platform once the page is
/// authorized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    pub channel_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Authorized(AuthRecord),
    Error(String),
    ConfigurationChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSegment {
    #[default]
    Broadcaster,
    Developer,
    Global,
}

pub trait ExtensionHost {
    /// Next pending platform event, if any. Called once per frame until it
    /// returns `None`.
    fn poll_event(&mut self) -> Option<HostEvent>;

    /// Last synced broadcaster configuration.
    fn broadcaster_content(&self) -> Option<String>;

    fn set_configuration(
        &mut self,
        segment: ConfigSegment,
        version: &str,
        content: &str,
    ) -> Result<(), CompanionError>;
}
