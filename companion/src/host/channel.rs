use super::{AuthRecord, ConfigSegment, ExtensionHost, HostEvent};
use crate::errors::CompanionError;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub version: String,
    pub content: String,
}

/// A configuration write the host has to sync upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub segment: ConfigSegment,
    pub version: String,
    pub content: String,
}

type Segments = Arc<Mutex<HashMap<ConfigSegment, Segment>>>;

/// Host fed through a [`HostHandle`], typically from a bridge thread.
pub struct ChannelHost {
    events: Receiver<HostEvent>,
    sender: Sender<HostEvent>,
    segments: Segments,
    outbox: Option<Sender<ConfigUpdate>>,
}

impl ChannelHost {
    pub fn new() -> (Self, HostHandle) {
        let (sender, events) = channel();
        let segments = Segments::default();
        let handle = HostHandle {
            sender: sender.clone(),
            segments: segments.clone(),
            ctx: None,
        };
        let host = Self {
            events,
            sender,
            segments,
            outbox: None,
        };
        (host, handle)
    }

    /// Forwards every configuration write to `outbox`.
    pub fn with_outbox(mut self, outbox: Sender<ConfigUpdate>) -> Self {
        self.outbox = Some(outbox);
        self
    }
}

impl ExtensionHost for ChannelHost {
    fn poll_event(&mut self) -> Option<HostEvent> {
        self.events.try_recv().ok()
    }

    fn broadcaster_content(&self) -> Option<String> {
        self.segments
            .lock()
            .get(&ConfigSegment::Broadcaster)
            .map(|segment| segment.content.clone())
    }

    fn set_configuration(
        &mut self,
        segment: ConfigSegment,
        version: &str,
        content: &str,
    ) -> Result<(), CompanionError> {
        if let Some(outbox) = &self.outbox {
            outbox
                .send(ConfigUpdate {
                    segment,
                    version: version.to_string(),
                    content: content.to_string(),
                })
                .map_err(|_| CompanionError::Plain("host bridge is disconnected".to_string()))?;
        }
        self.segments.lock().insert(
            segment,
            Segment {
                version: version.to_string(),
                content: content.to_string(),
            },
        );
        debug!("stored {segment:?} configuration v{version}");
        // the receiver lives in `self`, so this cannot fail
        let _ = self.sender.send(HostEvent::ConfigurationChanged);
        Ok(())
    }
}

/// Producer side of a [`ChannelHost`].
#[derive(Clone)]
pub struct HostHandle {
    sender: Sender<HostEvent>,
    segments: Segments,
    ctx: Option<egui::Context>,
}

impl HostHandle {
    /// Wakes the UI whenever an event is delivered.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn authorize(&self, auth: AuthRecord) -> bool {
        self.send(HostEvent::Authorized(auth))
    }

    pub fn fail(&self, message: impl Into<String>) -> bool {
        self.send(HostEvent::Error(message.into()))
    }

    /// Replaces a configuration segment and notifies the app.
    pub fn publish(&self, segment: ConfigSegment, version: &str, content: &str) -> bool {
        self.segments.lock().insert(
            segment,
            Segment {
                version: version.to_string(),
                content: content.to_string(),
            },
        );
        self.send(HostEvent::ConfigurationChanged)
    }

    pub fn segment(&self, segment: ConfigSegment) -> Option<Segment> {
        self.segments.lock().get(&segment).cloned()
    }

    /// Returns `false` once the host side has been dropped.
    fn send(&self, event: HostEvent) -> bool {
        let delivered = self.sender.send(event).is_ok();
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
        delivered
    }
}
