//! Line-delimited JSON bridge to an embedding process.
//!
//! Host messages arrive on stdin, one JSON object per line:
//!
//! ```text
//! {"type":"authorized","channelId":"1234","clientId":"abc","token":"..."}
//! {"type":"error","message":"..."}
//! {"type":"configuration","segment":"broadcaster","version":"1","content":"{...}"}
//! ```
//!
//! Configuration writes leave on stdout as
//! `{"type":"setConfiguration","segment":"broadcaster","version":"1","content":"{...}"}`.

use super::{AuthRecord, ChannelHost, ConfigSegment, ConfigUpdate, HostHandle};
use crate::errors::CompanionError;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BridgeMessage {
    Authorized(AuthRecord),
    Error {
        message: String,
    },
    Configuration {
        #[serde(default)]
        segment: ConfigSegment,
        #[serde(default)]
        version: String,
        content: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum BridgeOutput<'a> {
    SetConfiguration(&'a ConfigUpdate),
}

/// Starts the reader and writer threads and returns the host they serve.
pub fn spawn_stdio_bridge(ctx: egui::Context) -> Result<ChannelHost, CompanionError> {
    let (outbox, updates) = channel();
    let (host, handle) = ChannelHost::new();
    let handle = handle.with_repaint(ctx);

    thread::Builder::new()
        .name("host-bridge-reader".to_string())
        .spawn(move || read_loop(io::stdin().lock(), &handle))?;
    thread::Builder::new()
        .name("host-bridge-writer".to_string())
        .spawn(move || write_loop(io::stdout(), updates))?;

    Ok(host.with_outbox(outbox))
}

/// Delivers every well-formed line of `reader` to `handle` until the input
/// ends or the host is gone. Malformed lines are skipped.
pub fn read_loop<R: BufRead>(reader: R, handle: &HostHandle) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("failed to read from host bridge: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let message = match serde_json::from_str::<BridgeMessage>(&line) {
            Ok(message) => message,
            Err(err) => {
                warn!("ignoring malformed host message: {err}");
                continue;
            }
        };
        let delivered = match message {
            BridgeMessage::Authorized(auth) => handle.authorize(auth),
            BridgeMessage::Error { message } => handle.fail(message),
            BridgeMessage::Configuration {
                segment,
                version,
                content,
            } => handle.publish(segment, &version, &content),
        };
        if !delivered {
            break;
        }
    }
    debug!("host bridge input closed");
}

pub fn write_loop<W: Write>(mut writer: W, updates: Receiver<ConfigUpdate>) {
    for update in updates {
        let written = serde_json::to_writer(&mut writer, &BridgeOutput::SetConfiguration(&update))
            .map_err(io::Error::from)
            .and_then(|_| writeln!(writer))
            .and_then(|_| writer.flush());
        if let Err(err) = written {
            error!("failed to write to host bridge: {err}");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ExtensionHost, HostEvent};
    use std::io::Cursor;

    #[test]
    fn reads_messages_and_skips_garbage() {
        let input = concat!(
            r#"{"type":"authorized","channelId":"42","clientId":"c","token":"t"}"#,
            "\n\n",
            "not json\n",
            r#"{"type":"configuration","content":"{\"defaultText\":\"yo\"}"}"#,
            "\n",
            r#"{"type":"error","message":"offline"}"#,
            "\n",
        );
        let (mut host, handle) = ChannelHost::new();
        read_loop(Cursor::new(input), &handle);

        match host.poll_event() {
            Some(HostEvent::Authorized(auth)) => {
                assert_eq!(auth.channel_id, "42");
                assert_eq!(auth.user_id, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(host.poll_event(), Some(HostEvent::ConfigurationChanged));
        assert_eq!(
            host.broadcaster_content().as_deref(),
            Some(r#"{"defaultText":"yo"}"#)
        );
        assert_eq!(host.poll_event(), Some(HostEvent::Error("offline".to_string())));
        assert_eq!(host.poll_event(), None);
    }

    #[test]
    fn writes_one_line_per_update() {
        let (outbox, updates) = channel();
        outbox
            .send(ConfigUpdate {
                segment: ConfigSegment::Broadcaster,
                version: "1".to_string(),
                content: "{}".to_string(),
            })
            .unwrap();
        drop(outbox);

        let mut out = Vec::new();
        write_loop(&mut out, updates);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"type\":\"setConfiguration\",\"segment\":\"broadcaster\",\"version\":\"1\",\"content\":\"{}\"}\n"
        );
    }
}
