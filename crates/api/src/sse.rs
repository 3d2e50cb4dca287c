//! Server-Sent Events framing for the streaming API.
//!
//! The streaming endpoints emit frames such as
//!
//! ```text
//! event: update
//! data: {"id":"1","content":"hi"}
//!
//! :thump
//!
//! event: delete
//! data: 1
//! ```
//!
//! [`SseDecoder`] turns arbitrary byte chunks into [`RawMessage`]s.

use mastodon_core::RawMessage;
use serde_json::Value;
use tracing::warn;

/// Tag used for frames that carry no `event:` line.
pub const DEFAULT_EVENT: &str = "message";

/// Longest line the decoder will buffer, in bytes.
pub const MAX_LINE_LEN: usize = 1024 * 1024;

/// Incremental SSE frame decoder.
///
/// A line longer than the limit is dropped together with the rest of its
/// frame, and the buffer never holds more than the limit.
#[derive(Debug)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    max_line: usize,
    // Rest of an oversized line is still arriving.
    discarding_line: bool,
    // Frame lost a line; drop it at the next blank line.
    skipping_frame: bool,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_LEN)
    }
}

impl SseDecoder {
    /// Create an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom line length limit.
    #[must_use]
    pub const fn with_max_line(max_line: usize) -> Self {
        Self {
            buffer: Vec::new(),
            event: None,
            data: Vec::new(),
            max_line,
            discarding_line: false,
            skipping_frame: false,
        }
    }

    /// Feed a chunk and return every frame it completes.
    ///
    /// Partial lines and partial frames are kept until a later chunk finishes them.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<RawMessage> {
        self.buffer.extend_from_slice(chunk);

        let mut messages = Vec::new();
        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            if std::mem::take(&mut self.discarding_line) {
                continue;
            }
            if line.len() > self.max_line {
                self.drop_frame(line.len());
                continue;
            }

            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(message) = self.take_frame() {
                    messages.push(message);
                }
            } else if !self.skipping_frame {
                self.field(line);
            }
        }

        if self.discarding_line {
            self.buffer.clear();
        } else if self.buffer.len() > self.max_line {
            self.drop_frame(self.buffer.len());
            self.buffer.clear();
            self.discarding_line = true;
        }
        messages
    }

    /// Flush a trailing frame that was not terminated by a blank line.
    pub fn finish(&mut self) -> Option<RawMessage> {
        self.discarding_line = false;
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest);
            let line = line.trim_end_matches('\r');
            if !line.is_empty() && !self.skipping_frame {
                self.field(line);
            }
        }
        self.take_frame()
    }

    fn drop_frame(&mut self, len: usize) {
        warn!(len, limit = self.max_line, "Dropping stream frame with oversized line");
        self.event = None;
        self.data.clear();
        self.skipping_frame = true;
    }

    fn field(&mut self, line: &str) {
        // Comment lines are heartbeats.
        if line.starts_with(':') {
            return;
        }

        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
    }

    fn take_frame(&mut self) -> Option<RawMessage> {
        if std::mem::take(&mut self.skipping_frame) {
            return None;
        }
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }

        let data = std::mem::take(&mut self.data).join("\n");
        let payload = serde_json::from_str(&data).unwrap_or(Value::String(data));
        Some(RawMessage::new(
            event.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
            payload,
        ))
    }
}
