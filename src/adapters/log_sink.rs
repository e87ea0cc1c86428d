//! Log-based text sink adapter.
//!
//! Implements [`TextSink`] by buffering report text and emitting one log
//! record per completed line through the ESP-IDF logger (which goes to
//! UART / USB-CDC in production).

use log::info;

use crate::app::ports::TextSink;

/// Longest line kept before a forced flush.
const MAX_LINE: usize = 160;

/// Adapter that writes report lines to the serial console.
#[derive(Default)]
pub struct LogTextSink {
    line: heapless::String<MAX_LINE>,
}

impl LogTextSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(&mut self) {
        let text = self.line.trim_end_matches(['\r', '\n']);
        if !text.is_empty() {
            info!("REPORT | {}", text);
        }
        self.line.clear();
    }
}

impl TextSink for LogTextSink {
    fn write_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.flush();
            } else if self.line.push(ch).is_err() {
                self.flush();
                let _ = self.line.push(ch);
            }
        }
    }
}
