//! Chat log views.
//!
//! Entries are always plain text. [`ScrollLog`] keeps them in memory with
//! a fixed-height viewport; [`TerminalLog`] writes them to a terminal.

use std::fmt;
use std::io::{self, Write};
use time::format_description::{self, OwnedFormatItem};
use time::OffsetDateTime;

/// One rendered line of the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
    appended_at: OffsetDateTime,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            appended_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn appended_at(&self) -> OffsetDateTime {
        self.appended_at
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A visible, scrollable list of chat lines.
pub trait ChatLog {
    /// Append one entry at the end of the log.
    fn append(&mut self, entry: LogEntry);

    /// Scroll the view to its maximum offset.
    fn scroll_to_bottom(&mut self);
}

/// In-memory log with a viewport of `viewport` lines.
///
/// Offsets are counted in lines. `scroll_top` never exceeds
/// [`max_scroll_top`](ScrollLog::max_scroll_top).
#[derive(Debug, Clone)]
pub struct ScrollLog {
    entries: Vec<LogEntry>,
    viewport: usize,
    scroll_top: usize,
}

impl Default for ScrollLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl ScrollLog {
    pub fn new(viewport: usize) -> Self {
        Self {
            entries: Vec::new(),
            viewport,
            scroll_top: 0,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total content height.
    pub fn scroll_height(&self) -> usize {
        self.entries.len()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn max_scroll_top(&self) -> usize {
        self.scroll_height().saturating_sub(self.viewport)
    }

    /// Set the offset, clamped like a browser clamps `scrollTop`.
    pub fn set_scroll_top(&mut self, offset: usize) {
        self.scroll_top = offset.min(self.max_scroll_top());
    }

    /// Entries currently inside the viewport.
    pub fn visible(&self) -> &[LogEntry] {
        let end = (self.scroll_top + self.viewport).min(self.entries.len());
        &self.entries[self.scroll_top..end]
    }
}

impl ChatLog for ScrollLog {
    fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    fn scroll_to_bottom(&mut self) {
        self.set_scroll_top(self.scroll_height());
    }
}

/// Log that prints each entry as one terminal line.
///
/// Control characters in entries are escaped so remote text cannot drive
/// the terminal.
pub struct TerminalLog<W: Write> {
    out: W,
    timestamps: Option<OwnedFormatItem>,
}

impl<W: Write> TerminalLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            timestamps: None,
        }
    }

    /// Prefix each line with `[HH:MM:SS]` (UTC).
    pub fn with_timestamps(mut self) -> Self {
        self.timestamps = format_description::parse_owned::<1>("[hour]:[minute]:[second]").ok();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entry(&mut self, entry: &LogEntry) -> io::Result<()> {
        if let Some(format) = &self.timestamps {
            let stamp = entry
                .appended_at()
                .format(format)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            write!(self.out, "[{}] ", stamp)?;
        }
        writeln!(self.out, "{}", escape_controls(entry.text()))?;
        self.out.flush()
    }
}

impl<W: Write> ChatLog for TerminalLog<W> {
    fn append(&mut self, entry: LogEntry) {
        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!(error = %e, "failed to write chat log entry");
        }
    }

    fn scroll_to_bottom(&mut self) {
        // The terminal already follows its output.
    }
}

fn escape_controls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}
