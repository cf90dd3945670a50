//! Output buffering and ANSI emission.
//!
//! Writes are accumulated into one buffer and flushed in a single syscall
//! per frame. Attribute escape codes are only emitted when the run changes.

use std::io::{self, Write};

use crate::types::Attr;

use super::frame::Frame;

// =============================================================================
// OutputBuffer
// =============================================================================

/// Accumulates bytes for batch writing.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    /// Flush to stdout in one write.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.data)?;
        stdout.flush()?;
        self.data.clear();
        Ok(())
    }
}

// =============================================================================
// TermRenderer
// =============================================================================

/// Emits frames as ANSI, full redraw per frame.
pub struct TermRenderer {
    out: OutputBuffer,
}

impl TermRenderer {
    pub fn new() -> Self {
        Self {
            out: OutputBuffer::new(),
        }
    }

    /// Emit `frame` to stdout.
    pub fn render(&mut self, frame: &Frame) -> io::Result<()> {
        self.out.clear();
        let mut current = Attr::NONE;

        for (row, cells) in frame.rows().enumerate() {
            // Absolute positioning per row; rows are 1-based in ANSI.
            self.out.write_str(&format!("\x1b[{};1H", row + 1));
            for cell in cells {
                if cell.attrs != current {
                    self.out.write_str(&sgr(cell.attrs));
                    current = cell.attrs;
                }
                self.out.write_char(cell.ch);
            }
        }
        self.out.write_str("\x1b[0m");
        self.out.flush_stdout()
    }
}

impl Default for TermRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the SGR sequence selecting exactly `attrs`.
fn sgr(attrs: Attr) -> String {
    let mut seq = String::from("\x1b[0");
    if attrs.contains(Attr::BOLD) {
        seq.push_str(";1");
    }
    if attrs.contains(Attr::DIM) {
        seq.push_str(";2");
    }
    if attrs.contains(Attr::UNDERLINE) {
        seq.push_str(";4");
    }
    if attrs.contains(Attr::REVERSE) {
        seq.push_str(";7");
    }
    seq.push('m');
    seq
}

// =============================================================================
// TESTS
// =============================================================================
