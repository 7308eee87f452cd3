// src/render/terminal.rs

//! `Display` backed by a real terminal via `crossterm`.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use super::Display;

/// Width used when the terminal size cannot be queried (e.g. output is piped).
pub const FALLBACK_WIDTH: u16 = 80;

/// Terminal display that buffers an entire frame in memory and writes it to
/// `out` in a single `flush`, so a half-drawn frame is never visible.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write = Stdout> {
    out: W,
    buffer: Vec<u8>,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: Vec::with_capacity(4096),
        }
    }

    /// Bytes queued since the last flush.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Display for TerminalDisplay<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.buffer, Clear(ClearType::All))
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        queue!(self.buffer, MoveTo(column, row))
    }

    fn width(&self) -> u16 {
        match crossterm::terminal::size() {
            Ok((cols, _)) if cols > 0 => cols,
            _ => FALLBACK_WIDTH,
        }
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.buffer.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buffer)?;
        self.out.flush()?;
        self.buffer.clear();
        Ok(())
    }
}
