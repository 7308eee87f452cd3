use std::io;
use std::sync::{Arc, Mutex};

use pwatch::render::Display;

/// A single call made on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    MoveTo(u16, u16),
    Print(String),
    Write(Vec<u8>),
    Flush,
}

/// Shared view of everything a `RecordingDisplay` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct DisplayLog {
    ops: Arc<Mutex<Vec<DisplayOp>>>,
}

impl DisplayLog {
    pub fn ops(&self) -> Vec<DisplayOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn flush_count(&self) -> usize {
        self.ops().iter().filter(|op| **op == DisplayOp::Flush).count()
    }

    /// Ops grouped per frame; each frame ends with a `Flush`. Trailing
    /// un-flushed ops form a final partial frame.
    pub fn frames(&self) -> Vec<Vec<DisplayOp>> {
        let mut frames = Vec::new();
        let mut current = Vec::new();
        for op in self.ops() {
            let is_flush = op == DisplayOp::Flush;
            current.push(op);
            if is_flush {
                frames.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            frames.push(current);
        }
        frames
    }

    /// Text printed in the last frame, concatenated.
    pub fn last_frame_text(&self) -> String {
        self.frames()
            .last()
            .map(|frame| frame_text(frame))
            .unwrap_or_default()
    }

    fn push(&self, op: DisplayOp) {
        self.ops.lock().unwrap().push(op);
    }
}

/// Concatenate the printed text of a frame.
pub fn frame_text(frame: &[DisplayOp]) -> String {
    let mut text = String::new();
    for op in frame {
        match op {
            DisplayOp::Print(s) => text.push_str(s),
            DisplayOp::Write(bytes) => text.push_str(&String::from_utf8_lossy(bytes)),
            _ => {}
        }
    }
    text
}

/// A fake display with a fixed width that records every call.
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    width: u16,
    log: DisplayLog,
}

impl RecordingDisplay {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            log: DisplayLog::default(),
        }
    }

    pub fn log(&self) -> DisplayLog {
        self.log.clone()
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self) -> io::Result<()> {
        self.log.push(DisplayOp::Clear);
        Ok(())
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.log.push(DisplayOp::MoveTo(column, row));
        Ok(())
    }

    fn width(&self) -> u16 {
        self.width
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.log.push(DisplayOp::Print(text.to_string()));
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.log.push(DisplayOp::Write(bytes.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.push(DisplayOp::Flush);
        Ok(())
    }
}

/// A display whose `flush` always fails, as when stdout is closed.
#[derive(Debug, Clone, Default)]
pub struct BrokenDisplay;

impl Display for BrokenDisplay {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn move_to(&mut self, _column: u16, _row: u16) -> io::Result<()> {
        Ok(())
    }

    fn width(&self) -> u16 {
        80
    }

    fn print(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn write_bytes(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }
}
