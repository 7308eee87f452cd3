// src/render/mod.rs

//! Screen output.
//!
//! - [`Display`] is the terminal capability the renderer draws through.
//! - [`terminal`] implements it on top of `crossterm`, buffering a whole
//!   frame until `flush`.
//! - [`frame`] composes one frame: title, banner, command output.
//! - [`host`] looks up the hostname shown in the banner.

use std::io;

pub mod frame;
pub mod host;
pub mod terminal;

pub use frame::{FrameRenderer, format_timestamp};
pub use terminal::TerminalDisplay;

/// Minimal terminal surface needed to paint a frame.
///
/// Coordinates are 0-based `(column, row)`. Nothing written through this
/// trait has to be visible before [`Display::flush`].
pub trait Display: Send {
    fn clear(&mut self) -> io::Result<()>;
    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()>;
    /// Width of the screen in columns.
    fn width(&self) -> u16;
    fn print(&mut self, text: &str) -> io::Result<()>;
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}
