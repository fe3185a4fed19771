//! Terminal output: colors, tables and the clipboard collaborator

pub mod clipboard;
pub mod review;
pub mod table;
pub mod terminal;

pub use clipboard::{Clipboard, FileClipboard, MemoryClipboard, StdoutClipboard};
pub use terminal::Painter;
