// SPDX-License-Identifier: MIT
//
// tyro-term — Terminal layer for tyro.
//
// Direct terminal control for a small text editor: raw mode via termios,
// ANSI escape output accumulated into one buffer per frame, and byte-level
// input decoding with bounded waits. No crossterm, no ratatui — the editor
// emits a handful of escape sequences and owning that byte stream outright
// is simpler than configuring an abstraction layer down to the same place.
//
// The crate is deliberately dumb about policy. It knows how to enter raw
// mode, how big the terminal is, how to turn stdin bytes into `Key` values,
// and how to flush a frame in a single write. What to draw and when to
// quit belong to the layers above.

pub mod ansi;
pub mod key;
pub mod output;
pub mod terminal;

pub use key::{ByteSource, Key};
pub use output::OutputBuffer;
pub use terminal::{Size, Terminal};
