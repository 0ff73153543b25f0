//! # tyro-editor — Editor core for tyro
//!
//! This crate contains the fundamental building blocks of the editor:
//!
//! - **[`row`]** — one line in raw, rendered, and highlighted form, with
//!   the tab-stop coordinate translators
//! - **[`highlight`]** — the single-pass syntax scanner
//! - **[`document`]** — the ordered row collection: edits, dirty tracking,
//!   file I/O, language selection, and the comment cascade
//! - **[`viewport`]** — cursor, scroll offsets, and the visible window
//! - **[`render`]** — full-frame composition into one output buffer
//! - **[`search`]** — the incremental search session
//! - **[`editor`]** — the owned session aggregate and key dispatch
//! - **[`error`]** — the file-operation error type
//!
//! The terminal itself (raw mode, escape emission, key decoding) lives in
//! `tyro-term`; the language rule tables live in `tyro-syntax`.

pub mod document;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod render;
pub mod row;
pub mod search;
pub mod viewport;

pub use document::Document;
pub use editor::{ControlFlow, Editor};
pub use error::Error;
