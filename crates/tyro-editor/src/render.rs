//! Renderer — one full frame per call, no partial writes.
//!
//! Composes the entire screen into an [`OutputBuffer`]: text rows with
//! highlight colors, the reverse-video status bar, the message bar, and
//! the final cursor placement. The caller flushes the buffer to the
//! terminal in a single write, so the terminal never sees a torn frame.
//!
//! Color escapes are only emitted when the highlight class changes from
//! the previous byte — a fully Normal row costs no escapes at all beyond
//! the end-of-row reset. Control bytes are drawn as reverse-video
//! `@`-offset symbols (`^A` → `A`) with the active color restored
//! afterward, so stray control characters in a file are visible instead of
//! corrupting the terminal state.

use std::io::{self, Write};

use tyro_syntax::Highlight;
use tyro_term::{ansi, OutputBuffer};

use crate::document::Document;
use crate::viewport::{Viewport, VisibleRow};

/// Version string shown in the empty-file banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Truncation width for the filename in the status bar.
const STATUS_NAME_WIDTH: usize = 20;

/// Compose one complete frame.
///
/// `message` is the already-expiry-filtered message bar text.
///
/// # Errors
///
/// Propagates writer errors; writing into an [`OutputBuffer`] cannot fail.
pub fn render_frame(
    doc: &Document,
    view: &Viewport,
    message: Option<&str>,
    out: &mut OutputBuffer,
) -> io::Result<()> {
    ansi::cursor_hide(out)?;
    ansi::cursor_home(out)?;

    draw_rows(doc, view, out)?;
    draw_status_bar(doc, view, out)?;
    draw_message_bar(message, view.cols(), out)?;

    ansi::cursor_to(
        out,
        clamp_u16(view.rx() - view.col_offset()),
        clamp_u16(view.cy() - view.row_offset()),
    )?;
    ansi::cursor_show(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Text rows
// ---------------------------------------------------------------------------

fn draw_rows(doc: &Document, view: &Viewport, out: &mut OutputBuffer) -> io::Result<()> {
    for (y, visible) in view.visible_slice(doc).iter().enumerate() {
        match visible {
            VisibleRow::Filler => {
                if doc.is_empty() && y == view.rows() / 5 {
                    draw_banner(view.cols(), out)?;
                } else {
                    out.push(b'~');
                }
            }
            VisibleRow::Text { render, hl } => draw_text_row(render, hl, out)?,
        }
        ansi::clear_line(out)?;
        out.write_all(b"\r\n")?;
    }
    Ok(())
}

/// The centered version banner, shown on the banner row of an empty file.
fn draw_banner(cols: usize, out: &mut OutputBuffer) -> io::Result<()> {
    let banner = format!("Tyro editor -- version {VERSION}");
    let text = &banner[..banner.len().min(cols)];

    let mut padding = (cols - text.len()) / 2;
    if padding > 0 {
        out.push(b'~');
        padding -= 1;
    }
    for _ in 0..padding {
        out.push(b' ');
    }
    out.write_all(text.as_bytes())
}

/// One row of text: bytes with minimal color switching, control bytes in
/// reverse video.
fn draw_text_row(render: &[u8], hl: &[Highlight], out: &mut OutputBuffer) -> io::Result<()> {
    let mut current_color: Option<u8> = None;

    for (&byte, &class) in render.iter().zip(hl) {
        if byte.is_ascii_control() {
            let symbol = if byte <= 26 { b'@' + byte } else { b'?' };
            ansi::reverse(out)?;
            out.push(symbol);
            ansi::attrs_off(out)?;
            // attrs_off wiped the color; restore it for the rest of the run.
            if let Some(color) = current_color {
                ansi::fg_color(out, color)?;
            }
        } else if class == Highlight::Normal {
            if current_color.is_some() {
                ansi::fg_default(out)?;
                current_color = None;
            }
            out.push(byte);
        } else {
            let color = class.ansi_color();
            if current_color != Some(color) {
                ansi::fg_color(out, color)?;
                current_color = Some(color);
            }
            out.push(byte);
        }
    }

    ansi::fg_default(out)
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Reverse-video status line: name/line-count/modified on the left, the
/// language and cursor position on the right.
///
/// The right segment is emitted at the exact moment the remaining gap
/// equals its length — so it sits flush against the right edge when it
/// fits and is dropped entirely when it never can.
fn draw_status_bar(doc: &Document, view: &Viewport, out: &mut OutputBuffer) -> io::Result<()> {
    ansi::reverse(out)?;

    let name = doc
        .filename()
        .map_or_else(|| "[No File]".to_string(), |p| p.display().to_string());
    let name = &name[..name.len().min(STATUS_NAME_WIDTH)];
    let left = format!(
        "{name} - {} lines {}",
        doc.len(),
        if doc.is_modified() { "(modified)" } else { "" }
    );
    let right = format!(
        "{} | {}/{}",
        doc.language_name().unwrap_or("Unknown"),
        view.cy() + 1,
        doc.len()
    );

    let cols = view.cols();
    let mut len = left.len().min(cols);
    out.write_all(&left.as_bytes()[..len])?;

    while len < cols {
        if cols - len == right.len() {
            out.write_all(right.as_bytes())?;
            break;
        }
        out.push(b' ');
        len += 1;
    }

    ansi::attrs_off(out)?;
    out.write_all(b"\r\n")
}

// ---------------------------------------------------------------------------
// Message bar
// ---------------------------------------------------------------------------

fn draw_message_bar(message: Option<&str>, cols: usize, out: &mut OutputBuffer) -> io::Result<()> {
    ansi::clear_line(out)?;
    if let Some(msg) = message {
        out.write_all(&msg.as_bytes()[..msg.len().min(cols)])?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
