//! Row — one line of the document, in raw and rendered form.
//!
//! A `Row` keeps three parallel views of a line:
//!
//! - `raw` — the authoritative editable bytes, tabs included, no newline
//! - `render` — the display bytes, every tab expanded to spaces so rendered
//!   columns land on multiples of the tab width
//! - `hl` — one highlight class per **rendered** byte
//!
//! `render` is never edited in place; every mutation of `raw` regenerates
//! it wholesale. `hl` is regenerated by the document's highlight pass (it
//! needs the language rules and the previous row's comment state, which a
//! row alone doesn't have) — a freshly rendered row carries a Normal-class
//! array of the right length until then, so the `hl.len() == render.len()`
//! invariant holds at every point in between.
//!
//! # Coordinates
//!
//! Two column systems meet here. `cx` counts raw bytes; `rx` counts
//! rendered bytes. [`cx_to_rx`](Row::cx_to_rx) and
//! [`rx_to_cx`](Row::rx_to_cx) convert between them with the tab-stop
//! arithmetic. Columns strictly inside one expanded tab all map back to the
//! tab's raw position — an equivalence class, not a strict inverse.

use tyro_syntax::Highlight;

/// Rendered tab stop width: tabs expand to the next multiple of 8.
pub const TAB_WIDTH: usize = 8;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One line of text with its derived render and highlight arrays.
#[derive(Debug, Clone)]
pub struct Row {
    raw: Vec<u8>,
    render: Vec<u8>,
    hl: Vec<Highlight>,
    open_comment: bool,
    idx: usize,
}

impl Row {
    /// Create a row from raw bytes, rendering it immediately.
    #[must_use]
    pub fn new(raw: Vec<u8>, idx: usize) -> Self {
        let mut row = Self {
            raw,
            render: Vec::new(),
            hl: Vec::new(),
            open_comment: false,
            idx,
        };
        row.update_render();
        row
    }

    // -- Accessors ----------------------------------------------------------

    /// The editable bytes (no trailing newline).
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The tab-expanded display bytes.
    #[inline]
    #[must_use]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Highlight classes, one per rendered byte.
    #[inline]
    #[must_use]
    pub fn hl(&self) -> &[Highlight] {
        &self.hl
    }

    /// Raw length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the row has no content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Rendered length in bytes.
    #[inline]
    #[must_use]
    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    /// Whether a multi-line comment is still open at the end of this row.
    #[inline]
    #[must_use]
    pub const fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// This row's position within the document.
    #[inline]
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.idx
    }

    pub(crate) const fn set_idx(&mut self, idx: usize) {
        self.idx = idx;
    }

    pub(crate) const fn set_open_comment(&mut self, open: bool) {
        self.open_comment = open;
    }

    /// Replace the highlight array. The caller must supply exactly one
    /// class per rendered byte.
    pub(crate) fn set_hl(&mut self, hl: Vec<Highlight>) {
        debug_assert_eq!(hl.len(), self.render.len());
        self.hl = hl;
    }

    /// Overwrite a span of the highlight array (search-match painting).
    pub(crate) fn paint_hl(&mut self, start: usize, len: usize, class: Highlight) {
        let end = (start + len).min(self.hl.len());
        for slot in &mut self.hl[start.min(end)..end] {
            *slot = class;
        }
    }

    // -- Mutation -----------------------------------------------------------

    /// Insert one byte at `at`, clamped to `[0, len]` when out of range.
    pub fn insert_byte(&mut self, at: usize, byte: u8) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, byte);
        self.update_render();
    }

    /// Delete the byte at `at`; out-of-range is a silent no-op.
    ///
    /// Returns whether a byte was removed.
    pub fn delete_byte(&mut self, at: usize) -> bool {
        if at >= self.raw.len() {
            return false;
        }
        self.raw.remove(at);
        self.update_render();
        true
    }

    /// Append bytes to the end of the row (line merging).
    pub fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
        self.update_render();
    }

    /// Split the row at `at`: keep `raw[..at]`, return `raw[at..]`.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.raw.len());
        let tail = self.raw.split_off(at);
        self.update_render();
        tail
    }

    /// Regenerate `render` from `raw`, expanding tabs.
    ///
    /// The highlight array is reset to Normal at the new length; the
    /// document's highlight pass refills it.
    fn update_render(&mut self) {
        self.render.clear();
        for &byte in &self.raw {
            if byte == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_WIDTH != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(byte);
            }
        }
        self.hl = vec![Highlight::Normal; self.render.len()];
        self.open_comment = false;
    }

    // -- Coordinate translation ---------------------------------------------

    /// Convert a raw column to a rendered column.
    ///
    /// Walks `raw[..cx]`; each tab advances to the next multiple of
    /// [`TAB_WIDTH`], every other byte advances by one.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.raw.iter().take(cx) {
            if byte == b'\t' {
                rx += (TAB_WIDTH - 1) - (rx % TAB_WIDTH);
            }
            rx += 1;
        }
        rx
    }

    /// Convert a rendered column back to a raw column.
    ///
    /// Walks the raw bytes accumulating the same tab arithmetic until the
    /// running rendered column exceeds `rx`; returns the raw index reached.
    /// A rendered column beyond the end of the line maps to `len()`.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &byte) in self.raw.iter().enumerate() {
            if byte == b'\t' {
                cur_rx += (TAB_WIDTH - 1) - (cur_rx % TAB_WIDTH);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.raw.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
