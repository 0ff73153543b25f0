//! Document — the ordered collection of rows.
//!
//! Owns every structural mutation (insert/delete/split/merge of rows, byte
//! edits within a row), dirty tracking, file I/O, language selection, and
//! the multi-line comment cascade. Rows themselves only know how to keep
//! their derived render array in sync; whenever content changes, the
//! document re-runs the highlighter on the touched row and lets the result
//! ripple downward while the `open_comment` flag keeps flipping.
//!
//! The cascade is an explicit loop rather than recursion: an edit that
//! opens an unterminated `/*` at the top of a large file re-highlights
//! every following row exactly once, with no stack growth.
//!
//! Out-of-range indices are silent no-ops throughout — the editing layer
//! clamps the cursor, and a document refusing an impossible edit quietly is
//! the contract the original editor shipped with.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use tyro_syntax::language::{self, Language};
use tyro_syntax::Highlight;

use crate::error::Error;
use crate::highlight::scan_line;
use crate::row::Row;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An ordered sequence of rows plus file metadata.
#[derive(Default)]
pub struct Document {
    rows: Vec<Row>,
    filename: Option<PathBuf>,
    language: Option<&'static Language>,
    modified: u32,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// Create an empty, unnamed document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from in-memory bytes (no filename, no language).
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut doc = Self::new();
        doc.load_bytes(bytes);
        doc
    }

    /// Load a document from a file.
    ///
    /// Detects the language from the filename and highlights every row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be read.
    pub fn open(path: PathBuf) -> Result<Self, Error> {
        let bytes = fs::read(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        let mut doc = Self::new();
        doc.filename = Some(path);
        doc.load_bytes(&bytes);
        doc.select_language();
        info!(
            rows = doc.rows.len(),
            language = doc.language_name().unwrap_or("none"),
            "opened file"
        );
        Ok(doc)
    }

    // -- Access -------------------------------------------------------------

    /// All rows, in file order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row by index.
    #[inline]
    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub(crate) fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the document has no rows at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The file path, if the document is named.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// The active language's display name.
    #[inline]
    #[must_use]
    pub fn language_name(&self) -> Option<&'static str> {
        self.language.map(|lang| lang.name)
    }

    /// True when there are unsaved edits.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified > 0
    }

    // -- Row operations -----------------------------------------------------

    /// Insert a new row at `at`. Out-of-range is a silent no-op.
    pub fn insert_row(&mut self, at: usize, bytes: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(bytes, at));
        self.reindex_from(at + 1);
        self.rehighlight_from(at);
        // The row below gained a new predecessor; its comment state may be
        // stale even when the new row's own flag did not change (an
        // inserted row can close a comment that used to reach further).
        if at + 1 < self.rows.len() {
            self.rehighlight_from(at + 1);
        }
        self.modified += 1;
    }

    /// Delete the row at `at`. Out-of-range is a silent no-op.
    ///
    /// The highlight cascade re-runs from the deletion point: the row that
    /// moved up may now follow a different comment state.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.reindex_from(at);
        if at < self.rows.len() {
            self.rehighlight_from(at);
        }
        self.modified += 1;
    }

    /// Insert one byte into row `at`, column clamped to `[0, len]`.
    pub fn insert_byte(&mut self, at: usize, col: usize, byte: u8) {
        if at >= self.rows.len() {
            return;
        }
        self.rows[at].insert_byte(col, byte);
        self.rehighlight_from(at);
        self.modified += 1;
    }

    /// Delete the byte at `col` in row `at`; out-of-range is a no-op.
    pub fn delete_byte(&mut self, at: usize, col: usize) {
        if at >= self.rows.len() {
            return;
        }
        if self.rows[at].delete_byte(col) {
            self.rehighlight_from(at);
            self.modified += 1;
        }
    }

    /// Split row `at` at `col`: the tail becomes a new row below.
    pub fn split_row(&mut self, at: usize, col: usize) {
        if at >= self.rows.len() {
            return;
        }
        let tail = self.rows[at].split_off(col);
        self.insert_row(at + 1, tail);
        self.rehighlight_from(at);
        self.modified += 1;
    }

    /// Append row `at`'s content onto the previous row and delete row `at`.
    ///
    /// Returns the previous row's length before the merge — the column the
    /// cursor lands on after a backspace at column 0. `None` when `at` is 0
    /// or out of range.
    pub fn merge_row_into_previous(&mut self, at: usize) -> Option<usize> {
        if at == 0 || at >= self.rows.len() {
            return None;
        }
        let content = self.rows[at].raw().to_vec();
        let prev_len = self.rows[at - 1].len();
        self.rows[at - 1].append(&content);
        self.delete_row(at);
        self.rehighlight_from(at - 1);
        self.modified += 1;
        Some(prev_len)
    }

    // -- Serialization ------------------------------------------------------

    /// The canonical on-disk form: every row's raw bytes followed by
    /// exactly one `\n`, the last row included.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        out
    }

    /// Replace the document content from raw file bytes.
    ///
    /// Lines split on `\n`; a `\r` before the split point is stripped
    /// (CRLF input loads cleanly). A trailing newline does not produce a
    /// final empty row. Resets the modified counter.
    pub fn load_bytes(&mut self, bytes: &[u8]) {
        self.rows.clear();
        if !bytes.is_empty() {
            for line in bytes.split(|&b| b == b'\n') {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                self.insert_row(self.rows.len(), line.to_vec());
            }
            // The split after a final `\n` yields one empty tail that is
            // not a line of the file.
            if bytes.last() == Some(&b'\n') {
                self.rows.pop();
            }
        }
        self.modified = 0;
    }

    // -- File I/O -----------------------------------------------------------

    /// Write the document to its file, truncating to the exact length.
    ///
    /// Returns the number of bytes written. The modified counter resets
    /// only on success; a failed save leaves everything untouched so the
    /// user can retry.
    ///
    /// # Errors
    ///
    /// [`Error::NoFilename`] when the buffer is unnamed, [`Error::Save`]
    /// when the write fails.
    pub fn save(&mut self) -> Result<usize, Error> {
        let path = self.filename.clone().ok_or(Error::NoFilename)?;
        let bytes = self.to_bytes();
        fs::write(&path, &bytes).map_err(|source| Error::Save { source })?;
        self.modified = 0;
        info!(path = %path.display(), bytes = bytes.len(), "saved file");
        Ok(bytes.len())
    }

    /// Save under a new name, re-selecting the language to match.
    ///
    /// # Errors
    ///
    /// [`Error::Save`] when the write fails; the new name is kept either
    /// way so a retry targets the same file.
    pub fn save_as(&mut self, path: PathBuf) -> Result<usize, Error> {
        self.filename = Some(path);
        self.select_language();
        self.save()
    }

    /// Name (or rename) the buffer without touching disk.
    pub(crate) fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
        self.select_language();
    }

    // -- Language selection -------------------------------------------------

    /// Match the filename against the language database and re-highlight
    /// every row under the result (which may be no language at all).
    pub fn select_language(&mut self) {
        self.language = self
            .filename
            .as_deref()
            .and_then(Path::to_str)
            .and_then(language::detect);
        debug!(language = self.language_name().unwrap_or("none"), "selected language");
        self.rehighlight_all();
    }

    // -- Highlighting -------------------------------------------------------

    /// Re-highlight one row. Returns whether its `open_comment` changed.
    fn rehighlight_row(&mut self, at: usize) -> bool {
        let prev_open = at > 0 && self.rows[at - 1].open_comment();
        let row = &mut self.rows[at];
        let (hl, open) = match self.language {
            Some(lang) => scan_line(row.render(), lang, prev_open),
            None => (vec![Highlight::Normal; row.render_len()], false),
        };
        let changed = row.open_comment() != open;
        row.set_hl(hl);
        row.set_open_comment(open);
        changed
    }

    /// Re-highlight row `at`, cascading downward while the comment state
    /// keeps changing. Work-list loop: worst case O(rows), paid only when
    /// a multi-line comment boundary actually moved.
    fn rehighlight_from(&mut self, at: usize) {
        let mut idx = at;
        while idx < self.rows.len() {
            let changed = self.rehighlight_row(idx);
            if !changed {
                break;
            }
            idx += 1;
        }
    }

    /// Re-highlight every row in file order (load, language switch).
    fn rehighlight_all(&mut self) {
        for idx in 0..self.rows.len() {
            self.rehighlight_row(idx);
        }
    }

    fn reindex_from(&mut self, at: usize) {
        for idx in at.min(self.rows.len())..self.rows.len() {
            self.rows[idx].set_idx(idx);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
