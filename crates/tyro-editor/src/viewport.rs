//! Viewport — cursor, scroll offsets, and the visible window.
//!
//! The cursor lives in raw-byte coordinates (`cx`, `cy`); the screen deals
//! in rendered columns. `scroll` derives `rx` from `cx` through the row's
//! tab arithmetic and then drags the scroll offsets the minimum distance
//! needed to keep the cursor inside the window — up/left pulls, down/right
//! pushes, one axis at a time.
//!
//! The text area excludes the two reserved bar rows (status + message);
//! [`resize`](Viewport::resize) re-derives it whenever the terminal
//! changes size.
//!
//! The cursor may sit on the line *after* the last row (`cy == doc.len()`)
//! — that is where typing appends a new row to the file.

use tyro_syntax::Highlight;
use tyro_term::terminal::Size;

use crate::document::Document;

/// Screen rows reserved for the status and message bars.
pub const BAR_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// A cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What one screen row shows: a slice of a document row, or filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleRow<'a> {
    /// The rendered bytes and highlight classes inside the window.
    Text {
        render: &'a [u8],
        hl: &'a [Highlight],
    },
    /// Past the end of the document; the renderer draws its filler glyph.
    Filler,
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Cursor position, scroll offsets, and the text-area dimensions.
#[derive(Debug, Clone)]
pub struct Viewport {
    cx: usize,
    cy: usize,
    rx: usize,
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
}

impl Viewport {
    /// Create a viewport for a terminal of `size`, reserving the bar rows.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            cx: 0,
            cy: 0,
            rx: 0,
            row_offset: 0,
            col_offset: 0,
            rows: (size.rows as usize).saturating_sub(BAR_ROWS),
            cols: size.cols as usize,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Cursor column in raw bytes.
    #[inline]
    #[must_use]
    pub const fn cx(&self) -> usize {
        self.cx
    }

    /// Cursor row in the document.
    #[inline]
    #[must_use]
    pub const fn cy(&self) -> usize {
        self.cy
    }

    /// Cursor column in rendered bytes (valid after [`scroll`](Self::scroll)).
    #[inline]
    #[must_use]
    pub const fn rx(&self) -> usize {
        self.rx
    }

    /// First visible document row.
    #[inline]
    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible rendered column.
    #[inline]
    #[must_use]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Text-area height in rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Text-area width in columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) const fn set_cursor(&mut self, cx: usize, cy: usize) {
        self.cx = cx;
        self.cy = cy;
    }

    pub(crate) const fn set_row_offset(&mut self, offset: usize) {
        self.row_offset = offset;
    }

    pub(crate) const fn set_col_offset(&mut self, offset: usize) {
        self.col_offset = offset;
    }

    // -- Geometry -----------------------------------------------------------

    /// Record a new terminal size and clamp the cursor back into the
    /// document.
    pub fn resize(&mut self, size: Size, doc: &Document) {
        self.rows = (size.rows as usize).saturating_sub(BAR_ROWS);
        self.cols = size.cols as usize;
        self.cy = self.cy.min(doc.len());
        self.snap_to_line(doc);
    }

    // -- Scrolling ----------------------------------------------------------

    /// Recompute `rx` and drag the offsets so the cursor is visible.
    pub fn scroll(&mut self, doc: &Document) {
        self.rx = doc.row(self.cy).map_or(0, |row| row.cx_to_rx(self.cx));

        if self.rows == 0 || self.cols == 0 {
            return;
        }

        if self.cy < self.row_offset {
            self.row_offset = self.cy;
        }
        if self.cy >= self.row_offset + self.rows {
            self.row_offset = self.cy - self.rows + 1;
        }
        if self.rx < self.col_offset {
            self.col_offset = self.rx;
        }
        if self.rx >= self.col_offset + self.cols {
            self.col_offset = self.rx - self.cols + 1;
        }
    }

    /// What each screen row currently shows, already clipped to the
    /// window.
    #[must_use]
    pub fn visible_slice<'a>(&self, doc: &'a Document) -> Vec<VisibleRow<'a>> {
        (0..self.rows)
            .map(|y| {
                let file_row = self.row_offset + y;
                doc.row(file_row).map_or(VisibleRow::Filler, |row| {
                    let start = self.col_offset.min(row.render_len());
                    let end = (self.col_offset + self.cols).min(row.render_len());
                    VisibleRow::Text {
                        render: &row.render()[start..end],
                        hl: &row.hl()[start..end],
                    }
                })
            })
            .collect()
    }

    // -- Cursor movement ----------------------------------------------------

    /// Move the cursor one step, wrapping at line ends and snapping to the
    /// end of shorter lines.
    pub fn move_cursor(&mut self, dir: Direction, doc: &Document) {
        let line_len = |cy: usize| doc.row(cy).map_or(0, crate::row::Row::len);

        match dir {
            Direction::Up => {
                if self.cy > 0 {
                    self.cy -= 1;
                }
            }
            Direction::Down => {
                if self.cy < doc.len() {
                    self.cy += 1;
                }
            }
            Direction::Right => {
                if self.cy < doc.len() {
                    if self.cx < line_len(self.cy) {
                        self.cx += 1;
                    } else {
                        // Wrap to the start of the next line.
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Direction::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    // Wrap to the end of the previous line.
                    self.cy -= 1;
                    self.cx = line_len(self.cy);
                }
            }
        }

        self.snap_to_line(doc);
    }

    /// Home: column 0.
    pub const fn line_home(&mut self) {
        self.cx = 0;
    }

    /// End: past the last byte of the current line.
    pub fn line_end(&mut self, doc: &Document) {
        self.cx = doc.row(self.cy).map_or(0, crate::row::Row::len);
    }

    /// Page up: jump to the window top, then move up a full window.
    pub fn page_up(&mut self, doc: &Document) {
        self.cy = self.row_offset;
        for _ in 0..self.rows {
            self.move_cursor(Direction::Up, doc);
        }
    }

    /// Page down: jump to the window bottom, then move down a full window.
    pub fn page_down(&mut self, doc: &Document) {
        self.cy = (self.row_offset + self.rows.saturating_sub(1)).min(doc.len());
        for _ in 0..self.rows {
            self.move_cursor(Direction::Down, doc);
        }
    }

    /// Snap the cursor to the end of a shorter line after vertical moves.
    fn snap_to_line(&mut self, doc: &Document) {
        let len = doc.row(self.cy).map_or(0, crate::row::Row::len);
        if self.cx > len {
            self.cx = len;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
