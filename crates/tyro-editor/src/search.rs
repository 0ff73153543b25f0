//! Incremental search — find-as-you-type with wrap-around.
//!
//! A [`SearchState`] lives for one prompt session. It remembers where the
//! cursor and scroll were when the session started (Escape restores them),
//! which row last matched (arrow keys continue from there), the scan
//! direction, and the highlight bytes the current match span painted over
//! (restored before every new attempt and on exit).
//!
//! The scan itself walks whole rows in direction order, wrapping at both
//! ends, for at most one full pass — the first row whose rendered text
//! contains the query wins. Matching is against rendered bytes, so the
//! match column converts back to a raw column through the row's tab
//! arithmetic before the cursor moves.
//!
//! With a single matching row, wrap-around means the arrows re-find that
//! same row again — preserved behavior (the bump is useful feedback that
//! there is only one match).

use tyro_syntax::Highlight;

use crate::document::Document;
use crate::viewport::Viewport;

// ---------------------------------------------------------------------------
// Keys that drive a search step
// ---------------------------------------------------------------------------

/// What the prompt layer tells the search controller about a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Enter — accept the current match and end the session.
    Commit,
    /// Escape — end the session; the caller restores the saved position.
    Cancel,
    /// Right/Down arrow — continue forward from the last match.
    Next,
    /// Left/Up arrow — continue backward from the last match.
    Prev,
    /// The query text changed — restart from the cursor, forward.
    Edited,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// State for one incremental search session.
pub struct SearchState {
    /// Row of the previous match; scanning continues from here.
    last_match: Option<usize>,
    /// Scan direction. Reset to forward by anything but an arrow key.
    forward: bool,
    /// Highlight bytes the current match span overwrote: `(row, saved)`.
    saved_hl: Option<(usize, Vec<Highlight>)>,
    // Cursor and scroll at session start, for cancel-restore.
    saved_cx: usize,
    saved_cy: usize,
    saved_row_offset: usize,
    saved_col_offset: usize,
}

impl SearchState {
    /// Open a session, capturing the position to restore on cancel.
    #[must_use]
    pub fn begin(view: &Viewport) -> Self {
        Self {
            last_match: None,
            forward: true,
            saved_hl: None,
            saved_cx: view.cx(),
            saved_cy: view.cy(),
            saved_row_offset: view.row_offset(),
            saved_col_offset: view.col_offset(),
        }
    }

    /// Put the cursor and scroll back where the session started.
    pub(crate) fn restore_position(&self, view: &mut Viewport) {
        view.set_cursor(self.saved_cx, self.saved_cy);
        view.set_row_offset(self.saved_row_offset);
        view.set_col_offset(self.saved_col_offset);
    }

    /// Advance the session by one keystroke.
    ///
    /// Restores the previously painted match span, updates direction
    /// state, and — unless the session is ending — scans for the next
    /// matching row, moves the cursor there, and paints the match span.
    pub fn step(&mut self, doc: &mut Document, view: &mut Viewport, query: &[u8], key: SearchKey) {
        // Un-paint the previous match before anything else.
        if let Some((row_idx, saved)) = self.saved_hl.take() {
            if let Some(row) = doc.row_mut(row_idx) {
                row.set_hl(saved);
            }
        }

        match key {
            SearchKey::Commit | SearchKey::Cancel => {
                self.last_match = None;
                self.forward = true;
                return;
            }
            SearchKey::Next => self.forward = true,
            SearchKey::Prev => self.forward = false,
            SearchKey::Edited => {
                self.last_match = None;
                self.forward = true;
            }
        }

        if doc.is_empty() {
            return;
        }

        let line_count = doc.len();
        let mut current = self
            .last_match
            .unwrap_or_else(|| view.cy().min(line_count - 1));

        for _ in 0..line_count {
            current = if self.forward {
                if current + 1 == line_count { 0 } else { current + 1 }
            } else if current == 0 {
                line_count - 1
            } else {
                current - 1
            };

            let row = &doc.rows()[current];
            if let Some(rx) = find_sub(row.render(), query) {
                self.last_match = Some(current);

                let cx = row.rx_to_cx(rx);
                view.set_cursor(cx, current);
                // Force the next scroll() to re-derive the window with the
                // match at the top.
                view.set_row_offset(line_count);

                let row = doc.row_mut(current).expect("match row exists");
                self.saved_hl = Some((current, row.hl().to_vec()));
                row.paint_hl(rx, query.len(), Highlight::Match);
                break;
            }
        }
    }
}

/// First occurrence of `needle` in `hay`, byte-wise. An empty needle
/// matches at 0, like the C `strstr` this replaces.
fn find_sub(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > hay.len() {
        return None;
    }
    hay.windows(needle.len()).position(|window| window == needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tyro_term::terminal::Size;

    const SIZE: Size = Size { cols: 40, rows: 12 };

    fn fixture(text: &str) -> (Document, Viewport) {
        (Document::from_bytes(text.as_bytes()), Viewport::new(SIZE))
    }

    // -- find_sub -----------------------------------------------------------

    #[test]
    fn find_sub_basic() {
        assert_eq!(find_sub(b"hello world", b"world"), Some(6));
        assert_eq!(find_sub(b"hello", b"xyz"), None);
    }

    #[test]
    fn find_sub_first_occurrence() {
        assert_eq!(find_sub(b"abab", b"ab"), Some(0));
    }

    #[test]
    fn find_sub_empty_needle_matches_at_zero() {
        assert_eq!(find_sub(b"abc", b""), Some(0));
        assert_eq!(find_sub(b"", b""), Some(0));
    }

    #[test]
    fn find_sub_needle_longer_than_hay() {
        assert_eq!(find_sub(b"ab", b"abc"), None);
    }

    // -- One match in a 3-row document --------------------------------------

    #[test]
    fn match_moves_cursor_to_first_occurrence() {
        let (mut doc, mut view) = fixture("bar\nx foo y\nbaz\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.cy(), 1);
        assert_eq!(view.cx(), 2);
    }

    #[test]
    fn forward_arrow_wraps_to_same_single_match() {
        let (mut doc, mut view) = fixture("bar\nx foo y\nbaz\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.cy(), 1);
        // The only match re-finds itself across the wrap.
        search.step(&mut doc, &mut view, b"foo", SearchKey::Next);
        assert_eq!(view.cy(), 1);
    }

    #[test]
    fn match_span_painted_and_restored() {
        let (mut doc, mut view) = fixture("bar\nx foo y\nbaz\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        let hl = doc.row(1).unwrap().hl();
        assert_eq!(hl[2], Highlight::Match);
        assert_eq!(hl[3], Highlight::Match);
        assert_eq!(hl[4], Highlight::Match);
        assert_eq!(hl[1], Highlight::Normal);

        // The next step un-paints before re-painting.
        search.step(&mut doc, &mut view, b"foo", SearchKey::Commit);
        assert!(doc
            .row(1)
            .unwrap()
            .hl()
            .iter()
            .all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn match_column_converts_through_tabs() {
        // "\tfoo": the match starts at rendered column 8, raw column 1.
        let (mut doc, mut view) = fixture("\tfoo\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.cy(), 0);
        assert_eq!(view.cx(), 1);
    }

    #[test]
    fn row_offset_forced_past_end_for_rescroll() {
        let (mut doc, mut view) = fixture("a\nb\nfoo\n");
        let mut search = SearchState::begin(&view);
        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.row_offset(), 3);
        // The next scroll clamps the window onto the match row.
        view.scroll(&doc);
        assert_eq!(view.row_offset(), 2);
    }

    // -- Direction and continuation -----------------------------------------

    #[test]
    fn next_advances_to_later_match() {
        let (mut doc, mut view) = fixture("foo one\nfoo two\nfoo three\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.cy(), 1); // scan starts below the cursor row
        search.step(&mut doc, &mut view, b"foo", SearchKey::Next);
        assert_eq!(view.cy(), 2);
        search.step(&mut doc, &mut view, b"foo", SearchKey::Next);
        assert_eq!(view.cy(), 0); // wrapped
    }

    #[test]
    fn prev_scans_backward_with_wrap() {
        let (mut doc, mut view) = fixture("foo one\nfoo two\nfoo three\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.cy(), 1);
        search.step(&mut doc, &mut view, b"foo", SearchKey::Prev);
        assert_eq!(view.cy(), 0);
        search.step(&mut doc, &mut view, b"foo", SearchKey::Prev);
        assert_eq!(view.cy(), 2); // wrapped backward
    }

    #[test]
    fn edited_query_restarts_from_cursor() {
        let (mut doc, mut view) = fixture("alpha\nbeta\ngamma\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"gamma", SearchKey::Edited);
        assert_eq!(view.cy(), 2);
        // Shrinking the query back restarts scanning from the cursor row.
        search.step(&mut doc, &mut view, b"beta", SearchKey::Edited);
        assert_eq!(view.cy(), 1);
    }

    #[test]
    fn no_match_leaves_cursor_alone() {
        let (mut doc, mut view) = fixture("alpha\nbeta\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"zzz", SearchKey::Edited);
        assert_eq!(view.cy(), 0);
        assert_eq!(view.cx(), 0);
    }

    #[test]
    fn empty_document_is_safe() {
        let (mut doc, mut view) = fixture("");
        let mut search = SearchState::begin(&view);
        search.step(&mut doc, &mut view, b"x", SearchKey::Edited);
        assert_eq!(view.cy(), 0);
    }

    // -- Cancel restore -----------------------------------------------------

    #[test]
    fn cancel_restores_cursor_and_scroll() {
        let (mut doc, mut view) = fixture("a\nb\nc\nd\ne\nf\ng\nh\ni\nj\nk\nfoo\n");
        view.set_cursor(1, 2);
        view.scroll(&doc);
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Edited);
        assert_eq!(view.cy(), 11);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Cancel);
        search.restore_position(&mut view);
        assert_eq!(view.cy(), 2);
        assert_eq!(view.cx(), 1);
        assert_eq!(view.row_offset(), 0);
        assert_eq!(view.col_offset(), 0);
    }

    #[test]
    fn commit_resets_direction_state() {
        let (mut doc, mut view) = fixture("foo\nfoo\n");
        let mut search = SearchState::begin(&view);

        search.step(&mut doc, &mut view, b"foo", SearchKey::Prev);
        search.step(&mut doc, &mut view, b"foo", SearchKey::Commit);
        assert_eq!(search.last_match, None);
        assert!(search.forward);
    }
}
