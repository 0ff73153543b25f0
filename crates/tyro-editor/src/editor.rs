//! Editor — the single owned session aggregate.
//!
//! One struct holds everything the session needs: the document, the
//! viewport, the status message, the active prompt (if any), and the quit
//! countdown. No globals — every operation takes the aggregate by
//! reference, and the run loop in the binary owns the one instance.
//!
//! Key dispatch is a flat match: editing keys mutate the document through
//! the cursor, navigation keys move the viewport, Ctrl-chords trigger
//! save/search/quit. While a prompt is active every key is routed to it
//! instead — prompts are modal state on the aggregate, not a nested input
//! loop, which keeps the whole key path synchronous and testable.
//!
//! The prompt carries a [`PromptKind`] tag (save-as or search) rather than
//! a callback; the search variant owns its [`SearchState`] so the
//! incremental machinery lives exactly as long as the prompt does.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use tyro_term::terminal::{Size, Terminal};
use tyro_term::{Key, OutputBuffer};

use crate::document::Document;
use crate::render::render_frame;
use crate::search::{SearchKey, SearchState};
use crate::viewport::{Direction, Viewport};

/// Ctrl-Q presses required to abandon unsaved changes.
pub const QUIT_TIMES: u32 = 2;

/// How long a status message stays on the message bar.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Startup help line.
const HELP: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

// ---------------------------------------------------------------------------
// Session types
// ---------------------------------------------------------------------------

/// What the run loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep running.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Why the status-bar prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Ctrl-S on an unnamed buffer: collect a filename.
    SaveAs,
    /// Ctrl-F: incremental search.
    Search,
}

/// An active status-bar prompt.
struct Prompt {
    kind: PromptKind,
    input: String,
    /// Present for search prompts only.
    search: Option<SearchState>,
}

/// A message bar entry with its wall-clock birth time.
struct StatusMessage {
    text: String,
    time: Instant,
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The complete editor session state.
pub struct Editor {
    doc: Document,
    view: Viewport,
    status: Option<StatusMessage>,
    prompt: Option<Prompt>,
    quit_times: u32,
    frame: OutputBuffer,
}

impl Editor {
    // -- Construction -------------------------------------------------------

    /// Start with an empty, unnamed buffer.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let mut editor = Self {
            doc: Document::new(),
            view: Viewport::new(size),
            status: None,
            prompt: None,
            quit_times: QUIT_TIMES,
            frame: OutputBuffer::new(),
        };
        editor.set_status(HELP.to_string());
        editor
    }

    /// Start with a file.
    ///
    /// A file that cannot be read is a message-bar report, not a fatal
    /// error: the session continues with an empty unnamed buffer.
    #[must_use]
    pub fn open(size: Size, path: PathBuf) -> Self {
        let mut editor = Self::new(size);
        match Document::open(path) {
            Ok(doc) => editor.doc = doc,
            Err(err) => {
                warn!(%err, "open failed");
                editor.set_status(err.to_string());
            }
        }
        editor
    }

    // -- Access (primarily for the binary and tests) ------------------------

    /// The document being edited.
    #[inline]
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    /// The viewport (cursor and scroll state).
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.view
    }

    /// The current message-bar text, if it has not expired.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|msg| msg.time.elapsed() < MESSAGE_TIMEOUT)
            .map(|msg| msg.text.as_str())
    }

    /// Put a message on the message bar (5-second lifetime).
    pub fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            time: Instant::now(),
        });
    }

    // -- Rendering ----------------------------------------------------------

    /// Compose one frame into `out`.
    ///
    /// # Errors
    ///
    /// Never fails in practice (the buffer is memory-backed); the
    /// signature propagates writer errors all the same.
    pub fn render(&mut self, out: &mut OutputBuffer) -> io::Result<()> {
        self.view.scroll(&self.doc);
        let message = self
            .status
            .as_ref()
            .filter(|msg| msg.time.elapsed() < MESSAGE_TIMEOUT)
            .map(|msg| msg.text.clone());
        render_frame(&self.doc, &self.view, message.as_deref(), out)
    }

    /// Render and flush one frame to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails — fatal for the caller.
    pub fn refresh(&mut self, term: &mut Terminal) -> io::Result<()> {
        let mut frame = std::mem::take(&mut self.frame);
        frame.clear();
        let result = self
            .render(&mut frame)
            .and_then(|()| term.write_frame(&mut frame));
        self.frame = frame;
        result
    }

    /// Pick up a terminal resize: clamp the cursor, recompute the bars.
    pub fn resize(&mut self, size: Size) {
        debug!(cols = size.cols, rows = size.rows, "resize");
        self.view.resize(size, &self.doc);
    }

    // -- Key dispatch -------------------------------------------------------

    /// Handle one decoded key press.
    pub fn process_key(&mut self, key: Key) -> ControlFlow {
        if self.prompt.is_some() {
            self.prompt_key(key);
            return ControlFlow::Continue;
        }

        match key {
            Key::Enter => self.insert_newline(),
            Key::Ctrl(b'q') => {
                if self.doc.is_modified() && self.quit_times > 0 {
                    self.set_status(format!(
                        "File has unsaved changes, press Ctrl-Q {} more times to quit without saving",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return ControlFlow::Continue;
                }
                debug!("quit");
                return ControlFlow::Quit;
            }
            Key::Ctrl(b's') => self.save(),
            Key::Ctrl(b'f') => self.begin_search(),
            Key::Home => self.view.line_home(),
            Key::End => self.view.line_end(&self.doc),
            Key::PageUp => self.view.page_up(&self.doc),
            Key::PageDown => self.view.page_down(&self.doc),
            Key::ArrowUp => self.view.move_cursor(Direction::Up, &self.doc),
            Key::ArrowDown => self.view.move_cursor(Direction::Down, &self.doc),
            Key::ArrowLeft => self.view.move_cursor(Direction::Left, &self.doc),
            Key::ArrowRight => self.view.move_cursor(Direction::Right, &self.doc),
            Key::Backspace | Key::Ctrl(b'h') => self.delete_char(),
            Key::Delete => {
                self.view.move_cursor(Direction::Right, &self.doc);
                self.delete_char();
            }
            // Screen refresh is implicit (full redraw every frame); Escape
            // alone does nothing.
            Key::Ctrl(b'l') | Key::Escape => {}
            Key::Char(byte) => self.insert_char(byte),
            // Unhandled Ctrl chords insert their raw control byte; the
            // renderer shows it reverse-video.
            Key::Ctrl(letter) => self.insert_char(Key::ctrl_byte(letter)),
        }

        self.quit_times = QUIT_TIMES;
        ControlFlow::Continue
    }

    // -- Editing ------------------------------------------------------------

    fn insert_char(&mut self, byte: u8) {
        if self.view.cy() == self.doc.len() {
            self.doc.insert_row(self.doc.len(), Vec::new());
        }
        self.doc.insert_byte(self.view.cy(), self.view.cx(), byte);
        self.view.set_cursor(self.view.cx() + 1, self.view.cy());
    }

    fn insert_newline(&mut self) {
        if self.view.cx() == 0 {
            self.doc.insert_row(self.view.cy(), Vec::new());
        } else {
            self.doc.split_row(self.view.cy(), self.view.cx());
        }
        self.view.set_cursor(0, self.view.cy() + 1);
    }

    fn delete_char(&mut self) {
        let (cx, cy) = (self.view.cx(), self.view.cy());
        if cy == self.doc.len() {
            return;
        }
        if cx == 0 && cy == 0 {
            return;
        }

        if cx > 0 {
            self.doc.delete_byte(cy, cx - 1);
            self.view.set_cursor(cx - 1, cy);
        } else if let Some(col) = self.doc.merge_row_into_previous(cy) {
            self.view.set_cursor(col, cy - 1);
        }
    }

    // -- Saving -------------------------------------------------------------

    fn save(&mut self) {
        if self.doc.filename().is_none() {
            self.prompt = Some(Prompt {
                kind: PromptKind::SaveAs,
                input: String::new(),
                search: None,
            });
            self.show_prompt_message();
            return;
        }
        self.do_save();
    }

    fn do_save(&mut self) {
        match self.doc.save() {
            Ok(bytes) => self.set_status(format!("{bytes} bytes written to disk")),
            Err(err) => {
                warn!(%err, "save failed");
                self.set_status(format!("Can't save! {err}"));
            }
        }
    }

    // -- Prompts ------------------------------------------------------------

    fn begin_search(&mut self) {
        self.prompt = Some(Prompt {
            kind: PromptKind::Search,
            input: String::new(),
            search: Some(SearchState::begin(&self.view)),
        });
        self.show_prompt_message();
    }

    /// Route a key to the active prompt.
    fn prompt_key(&mut self, key: Key) {
        let mut prompt = self.prompt.take().expect("prompt_key without a prompt");

        match key {
            Key::Escape => {
                if let Some(search) = prompt.search.as_mut() {
                    search.step(&mut self.doc, &mut self.view, prompt.input.as_bytes(), SearchKey::Cancel);
                    search.restore_position(&mut self.view);
                    self.status = None;
                } else {
                    self.set_status("Save aborted".to_string());
                }
                return;
            }
            Key::Enter => {
                if prompt.input.is_empty() {
                    // Nothing to commit yet; keep prompting.
                    self.prompt = Some(prompt);
                    self.show_prompt_message();
                    return;
                }
                self.status = None;
                match prompt.kind {
                    PromptKind::SaveAs => {
                        match self.doc.save_as(PathBuf::from(&prompt.input)) {
                            Ok(bytes) => {
                                self.set_status(format!("{bytes} bytes written to disk"));
                            }
                            Err(err) => {
                                warn!(%err, "save failed");
                                self.set_status(format!("Can't save! {err}"));
                            }
                        }
                    }
                    PromptKind::Search => {
                        if let Some(search) = prompt.search.as_mut() {
                            search.step(
                                &mut self.doc,
                                &mut self.view,
                                prompt.input.as_bytes(),
                                SearchKey::Commit,
                            );
                        }
                    }
                }
                return;
            }
            Key::Backspace | Key::Ctrl(b'h') | Key::Delete => {
                prompt.input.pop();
                self.search_step(&mut prompt, SearchKey::Edited);
            }
            Key::ArrowRight | Key::ArrowDown => self.search_step(&mut prompt, SearchKey::Next),
            Key::ArrowLeft | Key::ArrowUp => self.search_step(&mut prompt, SearchKey::Prev),
            Key::Char(byte) if byte.is_ascii() && !byte.is_ascii_control() => {
                prompt.input.push(char::from(byte));
                self.search_step(&mut prompt, SearchKey::Edited);
            }
            _ => {}
        }

        self.prompt = Some(prompt);
        self.show_prompt_message();
    }

    fn search_step(&mut self, prompt: &mut Prompt, key: SearchKey) {
        if let Some(search) = prompt.search.as_mut() {
            search.step(&mut self.doc, &mut self.view, prompt.input.as_bytes(), key);
        }
    }

    /// Surface the prompt through the status message so the message bar
    /// renders it with no special casing.
    fn show_prompt_message(&mut self) {
        let Some(prompt) = self.prompt.as_ref() else {
            return;
        };
        let text = match prompt.kind {
            PromptKind::SaveAs => format!("Save as: {} (ESC to cancel)", prompt.input),
            PromptKind::Search => {
                format!("Search: {} (ESC to cancel | Arrows to search)", prompt.input)
            }
        };
        self.set_status(text);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tyro_syntax::Highlight;

    const SIZE: Size = Size { cols: 40, rows: 12 };

    fn editor_with(text: &str) -> Editor {
        let mut e = Editor::new(SIZE);
        e.doc = Document::from_bytes(text.as_bytes());
        e
    }

    fn feed(e: &mut Editor, keys: &[Key]) -> ControlFlow {
        let mut flow = ControlFlow::Continue;
        for &key in keys {
            flow = e.process_key(key);
        }
        flow
    }

    fn contents(e: &Editor) -> String {
        String::from_utf8(e.document().to_bytes()).unwrap()
    }

    fn chars(text: &str) -> Vec<Key> {
        text.bytes().map(Key::Char).collect()
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_editor_shows_help() {
        let e = Editor::new(SIZE);
        assert_eq!(e.message(), Some(HELP));
    }

    #[test]
    fn open_missing_file_is_recoverable() {
        let e = Editor::open(SIZE, PathBuf::from("/nonexistent/x.c"));
        assert!(e.document().is_empty());
        assert!(e.document().filename().is_none());
        assert!(e.message().unwrap().contains("can't open"));
    }

    #[test]
    fn open_existing_file_loads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "content\n").unwrap();

        let e = Editor::open(SIZE, path);
        assert_eq!(e.document().len(), 1);
        assert_eq!(e.message(), Some(HELP));
    }

    // -- Typing -------------------------------------------------------------

    #[test]
    fn typing_into_empty_buffer_creates_a_row() {
        let mut e = Editor::new(SIZE);
        feed(&mut e, &chars("hi"));
        assert_eq!(contents(&e), "hi\n");
        assert_eq!(e.viewport().cx(), 2);
        assert!(e.document().is_modified());
    }

    #[test]
    fn enter_splits_line_at_cursor() {
        let mut e = editor_with("helloworld");
        for _ in 0..5 {
            e.process_key(Key::ArrowRight);
        }
        e.process_key(Key::Enter);
        assert_eq!(contents(&e), "hello\nworld\n");
        assert_eq!((e.viewport().cx(), e.viewport().cy()), (0, 1));
    }

    #[test]
    fn enter_at_column_zero_inserts_empty_row_above() {
        let mut e = editor_with("text");
        e.process_key(Key::Enter);
        assert_eq!(contents(&e), "\ntext\n");
        assert_eq!(e.viewport().cy(), 1);
    }

    #[test]
    fn backspace_deletes_before_cursor() {
        let mut e = editor_with("abc");
        e.process_key(Key::End);
        e.process_key(Key::Backspace);
        assert_eq!(contents(&e), "ab\n");
        assert_eq!(e.viewport().cx(), 2);
    }

    #[test]
    fn backspace_at_column_zero_merges_lines() {
        let mut e = editor_with("ab\ncd");
        e.process_key(Key::ArrowDown);
        e.process_key(Key::Backspace);
        assert_eq!(contents(&e), "abcd\n");
        assert_eq!((e.viewport().cx(), e.viewport().cy()), (2, 0));
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut e = editor_with("ab");
        e.process_key(Key::Backspace);
        assert_eq!(contents(&e), "ab\n");
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut e = editor_with("abc");
        e.process_key(Key::Delete);
        assert_eq!(contents(&e), "bc\n");
        assert_eq!(e.viewport().cx(), 0);
    }

    #[test]
    fn delete_at_line_end_joins_next_line() {
        let mut e = editor_with("ab\ncd");
        e.process_key(Key::End);
        e.process_key(Key::Delete);
        assert_eq!(contents(&e), "abcd\n");
    }

    #[test]
    fn ctrl_h_acts_as_backspace() {
        let mut e = editor_with("xy");
        e.process_key(Key::End);
        e.process_key(Key::Ctrl(b'h'));
        assert_eq!(contents(&e), "x\n");
    }

    #[test]
    fn unhandled_ctrl_inserts_control_byte() {
        let mut e = Editor::new(SIZE);
        e.process_key(Key::Ctrl(b'a'));
        assert_eq!(e.document().row(0).unwrap().raw(), &[0x01]);
    }

    #[test]
    fn escape_and_ctrl_l_are_ignored() {
        let mut e = editor_with("abc");
        e.process_key(Key::Escape);
        e.process_key(Key::Ctrl(b'l'));
        assert_eq!(contents(&e), "abc\n");
        assert!(!e.document().is_modified());
    }

    #[test]
    fn tab_inserts_literally() {
        let mut e = Editor::new(SIZE);
        e.process_key(Key::Char(b'\t'));
        assert_eq!(e.document().row(0).unwrap().raw(), b"\t");
        assert_eq!(e.document().row(0).unwrap().render_len(), 8);
    }

    // -- Quit guard ---------------------------------------------------------

    #[test]
    fn clean_buffer_quits_immediately() {
        let mut e = editor_with("saved");
        assert_eq!(e.process_key(Key::Ctrl(b'q')), ControlFlow::Quit);
    }

    #[test]
    fn dirty_buffer_needs_three_ctrl_q() {
        let mut e = editor_with("x");
        feed(&mut e, &chars("!"));

        assert_eq!(e.process_key(Key::Ctrl(b'q')), ControlFlow::Continue);
        assert!(e.message().unwrap().contains("2 more times"));
        assert_eq!(e.process_key(Key::Ctrl(b'q')), ControlFlow::Continue);
        assert!(e.message().unwrap().contains("1 more times"));
        assert_eq!(e.process_key(Key::Ctrl(b'q')), ControlFlow::Quit);
    }

    #[test]
    fn any_other_key_resets_quit_countdown() {
        let mut e = editor_with("x");
        feed(&mut e, &chars("!"));

        assert_eq!(e.process_key(Key::Ctrl(b'q')), ControlFlow::Continue);
        e.process_key(Key::ArrowRight);
        // Countdown starts over.
        assert_eq!(e.process_key(Key::Ctrl(b'q')), ControlFlow::Continue);
        assert!(e.message().unwrap().contains("2 more times"));
    }

    // -- Saving -------------------------------------------------------------

    #[test]
    fn save_writes_file_and_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old\n").unwrap();

        let mut e = Editor::open(SIZE, path.clone());
        feed(&mut e, &chars("x"));
        e.process_key(Key::Ctrl(b's'));

        assert_eq!(std::fs::read(&path).unwrap(), b"xold\n");
        assert_eq!(e.message(), Some("5 bytes written to disk"));
        assert!(!e.document().is_modified());
    }

    #[test]
    fn save_unnamed_buffer_prompts_for_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("named.c");

        let mut e = Editor::new(SIZE);
        feed(&mut e, &chars("int x;"));
        e.process_key(Key::Ctrl(b's'));
        assert!(e.message().unwrap().starts_with("Save as:"));

        feed(&mut e, &chars(path.to_str().unwrap()));
        e.process_key(Key::Enter);

        assert!(path.exists());
        assert_eq!(e.document().language_name(), Some("C"));
        assert!(e.message().unwrap().ends_with("bytes written to disk"));
        // Highlighting kicked in with the new name.
        assert_eq!(e.document().row(0).unwrap().hl()[0], Highlight::Keyword2);
    }

    #[test]
    fn save_as_escape_aborts() {
        let mut e = Editor::new(SIZE);
        feed(&mut e, &chars("data"));
        e.process_key(Key::Ctrl(b's'));
        e.process_key(Key::Escape);

        assert_eq!(e.message(), Some("Save aborted"));
        assert!(e.document().filename().is_none());
        assert!(e.document().is_modified());
    }

    #[test]
    fn save_as_enter_on_empty_keeps_prompting() {
        let mut e = Editor::new(SIZE);
        feed(&mut e, &chars("data"));
        e.process_key(Key::Ctrl(b's'));
        e.process_key(Key::Enter);
        assert!(e.message().unwrap().starts_with("Save as:"));
        // Still prompting: typing keeps appending to the name.
        e.process_key(Key::Char(b'f'));
        assert!(e.message().unwrap().contains("Save as: f"));
    }

    #[test]
    fn save_failure_reports_and_stays_dirty() {
        let mut e = Editor::new(SIZE);
        feed(&mut e, &chars("data"));
        e.process_key(Key::Ctrl(b's'));
        feed(&mut e, &chars("/nonexistent/dir/file.txt"));
        e.process_key(Key::Enter);

        assert!(e.message().unwrap().starts_with("Can't save!"));
        assert!(e.document().is_modified());
    }

    // -- Search -------------------------------------------------------------

    #[test]
    fn search_finds_and_commits() {
        let mut e = editor_with("alpha\nbeta\ngamma\n");
        e.process_key(Key::Ctrl(b'f'));
        assert!(e.message().unwrap().starts_with("Search:"));

        feed(&mut e, &chars("gamma"));
        assert_eq!(e.viewport().cy(), 2);

        e.process_key(Key::Enter);
        // Cursor stays on the match; match paint removed.
        assert_eq!(e.viewport().cy(), 2);
        assert!(e
            .document()
            .row(2)
            .unwrap()
            .hl()
            .iter()
            .all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn search_escape_restores_position() {
        let mut e = editor_with("alpha\nbeta\ngamma\n");
        e.process_key(Key::ArrowDown);
        e.process_key(Key::Ctrl(b'f'));
        feed(&mut e, &chars("gamma"));
        assert_eq!(e.viewport().cy(), 2);

        e.process_key(Key::Escape);
        assert_eq!(e.viewport().cy(), 1);
        assert_eq!(e.viewport().cx(), 0);
    }

    #[test]
    fn search_highlights_match_span() {
        let mut e = editor_with("x\nneedle here\n");
        e.process_key(Key::Ctrl(b'f'));
        feed(&mut e, &chars("needle"));

        let hl = e.document().row(1).unwrap().hl();
        assert!(hl[..6].iter().all(|&h| h == Highlight::Match));
        assert_eq!(hl[6], Highlight::Normal);
    }

    #[test]
    fn search_arrows_step_through_matches() {
        let mut e = editor_with("hit\nmiss\nhit\n");
        e.process_key(Key::Ctrl(b'f'));
        feed(&mut e, &chars("hit"));
        assert_eq!(e.viewport().cy(), 2);

        e.process_key(Key::ArrowRight);
        assert_eq!(e.viewport().cy(), 0);
        e.process_key(Key::ArrowLeft);
        assert_eq!(e.viewport().cy(), 2);
    }

    #[test]
    fn search_backspace_retries_shorter_query() {
        let mut e = editor_with("ab\nabc\n");
        e.process_key(Key::Ctrl(b'f'));
        feed(&mut e, &chars("abc"));
        assert_eq!(e.viewport().cy(), 1);

        e.process_key(Key::Backspace);
        assert!(e.message().unwrap().contains("Search: ab "));
    }

    #[test]
    fn prompt_swallows_editing_keys() {
        let mut e = editor_with("text\n");
        e.process_key(Key::Ctrl(b'f'));
        e.process_key(Key::Char(b'q'));
        e.process_key(Key::Escape);
        // The typed 'q' went to the query, not the document.
        assert_eq!(contents(&e), "text\n");
    }

    // -- Messages -----------------------------------------------------------

    #[test]
    fn message_expires_after_timeout() {
        let mut e = Editor::new(SIZE);
        e.set_status("short-lived".to_string());
        assert!(e.message().is_some());

        e.status.as_mut().unwrap().time = Instant::now() - Duration::from_secs(6);
        assert_eq!(e.message(), None);
    }

    // -- Rendering and resize -----------------------------------------------

    #[test]
    fn render_produces_a_frame() {
        let mut e = Editor::new(Size { cols: 80, rows: 24 });
        e.doc = Document::from_bytes(b"hello\n");
        let mut out = OutputBuffer::new();
        e.render(&mut out).unwrap();
        let s = String::from_utf8(out.as_bytes().to_vec()).unwrap();
        assert!(s.contains("hello"));
        assert!(s.contains(HELP));
    }

    #[test]
    fn resize_clamps_cursor_into_bounds() {
        let mut e = editor_with("one\ntwo\n");
        e.process_key(Key::ArrowDown);
        e.process_key(Key::ArrowDown);
        assert_eq!(e.viewport().cy(), 2);

        e.resize(Size { cols: 20, rows: 6 });
        assert_eq!(e.viewport().rows(), 4);
        assert_eq!(e.viewport().cy(), 2);
    }
}
