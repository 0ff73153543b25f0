// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, size queries, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, sigaction, and raw fd reads and
// writes. These are the standard POSIX interfaces for terminal control —
// there is no safe alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state. It enters raw mode via termios
// with a bounded read timeout (VMIN=0, VTIME=1), so a read returns every
// tenth of a second even with no input — the editor uses that idle beat to
// expire status messages and pick up resizes. The original attributes are
// restored on drop, and a panic hook writes a restore sequence directly to
// fd 1 so a panic mid-frame never leaves the user's shell in raw mode with
// a hidden cursor.
//
// Terminal size comes from ioctl(TIOCGWINSZ). When that fails (some
// terminals and serial consoles), the fallback pushes the cursor to the
// bottom-right corner and asks the terminal where it ended up via the
// cursor position report.
//
// A SIGWINCH handler sets an AtomicBool and nothing else — the run loop
// consumes the flag with `take_resize` on its next iteration.

use std::io::{self, Write};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::output::OutputBuffer;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── SIGWINCH ───────────────────────────────────────────────────────────────

/// Set by the SIGWINCH handler, consumed by [`Terminal::take_resize`].
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// Install a signal handler for SIGWINCH (terminal resize).
///
/// The handler only sets [`RESIZE_PENDING`] — storing to an atomic is one
/// of the few operations permitted inside a signal handler. All real work
/// (re-querying the size, clamping the cursor, redrawing) happens on the
/// next run-loop iteration.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {
    // No-op on non-unix platforms.
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// The [`Terminal`] struct owns its own copy, but the panic hook can't
/// access it. This global backup — behind a [`Mutex`], not `static mut` —
/// lets the hook restore cooked mode without the struct.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Restore sequence for emergency use: reset SGR attributes, show the
/// cursor. Written before the panic message so the error is readable.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[m\x1b[?25h";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without this, a panic in raw mode leaves the user's terminal broken:
/// no echo, no line editing, an invisible cursor. The hook writes
/// [`EMERGENCY_RESTORE`] directly to fd 1 (bypassing Rust's stdout lock to
/// avoid deadlock if the panic happened mid-flush), restores termios, then
/// delegates to the original panic handler.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// Call [`enter`](Self::enter) to switch to raw mode. The terminal is
/// automatically restored when the handle is dropped — even on panic.
///
/// # Example
///
/// ```no_run
/// use tyro_term::terminal::Terminal;
///
/// let mut term = Terminal::new()?;
/// term.enter()?;
/// // ... render frames, read keys ...
/// // Terminal is restored automatically on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    /// Original termios saved before entering raw mode.
    #[cfg(unix)]
    original_termios: Option<libc::termios>,

    /// Current terminal size (cached, refresh with [`refresh_size`](Self::refresh_size)).
    size: Size,

    /// Whether raw mode is active.
    active: bool,
}

impl Terminal {
    /// Create a terminal handle and query the current size.
    ///
    /// Does **not** enter raw mode — call [`enter`](Self::enter) for that.
    /// Falls back to 80×24 if the terminal size cannot be determined (e.g.,
    /// in tests or piped environments).
    ///
    /// # Errors
    ///
    /// Currently infallible, but returns `Result` for forward compatibility.
    pub fn new() -> io::Result<Self> {
        let size = get_size().unwrap_or(Size { cols: 80, rows: 24 });

        Ok(Self {
            #[cfg(unix)]
            original_termios: None,
            size,
            active: false,
        })
    }

    /// Current terminal size (columns, rows).
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Whether raw mode is currently active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Re-query the terminal size from the OS.
    ///
    /// Call this after a resize notification to pick up the new
    /// dimensions. When `ioctl` fails on a real TTY, falls back to moving
    /// the cursor to the bottom-right corner and reading the cursor
    /// position report. Returns the updated size and caches it internally.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(s) = get_size() {
            self.size = s;
        } else if self.active && is_tty() {
            if let Ok(s) = self.query_size_via_cursor() {
                self.size = s;
            }
        }
        self.size
    }

    /// Consume the pending-resize flag set by the SIGWINCH handler.
    ///
    /// Returns `true` at most once per resize; the caller should follow up
    /// with [`refresh_size`](Self::refresh_size).
    pub fn take_resize(&mut self) -> bool {
        RESIZE_PENDING.swap(false, Ordering::Relaxed)
    }

    /// Enter raw mode.
    ///
    /// Disables echo and line buffering, sets a 0.1-second read timeout
    /// (`VMIN=0, VTIME=1`), installs the panic hook and the SIGWINCH
    /// handler. Idempotent: calling `enter()` while already active is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal attributes cannot be read or set.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        // Install the panic hook (once per process).
        install_panic_hook();
        install_sigwinch_handler();

        // Enable raw mode (no-op if not a TTY).
        self.enable_raw_mode()?;

        self.active = true;
        Ok(())
    }

    /// Leave raw mode and restore the original terminal attributes.
    ///
    /// Idempotent: calling `leave()` while inactive is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        self.disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    /// Read one byte from stdin, waiting at most the raw-mode timeout.
    ///
    /// Returns `Ok(None)` when the bounded wait expired with no input.
    ///
    /// # Errors
    ///
    /// Returns an error on a genuine read failure — the caller treats this
    /// as fatal.
    #[cfg(unix)]
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        let n = unsafe {
            libc::read(
                libc::STDIN_FILENO,
                (&raw mut byte).cast::<libc::c_void>(),
                1,
            )
        };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::WouldBlock {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }

    #[cfg(not(unix))]
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(None)
    }

    /// Flush one complete frame to the terminal in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails — the caller treats this as
    /// fatal.
    pub fn write_frame(&mut self, frame: &mut OutputBuffer) -> io::Result<()> {
        frame.flush_stdout()
    }

    /// Write raw bytes to the terminal immediately (screen clear on exit).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }

    // ── Size fallback (cursor position report) ──────────────────────

    /// Determine the terminal size without ioctl: push the cursor to the
    /// bottom-right corner (CUF/CUD with a huge count are clamped by the
    /// terminal), then ask for the cursor position and parse the
    /// `ESC [ rows ; cols R` report.
    #[cfg(unix)]
    fn query_size_via_cursor(&mut self) -> io::Result<Size> {
        self.write_bytes(b"\x1b[999C\x1b[999B\x1b[6n")?;

        let mut report = Vec::with_capacity(16);
        loop {
            match self.read_byte()? {
                Some(b'R') => break,
                Some(b) => {
                    report.push(b);
                    if report.len() >= 32 {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "unterminated cursor position report",
                        ));
                    }
                }
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "no cursor position report",
                    ));
                }
            }
        }

        parse_cursor_report(&report).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "malformed cursor position report")
        })
    }

    #[cfg(not(unix))]
    fn query_size_via_cursor(&mut self) -> io::Result<Size> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "cursor position query requires a unix terminal",
        ))
    }

    // ── Raw Mode (termios) ──────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if !is_tty() {
            return Ok(());
        }

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            // Save original for restore.
            self.original_termios = Some(termios);

            // Also save to global backup for the panic hook.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            // Disable line processing, echo, signals, and output
            // post-processing.
            termios.c_iflag &=
                !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
            termios.c_cflag |= libc::CS8;

            // VMIN=0, VTIME=1: read() returns after at most a tenth of a
            // second, with or without input. The idle beat drives message
            // expiry and resize pickup.
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 1;

            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            unsafe {
                if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            // Clear the global backup — we've restored successfully.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }

            self.original_termios = None;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

impl crate::key::ByteSource for Terminal {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        self.read_byte()
    }
}

// ─── Cursor report parsing ──────────────────────────────────────────────────

/// Parse the body of a cursor position report: `ESC [ rows ; cols` (the
/// trailing `R` already consumed). Returns `None` on any malformation.
fn parse_cursor_report(report: &[u8]) -> Option<Size> {
    let body = report.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    let rows: u16 = rows.parse().ok()?;
    let cols: u16 = cols.parse().ok()?;
    if rows == 0 || cols == 0 {
        return None;
    }
    Some(Size { cols, rows })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
