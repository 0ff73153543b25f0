// SPDX-License-Identifier: MIT
//
// tyro — a small terminal text editor.
//
// This is the main binary that wires together the crates:
//
//   tyro-term   → raw mode, ANSI output, key decoding
//   tyro-syntax → highlight classes and language rules
//   tyro-editor → document, highlighter, viewport, renderer, search
//
// The run loop is deliberately boring:
//
//   resize? → refresh dimensions and clamp the cursor
//   render  → one full frame, one write
//   read    → bounded-wait key read (0.1 s timeout)
//   dispatch→ editor handles the key, tells us to continue or quit
//
// The bounded read is what keeps a single thread sufficient: with no
// input the loop still turns ten times a second, which is how the
// message bar expires and how a SIGWINCH gets picked up promptly. The
// signal handler itself only sets a flag.
//
// Logging goes to a file, never the terminal — stdout belongs to the
// frame renderer. Set TYRO_LOG (it doubles as the filter, e.g.
// TYRO_LOG=debug) to write tyro.log in the working directory.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use tyro_editor::{ControlFlow, Editor};
use tyro_term::terminal::Terminal;
use tyro_term::{ansi, key};

fn main() {
    let _log_guard = init_logging();

    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(PathBuf::from);

    let mut term = match Terminal::new() {
        Ok(term) => term,
        Err(err) => {
            eprintln!("tyro: failed to initialize terminal: {err}");
            process::exit(1);
        }
    };

    let result = run(&mut term, path);

    // Restore the terminal before reporting anything; process::exit would
    // skip the RAII drop.
    let restored = term.leave();

    if let Err(err) = result {
        eprintln!("tyro: {err:#}");
        process::exit(1);
    }
    if let Err(err) = restored {
        eprintln!("tyro: failed to restore terminal: {err}");
        process::exit(1);
    }
}

/// The editor session: terminal bring-up, the run loop, screen cleanup.
fn run(term: &mut Terminal, path: Option<PathBuf>) -> Result<()> {
    term.enter().context("failed to enter raw mode")?;

    let size = term.refresh_size();
    let mut editor = match path {
        Some(path) => Editor::open(size, path),
        None => Editor::new(size),
    };
    info!(cols = size.cols, rows = size.rows, "session started");

    loop {
        if term.take_resize() {
            let size = term.refresh_size();
            editor.resize(size);
        }

        editor.refresh(term).context("terminal write failed")?;

        match key::read_key(term).context("terminal read failed")? {
            Some(key) => {
                if editor.process_key(key) == ControlFlow::Quit {
                    break;
                }
            }
            // Timeout: loop back around so the message bar can expire and
            // pending resizes get applied.
            None => {}
        }
    }

    // Leave a clean screen behind instead of the last frame.
    let mut goodbye = tyro_term::OutputBuffer::new();
    ansi::clear_screen(&mut goodbye).context("terminal write failed")?;
    ansi::cursor_home(&mut goodbye).context("terminal write failed")?;
    term.write_frame(&mut goodbye)
        .context("terminal write failed")?;

    info!("session ended");
    Ok(())
}

/// File-based logging, enabled by the TYRO_LOG environment variable.
///
/// The returned guard must stay alive for the duration of the process so
/// buffered log lines are flushed on exit.
fn init_logging() -> Option<WorkerGuard> {
    let filter = env::var("TYRO_LOG").ok()?;

    let appender = tracing_appender::rolling::never(".", "tyro.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
