//! # tyro-syntax — highlight classes and language rules
//!
//! The data side of syntax highlighting, kept apart from the scanner that
//! consumes it:
//!
//! - **[`Highlight`]** — the per-byte highlight class and its fixed ANSI
//!   foreground color mapping
//! - **[`is_separator`]** — the token-boundary predicate shared by number
//!   and keyword highlighting
//! - **[`language`]** — the `Language` descriptor, the built-in database
//!   (C, Fortran, Python), and filename matching
//!
//! Everything here is static and immutable. The editor core decides *when*
//! to highlight; this crate only says *what the rules are*.

pub mod language;

pub use language::{Language, LANGUAGES};

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Highlight class
// ---------------------------------------------------------------------------

/// Highlight class of a single rendered byte.
///
/// Every byte of a row's rendered text carries exactly one of these. The
/// renderer turns runs of equal classes into a single color escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    /// Plain text — drawn in the default foreground.
    #[default]
    Normal,
    /// A single-line comment, from its delimiter to end of line.
    Comment,
    /// Text inside a multi-line comment, delimiters included.
    MultilineComment,
    /// A flow/structure keyword (`if`, `while`, `return`, ...).
    Keyword1,
    /// A type-like keyword (`int`, `char`, `float`, ...).
    Keyword2,
    /// A string literal, quotes and escapes included.
    String,
    /// A numeric literal.
    Number,
    /// The span of the current search match.
    Match,
    /// A preprocessor line, from its delimiter to end of line.
    Preprocessor,
}

impl Highlight {
    /// The ANSI foreground color code (SGR 30–37 range) for this class.
    ///
    /// The mapping is fixed: preprocessor and numbers red, search matches
    /// blue, strings magenta, comments green, keywords yellow, type
    /// keywords cyan, everything else white.
    #[must_use]
    pub const fn ansi_color(self) -> u8 {
        match self {
            Self::Preprocessor | Self::Number => 31,
            Self::Match => 34,
            Self::String => 35,
            Self::Comment | Self::MultilineComment => 32,
            Self::Keyword1 => 33,
            Self::Keyword2 => 36,
            Self::Normal => 37,
        }
    }
}

// ---------------------------------------------------------------------------
// Separators
// ---------------------------------------------------------------------------

/// Punctuation bytes that end a token, in addition to whitespace and NUL.
const SEPARATOR_PUNCT: &[u8] = b",.()+-/*=~%<>[];";

/// True if `byte` separates tokens.
///
/// Numbers are only highlighted after a separator (so `x5` stays plain) and
/// keywords must be bounded by separators on both sides (so `format` does
/// not light up inside `reformat`).
#[must_use]
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\0' || SEPARATOR_PUNCT.contains(&byte)
}

// ---------------------------------------------------------------------------
// Language feature flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Which optional highlight features a language enables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LangFlags: u8 {
        /// Highlight numeric literals.
        const NUMBERS = 0b0000_0001;
        /// Highlight string literals.
        const STRINGS = 0b0000_0010;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
