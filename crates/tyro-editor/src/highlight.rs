//! The syntax scanner — one pass, one line, one predecessor bit.
//!
//! [`scan_line`] maps a row's rendered bytes to highlight classes using the
//! language's delimiter and keyword rules. It is a pure function: all the
//! cross-line state it needs is the single `prev_open` flag saying whether
//! the previous row ended inside a multi-line comment, and all it hands
//! back is the same flag for this row. The document layer owns *when* to
//! rescan and how far the comment state cascades; this module only knows
//! the token rules.
//!
//! The scanner works on **rendered** bytes (tabs already expanded) because
//! the classes line up one-to-one with what the renderer draws.
//!
//! Rule order per byte position:
//!
//! 1. preprocessor prefix → rest of line
//! 2. single-line comment delimiter → rest of line (including the legacy
//!    Fortran column-zero `c`/`C` marker)
//! 3. open multi-line comment (closing delimiter exits)
//! 4. multi-line comment start
//! 5. string literals with backslash escapes
//! 6. numeric literals
//! 7. keywords (two classes, separator-bounded)
//! 8. plain text

use tyro_syntax::{is_separator, Highlight, LangFlags, Language};

/// Scan one rendered line, returning its highlight classes and whether a
/// multi-line comment is still open at the end of it.
///
/// The returned vector always has exactly one entry per rendered byte.
#[must_use]
pub fn scan_line(render: &[u8], lang: &Language, prev_open: bool) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];
    let mut i = 0;
    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = prev_open;

    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        // Preprocessor lines claim everything from the delimiter on.
        if let Some(prefix) = lang.preprocessor {
            if in_string.is_none() && !in_comment && render[i..].starts_with(prefix.as_bytes()) {
                fill(&mut hl[i..], Highlight::Preprocessor);
                break;
            }
        }

        // Single-line comments claim the rest of the line.
        if let Some(delim) = lang.single_line_comment {
            if in_string.is_none() && !in_comment && render[i..].starts_with(delim.as_bytes()) {
                fill(&mut hl[i..], Highlight::Comment);
                break;
            }
        }

        // Fixed-form legacy: a `c`/`C` in column 0 comments the whole line.
        if lang.column_zero_comment
            && i == 0
            && in_string.is_none()
            && !in_comment
            && (c == b'c' || c == b'C')
        {
            fill(&mut hl, Highlight::Comment);
            break;
        }

        // Multi-line comments.
        if let Some((start, end)) = lang.multiline_comment {
            if in_string.is_none() {
                if in_comment {
                    hl[i] = Highlight::MultilineComment;
                    if render[i..].starts_with(end.as_bytes()) {
                        fill(&mut hl[i..i + end.len()], Highlight::MultilineComment);
                        i += end.len();
                        in_comment = false;
                        prev_sep = true;
                        continue;
                    }
                    i += 1;
                    continue;
                } else if render[i..].starts_with(start.as_bytes()) {
                    fill(&mut hl[i..i + start.len()], Highlight::MultilineComment);
                    i += start.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        // Strings, with `\x` escape pairs.
        if lang.flags.contains(LangFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        // Numbers: digits after a separator or another number byte, plus
        // `.`/`e` continuing a number (decimals, exponents).
        if lang.flags.contains(LangFlags::NUMBERS) {
            let continues = prev_hl == Highlight::Number;
            if (c.is_ascii_digit() && (prev_sep || continues))
                || ((c == b'.' || c == b'e') && continues)
            {
                hl[i] = Highlight::Number;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        // Keywords: only at a token boundary, and the byte after the match
        // must be a separator too (end of line counts).
        if prev_sep {
            if let Some((len, class)) = match_keyword(&render[i..], lang) {
                fill(&mut hl[i..i + len], class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

/// Match a keyword or type keyword at the start of `suffix`.
///
/// Keywords are scanned in list order, first match wins; a match only
/// counts when the byte following it is a separator (or the line ends).
fn match_keyword(suffix: &[u8], lang: &Language) -> Option<(usize, Highlight)> {
    let bounded = |len: usize| suffix.len() == len || is_separator(suffix[len]);

    for kw in lang.keywords {
        if suffix.starts_with(kw.as_bytes()) && bounded(kw.len()) {
            return Some((kw.len(), Highlight::Keyword1));
        }
    }
    for kw in lang.types {
        if suffix.starts_with(kw.as_bytes()) && bounded(kw.len()) {
            return Some((kw.len(), Highlight::Keyword2));
        }
    }
    None
}

fn fill(slots: &mut [Highlight], class: Highlight) {
    for slot in slots {
        *slot = class;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tyro_syntax::language::detect;

    fn c_lang() -> &'static Language {
        detect("test.c").unwrap()
    }

    fn py_lang() -> &'static Language {
        detect("test.py").unwrap()
    }

    fn fortran_lang() -> &'static Language {
        detect("test.f90").unwrap()
    }

    fn scan(text: &str, lang: &Language) -> Vec<Highlight> {
        scan_line(text.as_bytes(), lang, false).0
    }

    /// Assert that `hl[range]` is uniformly `class`.
    fn assert_span(hl: &[Highlight], start: usize, end: usize, class: Highlight) {
        for (i, &h) in hl.iter().enumerate().take(end).skip(start) {
            assert_eq!(h, class, "byte {i} should be {class:?}");
        }
    }

    // -- Length invariant ---------------------------------------------------

    #[test]
    fn one_class_per_rendered_byte() {
        for text in ["", "x", "int x = 5; // five", "\"unterminated", "/* open"] {
            let (hl, _) = scan_line(text.as_bytes(), c_lang(), false);
            assert_eq!(hl.len(), text.len());
        }
    }

    // -- A full declaration line --------------------------------------------

    #[test]
    fn c_declaration_with_comment() {
        // int x = 5; // five
        let hl = scan("int x = 5; // five", c_lang());
        assert_span(&hl, 0, 3, Highlight::Keyword2); // int
        assert_eq!(hl[4], Highlight::Normal); // x
        assert_eq!(hl[8], Highlight::Number); // 5
        assert_span(&hl, 11, 18, Highlight::Comment); // // five
    }

    // -- Comments -----------------------------------------------------------

    #[test]
    fn single_line_comment_runs_to_eol() {
        let hl = scan("x // rest", c_lang());
        assert_eq!(hl[0], Highlight::Normal);
        assert_span(&hl, 2, 9, Highlight::Comment);
    }

    #[test]
    fn comment_delimiter_inside_string_is_text() {
        let hl = scan("\"a // b\"", c_lang());
        assert_span(&hl, 0, 8, Highlight::String);
    }

    #[test]
    fn multiline_comment_within_line() {
        let (hl, open) = scan_line(b"a /* b */ c", c_lang(), false);
        assert_eq!(hl[0], Highlight::Normal);
        assert_span(&hl, 2, 9, Highlight::MultilineComment);
        assert_eq!(hl[10], Highlight::Normal);
        assert!(!open);
    }

    #[test]
    fn unterminated_multiline_comment_reports_open() {
        let (hl, open) = scan_line(b"x /* open", c_lang(), false);
        assert_span(&hl, 2, 9, Highlight::MultilineComment);
        assert!(open);
    }

    #[test]
    fn open_comment_continues_from_previous_line() {
        let (hl, open) = scan_line(b"still inside", c_lang(), true);
        assert_span(&hl, 0, 12, Highlight::MultilineComment);
        assert!(open);
    }

    #[test]
    fn closing_delimiter_ends_carried_comment() {
        let (hl, open) = scan_line(b"end */ int x;", c_lang(), true);
        assert_span(&hl, 0, 6, Highlight::MultilineComment);
        assert!(!open);
        // `int` after the close highlights normally.
        assert_span(&hl, 7, 10, Highlight::Keyword2);
    }

    #[test]
    fn comment_start_inside_string_ignored() {
        let (_, open) = scan_line(b"\"/*\"", c_lang(), false);
        assert!(!open);
    }

    // -- Preprocessor -------------------------------------------------------

    #[test]
    fn preprocessor_claims_line() {
        let hl = scan("#include <stdio.h>", c_lang());
        assert_span(&hl, 0, 18, Highlight::Preprocessor);
    }

    #[test]
    fn preprocessor_not_inside_comment() {
        let (hl, _) = scan_line(b"x # y", c_lang(), true);
        assert_span(&hl, 0, 5, Highlight::MultilineComment);
    }

    #[test]
    fn fortran_bang_is_preprocessor_class() {
        // Fortran's `!` is both preprocessor and comment delimiter; the
        // preprocessor rule runs first, so that class wins.
        let hl = scan("x = 1 ! note", fortran_lang());
        assert_span(&hl, 6, 12, Highlight::Preprocessor);
    }

    #[test]
    fn fortran_column_zero_comment() {
        let hl = scan("c legacy comment line", fortran_lang());
        assert_span(&hl, 0, hl.len(), Highlight::Comment);
        let hl = scan("C ALSO A COMMENT", fortran_lang());
        assert_span(&hl, 0, hl.len(), Highlight::Comment);
    }

    #[test]
    fn fortran_column_zero_only_applies_at_column_zero() {
        let hl = scan(" call foo()", fortran_lang());
        // Shifted off column 0, `call` is a keyword, not a comment.
        assert_span(&hl, 1, 5, Highlight::Keyword1);
    }

    #[test]
    fn c_has_no_column_zero_rule() {
        let hl = scan("c = 1", c_lang());
        assert_eq!(hl[0], Highlight::Normal);
    }

    // -- Strings ------------------------------------------------------------

    #[test]
    fn double_quoted_string() {
        let hl = scan("x \"hi\" y", c_lang());
        assert_span(&hl, 2, 6, Highlight::String);
        assert_eq!(hl[7], Highlight::Normal);
    }

    #[test]
    fn single_quoted_string() {
        let hl = scan("'a'", c_lang());
        assert_span(&hl, 0, 3, Highlight::String);
    }

    #[test]
    fn quote_kinds_do_not_close_each_other() {
        let hl = scan("\"it's\"", c_lang());
        assert_span(&hl, 0, 6, Highlight::String);
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        let hl = scan(r#""a\"b""#, c_lang());
        assert_span(&hl, 0, 6, Highlight::String);
    }

    #[test]
    fn trailing_backslash_at_eol() {
        let hl = scan("\"ab\\", c_lang());
        assert_span(&hl, 0, 4, Highlight::String);
    }

    #[test]
    fn unterminated_string_does_not_leak_to_next_line() {
        let (_, open) = scan_line(b"\"no close", c_lang(), false);
        // Strings are per-line; only comments carry across.
        assert!(!open);
    }

    // -- Numbers ------------------------------------------------------------

    #[test]
    fn standalone_number() {
        let hl = scan("x = 42;", c_lang());
        assert_eq!(hl[4], Highlight::Number);
        assert_eq!(hl[5], Highlight::Number);
    }

    #[test]
    fn decimal_number() {
        let hl = scan("3.14", c_lang());
        assert_span(&hl, 0, 4, Highlight::Number);
    }

    #[test]
    fn exponent_continues_number() {
        let hl = scan("1e5", c_lang());
        assert_span(&hl, 0, 3, Highlight::Number);
    }

    #[test]
    fn digit_inside_identifier_is_plain() {
        let hl = scan("x5", c_lang());
        assert_eq!(hl[1], Highlight::Normal);
    }

    #[test]
    fn dot_without_number_is_plain() {
        let hl = scan(".5", c_lang());
        assert_eq!(hl[0], Highlight::Normal);
        // After the separator `.`, the digit qualifies.
        assert_eq!(hl[1], Highlight::Number);
    }

    // -- Keywords -----------------------------------------------------------

    #[test]
    fn flow_keyword_first_class() {
        let hl = scan("while (1)", c_lang());
        assert_span(&hl, 0, 5, Highlight::Keyword1);
    }

    #[test]
    fn type_keyword_second_class() {
        let hl = scan("unsigned n;", c_lang());
        assert_span(&hl, 0, 8, Highlight::Keyword2);
    }

    #[test]
    fn keyword_requires_leading_separator() {
        let hl = scan("xif y", c_lang());
        assert_span(&hl, 0, 3, Highlight::Normal);
    }

    #[test]
    fn keyword_requires_trailing_separator() {
        let hl = scan("iffy", c_lang());
        assert_span(&hl, 0, 4, Highlight::Normal);
    }

    #[test]
    fn keyword_at_end_of_line_matches() {
        let hl = scan("return", c_lang());
        assert_span(&hl, 0, 6, Highlight::Keyword1);
    }

    #[test]
    fn keyword_bounded_by_punctuation() {
        let hl = scan("if(x)", c_lang());
        assert_span(&hl, 0, 2, Highlight::Keyword1);
    }

    #[test]
    fn python_else_with_colon() {
        // The Python table carries `else:` as the keyword text.
        let hl = scan("else:", py_lang());
        assert_span(&hl, 0, 5, Highlight::Keyword1);
    }

    // -- Python triple-quote blocks -----------------------------------------

    #[test]
    fn python_docstring_opens_block() {
        let (hl, open) = scan_line(b"\"\"\"doc", py_lang(), false);
        assert_span(&hl, 0, 6, Highlight::MultilineComment);
        assert!(open);
    }

    #[test]
    fn python_docstring_closes_block() {
        let (hl, open) = scan_line(b"end\"\"\"", py_lang(), true);
        assert_span(&hl, 0, 6, Highlight::MultilineComment);
        assert!(!open);
    }

    #[test]
    fn python_hash_comment() {
        let hl = scan("x = 1  # note", py_lang());
        assert_span(&hl, 7, 13, Highlight::Comment);
    }
}
