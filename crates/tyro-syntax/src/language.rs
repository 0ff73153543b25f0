//! Language descriptors and the built-in database.
//!
//! A [`Language`] is a static bundle of matching patterns and token rules:
//! which filenames it claims, its keyword and type-keyword lists, and the
//! delimiter strings for preprocessor lines and comments. The database
//! ships three entries — C, Fortran, and Python — selected by filename at
//! load time or whenever the file is renamed by a save-as.
//!
//! File patterns starting with a dot match the filename's final extension
//! exactly; any other pattern matches as a plain substring anywhere in the
//! name (so `Makefile`-style patterns are possible even though none of the
//! built-ins use one).

use crate::LangFlags;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A static syntax-rule set for one language.
pub struct Language {
    /// Display name, shown in the status bar.
    pub name: &'static str,
    /// Filename patterns: `.ext` for extension match, anything else for
    /// substring match.
    pub filematch: &'static [&'static str],
    /// Flow/structure keywords (first display class).
    pub keywords: &'static [&'static str],
    /// Type-like keywords (second display class).
    pub types: &'static [&'static str],
    /// Prefix that turns the rest of the line into a preprocessor span.
    pub preprocessor: Option<&'static str>,
    /// Delimiter that turns the rest of the line into a comment.
    pub single_line_comment: Option<&'static str>,
    /// Multi-line comment start/end delimiters.
    pub multiline_comment: Option<(&'static str, &'static str)>,
    /// Legacy fixed-form convention: a lone `c`/`C` in column 0 comments
    /// the whole line.
    pub column_zero_comment: bool,
    /// Which optional highlight features are enabled.
    pub flags: LangFlags,
}

impl Language {
    /// True if `filename` matches one of this language's patterns.
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|dot| &filename[dot..]);
        self.filematch.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                filename.contains(pat)
            }
        })
    }
}

/// Select the language for a filename, or `None` when nothing matches.
#[must_use]
pub fn detect(filename: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.matches(filename))
}

// ---------------------------------------------------------------------------
// Built-in database
// ---------------------------------------------------------------------------

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else",
    "struct", "union", "typedef", "static", "enum", "class", "case",
    "default",
];

const C_TYPES: &[&str] = &[
    "int", "long", "double", "float", "char", "unsigned", "signed", "void",
    "NULL",
];

const FORTRAN_KEYWORDS: &[&str] = &[
    "assign", "backspace", "block", "data", "call", "close", "common",
    "continue", "dimension", "do", "else", "if", "end", "endfile", "endif",
    "entry", "equivalence", "external", "format", "function", "goto",
    "implicit", "inquire", "intrinsic", "open", "parameter", "pause",
    "print", "program", "read", "return", "rewind", "rewrite", "save",
    "stop", "subroutine", "then", "write", "allocatable", "allocate",
    "case", "contains", "cycle", "deallocate", "elsewhere", "exit",
    "include", "interface", "intent", "module", "namelist", "nullify",
    "only", "operator", "optional", "pointer", "private", "procedure",
    "public", "recursive", "result", "select", "sequence", "target", "use",
    "while", "where", "elemental", "forall", "pure",
    "ASSIGN", "BACKSPACE", "BLOCK", "DATA", "CALL", "CLOSE", "COMMON",
    "CONTINUE", "DIMENSION", "DO", "ELSE", "IF", "END", "ENDFILE", "ENDIF",
    "ENTRY", "EQUIVALENCE", "EXTERNAL", "FORMAT", "FUNCTION", "GOTO",
    "IMPLICIT", "INQUIRE", "INTRINSIC", "OPEN", "PARAMETER", "PAUSE",
    "PRINT", "PROGRAM", "READ", "RETURN", "REWIND", "REWRITE", "SAVE",
    "STOP", "SUBROUTINE", "THEN", "WRITE", "ALLOCATABLE", "ALLOCATE",
    "CASE", "CONTAINS", "CYCLE", "DEALLOCATE", "ELSEWHERE", "EXIT",
    "INCLUDE", "INTERFACE", "INTENT", "MODULE", "NAMELIST", "NULLIFY",
    "ONLY", "OPERATOR", "OPTIONAL", "POINTER", "PRIVATE", "PROCEDURE",
    "PUBLIC", "RECURSIVE", "RESULT", "SELECT", "SEQUENCE", "TARGET", "USE",
    "WHILE", "WHERE", "ELEMENTAL", "FORALL", "PURE",
];

const FORTRAN_TYPES: &[&str] = &[
    "integer", "real", "double precision", "complex", "logical",
    "character",
    "INTEGER", "REAL", "DOUBLE PRECISION", "COMPLEX", "LOGICAL",
    "CHARACTER",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del",
    "elif", "else:", "except", "exec", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "not", "or", "pass", "print",
    "raise", "return", "try", "while", "with", "yield", "async", "await",
    "nonlocal", "range", "xrange", "reduce", "map", "filter", "all", "any",
    "sum", "dir", "abs", "breakpoint", "compile", "delattr", "divmod",
    "format", "eval", "getattr", "hasattr", "hash", "help", "id", "input",
    "isinstance", "issubclass", "len", "locals", "max", "min", "next",
    "open", "pow", "repr", "reversed", "round", "setattr", "slice",
    "sorted", "super", "vars", "zip", "__import__", "reload", "raw_input",
    "execfile", "file", "cmp", "basestring",
];

const PYTHON_TYPES: &[&str] = &[
    "buffer", "bytearray", "bytes", "complex", "float", "frozenset", "int",
    "list", "long", "None", "set", "str", "chr", "tuple", "bool", "False",
    "True", "type", "unicode", "dict", "ascii", "bin", "callable",
    "classmethod", "enumerate", "hex", "oct", "ord", "iter", "memoryview",
    "object", "property", "staticmethod", "unichr",
];

/// The built-in language database, checked in order.
pub static LANGUAGES: &[Language] = &[
    Language {
        name: "C",
        filematch: &[".c", ".h", ".cpp", ".hpp"],
        keywords: C_KEYWORDS,
        types: C_TYPES,
        preprocessor: Some("#"),
        single_line_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        column_zero_comment: false,
        flags: LangFlags::NUMBERS.union(LangFlags::STRINGS),
    },
    Language {
        name: "FORTRAN",
        filematch: &[".f", ".f90", ".f95"],
        keywords: FORTRAN_KEYWORDS,
        types: FORTRAN_TYPES,
        preprocessor: Some("!"),
        single_line_comment: Some("!"),
        multiline_comment: None,
        column_zero_comment: true,
        flags: LangFlags::NUMBERS.union(LangFlags::STRINGS),
    },
    Language {
        name: "PY",
        filematch: &[".py"],
        keywords: PYTHON_KEYWORDS,
        types: PYTHON_TYPES,
        preprocessor: None,
        single_line_comment: Some("#"),
        multiline_comment: Some(("\"\"\"", "\"\"\"")),
        column_zero_comment: false,
        flags: LangFlags::NUMBERS.union(LangFlags::STRINGS),
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
