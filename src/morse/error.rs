// src/morse/error.rs  |  Table errors + per-symbol misses
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Structural problems with a table set. Raised once, when a `MorseData`
/// is built or loaded; never while translating.
#[derive(Debug, Error)]
pub enum MorseError {
    #[error("table '{0}' is missing")]
    MissingTable(&'static str),

    #[error("table '{0}' is empty")]
    EmptyTable(&'static str),

    #[error("table '{table}': key {key:?} must be exactly one character")]
    InvalidKey { table: &'static str, key: String },

    #[error("table '{table}': keys {first:?} and {second:?} both normalise to '{normalised}'")]
    DuplicateKey {
        table:      &'static str,
        first:      String,
        second:     String,
        normalised: char,
    },

    #[error("table '{table}': key '{key}' has an empty code")]
    EmptyCode { table: &'static str, key: char },

    #[error("table '{table}': key '{key}' has code {code:?}, only '.' and '-' are allowed")]
    InvalidCode { table: &'static str, key: char, code: String },

    #[error("table '{table}': '{first}' and '{second}' share the code {code:?}")]
    DuplicateCode {
        table:  &'static str,
        first:  char,
        second: char,
        code:   String,
    },

    #[error("table 'number' must hold exactly the digits 0-9 (missing: {missing:?}, extra: {extra:?})")]
    IncompleteNumbers { missing: Vec<char>, extra: Vec<char> },

    #[error("table '{table}': key '{key}' uses {code:?}, the code of digit '{digit}'")]
    DigitClash {
        table: &'static str,
        key:   char,
        digit: char,
        code:  String,
    },

    #[error("placeholder {placeholder:?} {reason}")]
    InvalidPlaceholder { placeholder: String, reason: &'static str },

    #[error("reading table file {path:?}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing JSON table data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing TOML table data: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A character (encode) or token (decode) with no table entry.
/// Reported alongside the output, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownSymbol {
    Char(char),
    Token(String),
}

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownSymbol::Char(c)  => write!(f, "character {c:?}"),
            UnknownSymbol::Token(t) => write!(f, "token {t:?}"),
        }
    }
}
