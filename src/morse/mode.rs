// src/morse/mode.rs  |  Alphabet selector
use std::fmt;

use crate::morse::kana;

/// Which alphabet table is active. The number table is always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Latin alphabet (international Morse)
    En,
    /// Japanese kana (Wabun code)
    Ja,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::En, Mode::Ja];

    /// `Ja` as soon as the text holds a single kana, `En` otherwise.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(kana::is_kana) { Mode::Ja } else { Mode::En }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::En => "en",
            Mode::Ja => "ja",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
