// src/morse/data.rs  |  The { en, ja, number } table set + built-in tables + loader
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::morse::error::MorseError;
use crate::morse::mode::Mode;
use crate::morse::table::MorseTable;

/// ITU Morse, Latin letters and punctuation. `@` is deliberately absent.
pub static EN_TABLE: &[(&str, &str)] = &[
    ("A", ".-"),     ("B", "-..."),   ("C", "-.-."),   ("D", "-.."),
    ("E", "."),      ("F", "..-."),   ("G", "--."),    ("H", "...."),
    ("I", ".."),     ("J", ".---"),   ("K", "-.-"),    ("L", ".-.."),
    ("M", "--"),     ("N", "-."),     ("O", "---"),    ("P", ".--."),
    ("Q", "--.-"),   ("R", ".-."),    ("S", "..."),    ("T", "-"),
    ("U", "..-"),    ("V", "...-"),   ("W", ".--"),    ("X", "-..-"),
    ("Y", "-.--"),   ("Z", "--.."),
    (".", ".-.-.-"), (",", "--..--"), ("?", "..--.."), ("/", "-..-."),
    ("'", ".----."), ("!", "-.-.--"), ("(", "-.--."),  (")", "-.--.-"),
    ("&", ".-..."),  (":", "---..."), (";", "-.-.-."), ("=", "-...-"),
    ("+", ".-.-."),  ("-", "-....-"), ("_", "..--.-"), ("\"", ".-..-."),
    ("$", "...-..-"),
];

/// Wabun code (katakana, iroha order)
pub static JA_TABLE: &[(&str, &str)] = &[
    ("イ", ".-"),     ("ロ", ".-.-"),   ("ハ", "-..."),   ("ニ", "-.-."),
    ("ホ", "-.."),    ("ヘ", "."),      ("ト", "..-.."),  ("チ", "..-."),
    ("リ", "--."),    ("ヌ", "...."),   ("ル", "-.--."),  ("ヲ", ".---"),
    ("ワ", "-.-"),    ("カ", ".-.."),   ("ヨ", "--"),     ("タ", "-."),
    ("レ", "---"),    ("ソ", "---."),   ("ツ", ".--."),   ("ネ", "--.-"),
    ("ナ", ".-."),    ("ラ", "..."),    ("ム", "-"),      ("ウ", "..-"),
    ("ヰ", ".-..-"),  ("ノ", "..--"),   ("オ", ".-..."),  ("ク", "...-"),
    ("ヤ", ".--"),    ("マ", "-..-"),   ("ケ", "-.--"),   ("フ", "--.."),
    ("コ", "----"),   ("エ", "-.---"),  ("テ", ".-.--"),  ("ア", "--.--"),
    ("サ", "-.-.-"),  ("キ", "-.-.."),  ("ユ", "-..--"),  ("メ", "-...-"),
    ("ミ", "..-.-"),  ("シ", "--.-."),  ("ヱ", ".--.."),  ("ヒ", "--..-"),
    ("モ", "-..-."),  ("セ", ".---."),  ("ス", "---.-"),  ("ン", ".-.-."),
    ("゛", ".."),     ("゜", "..--."),  ("ー", ".--.-"),  ("、", ".-.-.-"),
    ("」", ".-.-.."), ("（", "-.--.-"), ("）", ".-..-."),
];

pub static NUMBER_TABLE: &[(&str, &str)] = &[
    ("0", "-----"), ("1", ".----"), ("2", "..---"), ("3", "...--"), ("4", "....-"),
    ("5", "....."), ("6", "-...."), ("7", "--..."), ("8", "---.."), ("9", "----."),
];

/// The three tables every translation needs. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct MorseData {
    en:     MorseTable,
    ja:     MorseTable,
    number: MorseTable,
}

/// On-disk shape. Tables are optional here only so a missing one can be
/// reported by name instead of as a generic parse error.
#[derive(Debug, Deserialize)]
struct RawData {
    en:     Option<BTreeMap<String, String>>,
    ja:     Option<BTreeMap<String, String>>,
    number: Option<BTreeMap<String, String>>,
}

impl MorseData {
    pub fn new(en: MorseTable, ja: MorseTable, number: MorseTable) -> Result<Self, MorseError> {
        check_numbers(&number)?;
        for (name, table) in [("en", &en), ("ja", &ja)] {
            for (c, code) in table.iter() {
                // Alphabet wins on decode, so a shared code would hide the digit
                if let Some(digit) = number.decode(code) {
                    return Err(MorseError::DigitClash {
                        table: name, key: c, digit, code: code.to_string(),
                    });
                }
            }
        }
        Ok(Self { en, ja, number })
    }

    /// The compiled-in tables, built on first use and shared for the
    /// lifetime of the process.
    pub fn builtin() -> &'static MorseData {
        static BUILTIN: OnceLock<MorseData> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_static(EN_TABLE, JA_TABLE, NUMBER_TABLE)
                .expect("built-in Morse tables are valid")
        })
    }

    fn from_static(
        en: &[(&str, &str)],
        ja: &[(&str, &str)],
        number: &[(&str, &str)],
    ) -> Result<Self, MorseError> {
        Self::new(
            MorseTable::from_entries("en", en.iter().copied())?,
            MorseTable::from_entries("ja", ja.iter().copied())?,
            MorseTable::from_entries("number", number.iter().copied())?,
        )
    }

    fn from_raw(raw: RawData) -> Result<Self, MorseError> {
        let en     = raw.en.ok_or(MorseError::MissingTable("en"))?;
        let ja     = raw.ja.ok_or(MorseError::MissingTable("ja"))?;
        let number = raw.number.ok_or(MorseError::MissingTable("number"))?;
        Self::new(
            MorseTable::from_entries("en", en)?,
            MorseTable::from_entries("ja", ja)?,
            MorseTable::from_entries("number", number)?,
        )
    }

    /// Parse `{ "en": {..}, "ja": {..}, "number": {..} }`
    pub fn from_json_str(s: &str) -> Result<Self, MorseError> {
        Self::from_raw(serde_json::from_str(s)?)
    }

    /// Same shape as JSON, as three TOML tables
    pub fn from_toml_str(s: &str) -> Result<Self, MorseError> {
        Self::from_raw(toml::from_str(s)?)
    }

    /// Load a table file; `.toml` is read as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, MorseError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| MorseError::Io { path: path.to_path_buf(), source })?;
        let is_toml = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        log::info!("[data] loading tables from {} ({})", path.display(), if is_toml { "toml" } else { "json" });
        if is_toml { Self::from_toml_str(&raw) } else { Self::from_json_str(&raw) }
    }

    pub fn to_json_pretty(&self) -> Result<String, MorseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn en(&self)     -> &MorseTable { &self.en }
    pub fn ja(&self)     -> &MorseTable { &self.ja }
    pub fn number(&self) -> &MorseTable { &self.number }

    /// Alphabet table selected by `mode`
    pub fn table(&self, mode: Mode) -> &MorseTable {
        match mode {
            Mode::En => &self.en,
            Mode::Ja => &self.ja,
        }
    }
}

fn check_numbers(number: &MorseTable) -> Result<(), MorseError> {
    let missing: Vec<char> = ('0'..='9').filter(|d| !number.contains(*d)).collect();
    let extra: Vec<char> = number.keys().filter(|c| !c.is_ascii_digit()).collect();
    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(MorseError::IncompleteNumbers { missing, extra })
    }
}
