// src/morse/table.rs  |  One character → code mapping plus its reverse index
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

use crate::morse::error::MorseError;
use crate::morse::kana;

/// Character → Morse code for a single alphabet or symbol class.
///
/// Keys are normalised on construction (upper-case Latin, katakana for
/// kana), codes are reduced to plain `.`/`-`. The reverse index is derived
/// once here and never touched again.
#[derive(Debug, Clone)]
pub struct MorseTable {
    entries: BTreeMap<char, String>,
    by_code: HashMap<String, char>,
}

impl MorseTable {
    /// Build and validate a table. Rejects empty tables, keys that are not a
    /// single non-whitespace character, keys colliding after normalisation,
    /// empty or non-Morse codes and codes shared by two keys.
    pub fn from_entries<I, K, V>(name: &'static str, entries: I) -> Result<Self, MorseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw_keys: HashMap<char, String> = HashMap::new();
        let mut map = BTreeMap::new();
        let mut by_code = HashMap::new();

        for (k, v) in entries {
            let raw = k.as_ref();
            // Whitespace is a word gap on encode, so it can never be a key
            let key = single_char(raw)
                .filter(|c| !c.is_whitespace())
                .map(normalize_char)
                .ok_or_else(|| MorseError::InvalidKey { table: name, key: raw.to_string() })?;
            if let Some(first) = raw_keys.insert(key, raw.to_string()) {
                return Err(MorseError::DuplicateKey {
                    table: name, first, second: raw.to_string(), normalised: key,
                });
            }

            let code = v.as_ref();
            let clean = normalize_code(code).ok_or_else(|| MorseError::InvalidCode {
                table: name, key, code: code.to_string(),
            })?;
            if clean.is_empty() {
                return Err(MorseError::EmptyCode { table: name, key });
            }
            if let Some(prev) = by_code.insert(clean.clone(), key) {
                // Lower key first
                let (first, second) = if prev < key { (prev, key) } else { (key, prev) };
                return Err(MorseError::DuplicateCode { table: name, first, second, code: clean });
            }
            map.insert(key, clean);
        }

        if map.is_empty() {
            return Err(MorseError::EmptyTable(name));
        }
        log::debug!("[table] '{}' built with {} entries", name, map.len());
        Ok(Self { entries: map, by_code })
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Code for an already-normalised character
    pub fn get(&self, c: char) -> Option<&str> {
        self.entries.get(&c).map(String::as_str)
    }

    pub fn contains(&self, c: char) -> bool { self.entries.contains_key(&c) }

    /// Reverse lookup: code → character
    pub fn decode(&self, code: &str) -> Option<char> {
        self.by_code.get(code).copied()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }
}

impl Serialize for MorseTable {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(self.entries.iter().map(|(k, v)| (k.to_string(), v)))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut it = s.chars();
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _               => None,
    }
}

/// Fold a character onto the table convention: upper-case where the
/// upper-case form is a single character, hiragana → katakana.
pub fn normalize_char(c: char) -> char {
    let mut up = c.to_uppercase();
    let c = match (up.next(), up.next()) {
        (Some(u), None) => u,
        _               => c,
    };
    kana::to_katakana(c)
}

/// Reduce a code to plain `.`/`-`. Typographic dots and dashes are mapped,
/// spaces inside a code are dropped. `None` if any other symbol appears.
pub fn normalize_code(code: &str) -> Option<String> {
    let mut out = String::with_capacity(code.len());
    for ch in code.chars() {
        match ch {
            '.' | '·' | '•' | '・'       => out.push('.'),
            '-' | '_' | '−' | '–' | 'ー' => out.push('-'),
            c if c.is_whitespace()        => {}
            _                             => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_and_codes_are_normalised() {
        let t = MorseTable::from_entries("en", [("a", ".-"), ("b", "-·· ·")]).unwrap();
        assert_eq!(t.get('A'), Some(".-"));
        assert_eq!(t.get('B'), Some("-..."));
        assert_eq!(t.decode("-..."), Some('B'));
        assert_eq!(t.get('a'), None);
    }

    #[test]
    fn hiragana_keys_land_on_katakana() {
        let t = MorseTable::from_entries("ja", [("い", ".-")]).unwrap();
        assert!(t.contains('イ'));
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = MorseTable::from_entries::<_, &str, &str>("ja", []).unwrap_err();
        assert!(matches!(err, MorseError::EmptyTable("ja")));
    }

    #[test]
    fn multi_char_key_is_rejected() {
        let err = MorseTable::from_entries("en", [("AB", ".-")]).unwrap_err();
        assert!(matches!(err, MorseError::InvalidKey { ref key, .. } if key == "AB"));
        let err = MorseTable::from_entries("en", [("", ".-")]).unwrap_err();
        assert!(matches!(err, MorseError::InvalidKey { .. }));
    }

    #[test]
    fn whitespace_key_is_rejected() {
        for key in [" ", "\t", "\u{3000}"] {
            let err = MorseTable::from_entries("en", [(key, "-...-")]).unwrap_err();
            assert!(matches!(err, MorseError::InvalidKey { key: ref k, .. } if k == key), "{key:?}");
        }
    }

    #[test]
    fn case_collision_is_rejected() {
        let err = MorseTable::from_entries("en", [("a", ".-"), ("A", "-...")]).unwrap_err();
        assert!(matches!(err, MorseError::DuplicateKey { normalised: 'A', .. }));
    }

    #[test]
    fn bad_codes_are_rejected() {
        let err = MorseTable::from_entries("en", [("E", "")]).unwrap_err();
        assert!(matches!(err, MorseError::EmptyCode { key: 'E', .. }));
        let err = MorseTable::from_entries("en", [("E", "  ")]).unwrap_err();
        assert!(matches!(err, MorseError::EmptyCode { .. }));
        let err = MorseTable::from_entries("en", [("E", ".x")]).unwrap_err();
        assert!(matches!(err, MorseError::InvalidCode { key: 'E', .. }));
    }

    #[test]
    fn shared_code_is_rejected() {
        let err = MorseTable::from_entries("en", [("(", "-.--."), (")", "-.--.")]).unwrap_err();
        match err {
            MorseError::DuplicateCode { first, second, code, .. } => {
                assert_eq!((first, second), ('(', ')'));
                assert_eq!(code, "-.--.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn serialises_as_string_map() {
        let t = MorseTable::from_entries("number", [("1", ".----"), ("0", "-----")]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"0":"-----","1":".----"}"#);
    }
}
