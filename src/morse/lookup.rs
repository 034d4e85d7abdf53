// src/morse/lookup.rs  |  Text ⇄ Morse tokens over an immutable table set
use std::sync::OnceLock;

use crate::morse::data::MorseData;
use crate::morse::error::{MorseError, UnknownSymbol};
use crate::morse::kana;
use crate::morse::mode::Mode;
use crate::morse::table::{normalize_char, normalize_code};

/// Token marking a word gap between two encoded words
pub const WORD_GAP: &str = "/";
/// Also accepted as a word gap on decode
pub const WORD_GAP_ALT: &str = "|";
/// Default stand-in for anything the tables cannot translate
pub const DEFAULT_PLACEHOLDER: &str = "#";

/// What to emit for a character (encode) or token (decode) with no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Emit this token on encode; its first character on decode
    Placeholder(String),
    /// Drop the symbol
    Skip,
}

impl Default for Fallback {
    fn default() -> Self { Fallback::Placeholder(DEFAULT_PLACEHOLDER.into()) }
}

impl Fallback {
    fn token(&self) -> Option<&str> {
        match self {
            Fallback::Placeholder(t) => Some(t),
            Fallback::Skip           => None,
        }
    }

    fn char(&self) -> Option<char> {
        match self {
            Fallback::Placeholder(t) => Some(t.chars().next().unwrap_or('#')),
            Fallback::Skip           => None,
        }
    }

    /// A placeholder must survive as its own token and must not decode as a
    /// character or a word gap.
    pub fn validate(&self) -> Result<(), MorseError> {
        let Some(tok) = self.token() else { return Ok(()) };
        let reason = if tok.is_empty() {
            "must not be empty"
        } else if tok.chars().any(char::is_whitespace) {
            "must not contain whitespace"
        } else if tok == WORD_GAP || tok == WORD_GAP_ALT {
            "is a word gap token"
        } else if normalize_code(tok).is_some() {
            "is itself valid Morse"
        } else {
            return Ok(());
        };
        Err(MorseError::InvalidPlaceholder { placeholder: tok.to_string(), reason })
    }
}

/// Encoder/decoder over one `MorseData` snapshot.
///
/// Lookup order is always the mode's alphabet table first, then the number
/// table. Per-symbol misses never fail; they go through [`Fallback`].
#[derive(Debug, Clone)]
pub struct MorseLookup {
    data:     MorseData,
    fallback: Fallback,
}

impl MorseLookup {
    pub fn new(data: MorseData) -> Self {
        Self { data, fallback: Fallback::default() }
    }

    /// Load a table file and wrap it; structural problems surface here.
    pub fn from_path(path: &std::path::Path) -> Result<Self, MorseError> {
        Ok(Self::new(MorseData::load(path)?))
    }

    /// Process-wide lookup over the built-in tables
    pub fn builtin() -> &'static MorseLookup {
        static LOOKUP: OnceLock<MorseLookup> = OnceLock::new();
        LOOKUP.get_or_init(|| MorseLookup::new(MorseData::builtin().clone()))
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Result<Self, MorseError> {
        fallback.validate()?;
        self.fallback = fallback;
        Ok(self)
    }

    pub fn data(&self) -> &MorseData { &self.data }

    // ── Encode ───────────────────────────────────────────────────────────────

    /// Text → tokens. Whitespace runs between words become one [`WORD_GAP`].
    pub fn encode(&self, text: &str, mode: Mode) -> Vec<String> {
        self.encode_checked(text, mode).0
    }

    /// Tokens joined by single spaces: `"... --- ... / -.-"`
    pub fn encode_to_string(&self, text: &str, mode: Mode) -> String {
        self.encode(text, mode).join(" ")
    }

    /// Like [`encode`](Self::encode), also returning every character that had
    /// no entry, in input order.
    pub fn encode_checked(&self, text: &str, mode: Mode) -> (Vec<String>, Vec<UnknownSymbol>) {
        let mut tokens: Vec<String> = Vec::new();
        let mut unknown = Vec::new();
        let mut gap = false;

        for c in text.chars() {
            if c.is_whitespace() {
                gap = true;
                continue;
            }
            let (first, second) = match self.codes_for(c, mode) {
                Some(codes) => codes,
                None => {
                    log::debug!("[encode] no {mode} entry for {c:?}");
                    unknown.push(UnknownSymbol::Char(c));
                    match self.fallback.token() {
                        Some(t) => (t, None),
                        None    => continue,
                    }
                }
            };
            if gap && !tokens.is_empty() {
                tokens.push(WORD_GAP.to_string());
            }
            gap = false;
            tokens.push(first.to_string());
            if let Some(s) = second {
                tokens.push(s.to_string());
            }
        }
        (tokens, unknown)
    }

    /// One or two codes for a character. Tries the character as-is (after
    /// case/kana folding), then its full-size form, then base + voicing mark.
    fn codes_for(&self, c: char, mode: Mode) -> Option<(&str, Option<&str>)> {
        let c = normalize_char(c);
        if let Some(code) = self.find(c, mode) {
            return Some((code, None));
        }
        let full = kana::full_size(c);
        if full != c {
            if let Some(code) = self.find(full, mode) {
                return Some((code, None));
            }
        }
        let (base, mark) = kana::split_voiced(c)?;
        Some((self.find(base, mode)?, Some(self.find(mark, mode)?)))
    }

    fn find(&self, c: char, mode: Mode) -> Option<&str> {
        self.data.table(mode).get(c).or_else(|| self.data.number().get(c))
    }

    // ── Decode ───────────────────────────────────────────────────────────────

    /// Tokens → text. [`WORD_GAP`] (or `|`) becomes a single space; a kana
    /// followed by `゛`/`゜` is recomposed (`カ゛` → `ガ`).
    pub fn decode<I, S>(&self, tokens: I, mode: Mode) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.decode_checked(tokens, mode).0
    }

    /// Decode a whitespace-separated token string
    pub fn decode_str(&self, text: &str, mode: Mode) -> String {
        self.decode(text.split_whitespace(), mode)
    }

    /// Like [`decode`](Self::decode), also returning every token that had no
    /// entry, in input order.
    pub fn decode_checked<I, S>(&self, tokens: I, mode: Mode) -> (String, Vec<UnknownSymbol>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        let mut unknown = Vec::new();

        for tok in tokens {
            let tok = tok.as_ref().trim();
            if tok.is_empty() {
                continue;
            }
            if tok == WORD_GAP || tok == WORD_GAP_ALT {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                continue;
            }
            let decoded = normalize_code(tok).and_then(|code| self.reverse(&code, mode));
            match decoded {
                Some(c) => push_composed(&mut out, c),
                None => {
                    log::debug!("[decode] no {mode} entry for {tok:?}");
                    unknown.push(UnknownSymbol::Token(tok.to_string()));
                    if let Some(p) = self.fallback.char() {
                        out.push(p);
                    }
                }
            }
        }
        if out.ends_with(' ') {
            out.pop();
        }
        (out, unknown)
    }

    fn reverse(&self, code: &str, mode: Mode) -> Option<char> {
        self.data.table(mode).decode(code).or_else(|| self.data.number().decode(code))
    }
}

fn push_composed(out: &mut String, c: char) {
    if c == kana::DAKUTEN || c == kana::HANDAKUTEN {
        if let Some(voiced) = out.chars().last().and_then(|base| kana::compose(base, c)) {
            out.pop();
            out.push(voiced);
            return;
        }
    }
    out.push(c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn lookup() -> &'static MorseLookup { MorseLookup::builtin() }

    #[test]
    fn sos() {
        assert_eq!(lookup().encode("SOS", Mode::En), vec!["...", "---", "..."]);
        assert_eq!(lookup().decode(["...", "---", "..."], Mode::En), "SOS");
    }

    #[test]
    fn lowercase_is_folded() {
        assert_eq!(lookup().encode("sos", Mode::En), lookup().encode("SOS", Mode::En));
    }

    #[test]
    fn words_get_a_single_gap() {
        let l = lookup();
        assert_eq!(l.encode_to_string("  CQ   DE  K1 ", Mode::En), "-.-. --.- / -.. . / -.- .----");
        assert_eq!(l.decode_str("-.-. --.- / -.. . / -.- .----", Mode::En), "CQ DE K1");
        assert_eq!(l.decode_str("-.-. --.- | | -.. .", Mode::En), "CQ DE");
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(lookup().encode("", Mode::En).is_empty());
        assert!(lookup().encode("   ", Mode::Ja).is_empty());
        assert_eq!(lookup().decode(Vec::<String>::new(), Mode::Ja), "");
        assert_eq!(lookup().decode_str(" / ", Mode::En), "");
    }

    #[test]
    fn unknown_char_uses_placeholder() {
        let (tokens, unknown) = lookup().encode_checked("@", Mode::En);
        assert_eq!(tokens, vec![DEFAULT_PLACEHOLDER]);
        assert_eq!(unknown, vec![UnknownSymbol::Char('@')]);

        let (text, unknown) = lookup().decode_checked(["...", "........", "..."], Mode::En);
        assert_eq!(text, "S#S");
        assert_eq!(unknown, vec![UnknownSymbol::Token("........".into())]);
    }

    #[test]
    fn placeholder_survives_a_round_trip() {
        let l = lookup();
        assert_eq!(l.decode(l.encode("A@B", Mode::En), Mode::En), "A#B");
    }

    #[test]
    fn skip_drops_unknowns_without_doubling_gaps() {
        let l = MorseLookup::new(MorseData::builtin().clone())
            .with_fallback(Fallback::Skip)
            .unwrap();
        assert_eq!(l.encode_to_string("A @ B", Mode::En), ".- / -...");
        assert_eq!(l.encode_to_string("@ A", Mode::En), ".-");
        assert_eq!(l.decode_str(".- xx -...", Mode::En), "AB");
    }

    #[rstest]
    #[case("", "must not be empty")]
    #[case("? ?", "must not contain whitespace")]
    #[case("/", "is a word gap token")]
    #[case("|", "is a word gap token")]
    #[case("-", "is itself valid Morse")]
    #[case("··", "is itself valid Morse")]
    fn unusable_placeholders_are_rejected(#[case] tok: &str, #[case] why: &str) {
        let err = MorseLookup::new(MorseData::builtin().clone())
            .with_fallback(Fallback::Placeholder(tok.into()))
            .unwrap_err();
        match err {
            MorseError::InvalidPlaceholder { placeholder, reason } => {
                assert_eq!(placeholder, tok);
                assert_eq!(reason, why);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn custom_placeholder_misses_stay_reported() {
        let l = MorseLookup::new(MorseData::builtin().clone())
            .with_fallback(Fallback::Placeholder("*".into()))
            .unwrap();
        let (tokens, unknown) = l.encode_checked("A@B", Mode::En);
        assert_eq!(tokens, vec![".-", "*", "-..."]);
        assert_eq!(unknown, vec![UnknownSymbol::Char('@')]);
        let (text, unknown) = l.decode_checked(&tokens, Mode::En);
        assert_eq!(text, "A*B");
        assert_eq!(unknown, vec![UnknownSymbol::Token("*".into())]);
    }

    #[test]
    fn every_alphabet_key_round_trips() {
        let l = lookup();
        for mode in Mode::ALL {
            for c in l.data().table(mode).keys() {
                let tokens = l.encode(&c.to_string(), mode);
                assert_eq!(tokens.len(), 1, "{mode} {c}");
                assert_eq!(l.decode(&tokens, mode), c.to_string(), "{mode} {c}");
            }
        }
    }

    #[rstest]
    #[case('0', "-----")]
    #[case('1', ".----")]
    #[case('2', "..---")]
    #[case('3', "...--")]
    #[case('4', "....-")]
    #[case('5', ".....")]
    #[case('6', "-....")]
    #[case('7', "--...")]
    #[case('8', "---..")]
    #[case('9', "----.")]
    fn digits_round_trip_in_both_modes(#[case] digit: char, #[case] code: &str) {
        for mode in Mode::ALL {
            let tokens = lookup().encode(&digit.to_string(), mode);
            assert_eq!(tokens, vec![code]);
            assert_eq!(lookup().decode(&tokens, mode), digit.to_string());
        }
    }

    #[test]
    fn same_code_means_different_things_per_mode() {
        let l = lookup();
        assert_eq!(l.decode_str("...", Mode::En), "S");
        assert_eq!(l.decode_str("...", Mode::Ja), "ラ");
        // Latin letters have no Wabun entry
        assert_eq!(l.encode("A", Mode::Ja), vec![DEFAULT_PLACEHOLDER]);
    }

    #[test]
    fn voiced_kana_split_and_recompose() {
        let l = lookup();
        assert_eq!(l.encode("ガ", Mode::Ja), vec![".-..", ".."]);
        assert_eq!(l.encode("パ", Mode::Ja), vec!["-...", "..--."]);
        assert_eq!(l.decode([".-..", ".."], Mode::Ja), "ガ");
        assert_eq!(l.decode_str("-... ..--.", Mode::Ja), "パ");
        // A mark with nothing to attach to stays as-is
        assert_eq!(l.decode_str("..", Mode::Ja), "゛");
    }

    #[test]
    fn hiragana_and_small_kana_encode_like_katakana() {
        let l = lookup();
        assert_eq!(l.encode("ありがとう", Mode::Ja), l.encode("アリガトウ", Mode::Ja));
        assert_eq!(l.encode("ッ", Mode::Ja), l.encode("ツ", Mode::Ja));
        assert_eq!(l.decode(l.encode("ありがとう", Mode::Ja), Mode::Ja), "アリガトウ");
    }

    #[test]
    fn typographic_symbols_decode() {
        assert_eq!(lookup().decode_str("··· −−− ···", Mode::En), "SOS");
    }
}
