// src/morse/kana.rs  |  Kana folding for Wabun lookup
//
// Wabun only knows full-size katakana plus the two voicing marks, so
// everything else is folded onto that set before lookup and recomposed
// after decoding.

/// Voicing mark (dakuten) as a stand-alone character
pub const DAKUTEN: char = '゛';
/// Semi-voicing mark (handakuten) as a stand-alone character
pub const HANDAKUTEN: char = '゜';

const COMBINING_DAKUTEN: char = '\u{3099}';
const COMBINING_HANDAKUTEN: char = '\u{309A}';

/// (voiced, base) pairs taking a dakuten
static VOICED: &[(char, char)] = &[
    ('ガ', 'カ'), ('ギ', 'キ'), ('グ', 'ク'), ('ゲ', 'ケ'), ('ゴ', 'コ'),
    ('ザ', 'サ'), ('ジ', 'シ'), ('ズ', 'ス'), ('ゼ', 'セ'), ('ゾ', 'ソ'),
    ('ダ', 'タ'), ('ヂ', 'チ'), ('ヅ', 'ツ'), ('デ', 'テ'), ('ド', 'ト'),
    ('バ', 'ハ'), ('ビ', 'ヒ'), ('ブ', 'フ'), ('ベ', 'ヘ'), ('ボ', 'ホ'),
    ('ヴ', 'ウ'), ('ヷ', 'ワ'),
];

/// (semi-voiced, base) pairs taking a handakuten
static SEMI_VOICED: &[(char, char)] = &[
    ('パ', 'ハ'), ('ピ', 'ヒ'), ('プ', 'フ'), ('ペ', 'ヘ'), ('ポ', 'ホ'),
];

/// (small, full) pairs
static SMALL: &[(char, char)] = &[
    ('ァ', 'ア'), ('ィ', 'イ'), ('ゥ', 'ウ'), ('ェ', 'エ'), ('ォ', 'オ'),
    ('ッ', 'ツ'), ('ャ', 'ヤ'), ('ュ', 'ユ'), ('ョ', 'ヨ'), ('ヮ', 'ワ'),
    ('ヵ', 'カ'), ('ヶ', 'ケ'),
];

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30FA}').contains(&c) || c == 'ー'
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c)
        || is_katakana(c)
        || matches!(c, DAKUTEN | HANDAKUTEN | COMBINING_DAKUTEN | COMBINING_HANDAKUTEN)
}

/// Hiragana → katakana, combining marks → stand-alone marks. Anything else
/// is returned unchanged.
pub fn to_katakana(c: char) -> char {
    match c {
        COMBINING_DAKUTEN    => DAKUTEN,
        COMBINING_HANDAKUTEN => HANDAKUTEN,
        // The hiragana block sits exactly 0x60 below katakana
        c if is_hiragana(c)  => char::from_u32(c as u32 + 0x60).unwrap_or(c),
        c                    => c,
    }
}

/// Small kana → full size (`ッ` → `ツ`)
pub fn full_size(c: char) -> char {
    SMALL.iter().find(|(s, _)| *s == c).map_or(c, |(_, f)| *f)
}

/// `ガ` → (`カ`, `゛`), `パ` → (`ハ`, `゜`)
pub fn split_voiced(c: char) -> Option<(char, char)> {
    if let Some((_, base)) = VOICED.iter().find(|(v, _)| *v == c) {
        return Some((*base, DAKUTEN));
    }
    SEMI_VOICED
        .iter()
        .find(|(v, _)| *v == c)
        .map(|(_, base)| (*base, HANDAKUTEN))
}

/// Inverse of [`split_voiced`]
pub fn compose(base: char, mark: char) -> Option<char> {
    let pairs = match mark {
        DAKUTEN    => VOICED,
        HANDAKUTEN => SEMI_VOICED,
        _          => return None,
    };
    pairs.iter().find(|(_, b)| *b == base).map(|(v, _)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiragana_folds_to_katakana() {
        assert_eq!(to_katakana('あ'), 'ア');
        assert_eq!(to_katakana('ん'), 'ン');
        assert_eq!(to_katakana('ゔ'), 'ヴ');
        assert_eq!(to_katakana('ア'), 'ア');
        assert_eq!(to_katakana('A'), 'A');
        assert_eq!(to_katakana('\u{3099}'), DAKUTEN);
    }

    #[test]
    fn small_kana_become_full_size() {
        assert_eq!(full_size('ッ'), 'ツ');
        assert_eq!(full_size('ャ'), 'ヤ');
        assert_eq!(full_size('カ'), 'カ');
    }

    #[test]
    fn voiced_split_and_compose_are_inverse() {
        for &(voiced, _) in VOICED.iter().chain(SEMI_VOICED) {
            let (base, mark) = split_voiced(voiced).unwrap();
            assert_eq!(compose(base, mark), Some(voiced));
        }
        assert_eq!(split_voiced('パ'), Some(('ハ', HANDAKUTEN)));
        assert_eq!(split_voiced('カ'), None);
        assert_eq!(compose('ア', DAKUTEN), None);
    }

    #[test]
    fn kana_detection() {
        assert!(is_kana('か'));
        assert!(is_kana('カ'));
        assert!(is_kana('ー'));
        assert!(!is_kana('K'));
        assert!(!is_kana('漢'));
    }
}
