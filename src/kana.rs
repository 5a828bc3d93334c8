//! Script folding for Japanese store names.
//!
//! Store names arrive in whatever script the chain uses (katakana, hiragana,
//! kanji, Latin, half-width forms) and users type queries in whatever script
//! is convenient. This module provides the normalizations that make those
//! comparable:
//!
//! - [`fold`]: Unicode NFKC plus lowercasing, which merges half-width katakana
//!   and full-width Latin with their canonical forms.
//! - [`to_hiragana`] / [`to_katakana`]: syllabary conversion, leaving every
//!   other character untouched.
//! - [`reading`]: the hiragana form of a folded string.
//! - [`romanize`]: a Hepburn-style romanization of the kana in a string.
//!
//! Kanji have no mechanical reading; they pass through every conversion
//! unchanged. Callers that know a kanji name's reading can supply it to the
//! [`NameIndex`](crate::index::NameIndex) instead.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Distance between a hiragana code point and its katakana counterpart.
const KANA_OFFSET: u32 = 0x60;

/// Returns whether `c` is a hiragana letter that has a katakana counterpart.
fn is_convertible_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | 'ゝ' | 'ゞ')
}

/// Returns whether `c` is a katakana letter that has a hiragana counterpart.
fn is_convertible_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30F6}' | 'ヽ' | 'ヾ')
}

/// Returns whether `c` is a hiragana or katakana character, including the
/// prolonged sound mark.
pub fn is_kana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}')
}

fn hiragana_char(c: char) -> char {
    if is_convertible_katakana(c) {
        // Both ranges are contiguous and the offset maps valid code points
        // onto valid code points, so the conversion cannot fail.
        char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

fn katakana_char(c: char) -> char {
    if is_convertible_hiragana(c) {
        char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

/// Fold a string for comparison: NFKC normalization followed by lowercasing.
///
/// Returns [`Cow::Borrowed`] when folding leaves the input unchanged, which
/// is the common case for already-lowercase ASCII and for most Japanese
/// names.
///
/// # Examples
///
/// ```
/// use menufinder::kana::fold;
///
/// // Half-width katakana with a separate voiced mark composes to full width.
/// assert_eq!(fold("ﾏｸﾄﾞﾅﾙﾄﾞ"), "マクドナルド");
/// // Full-width Latin becomes ASCII and is lowercased.
/// assert_eq!(fold("ＫＦＣ"), "kfc");
/// assert!(matches!(fold("sukiya"), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn fold(s: &str) -> Cow<'_, str> {
    // Fast path: ASCII is already NFKC, only case can change.
    if s.is_ascii() {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(s.to_ascii_lowercase());
        }
        return Cow::Borrowed(s);
    }

    let folded: String = s.nfkc().flat_map(char::to_lowercase).collect();
    if folded == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(folded)
    }
}

/// Convert every katakana letter in `s` to hiragana.
///
/// Characters outside the katakana block, including the prolonged sound
/// mark `ー`, are kept as they are. The input is not folded first, so
/// half-width katakana is left alone; use [`reading`] for that.
///
/// # Examples
///
/// ```
/// use menufinder::kana::to_hiragana;
///
/// assert_eq!(to_hiragana("モスバーガー"), "もすばーがー");
/// assert_eq!(to_hiragana("すき家"), "すき家");
/// ```
pub fn to_hiragana(s: &str) -> String {
    s.chars().map(hiragana_char).collect()
}

/// Convert every hiragana letter in `s` to katakana.
///
/// # Examples
///
/// ```
/// use menufinder::kana::to_katakana;
///
/// assert_eq!(to_katakana("まくどなるど"), "マクドナルド");
/// ```
pub fn to_katakana(s: &str) -> String {
    s.chars().map(katakana_char).collect()
}

/// The hiragana reading of `s` after folding.
///
/// # Examples
///
/// ```
/// use menufinder::kana::reading;
///
/// assert_eq!(reading("ﾏｸﾄﾞﾅﾙﾄﾞ"), "まくどなるど");
/// ```
pub fn reading(s: &str) -> String {
    to_hiragana(&fold(s))
}

/// Romanization of a single hiragana letter, without digraph handling.
fn syllable(c: char) -> Option<&'static str> {
    let romaji = match c {
        'あ' => "a",
        'い' => "i",
        'う' => "u",
        'え' => "e",
        'お' => "o",
        'か' => "ka",
        'き' => "ki",
        'く' => "ku",
        'け' => "ke",
        'こ' => "ko",
        'が' => "ga",
        'ぎ' => "gi",
        'ぐ' => "gu",
        'げ' => "ge",
        'ご' => "go",
        'さ' => "sa",
        'し' => "shi",
        'す' => "su",
        'せ' => "se",
        'そ' => "so",
        'ざ' => "za",
        'じ' => "ji",
        'ず' => "zu",
        'ぜ' => "ze",
        'ぞ' => "zo",
        'た' => "ta",
        'ち' => "chi",
        'つ' => "tsu",
        'て' => "te",
        'と' => "to",
        'だ' => "da",
        'ぢ' => "ji",
        'づ' => "zu",
        'で' => "de",
        'ど' => "do",
        'な' => "na",
        'に' => "ni",
        'ぬ' => "nu",
        'ね' => "ne",
        'の' => "no",
        'は' => "ha",
        'ひ' => "hi",
        'ふ' => "fu",
        'へ' => "he",
        'ほ' => "ho",
        'ば' => "ba",
        'び' => "bi",
        'ぶ' => "bu",
        'べ' => "be",
        'ぼ' => "bo",
        'ぱ' => "pa",
        'ぴ' => "pi",
        'ぷ' => "pu",
        'ぺ' => "pe",
        'ぽ' => "po",
        'ま' => "ma",
        'み' => "mi",
        'む' => "mu",
        'め' => "me",
        'も' => "mo",
        'や' => "ya",
        'ゆ' => "yu",
        'よ' => "yo",
        'ら' => "ra",
        'り' => "ri",
        'る' => "ru",
        'れ' => "re",
        'ろ' => "ro",
        'わ' => "wa",
        'ゐ' => "i",
        'ゑ' => "e",
        'を' => "o",
        'ん' => "n",
        'ゔ' => "vu",
        'ゎ' => "wa",
        'ゕ' => "ka",
        'ゖ' => "ke",
        _ => return None,
    };
    Some(romaji)
}

/// Vowel carried by the small `ゃ`/`ゅ`/`ょ` letters.
fn small_y_vowel(c: char) -> Option<char> {
    match c {
        'ゃ' => Some('a'),
        'ゅ' => Some('u'),
        'ょ' => Some('o'),
        _ => None,
    }
}

/// Vowel carried by the small `ぁ`..`ぉ` letters.
fn small_vowel(c: char) -> Option<char> {
    match c {
        'ぁ' => Some('a'),
        'ぃ' => Some('i'),
        'ぅ' => Some('u'),
        'ぇ' => Some('e'),
        'ぉ' => Some('o'),
        _ => None,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// One emitted chunk of romaji. Kana syllables can be modified by the
/// letters that follow them (digraphs, long vowels, iteration marks);
/// passthrough characters never are.
struct Unit {
    text: String,
    /// The hiragana the chunk was read from; `None` for passthrough.
    kana: Option<char>,
}

/// Merge a small `ゃ`/`ゅ`/`ょ` into the preceding i-row syllable.
///
/// `kiゃ` becomes `kya`, while the sibilants drop the `y`: `shiゃ` becomes
/// `sha`, `chiょ` becomes `cho`, `jiゅ` becomes `ju`.
fn contract_youon(prev: &mut String, vowel: char) {
    prev.pop();
    if !(prev.ends_with("sh") || prev.ends_with("ch") || prev.ends_with('j')) {
        prev.push('y');
    }
    prev.push(vowel);
}

/// Merge a small vowel into the preceding syllable: `fuぁ` becomes `fa`,
/// `teぃ` becomes `ti`, a bare `uぃ` becomes `wi`.
fn contract_small_vowel(prev: &mut String, vowel: char) {
    match prev.as_str() {
        "u" => prev.replace_range(.., "w"),
        "i" => prev.replace_range(.., "y"),
        _ => {
            prev.pop();
        }
    }
    prev.push(vowel);
}

/// Apply a pending `っ` to the syllable that follows it.
fn geminate(text: &mut String) {
    if text.starts_with("ch") {
        text.insert(0, 't');
    } else if let Some(first) = text.chars().next()
        && first.is_ascii_alphabetic()
        && !is_vowel(first)
    {
        text.insert(0, first);
    }
}

/// Hepburn-style romanization of `s`.
///
/// The input is folded and converted to hiragana first, so katakana,
/// half-width katakana and hiragana all romanize identically. Digraphs
/// (`きょ` → `kyo`, `ファ` → `fa`), the geminate `っ` (`ケンタッキー` →
/// `kentakkii`) and the prolonged sound mark (`ー` doubles the previous
/// vowel) are handled. Characters that are not kana pass through folded.
///
/// # Examples
///
/// ```
/// use menufinder::kana::romanize;
///
/// assert_eq!(romanize("マクドナルド"), "makudonarudo");
/// assert_eq!(romanize("まっちゃ"), "matcha");
/// assert_eq!(romanize("モスバーガー"), "mosubaagaa");
/// assert_eq!(romanize("KFC"), "kfc");
/// assert_eq!(romanize("いすゞ"), "isuzu");
/// ```
pub fn romanize(s: &str) -> String {
    let hira = reading(s);
    let mut units: Vec<Unit> = Vec::with_capacity(hira.len());
    let mut pending_sokuon = false;

    for c in hira.chars() {
        if c == 'っ' {
            pending_sokuon = true;
            continue;
        }

        let prev_kana = units
            .last_mut()
            .filter(|u| u.kana.is_some() && !u.text.is_empty());

        if let Some(vowel) = small_y_vowel(c) {
            if let Some(prev) = prev_kana
                && prev.text.len() > 1
                && prev.text.ends_with('i')
            {
                contract_youon(&mut prev.text, vowel);
                continue;
            }
            push_kana(&mut units, c, format!("y{vowel}"), &mut pending_sokuon);
            continue;
        }

        if let Some(vowel) = small_vowel(c) {
            if let Some(prev) = prev_kana
                && prev.text.ends_with(is_vowel)
            {
                contract_small_vowel(&mut prev.text, vowel);
                continue;
            }
            push_kana(&mut units, c, vowel.to_string(), &mut pending_sokuon);
            continue;
        }

        match c {
            'ー' => {
                if let Some(prev) = prev_kana
                    && let Some(last) = prev.text.chars().last()
                    && is_vowel(last)
                {
                    prev.text.push(last);
                }
            }
            'ゝ' | 'ゞ' => {
                if let Some(prev) = prev_kana
                    && let Some(source) = prev.kana
                {
                    let base = unvoiced(source);
                    let repeated = if c == 'ゞ' { voiced(base) } else { base };
                    let text = syllable(repeated).map_or_else(|| prev.text.clone(), str::to_owned);
                    push_kana(&mut units, repeated, text, &mut pending_sokuon);
                }
            }
            _ => match syllable(c) {
                Some(romaji) => push_kana(&mut units, c, romaji.to_owned(), &mut pending_sokuon),
                None => {
                    pending_sokuon = false;
                    units.push(Unit {
                        text: c.to_string(),
                        kana: None,
                    });
                }
            },
        }
    }

    units.into_iter().map(|u| u.text).collect()
}

fn push_kana(units: &mut Vec<Unit>, source: char, mut text: String, pending_sokuon: &mut bool) {
    if std::mem::take(pending_sokuon) {
        geminate(&mut text);
    }
    units.push(Unit {
        text,
        kana: Some(source),
    });
}

/// The voiced form of a kana (`す` → `ず`), or the kana itself if it has none.
fn voiced(c: char) -> char {
    unicode_normalization::char::compose(c, '\u{3099}').unwrap_or(c)
}

/// Strip a voiced or semi-voiced mark (`ず` → `す`, `ぱ` → `は`).
fn unvoiced(c: char) -> char {
    let mut base = None;
    unicode_normalization::char::decompose_canonical(c, |d| {
        base.get_or_insert(d);
    });
    base.unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- fold tests ---

    #[test]
    fn fold_lowercases_ascii() {
        assert_eq!(fold("McDonald's"), "mcdonald's");
        assert!(matches!(fold("McDonald's"), Cow::Owned(_)));
    }

    #[test]
    fn fold_borrows_unchanged_ascii() {
        assert!(matches!(fold("yoshinoya"), Cow::Borrowed(_)));
    }

    #[test]
    fn fold_borrows_unchanged_kana() {
        assert!(matches!(fold("マクドナルド"), Cow::Borrowed(_)));
    }

    #[test]
    fn fold_half_width_katakana() {
        assert_eq!(fold("ｹﾝﾀｯｷｰ"), "ケンタッキー");
    }

    #[test]
    fn fold_full_width_latin() {
        assert_eq!(fold("ＣｏＣｏ壱番屋"), "coco壱番屋");
    }

    #[test]
    fn fold_ideographic_space() {
        assert_eq!(fold("松屋\u{3000}新宿"), "松屋 新宿");
    }

    // --- syllabary conversion tests ---

    #[test]
    fn hiragana_from_katakana() {
        assert_eq!(to_hiragana("マクドナルド"), "まくどなるど");
    }

    #[test]
    fn hiragana_keeps_prolonged_mark_and_kanji() {
        assert_eq!(to_hiragana("ラーメン屋"), "らーめん屋");
    }

    #[test]
    fn hiragana_small_letters() {
        assert_eq!(to_hiragana("ケンタッキー"), "けんたっきー");
        assert_eq!(to_hiragana("ヶ"), "ゖ");
    }

    #[test]
    fn katakana_from_hiragana() {
        assert_eq!(to_katakana("すきや"), "スキヤ");
    }

    #[test]
    fn katakana_iteration_marks() {
        assert_eq!(to_katakana("ゝゞ"), "ヽヾ");
        assert_eq!(to_hiragana("ヽヾ"), "ゝゞ");
    }

    #[test]
    fn conversions_leave_latin_alone() {
        assert_eq!(to_hiragana("KFC"), "KFC");
        assert_eq!(to_katakana("kfc"), "kfc");
    }

    #[test]
    fn is_kana_classification() {
        assert!(is_kana('あ'));
        assert!(is_kana('ア'));
        assert!(is_kana('ー'));
        assert!(!is_kana('家'));
        assert!(!is_kana('a'));
    }

    // --- romanize tests ---

    #[test]
    fn romanize_plain_katakana() {
        assert_eq!(romanize("マクドナルド"), "makudonarudo");
    }

    #[test]
    fn romanize_half_width_matches_full_width() {
        assert_eq!(romanize("ﾏｸﾄﾞﾅﾙﾄﾞ"), romanize("マクドナルド"));
    }

    #[test]
    fn romanize_sokuon_and_long_vowel() {
        assert_eq!(romanize("ケンタッキー"), "kentakkii");
    }

    #[test]
    fn romanize_sokuon_before_chi() {
        assert_eq!(romanize("まっちゃ"), "matcha");
    }

    #[test]
    fn romanize_trailing_sokuon_is_dropped() {
        assert_eq!(romanize("あっ"), "a");
    }

    #[test]
    fn romanize_youon() {
        assert_eq!(romanize("きょうと"), "kyouto");
        assert_eq!(romanize("ちゃんぽん"), "chanpon");
        assert_eq!(romanize("しゅう"), "shuu");
        assert_eq!(romanize("ジョイフル"), "joifuru");
        assert_eq!(romanize("りょう"), "ryou");
    }

    #[test]
    fn romanize_foreign_digraphs() {
        assert_eq!(romanize("ファミリーマート"), "famiriimaato");
        assert_eq!(romanize("ティー"), "tii");
        assert_eq!(romanize("ウィンナー"), "winnaa");
        assert_eq!(romanize("ヴィ"), "vi");
        assert_eq!(romanize("シェフ"), "shefu");
    }

    #[test]
    fn romanize_standalone_small_letters() {
        assert_eq!(romanize("ゃ"), "ya");
        assert_eq!(romanize("ぁ"), "a");
    }

    #[test]
    fn romanize_iteration_marks() {
        assert_eq!(romanize("いすゞ"), "isuzu");
        assert_eq!(romanize("ただゝ"), "tadata");
        assert_eq!(romanize("こゝろ"), "kokoro");
        assert_eq!(romanize("みゞ"), "mimi");
    }

    #[test]
    fn voicing_helpers() {
        assert_eq!(voiced('す'), 'ず');
        assert_eq!(voiced('ま'), 'ま');
        assert_eq!(unvoiced('ぱ'), 'は');
        assert_eq!(unvoiced('か'), 'か');
    }

    #[test]
    fn romanize_mixed_scripts() {
        assert_eq!(romanize("すき家"), "suki家");
        assert_eq!(romanize("CoCo壱番屋"), "coco壱番屋");
    }

    #[test]
    fn romanize_prolonged_mark_after_latin_is_dropped() {
        assert_eq!(romanize("aー"), "a");
    }

    #[test]
    fn romanize_empty() {
        assert_eq!(romanize(""), "");
    }
}
