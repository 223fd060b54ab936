//! Title, slug, and color helpers shared by validation, sorting, and rendering.
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters that carry meaning in brand names and would otherwise vanish
/// from the slug.
const SLUG_SYMBOLS: &[(char, &str)] = &[('+', "plus"), ('.', "dot"), ('&', "and")];

/// Letters that do not decompose under NFD, mapped to their base letters.
const SLUG_LETTERS: &[(char, &str)] = &[
    ('đ', "d"),
    ('ħ', "h"),
    ('ı', "i"),
    ('ĸ', "k"),
    ('ŀ', "l"),
    ('ł', "l"),
    ('ß', "ss"),
    ('ŧ', "t"),
];

/// Further non-decomposing letters that collate with their base letters
/// but are dropped from slugs.
const COLLATION_LETTERS: &[(char, &str)] = &[
    ('ø', "o"),
    ('æ', "ae"),
    ('œ', "oe"),
    ('ð', "d"),
    ('þ', "th"),
];

fn fold_letter(ch: char, tables: &[&[(char, &'static str)]]) -> Option<&'static str> {
    tables
        .iter()
        .flat_map(|table| table.iter())
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}

/// Canonical comparison form of a brand title.
///
/// Lowercases, spells out the replacement characters, decomposes to NFD and
/// keeps only ASCII letters and digits.
pub fn title_to_slug(title: &str) -> String {
    let mut replaced = String::with_capacity(title.len());
    for ch in title.to_lowercase().chars() {
        match fold_letter(ch, &[SLUG_SYMBOLS, SLUG_LETTERS]) {
            Some(to) => replaced.push_str(to),
            None => replaced.push(ch),
        }
    }
    replaced
        .nfd()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}

/// Compare two titles the way an English locale collator would.
///
/// Base letters decide first, then accents, then case (lowercase first).
/// At the base level whitespace sorts before punctuation and symbols, which
/// sort before digits, which sort before letters. Remaining ties fall back
/// to code point order so the result is total.
pub fn collate_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Symbol,
    Digit,
    Letter,
}

fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_numeric() {
        CharClass::Digit
    } else if ch.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Symbol
    }
}

fn primary_key(text: &str) -> Vec<(CharClass, char)> {
    let mut key = Vec::with_capacity(text.len());
    for ch in text
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
    {
        match fold_letter(ch, &[SLUG_LETTERS, COLLATION_LETTERS]) {
            Some(base) => key.extend(base.chars().map(|base| (CharClass::Letter, base))),
            None => key.push((char_class(ch), ch)),
        }
    }
    key
}

fn secondary_key(text: &str) -> String {
    text.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(text: &str) -> Vec<bool> {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(char::is_uppercase)
        .collect()
}

/// Canonical stored form of an accepted hex color: six uppercase digits, no `#`.
///
/// Shorthand (`abc`, `abcd`) expands by doubling each color digit and an
/// alpha channel is dropped. Applying it twice is a no-op.
pub fn normalize_hex(hex: &str) -> String {
    let color = hex.trim().trim_start_matches('#').to_uppercase();
    match color.len() {
        3 | 4 => color
            .chars()
            .take(3)
            .flat_map(|ch| [ch, ch])
            .collect(),
        8 => color.chars().take(6).collect(),
        _ => color,
    }
}

/// sRGB relative luminance of a normalized six-digit color.
pub fn relative_luminance(hex: &str) -> Option<f64> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let mut channels = [0.0_f64; 3];
    for (idx, channel) in channels.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).ok()?;
        let value = f64::from(byte) / 255.0;
        *channel = if value <= 0.03928 {
            value / 12.92
        } else {
            ((value + 0.055) / 1.055).powf(2.4)
        };
    }
    Some(0.2126 * channels[0] + 0.7152 * channels[1] + 0.0722 * channels[2])
}
