use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases `text` without folding accents.
///
/// Dotted capital `İ` lowers to a plain `i` instead of `i` followed by a
/// combining dot, so Turkish names compare the way a reader expects.
pub fn fold_case(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'İ' => folded.push('i'),
            _ => folded.extend(c.to_lowercase()),
        }
    }
    folded
}

/// Lowercases `text` and strips diacritics.
///
/// Accented letters are decomposed (NFKD) and their combining marks dropped.
/// Letters that have no decomposition but a conventional ASCII spelling
/// (`ı`, `ø`, `ß`, ...) are transliterated explicitly.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for c in fold_case(text).nfkd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'ı' => normalized.push('i'),
            'ø' => normalized.push('o'),
            'ł' => normalized.push('l'),
            'đ' | 'ð' => normalized.push('d'),
            'ß' => normalized.push_str("ss"),
            'æ' => normalized.push_str("ae"),
            'œ' => normalized.push_str("oe"),
            'þ' => normalized.push_str("th"),
            _ => normalized.push(c),
        }
    }
    normalized
}

/// Splits already-normalized text into index terms.
///
/// A term is a run of word characters (alphanumerics and `_`) at least two
/// characters long. Repeated terms are kept so callers can count them.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= 2)
        .map(|word| word.to_string())
        .collect()
}
