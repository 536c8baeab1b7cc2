use std::borrow::Cow;

use deunicode::deunicode_char;

/// Characters removed from display names before they become job keys.
const STRIPPED: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

/// Symbols spelled out as words instead of being transliterated.
const SYMBOLS: &[(char, &str)] = &[
    ('$', "dollar"),
    ('%', "percent"),
    ('&', "and"),
    ('<', "less"),
    ('>', "greater"),
    ('|', "or"),
    ('¢', "cent"),
    ('£', "pound"),
    ('¤', "currency"),
    ('¥', "yen"),
    ('©', "(c)"),
    ('®', "(r)"),
    ('™', "tm"),
    ('℠', "sm"),
    ('€', "euro"),
    ('₹', "indian rupee"),
    ('₺', "turkish lira"),
    ('₽', "russian ruble"),
    ('₿', "bitcoin"),
    ('∂', "d"),
    ('∆', "delta"),
    ('∑', "sum"),
    ('∞', "infinity"),
    ('♥', "love"),
    ('元', "yuan"),
    ('円', "yen"),
    ('﷼', "rial"),
];

/// Turn a display name into a job key.
///
/// Symbols are spelled out and other non-ASCII characters transliterated,
/// stripped characters are dropped, `-` counts as whitespace, and whitespace
/// runs collapse into a single `-` after trimming. The result is lowercased.
pub fn slugify(display: &str) -> String {
    let mut spelled = String::with_capacity(display.len());
    for ch in display.chars() {
        let replacement = transliterate(ch);
        if replacement == "-" {
            spelled.push(' ');
            continue;
        }
        spelled.extend(replacement.chars().filter(|c| !STRIPPED.contains(c)));
    }

    spelled.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase()
}

fn transliterate(ch: char) -> Cow<'static, str> {
    if let Some((_, word)) = SYMBOLS.iter().find(|(symbol, _)| *symbol == ch) {
        return (*word).into();
    }
    if ch.is_ascii() {
        return ch.to_string().into();
    }
    match deunicode_char(ch) {
        Some(ascii) => ascii.into(),
        None => ch.to_string().into(),
    }
}
