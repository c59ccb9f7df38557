//! Small text helpers shared by the catalog and the roster.

/// Title-case `value` the way word lists and player names are displayed.
///
/// A character is upper-cased when it does not follow a letter and lower-cased
/// otherwise, so `"l'albero di natale"` becomes `"L'Albero Di Natale"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut after_letter = false;
    for ch in value.chars() {
        if after_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        after_letter = ch.is_alphabetic();
    }
    out
}

/// Collapse runs of whitespace into single spaces and trim both ends.
pub fn squash_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Display width used for column alignment (one column per `char`).
pub fn width(value: &str) -> usize {
    value.chars().count()
}
