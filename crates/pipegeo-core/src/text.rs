// crates/pipegeo-core/src/text.rs
use std::borrow::Cow;
use std::cmp::Ordering;

/// Convert a string into a folded key suitable for matching and ordering.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Béjaïa` -> `Bejaia`)
/// 2\) Normalize to lowercase
///
/// Arabic script is transliterated as well, so labels in every supported
/// language fold to comparable keys.
///
/// # Examples
///
/// ```rust
/// use pipegeo_core::text::fold_key;
///
/// assert_eq!(fold_key("Béjaïa"), "bejaia");
/// assert_eq!(fold_key("TIZI OUZOU"), "tizi ouzou");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding.
///
/// ```rust
/// use pipegeo_core::text::equals_folded;
///
/// assert!(equals_folded("Sétif", "SETIF"));
/// assert!(!equals_folded("Oran", "Annaba"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// True if the folded `haystack` contains the folded `needle`.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}

/// Locale-aware ordering used for display lists.
///
/// Latin-script labels compare by their folded form, so `Édough` sorts next
/// to `Edough`. Other scripts (Arabic) compare by code point, which follows
/// their alphabetical order, and sort after Latin labels. The raw strings
/// break ties so the order stays total.
///
/// ```rust
/// use pipegeo_core::text::compare_folded;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_folded("تبسة", "جيجل"), Ordering::Less);
/// assert_eq!(compare_folded("Sétif", "Skikda"), Ordering::Less);
/// ```
pub fn compare_folded(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> (bool, Cow<'_, str>) {
    if is_latin_script(s) {
        (false, Cow::Owned(fold_key(s)))
    } else {
        (true, Cow::Borrowed(s.trim()))
    }
}

/// ASCII, Latin-1, Latin Extended and combining accents only.
fn is_latin_script(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii()
            || matches!(c, '\u{00A0}'..='\u{024F}' | '\u{0300}'..='\u{036F}' | '\u{1E00}'..='\u{1EFF}')
    })
}

/// `None` for missing or whitespace-only text.
#[inline]
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
