// crates/pipegeo-core/src/label.rs

//! # Label Resolution
//!
//! Turns any [`Designated`] record into a display string for a requested
//! language. Resolution is pure: the language is always an explicit
//! argument and nothing here can fail.

use crate::text::{compare_folded, fold_key, non_blank};
use crate::traits::Designated;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages carried by designation fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
    /// The designation every record is required to carry.
    #[default]
    Fr,
}

impl Language {
    /// Parses a free-form locale tag (`"fr-FR"`, `"ar"`, `"EN_us"`).
    ///
    /// Only the first two characters count; anything else is `None`.
    ///
    /// ```rust
    /// use pipegeo_core::Language;
    ///
    /// assert_eq!(Language::from_tag("fr-FR"), Some(Language::Fr));
    /// assert_eq!(Language::from_tag("EN_us"), Some(Language::En));
    /// assert_eq!(Language::from_tag("de"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Language> {
        let prefix: String = tag.trim().chars().take(2).collect();
        match prefix.to_lowercase().as_str() {
            "ar" => Some(Language::Ar),
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    /// Lookup order rooted at this language.
    pub const fn fallback_chain(self) -> [Language; 3] {
        match self {
            Language::Ar => [Language::Ar, Language::Fr, Language::En],
            Language::En => [Language::En, Language::Fr, Language::Ar],
            Language::Fr => [Language::Fr, Language::En, Language::Ar],
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Runtime settings for [`LabelResolver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Used when the requested tag is missing or unrecognised.
    #[serde(default)]
    pub base_language: Language,
}

/// Resolves display labels with a deterministic fallback.
///
/// Order: requested language, the two others in the fixed order of
/// [`Language::fallback_chain`], then `code`, then `id`. Blank fields are
/// skipped.
///
/// # Examples
/// ```rust
/// use pipegeo_core::{Designation, LabelResolver};
///
/// let resolver = LabelResolver::default();
///
/// let only_fr = Designation::default().with_fr("Alger");
/// assert_eq!(resolver.resolve(&only_fr, "ar"), "Alger");
///
/// let only_id = Designation::default().with_id(7);
/// assert_eq!(resolver.resolve(&only_id, "en"), "7");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelResolver {
    base_language: Language,
}

impl LabelResolver {
    pub fn new(base_language: Language) -> Self {
        LabelResolver { base_language }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.base_language)
    }

    pub fn base_language(&self) -> Language {
        self.base_language
    }

    /// Two-letter language for `tag`, or the base language.
    pub fn normalize(&self, tag: &str) -> Language {
        Language::from_tag(tag).unwrap_or(self.base_language)
    }

    /// Label for `entity` under the locale tag `language`.
    pub fn resolve<T: Designated + ?Sized>(&self, entity: &T, language: &str) -> String {
        self.label(entity, self.normalize(language))
    }

    /// Like [`resolve`](Self::resolve); a missing entity yields `""`.
    pub fn resolve_opt<T: Designated>(&self, entity: Option<&T>, language: &str) -> String {
        entity.map_or_else(String::new, |e| self.resolve(e, language))
    }

    /// Label for an already normalized language.
    pub fn label<T: Designated + ?Sized>(&self, entity: &T, language: Language) -> String {
        language
            .fallback_chain()
            .into_iter()
            .find_map(|l| non_blank(entity.designation(l)))
            .or_else(|| non_blank(entity.code()))
            .map(str::to_owned)
            .or_else(|| entity.id().map(|id| id.to_string()))
            .unwrap_or_default()
    }

    /// Stable sort by resolved label.
    ///
    /// Latin labels ignore accents and case; Arabic labels keep their
    /// alphabetical order (see [`compare_folded`]).
    pub fn sort_by_label<'a, T, I>(&self, items: I, language: &str) -> Vec<&'a T>
    where
        T: Designated + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let lang = self.normalize(language);
        let mut keyed: Vec<(String, &'a T)> = items
            .into_iter()
            .map(|item| (self.label(item, lang), item))
            .collect();
        // slice::sort_by is stable
        keyed.sort_by(|a, b| compare_folded(&a.0, &b.0));
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    /// Items whose label or code contains `term`, ignoring case and accents.
    ///
    /// A blank term keeps everything.
    pub fn filter_by_label<'a, T, I>(&self, items: I, term: &str, language: &str) -> Vec<&'a T>
    where
        T: Designated + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let q = fold_key(term.trim());
        if q.is_empty() {
            return items.into_iter().collect();
        }
        let lang = self.normalize(language);
        items
            .into_iter()
            .filter(|item| {
                fold_key(&self.label(*item, lang)).contains(&q)
                    || item.code().is_some_and(|c| fold_key(c).contains(&q))
            })
            .collect()
    }
}
