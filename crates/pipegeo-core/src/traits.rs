// crates/pipegeo-core/src/traits.rs
use crate::common::EntityId;
use crate::label::Language;
use crate::model::FieldError;
use crate::text::fold_key;

/// Capability shared by every record that carries localized designations.
///
/// Label resolution depends only on this trait, never on concrete entity
/// types. Implementors expose raw field views; blank handling and fallback
/// order live in [`LabelResolver`](crate::LabelResolver).
///
/// # Examples
/// ```rust
/// use pipegeo_core::traits::Designated;
/// use pipegeo_core::Language;
///
/// struct Site(&'static str);
/// impl Designated for Site {
///     fn id(&self) -> Option<i64> { None }
///     fn code(&self) -> Option<&str> { Some(self.0) }
///     fn designation(&self, _: Language) -> Option<&str> { None }
/// }
///
/// assert!(Site("SK-01").code_matches("sk-01"));
/// ```
pub trait Designated {
    /// Backend identifier, absent on records that were never persisted.
    fn id(&self) -> Option<EntityId>;

    /// Short business code, if the record has one.
    fn code(&self) -> Option<&str>;

    /// Localized designation for `language`, exactly as stored.
    fn designation(&self, language: Language) -> Option<&str>;

    /// Accent-insensitive and case-insensitive code comparison.
    #[inline]
    fn code_matches(&self, q: &str) -> bool {
        self.code().is_some_and(|c| fold_key(c) == fold_key(q))
    }
}

impl<T: Designated + ?Sized> Designated for &T {
    #[inline]
    fn id(&self) -> Option<EntityId> {
        (**self).id()
    }

    #[inline]
    fn code(&self) -> Option<&str> {
        (**self).code()
    }

    #[inline]
    fn designation(&self, language: Language) -> Option<&str> {
        (**self).designation(language)
    }
}

/// Field-level checks for records received from the backend.
///
/// All problems are collected; an empty list means the record is valid.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
