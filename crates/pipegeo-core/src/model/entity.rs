// crates/pipegeo-core/src/model/entity.rs
use crate::common::EntityId;
use crate::error::Result;
use crate::label::Language;
use crate::model::GeoPoint;
use crate::traits::Designated;
use serde::{Deserialize, Serialize};

/// A country. Independent of the State subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: EntityId,
    /// 2–3 letters, e.g. "DZ" or "DZA".
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
}

/// Top level of the administrative chain (wilaya / province).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
    pub state_id: EntityId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
    pub district_id: EntityId,
}

/// A named point, optionally attached to a locality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: EntityId,
    pub sequence: i64,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub locality_id: Option<EntityId>,
}

/// Operational zone. No structural parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
}

/// Loose designation bag for partial DTOs and ad-hoc labels.
///
/// Every field is optional; it still resolves to a label through
/// [`LabelResolver`](crate::LabelResolver).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
}

macro_rules! designation_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn with_ar(mut self, s: impl Into<String>) -> Self {
                self.designation_ar = Some(s.into());
                self
            }

            pub fn with_en(mut self, s: impl Into<String>) -> Self {
                self.designation_en = Some(s.into());
                self
            }

            pub fn with_fr(mut self, s: impl Into<String>) -> Self {
                self.designation_fr = Some(s.into());
                self
            }

            fn designation_field(&self, language: Language) -> Option<&str> {
                match language {
                    Language::Ar => self.designation_ar.as_deref(),
                    Language::En => self.designation_en.as_deref(),
                    Language::Fr => self.designation_fr.as_deref(),
                }
            }
        }
    };
}

macro_rules! impl_coded {
    ($ty:ty) => {
        designation_builders!($ty);

        impl Designated for $ty {
            #[inline]
            fn id(&self) -> Option<EntityId> {
                Some(self.id)
            }

            #[inline]
            fn code(&self) -> Option<&str> {
                Some(&self.code)
            }

            #[inline]
            fn designation(&self, language: Language) -> Option<&str> {
                self.designation_field(language)
            }
        }
    };
}

impl_coded!(Country);
impl_coded!(State);
impl_coded!(District);
impl_coded!(Locality);
impl_coded!(Zone);
designation_builders!(Location);
designation_builders!(Designation);

impl Designated for Location {
    #[inline]
    fn id(&self) -> Option<EntityId> {
        Some(self.id)
    }

    fn code(&self) -> Option<&str> {
        None
    }

    #[inline]
    fn designation(&self, language: Language) -> Option<&str> {
        self.designation_field(language)
    }
}

impl Designated for Designation {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn designation(&self, language: Language) -> Option<&str> {
        self.designation_field(language)
    }
}

impl Country {
    pub fn new(id: EntityId, code: impl Into<String>) -> Self {
        Country {
            id,
            code: code.into(),
            designation_ar: None,
            designation_en: None,
            designation_fr: None,
        }
    }
}

impl State {
    pub fn new(id: EntityId, code: impl Into<String>) -> Self {
        State {
            id,
            code: code.into(),
            designation_ar: None,
            designation_en: None,
            designation_fr: None,
        }
    }
}

impl District {
    pub fn new(id: EntityId, code: impl Into<String>, state_id: EntityId) -> Self {
        District {
            id,
            code: code.into(),
            designation_ar: None,
            designation_en: None,
            designation_fr: None,
            state_id,
        }
    }
}

impl Locality {
    pub fn new(id: EntityId, code: impl Into<String>, district_id: EntityId) -> Self {
        Locality {
            id,
            code: code.into(),
            designation_ar: None,
            designation_en: None,
            designation_fr: None,
            district_id,
        }
    }
}

impl Zone {
    pub fn new(id: EntityId, code: impl Into<String>) -> Self {
        Zone {
            id,
            code: code.into(),
            designation_ar: None,
            designation_en: None,
            designation_fr: None,
        }
    }
}

impl Location {
    /// Builds a location, rejecting out-of-range or non-finite coordinates.
    pub fn new(id: EntityId, sequence: i64, latitude: f64, longitude: f64) -> Result<Self> {
        GeoPoint::new(latitude, longitude).check()?;
        Ok(Location {
            id,
            sequence,
            designation_ar: None,
            designation_en: None,
            designation_fr: None,
            latitude,
            longitude,
            elevation: None,
            locality_id: None,
        })
    }

    pub fn in_locality(mut self, locality_id: EntityId) -> Self {
        self.locality_id = Some(locality_id);
        self
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl Designation {
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl<T: Designated + ?Sized> From<&T> for Designation {
    fn from(e: &T) -> Self {
        let owned = |l: Language| e.designation(l).map(str::to_owned);
        Designation {
            id: e.id(),
            code: e.code().map(str::to_owned),
            designation_ar: owned(Language::Ar),
            designation_en: owned(Language::En),
            designation_fr: owned(Language::Fr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;

    #[test]
    fn location_rejects_out_of_range() {
        assert!(matches!(
            Location::new(1, 1, 91.0, 0.0),
            Err(GeoError::InvalidLatitude(_))
        ));
        assert!(matches!(
            Location::new(1, 1, 0.0, -180.5),
            Err(GeoError::InvalidLongitude(_))
        ));
        assert!(matches!(
            Location::new(1, 1, f64::NAN, 0.0),
            Err(GeoError::InvalidLatitude(_))
        ));
        assert!(Location::new(1, 1, -90.0, 180.0).is_ok());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let d: District = serde_json::from_str(
            r#"{"id":4,"code":"D04","designationFr":"Dar El Beida","stateId":16}"#,
        )
        .unwrap();
        assert_eq!(d.state_id, 16);
        assert_eq!(d.designation_fr.as_deref(), Some("Dar El Beida"));
        assert_eq!(d.designation_ar, None);
    }

    #[test]
    fn designation_copies_fields() {
        let s = State::new(16, "16").with_fr("Alger").with_ar("الجزائر");
        let bag = Designation::from(&s);
        assert_eq!(bag.id, Some(16));
        assert_eq!(bag.code.as_deref(), Some("16"));
        assert_eq!(bag.designation_fr.as_deref(), Some("Alger"));
        assert_eq!(bag.designation_en, None);
    }
}
