// crates/pipegeo-core/src/model/validate.rs
use super::entity::{Country, District, Locality, Location, State, Zone};
use crate::common::{EntityId, EntityKind};
use crate::model::GeoPoint;
use crate::text::non_blank;
use crate::traits::Validate;
use thiserror::Error;

/// Longest code accepted for states, districts and localities.
pub const MAX_CODE_LEN: usize = 10;

/// One problem found on one record.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} {}: {field} {message}", display_id(.id))]
pub struct FieldError {
    pub kind: EntityKind,
    pub id: Option<EntityId>,
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(
        kind: EntityKind,
        id: Option<EntityId>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        FieldError {
            kind,
            id,
            field,
            message: message.into(),
        }
    }
}

fn display_id(id: &Option<EntityId>) -> String {
    id.map_or_else(|| "(new)".to_string(), |v| v.to_string())
}

fn check_short_code(kind: EntityKind, id: EntityId, code: &str, out: &mut Vec<FieldError>) {
    if code.trim().is_empty() {
        out.push(FieldError::new(kind, Some(id), "code", "is required"));
    } else if code.chars().count() > MAX_CODE_LEN {
        out.push(FieldError::new(
            kind,
            Some(id),
            "code",
            format!("must be at most {MAX_CODE_LEN} characters, got {code:?}"),
        ));
    }
}

fn check_french(kind: EntityKind, id: EntityId, fr: Option<&str>, out: &mut Vec<FieldError>) {
    if non_blank(fr).is_none() {
        out.push(FieldError::new(kind, Some(id), "designationFr", "is required"));
    }
}

impl Validate for Country {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        let len = self.code.chars().count();
        if !(2..=3).contains(&len) || !self.code.chars().all(|c| c.is_ascii_alphabetic()) {
            out.push(FieldError::new(
                EntityKind::Country,
                Some(self.id),
                "code",
                format!("must be 2 or 3 letters, got {:?}", self.code),
            ));
        }
        check_french(
            EntityKind::Country,
            self.id,
            self.designation_fr.as_deref(),
            &mut out,
        );
        out
    }
}

impl Validate for State {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        check_short_code(EntityKind::State, self.id, &self.code, &mut out);
        check_french(EntityKind::State, self.id, self.designation_fr.as_deref(), &mut out);
        out
    }
}

impl Validate for District {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        check_short_code(EntityKind::District, self.id, &self.code, &mut out);
        check_french(
            EntityKind::District,
            self.id,
            self.designation_fr.as_deref(),
            &mut out,
        );
        out
    }
}

impl Validate for Locality {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        check_short_code(EntityKind::Locality, self.id, &self.code, &mut out);
        check_french(
            EntityKind::Locality,
            self.id,
            self.designation_fr.as_deref(),
            &mut out,
        );
        out
    }
}

impl Validate for Zone {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        if self.code.trim().is_empty() {
            out.push(FieldError::new(EntityKind::Zone, Some(self.id), "code", "is required"));
        }
        check_french(EntityKind::Zone, self.id, self.designation_fr.as_deref(), &mut out);
        out
    }
}

impl Validate for Location {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        let id = Some(self.id);
        let p = GeoPoint::new(self.latitude, self.longitude);
        if self.sequence <= 0 {
            out.push(FieldError::new(
                EntityKind::Location,
                id,
                "sequence",
                format!("must be positive, got {}", self.sequence),
            ));
        }
        if !p.latitude_in_range() {
            out.push(FieldError::new(
                EntityKind::Location,
                id,
                "latitude",
                format!("{} is outside [-90, 90]", self.latitude),
            ));
        }
        if !p.longitude_in_range() {
            out.push(FieldError::new(
                EntityKind::Location,
                id,
                "longitude",
                format!("{} is outside [-180, 180]", self.longitude),
            ));
        }
        if let Some(e) = self.elevation.filter(|e| !e.is_finite()) {
            out.push(FieldError::new(
                EntityKind::Location,
                id,
                "elevation",
                format!("must be a finite number, got {e}"),
            ));
        }
        out
    }
}
