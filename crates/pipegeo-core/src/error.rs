// crates/pipegeo-core/src/error.rs
use crate::common::{EntityId, EntityKind};
use crate::model::FieldError;
use crate::route::RouteError;
use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

/// Every failure the core can report.
///
/// Lookup failures (`NotFound`, `DanglingReference`) are kept apart from
/// "nothing selected yet" states so a broken foreign key never looks like an
/// empty form field.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("{kind} {id} references missing {target} {target_id}")]
    DanglingReference {
        kind: EntityKind,
        id: EntityId,
        target: EntityKind,
        target_id: EntityId,
    },

    #[error("cannot choose a {level} before its parent is chosen")]
    SelectionOutOfOrder { level: EntityKind },

    #[error("{kind} {id} is not a candidate under the current selection")]
    NotACandidate { kind: EntityKind, id: EntityId },

    #[error("selection is incomplete: no {missing} chosen")]
    IncompleteSelection { missing: EntityKind },

    #[error("selection is inconsistent: {0}")]
    InconsistentSelection(String),

    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("invalid route: {}", join_display(.0))]
    InvalidRoute(Vec<RouteError>),

    #[error("invalid records: {}", join_display(.0))]
    InvalidEntity(Vec<FieldError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl GeoError {
    /// True for both flavours of unresolvable reference.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GeoError::NotFound { .. } | GeoError::DanglingReference { .. }
        )
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for GeoError {
    fn from(e: serde_json::Error) -> Self {
        GeoError::Json(Box::new(e))
    }
}

fn join_display<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_reference_counts_as_not_found() {
        let err = GeoError::DanglingReference {
            kind: EntityKind::District,
            id: 4,
            target: EntityKind::State,
            target_id: 99,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "district 4 references missing state 99");
    }

    #[test]
    fn selection_errors_are_not_lookups() {
        let err = GeoError::SelectionOutOfOrder {
            level: EntityKind::Locality,
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn route_errors_are_listed_in_message() {
        let err = GeoError::InvalidRoute(vec![
            RouteError::TooFewCoordinates { count: 1 },
            RouteError::MissingInfrastructure { position: 1 },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("at least 2 coordinates"));
        assert!(msg.contains("coordinate 1"));
    }
}
