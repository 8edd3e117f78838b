// crates/pipegeo-core/src/route.rs

//! # Route Model
//!
//! Waypoints of one linear asset: validation, sequencing and great-circle
//! geometry. Routes are small and hand-curated, so every operation is a
//! plain linear pass.
//!
//! Validation reports the complete list of problems. Geometry never fails:
//! degenerate input yields `0.0` or `None`.

use crate::common::EntityId;
use crate::error::{GeoError, Result};
use crate::model::{Coordinate, GeoPoint};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Mean Earth radius used by [`haversine_distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minimum number of waypoints for a usable route.
pub const MIN_ROUTE_POINTS: usize = 2;

/// One problem in a coordinate list. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route requires at least 2 coordinates, got {count}")]
    TooFewCoordinates { count: usize },

    #[error("duplicate sequence {sequence} at coordinates {}", join_positions(.positions))]
    DuplicateSequence {
        sequence: i64,
        positions: Vec<usize>,
    },

    #[error("coordinate {position}: sequence must be positive, got {sequence}")]
    NonPositiveSequence { position: usize, sequence: i64 },

    #[error("coordinate {position}: latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange { position: usize, latitude: f64 },

    #[error("coordinate {position}: longitude {longitude} is outside [-180, 180]")]
    LongitudeOutOfRange { position: usize, longitude: f64 },

    #[error("coordinate {position}: elevation must be a finite number, got {elevation}")]
    ElevationNotFinite { position: usize, elevation: f64 },

    #[error("coordinate {position}: infrastructureId is required")]
    MissingInfrastructure { position: usize },

    #[error("coordinate {position}: belongs to infrastructure {found}, expected {expected}")]
    MixedInfrastructure {
        position: usize,
        expected: EntityId,
        found: EntityId,
    },
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks a coordinate list against every route rule at once.
///
/// Nothing short-circuits: the returned list holds one entry per problem,
/// in a stable order (size, duplicates, then per-coordinate checks).
///
/// ```rust
/// use pipegeo_core::route::{validate_route, RouteError};
/// use pipegeo_core::Coordinate;
///
/// let errs = validate_route(&[Coordinate::new(1, 36.7, 3.0).on_infrastructure(5)]).unwrap_err();
/// assert_eq!(errs, vec![RouteError::TooFewCoordinates { count: 1 }]);
/// ```
pub fn validate_route(coords: &[Coordinate]) -> std::result::Result<(), Vec<RouteError>> {
    let mut errors = Vec::new();

    if coords.len() < MIN_ROUTE_POINTS {
        errors.push(RouteError::TooFewCoordinates {
            count: coords.len(),
        });
    }

    let mut by_sequence: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, c) in coords.iter().enumerate() {
        by_sequence.entry(c.sequence).or_default().push(i + 1);
    }
    for (sequence, positions) in by_sequence {
        if positions.len() > 1 {
            errors.push(RouteError::DuplicateSequence {
                sequence,
                positions,
            });
        }
    }

    let owner = coords.iter().find_map(|c| c.infrastructure_id);
    for (i, c) in coords.iter().enumerate() {
        let position = i + 1;
        let p = c.point();
        if c.sequence <= 0 {
            errors.push(RouteError::NonPositiveSequence {
                position,
                sequence: c.sequence,
            });
        }
        if !p.latitude_in_range() {
            errors.push(RouteError::LatitudeOutOfRange {
                position,
                latitude: c.latitude,
            });
        }
        if !p.longitude_in_range() {
            errors.push(RouteError::LongitudeOutOfRange {
                position,
                longitude: c.longitude,
            });
        }
        if let Some(elevation) = c.elevation.filter(|e| !e.is_finite()) {
            errors.push(RouteError::ElevationNotFinite {
                position,
                elevation,
            });
        }
        match (c.infrastructure_id, owner) {
            (None, _) => errors.push(RouteError::MissingInfrastructure { position }),
            (Some(found), Some(expected)) if found != expected => {
                errors.push(RouteError::MixedInfrastructure {
                    position,
                    expected,
                    found,
                })
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Copy of `coords` in ascending sequence order; equal sequences keep
/// their input order.
pub fn sort_by_sequence(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut sorted = coords.to_vec();
    sorted.sort_by_key(|c| c.sequence);
    sorted
}

/// Sorted copy renumbered `1..=n`.
pub fn resequence(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut sorted = sort_by_sequence(coords);
    for (seq, c) in (1..).zip(sorted.iter_mut()) {
        c.sequence = seq;
    }
    sorted
}

/// Sequence number for a waypoint appended at the end of the route.
pub fn next_sequence(coords: &[Coordinate]) -> i64 {
    coords
        .iter()
        .map(|c| c.sequence)
        .max()
        .map_or(1, |max| max.max(0) + 1)
}

/// Great-circle distance in kilometres (Haversine, radius 6371 km).
///
/// Inputs are degrees.
///
/// ```rust
/// use pipegeo_core::route::haversine_distance_km;
///
/// let algiers = (36.75, 3.06);
/// assert!(haversine_distance_km(algiers, algiers).abs() < 1e-9);
/// let oran = (35.70, -0.63);
/// let d = haversine_distance_km(algiers, oran);
/// assert!((d - 353.0).abs() < 5.0);
/// ```
pub fn haversine_distance_km(a: impl Into<GeoPoint>, b: impl Into<GeoPoint>) -> f64 {
    let (a, b) = (a.into(), b.into());
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push h just past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Length of the route in kilometres, walking waypoints in sequence order.
/// Fewer than two points measure `0.0`.
pub fn total_route_length(coords: &[Coordinate]) -> f64 {
    if coords.len() < MIN_ROUTE_POINTS {
        return 0.0;
    }
    sort_by_sequence(coords)
        .windows(2)
        .map(|w| haversine_distance_km(&w[0], &w[1]))
        .sum()
}

/// Distance from the route start to each waypoint, in sequence order.
pub fn cumulative_distances(coords: &[Coordinate]) -> Vec<(i64, f64)> {
    let sorted = sort_by_sequence(coords);
    let mut out = Vec::with_capacity(sorted.len());
    let mut acc = 0.0;
    for (i, c) in sorted.iter().enumerate() {
        if i > 0 {
            acc += haversine_distance_km(&sorted[i - 1], c);
        }
        out.push((c.sequence, acc));
    }
    out
}

/// Waypoint closest to `(latitude, longitude)`.
///
/// The first of several equally close waypoints wins. Waypoints whose
/// distance cannot be computed (NaN) are skipped; `None` for empty input.
pub fn nearest_point(coords: &[Coordinate], latitude: f64, longitude: f64) -> Option<&Coordinate> {
    let target = GeoPoint::new(latitude, longitude);
    let mut best: Option<(&Coordinate, f64)> = None;
    for c in coords {
        let d = haversine_distance_km(c, target);
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((c, d)),
        }
    }
    best.map(|(c, _)| c)
}

/// South-west / north-east corners of a set of waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

/// Overview of a validated route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub infrastructure_id: EntityId,
    pub points: usize,
    pub length_km: f64,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub bounds: BoundingBox,
}

/// A validated route, sorted by sequence, for one infrastructure.
///
/// Construction is all-or-nothing: an invalid list is rejected with every
/// problem and no route is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    infrastructure_id: EntityId,
    coords: Vec<Coordinate>,
}

impl Route {
    /// Validates `coords` and checks they all belong to `infrastructure_id`.
    pub fn new(infrastructure_id: EntityId, coords: Vec<Coordinate>) -> Result<Self> {
        // validate_route measures owners against the first one it sees; here
        // the owner is known, so mismatches are recomputed against it.
        let mut errors: Vec<RouteError> = validate_route(&coords)
            .err()
            .unwrap_or_default()
            .into_iter()
            .filter(|e| !matches!(e, RouteError::MixedInfrastructure { .. }))
            .collect();
        for (i, c) in coords.iter().enumerate() {
            match c.infrastructure_id {
                Some(found) if found != infrastructure_id => {
                    errors.push(RouteError::MixedInfrastructure {
                        position: i + 1,
                        expected: infrastructure_id,
                        found,
                    })
                }
                _ => {}
            }
        }
        if !errors.is_empty() {
            debug!(
                "route for infrastructure {infrastructure_id} rejected with {} error(s)",
                errors.len()
            );
            return Err(GeoError::InvalidRoute(errors));
        }
        Ok(Route {
            infrastructure_id,
            coords: sort_by_sequence(&coords),
        })
    }

    pub fn infrastructure_id(&self) -> EntityId {
        self.infrastructure_id
    }

    /// Waypoints in sequence order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn length_km(&self) -> f64 {
        self.coords
            .windows(2)
            .map(|w| haversine_distance_km(&w[0], &w[1]))
            .sum()
    }

    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<&Coordinate> {
        nearest_point(&self.coords, latitude, longitude)
    }

    pub fn summary(&self) -> RouteSummary {
        let first = self.coords[0].point();
        let mut bounds = BoundingBox {
            min: first,
            max: first,
        };
        for p in self.coords.iter().map(Coordinate::point) {
            bounds.min.latitude = bounds.min.latitude.min(p.latitude);
            bounds.min.longitude = bounds.min.longitude.min(p.longitude);
            bounds.max.latitude = bounds.max.latitude.max(p.latitude);
            bounds.max.longitude = bounds.max.longitude.max(p.longitude);
        }
        RouteSummary {
            infrastructure_id: self.infrastructure_id,
            points: self.coords.len(),
            length_km: self.length_km(),
            start: first,
            end: self.coords[self.coords.len() - 1].point(),
            bounds,
        }
    }

    pub fn into_coordinates(self) -> Vec<Coordinate> {
        self.coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(seq: i64, lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(seq, lat, lon).on_infrastructure(1)
    }

    #[test]
    fn single_point_is_too_short() {
        let errs = validate_route(&[c(1, 10.0, 20.0)]).unwrap_err();
        assert!(errs[0].to_string().contains("at least 2 coordinates"));
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn empty_route_is_too_short() {
        assert_eq!(
            validate_route(&[]).unwrap_err(),
            vec![RouteError::TooFewCoordinates { count: 0 }]
        );
    }

    #[test]
    fn duplicate_sequences_are_all_reported() {
        let coords = [
            c(1, 10.0, 20.0),
            c(1, 11.0, 21.0),
            c(2, 12.0, 22.0),
            c(2, 13.0, 23.0),
            c(1, 14.0, 24.0),
        ];
        let errs = validate_route(&coords).unwrap_err();
        assert_eq!(
            errs,
            vec![
                RouteError::DuplicateSequence {
                    sequence: 1,
                    positions: vec![1, 2, 5]
                },
                RouteError::DuplicateSequence {
                    sequence: 2,
                    positions: vec![3, 4]
                },
            ]
        );
        assert_eq!(errs[0].to_string(), "duplicate sequence 1 at coordinates 1, 2, 5");
    }

    #[test]
    fn per_coordinate_errors_are_collected() {
        let coords = [
            Coordinate::new(0, 91.0, 20.0),
            c(2, f64::NAN, f64::INFINITY),
            c(3, 10.0, -181.0).with_elevation(f64::NAN),
        ];
        let errs = validate_route(&coords).unwrap_err();
        // NaN payloads rule out assert_eq on the whole list
        assert!(matches!(
            errs.as_slice(),
            [
                RouteError::NonPositiveSequence {
                    position: 1,
                    sequence: 0
                },
                RouteError::LatitudeOutOfRange { position: 1, .. },
                RouteError::MissingInfrastructure { position: 1 },
                RouteError::LatitudeOutOfRange { position: 2, .. },
                RouteError::LongitudeOutOfRange { position: 2, .. },
                RouteError::LongitudeOutOfRange { position: 3, .. },
                RouteError::ElevationNotFinite { position: 3, .. },
            ]
        ));
        assert_eq!(
            errs[1].to_string(),
            "coordinate 1: latitude 91 is outside [-90, 90]"
        );
    }

    #[test]
    fn mixed_owners_are_rejected() {
        let coords = [c(1, 10.0, 20.0), Coordinate::new(2, 11.0, 21.0).on_infrastructure(2)];
        assert_eq!(
            validate_route(&coords).unwrap_err(),
            vec![RouteError::MixedInfrastructure {
                position: 2,
                expected: 1,
                found: 2
            }]
        );
    }

    #[test]
    fn valid_route_passes() {
        assert!(validate_route(&[c(2, 36.7, 3.0), c(1, 36.8, 3.1)]).is_ok());
    }

    #[test]
    fn sort_is_stable_and_leaves_input() {
        let coords = vec![c(3, 3.0, 0.0), c(1, 1.0, 0.0), c(3, 3.5, 0.0), c(2, 2.0, 0.0)];
        let sorted = sort_by_sequence(&coords);
        let lats: Vec<_> = sorted.iter().map(|c| c.latitude).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0, 3.5]);
        assert_eq!(coords[0].sequence, 3);
    }

    #[test]
    fn resequence_and_next_sequence() {
        let coords = vec![c(30, 3.0, 0.0), c(10, 1.0, 0.0), c(20, 2.0, 0.0)];
        let seqs: Vec<_> = resequence(&coords).iter().map(|c| c.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(next_sequence(&coords), 31);
        assert_eq!(next_sequence(&[]), 1);
        assert_eq!(next_sequence(&[c(-4, 0.0, 0.0)]), 1);
    }

    #[test]
    fn identical_points_are_zero_apart() {
        assert!(haversine_distance_km((36.75, 3.06), (36.75, 3.06)).abs() < 1e-12);
    }

    #[test]
    fn quarter_meridian() {
        let d = haversine_distance_km((0.0, 0.0), (90.0, 0.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn antipodal_points_are_half_a_circumference_apart() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        let d = haversine_distance_km((-87.5, -180.0), (87.5, 0.0));
        assert!(!d.is_nan());
        // within a metre of half the circumference
        assert!((d - half).abs() < 1e-3, "got {d}");

        let coords = vec![c(1, -87.5, -180.0), c(2, 87.5, 0.0)];
        assert!((total_route_length(&coords) - half).abs() < 1e-3);
        assert_eq!(nearest_point(&coords, 87.5, 0.0).map(|c| c.sequence), Some(2));
    }

    #[test]
    fn antipodal_sweep_never_yields_nan() {
        for i in 0..=72 {
            let lat = -90.0 + 2.5 * f64::from(i);
            for j in 0..=72 {
                let lon = -180.0 + 5.0 * f64::from(j);
                let opposite_lon = if lon <= 0.0 { lon + 180.0 } else { lon - 180.0 };
                let d = haversine_distance_km((lat, lon), (-lat, opposite_lon));
                assert!(d.is_finite(), "NaN at ({lat}, {lon})");
            }
        }
    }

    #[test]
    fn length_walks_sorted_points() {
        let a = c(1, 36.75, 3.06);
        let b = c(2, 36.80, 3.20);
        let cc = c(3, 36.90, 3.40);
        let expected = haversine_distance_km(&a, &b) + haversine_distance_km(&b, &cc);
        let shuffled = vec![cc.clone(), a.clone(), b.clone()];
        assert!((total_route_length(&shuffled) - expected).abs() < 1e-9);
        assert!((total_route_length(&sort_by_sequence(&shuffled)) - expected).abs() < 1e-9);
        assert_eq!(total_route_length(&[a]), 0.0);
        assert_eq!(total_route_length(&[]), 0.0);
    }

    #[test]
    fn cumulative_distances_end_at_total() {
        let coords = vec![c(2, 36.80, 3.20), c(1, 36.75, 3.06), c(3, 36.90, 3.40)];
        let cum = cumulative_distances(&coords);
        assert_eq!(cum[0], (1, 0.0));
        assert_eq!(cum.iter().map(|(s, _)| *s).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!((cum[2].1 - total_route_length(&coords)).abs() < 1e-9);
    }

    #[test]
    fn nearest_point_prefers_first_on_tie() {
        assert!(nearest_point(&[], 0.0, 0.0).is_none());
        let coords = vec![c(1, 1.0, 0.0), c(2, -1.0, 0.0), c(3, 5.0, 5.0)];
        assert_eq!(nearest_point(&coords, 0.0, 0.0).map(|c| c.sequence), Some(1));
        assert_eq!(nearest_point(&coords, 4.0, 4.0).map(|c| c.sequence), Some(3));
    }

    #[test]
    fn nearest_point_skips_nan() {
        let coords = vec![c(1, f64::NAN, 0.0), c(2, 10.0, 10.0)];
        assert_eq!(nearest_point(&coords, 0.0, 0.0).map(|c| c.sequence), Some(2));
        assert!(nearest_point(&coords[..1], 0.0, 0.0).is_none());
    }

    #[test]
    fn route_is_all_or_nothing() {
        let err = Route::new(1, vec![c(1, 10.0, 20.0)]).unwrap_err();
        assert!(matches!(err, GeoError::InvalidRoute(ref e) if e.len() == 1));

        let foreign = vec![
            Coordinate::new(1, 10.0, 20.0).on_infrastructure(9),
            Coordinate::new(2, 11.0, 21.0).on_infrastructure(9),
        ];
        match Route::new(1, foreign) {
            Err(GeoError::InvalidRoute(errs)) => assert_eq!(errs.len(), 2),
            other => panic!("expected InvalidRoute, got {other:?}"),
        }
    }

    #[test]
    fn route_summary() {
        let route = Route::new(
            1,
            vec![c(2, 36.80, 3.20), c(1, 36.75, 3.06), c(3, 36.70, 3.40)],
        )
        .unwrap();
        assert_eq!(route.coordinates()[0].sequence, 1);
        let s = route.summary();
        assert_eq!(s.points, 3);
        assert_eq!(s.start, GeoPoint::new(36.75, 3.06));
        assert_eq!(s.end, GeoPoint::new(36.70, 3.40));
        assert_eq!(s.bounds.min, GeoPoint::new(36.70, 3.06));
        assert_eq!(s.bounds.max, GeoPoint::new(36.80, 3.40));
        assert!((s.length_km - total_route_length(route.coordinates())).abs() < 1e-9);
        assert_eq!(route.nearest(36.8, 3.2).map(|c| c.sequence), Some(2));
    }
}
