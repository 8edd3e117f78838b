// crates/pipegeo-core/src/hierarchy.rs

//! # Hierarchy Index
//!
//! Read-only view over one snapshot of the administrative chain
//! (State → District → Locality → Location), plus the independent country
//! list.
//!
//! Records live in flat vectors; ids map to positions and every
//! parent → children relation is grouped once at construction, so both
//! lookups and children queries are a single hash probe. The index is never
//! mutated: a fresh snapshot means a fresh index.

use crate::common::{EntityId, EntityKind, IndexStats};
use crate::error::{GeoError, Result};
use crate::model::{Country, District, Locality, Location, State};
use log::{debug, warn};
use std::collections::HashMap;

/// A locality with its resolved parents. Never partially filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ancestry<'a> {
    pub locality: &'a Locality,
    pub district: &'a District,
    pub state: &'a State,
}

/// A location with the full chain above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationAncestry<'a> {
    pub location: &'a Location,
    pub ancestry: Ancestry<'a>,
}

/// Accumulates flat lists before freezing them into a [`HierarchyIndex`].
#[derive(Debug, Default)]
pub struct HierarchyIndexBuilder {
    countries: Vec<Country>,
    states: Vec<State>,
    districts: Vec<District>,
    localities: Vec<Locality>,
    locations: Vec<Location>,
}

impl HierarchyIndexBuilder {
    pub fn countries(mut self, countries: impl IntoIterator<Item = Country>) -> Self {
        self.countries.extend(countries);
        self
    }

    pub fn states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn districts(mut self, districts: impl IntoIterator<Item = District>) -> Self {
        self.districts.extend(districts);
        self
    }

    pub fn localities(mut self, localities: impl IntoIterator<Item = Locality>) -> Self {
        self.localities.extend(localities);
        self
    }

    pub fn locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    pub fn build(self) -> HierarchyIndex {
        let (countries, country_by_id) = keep_first(EntityKind::Country, self.countries, |c| c.id);
        let (states, state_by_id) = keep_first(EntityKind::State, self.states, |s| s.id);
        let (districts, district_by_id) =
            keep_first(EntityKind::District, self.districts, |d| d.id);
        let (localities, locality_by_id) =
            keep_first(EntityKind::Locality, self.localities, |l| l.id);
        let (locations, location_by_id) =
            keep_first(EntityKind::Location, self.locations, |l| l.id);

        let districts_by_state = group_by(&districts, |d| Some(d.state_id));
        let localities_by_district = group_by(&localities, |l| Some(l.district_id));
        let locations_by_locality = group_by(&locations, |l| l.locality_id);

        let index = HierarchyIndex {
            countries,
            states,
            districts,
            localities,
            locations,
            country_by_id,
            state_by_id,
            district_by_id,
            locality_by_id,
            location_by_id,
            districts_by_state,
            localities_by_district,
            locations_by_locality,
        };

        let stats = index.stats();
        debug!(
            "hierarchy index built: {} countries, {} states, {} districts, {} localities, {} locations",
            stats.countries, stats.states, stats.districts, stats.localities, stats.locations
        );
        let dangling = index.integrity_report();
        if !dangling.is_empty() {
            warn!(
                "hierarchy index has {} dangling parent reference(s), first: {}",
                dangling.len(),
                dangling[0]
            );
        }
        index
    }
}

/// Drops records whose id was already seen. The first occurrence wins.
fn keep_first<T>(
    kind: EntityKind,
    items: Vec<T>,
    id_of: impl Fn(&T) -> EntityId,
) -> (Vec<T>, HashMap<EntityId, usize>) {
    let mut by_id = HashMap::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let id = id_of(&item);
        if by_id.contains_key(&id) {
            warn!("duplicate {kind} id {id} ignored");
            continue;
        }
        by_id.insert(id, kept.len());
        kept.push(item);
    }
    (kept, by_id)
}

/// Parent id -> child positions, in input order.
fn group_by<T>(
    items: &[T],
    parent_of: impl Fn(&T) -> Option<EntityId>,
) -> HashMap<EntityId, Vec<usize>> {
    let mut map: HashMap<EntityId, Vec<usize>> = HashMap::new();
    for (pos, item) in items.iter().enumerate() {
        if let Some(parent) = parent_of(item) {
            map.entry(parent).or_default().push(pos);
        }
    }
    map
}

/// Immutable index over one snapshot.
///
/// # Examples
/// ```rust
/// use pipegeo_core::{District, HierarchyIndex, Locality, State};
///
/// let index = HierarchyIndex::new(
///     vec![State::new(16, "16").with_fr("Alger")],
///     vec![District::new(1601, "1601", 16).with_fr("Sidi M'Hamed")],
///     vec![Locality::new(160101, "160101", 1601).with_fr("Alger Centre")],
/// );
///
/// let chain = index.ancestry_of_locality(160101).unwrap();
/// assert_eq!(chain.state.id, 16);
/// assert_eq!(index.districts_of_state(16).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    countries: Vec<Country>,
    states: Vec<State>,
    districts: Vec<District>,
    localities: Vec<Locality>,
    locations: Vec<Location>,

    country_by_id: HashMap<EntityId, usize>,
    state_by_id: HashMap<EntityId, usize>,
    district_by_id: HashMap<EntityId, usize>,
    locality_by_id: HashMap<EntityId, usize>,
    location_by_id: HashMap<EntityId, usize>,

    districts_by_state: HashMap<EntityId, Vec<usize>>,
    localities_by_district: HashMap<EntityId, Vec<usize>>,
    locations_by_locality: HashMap<EntityId, Vec<usize>>,
}

impl HierarchyIndex {
    pub fn builder() -> HierarchyIndexBuilder {
        HierarchyIndexBuilder::default()
    }

    /// Index over the State subtree only.
    pub fn new(states: Vec<State>, districts: Vec<District>, localities: Vec<Locality>) -> Self {
        Self::builder()
            .states(states)
            .districts(districts)
            .localities(localities)
            .build()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            countries: self.countries.len(),
            states: self.states.len(),
            districts: self.districts.len(),
            localities: self.localities.len(),
            locations: self.locations.len(),
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn country(&self, id: EntityId) -> Option<&Country> {
        self.country_by_id.get(&id).map(|&i| &self.countries[i])
    }

    /// Find a country by its code, case-insensitive (e.g. "DZ", "dza").
    pub fn country_by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn state(&self, id: EntityId) -> Option<&State> {
        self.state_by_id.get(&id).map(|&i| &self.states[i])
    }

    pub fn district(&self, id: EntityId) -> Option<&District> {
        self.district_by_id.get(&id).map(|&i| &self.districts[i])
    }

    pub fn locality(&self, id: EntityId) -> Option<&Locality> {
        self.locality_by_id.get(&id).map(|&i| &self.localities[i])
    }

    pub fn location(&self, id: EntityId) -> Option<&Location> {
        self.location_by_id.get(&id).map(|&i| &self.locations[i])
    }

    // -----------------------------------------------------------------------
    // Parent -> children
    // -----------------------------------------------------------------------

    /// Districts whose `state_id` is `state_id`, in snapshot order.
    pub fn districts_of_state(&self, state_id: EntityId) -> Vec<&District> {
        children(&self.districts_by_state, &self.districts, state_id)
    }

    /// Localities whose `district_id` is `district_id`, in snapshot order.
    pub fn localities_of_district(&self, district_id: EntityId) -> Vec<&Locality> {
        children(&self.localities_by_district, &self.localities, district_id)
    }

    pub fn locations_of_locality(&self, locality_id: EntityId) -> Vec<&Location> {
        children(&self.locations_by_locality, &self.locations, locality_id)
    }

    // -----------------------------------------------------------------------
    // Child -> ancestors
    // -----------------------------------------------------------------------

    /// A district and its state.
    pub fn ancestry_of_district(&self, district_id: EntityId) -> Result<(&District, &State)> {
        let district = self.district(district_id).ok_or(GeoError::NotFound {
            kind: EntityKind::District,
            id: district_id,
        })?;
        let state = self
            .state(district.state_id)
            .ok_or(GeoError::DanglingReference {
                kind: EntityKind::District,
                id: district.id,
                target: EntityKind::State,
                target_id: district.state_id,
            })?;
        Ok((district, state))
    }

    /// The full chain above a locality.
    ///
    /// Fails if the locality or any ancestor cannot be resolved; a chain is
    /// never returned with a gap in it.
    pub fn ancestry_of_locality(&self, locality_id: EntityId) -> Result<Ancestry<'_>> {
        let locality = self.locality(locality_id).ok_or(GeoError::NotFound {
            kind: EntityKind::Locality,
            id: locality_id,
        })?;
        let (district, state) = self
            .ancestry_of_district(locality.district_id)
            .map_err(|e| match e {
                GeoError::NotFound { .. } => GeoError::DanglingReference {
                    kind: EntityKind::Locality,
                    id: locality.id,
                    target: EntityKind::District,
                    target_id: locality.district_id,
                },
                other => other,
            })?;
        Ok(Ancestry {
            locality,
            district,
            state,
        })
    }

    /// The chain above a location; `Ok(None)` if it is not attached to a
    /// locality.
    pub fn ancestry_of_location(&self, location_id: EntityId) -> Result<Option<LocationAncestry<'_>>> {
        let location = self.location(location_id).ok_or(GeoError::NotFound {
            kind: EntityKind::Location,
            id: location_id,
        })?;
        let Some(locality_id) = location.locality_id else {
            return Ok(None);
        };
        let ancestry = self
            .ancestry_of_locality(locality_id)
            .map_err(|e| match e {
                GeoError::NotFound { .. } => GeoError::DanglingReference {
                    kind: EntityKind::Location,
                    id: location.id,
                    target: EntityKind::Locality,
                    target_id: locality_id,
                },
                other => other,
            })?;
        Ok(Some(LocationAncestry { location, ancestry }))
    }

    /// Every parent reference that does not resolve in this snapshot.
    pub fn integrity_report(&self) -> Vec<GeoError> {
        let mut out = Vec::new();
        for d in &self.districts {
            if self.state(d.state_id).is_none() {
                out.push(GeoError::DanglingReference {
                    kind: EntityKind::District,
                    id: d.id,
                    target: EntityKind::State,
                    target_id: d.state_id,
                });
            }
        }
        for l in &self.localities {
            if self.district(l.district_id).is_none() {
                out.push(GeoError::DanglingReference {
                    kind: EntityKind::Locality,
                    id: l.id,
                    target: EntityKind::District,
                    target_id: l.district_id,
                });
            }
        }
        for loc in &self.locations {
            if let Some(lid) = loc.locality_id {
                if self.locality(lid).is_none() {
                    out.push(GeoError::DanglingReference {
                        kind: EntityKind::Location,
                        id: loc.id,
                        target: EntityKind::Locality,
                        target_id: lid,
                    });
                }
            }
        }
        out
    }
}

fn children<'a, T>(
    adjacency: &HashMap<EntityId, Vec<usize>>,
    items: &'a [T],
    parent: EntityId,
) -> Vec<&'a T> {
    adjacency
        .get(&parent)
        .map(|positions| positions.iter().map(|&i| &items[i]).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HierarchyIndex {
        HierarchyIndex::builder()
            .countries(vec![Country::new(1, "DZ").with_fr("Algérie")])
            .states(vec![
                State::new(16, "16").with_fr("Alger"),
                State::new(31, "31").with_fr("Oran"),
            ])
            .districts(vec![
                District::new(1601, "1601", 16).with_fr("Sidi M'Hamed"),
                District::new(3101, "3101", 31).with_fr("Oran"),
                District::new(1602, "1602", 16).with_fr("Bab El Oued"),
                District::new(9901, "9901", 99).with_fr("Orphan"),
            ])
            .localities(vec![
                Locality::new(1, "L1", 1601).with_fr("Alger Centre"),
                Locality::new(2, "L2", 1602).with_fr("Bab El Oued"),
                Locality::new(3, "L3", 9901).with_fr("Nowhere"),
                Locality::new(4, "L4", 7777).with_fr("Lost"),
            ])
            .locations(vec![
                Location::new(10, 1, 36.77, 3.06).unwrap().in_locality(1),
                Location::new(11, 2, 36.79, 3.05).unwrap(),
                Location::new(12, 3, 35.0, 1.0).unwrap().in_locality(404),
            ])
            .build()
    }

    #[test]
    fn children_match_parent_and_keep_order() {
        let idx = sample();
        let ids: Vec<_> = idx.districts_of_state(16).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1601, 1602]);
        assert!(idx.districts_of_state(16).iter().all(|d| d.state_id == 16));
        assert_eq!(idx.localities_of_district(1602)[0].id, 2);
        assert!(idx.districts_of_state(12345).is_empty());
        assert_eq!(idx.locations_of_locality(1).len(), 1);
    }

    #[test]
    fn ancestry_resolves_full_chain() {
        let idx = sample();
        let a = idx.ancestry_of_locality(1).unwrap();
        assert_eq!((a.locality.id, a.district.id, a.state.id), (1, 1601, 16));
    }

    #[test]
    fn ancestry_with_stateless_district_is_not_found() {
        let idx = sample();
        let err = idx.ancestry_of_locality(3).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            GeoError::DanglingReference {
                kind: EntityKind::District,
                id: 9901,
                target: EntityKind::State,
                target_id: 99,
            }
        ));
    }

    #[test]
    fn ancestry_with_missing_district_names_the_locality() {
        let idx = sample();
        assert!(matches!(
            idx.ancestry_of_locality(4),
            Err(GeoError::DanglingReference {
                kind: EntityKind::Locality,
                id: 4,
                target: EntityKind::District,
                target_id: 7777,
            })
        ));
        assert!(matches!(
            idx.ancestry_of_locality(5),
            Err(GeoError::NotFound {
                kind: EntityKind::Locality,
                id: 5
            })
        ));
    }

    #[test]
    fn location_ancestry() {
        let idx = sample();
        let la = idx.ancestry_of_location(10).unwrap().unwrap();
        assert_eq!(la.ancestry.state.id, 16);
        assert!(idx.ancestry_of_location(11).unwrap().is_none());
        assert!(matches!(
            idx.ancestry_of_location(12),
            Err(GeoError::DanglingReference {
                kind: EntityKind::Location,
                target_id: 404,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let idx = HierarchyIndex::new(
            vec![
                State::new(1, "01").with_fr("Adrar"),
                State::new(1, "XX").with_fr("Duplicate"),
            ],
            vec![],
            vec![],
        );
        assert_eq!(idx.stats().states, 1);
        assert_eq!(idx.state(1).map(|s| s.code.as_str()), Some("01"));
    }

    #[test]
    fn integrity_report_lists_every_dangling_reference() {
        let report = sample().integrity_report();
        assert_eq!(report.len(), 3);
        assert!(report.iter().all(GeoError::is_not_found));
    }

    #[test]
    fn country_lookup_is_case_insensitive() {
        let idx = sample();
        assert_eq!(idx.country_by_code("dz").map(|c| c.id), Some(1));
        assert!(idx.country_by_code(" ").is_none());
        assert_eq!(idx.country(1).map(|c| c.code.as_str()), Some("DZ"));
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HierarchyIndex>();
    }
}
