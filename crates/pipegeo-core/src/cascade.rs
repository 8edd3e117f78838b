// crates/pipegeo-core/src/cascade.rs

//! # Cascading Selection
//!
//! Drives the dependent State → District → Locality pickers of a form.
//! Each transition clears exactly the selections below it, so a form can
//! never submit a locality that no longer belongs to the chosen district
//! and state.

use crate::common::{EntityId, EntityKind};
use crate::error::{GeoError, Result};
use crate::hierarchy::HierarchyIndex;
use crate::model::{District, Locality, State};
use log::debug;

/// How far a cascade has been filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadePhase {
    Empty,
    StateChosen,
    DistrictChosen,
    LocalityChosen,
}

/// One cascade (birth place, address, pipeline terminal, ...).
///
/// Several selectors can borrow the same [`HierarchyIndex`]; each owns its
/// selection exclusively.
///
/// # Examples
/// ```rust
/// use pipegeo_core::{CascadePhase, CascadeSelector, District, HierarchyIndex, Locality, State};
///
/// let index = HierarchyIndex::new(
///     vec![State::new(16, "16"), State::new(31, "31")],
///     vec![District::new(1601, "1601", 16), District::new(3101, "3101", 31)],
///     vec![Locality::new(1, "L1", 1601)],
/// );
///
/// let mut address = CascadeSelector::new(&index);
/// address.choose_state(Some(16))?;
/// address.choose_district(Some(1601))?;
/// address.choose_locality(Some(1))?;
/// assert_eq!(address.phase(), CascadePhase::LocalityChosen);
/// assert_eq!(address.committed_locality()?, 1);
///
/// address.choose_state(Some(31))?;
/// assert_eq!(address.phase(), CascadePhase::StateChosen);
/// assert!(address.committed_locality().is_err());
/// # Ok::<(), pipegeo_core::GeoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CascadeSelector<'a> {
    index: &'a HierarchyIndex,
    state: Option<&'a State>,
    district: Option<&'a District>,
    locality: Option<&'a Locality>,
    district_candidates: Vec<&'a District>,
    locality_candidates: Vec<&'a Locality>,
}

impl<'a> CascadeSelector<'a> {
    pub fn new(index: &'a HierarchyIndex) -> Self {
        CascadeSelector {
            index,
            state: None,
            district: None,
            locality: None,
            district_candidates: Vec::new(),
            locality_candidates: Vec::new(),
        }
    }

    pub fn phase(&self) -> CascadePhase {
        match (self.state, self.district, self.locality) {
            (Some(_), Some(_), Some(_)) => CascadePhase::LocalityChosen,
            (Some(_), Some(_), None) => CascadePhase::DistrictChosen,
            (Some(_), None, _) => CascadePhase::StateChosen,
            (None, _, _) => CascadePhase::Empty,
        }
    }

    pub fn selected_state(&self) -> Option<&'a State> {
        self.state
    }

    pub fn selected_district(&self) -> Option<&'a District> {
        self.district
    }

    pub fn selected_locality(&self) -> Option<&'a Locality> {
        self.locality
    }

    /// Districts selectable under the chosen state.
    pub fn district_candidates(&self) -> &[&'a District] {
        &self.district_candidates
    }

    /// Localities selectable under the chosen district.
    pub fn locality_candidates(&self) -> &[&'a Locality] {
        &self.locality_candidates
    }

    /// Back to [`CascadePhase::Empty`].
    pub fn reset(&mut self) {
        self.state = None;
        self.clear_district();
        self.district_candidates.clear();
    }

    /// Chooses a state from any phase. `None` empties the cascade.
    ///
    /// An unknown id fails with `NotFound` and leaves the selection as it was.
    pub fn choose_state(&mut self, state_id: Option<EntityId>) -> Result<()> {
        let Some(id) = state_id else {
            debug!("cascade: state cleared");
            self.reset();
            return Ok(());
        };
        let state = self.index.state(id).ok_or(GeoError::NotFound {
            kind: EntityKind::State,
            id,
        })?;
        self.state = Some(state);
        self.clear_district();
        self.district_candidates = self.index.districts_of_state(id);
        debug!(
            "cascade: state {id} chosen, {} district candidate(s)",
            self.district_candidates.len()
        );
        Ok(())
    }

    /// Chooses a district among the current candidates. `None` goes back to
    /// [`CascadePhase::StateChosen`].
    pub fn choose_district(&mut self, district_id: Option<EntityId>) -> Result<()> {
        if self.state.is_none() {
            return match district_id {
                None => Ok(()),
                Some(_) => Err(GeoError::SelectionOutOfOrder {
                    level: EntityKind::District,
                }),
            };
        }
        let Some(id) = district_id else {
            debug!("cascade: district cleared");
            self.clear_district();
            return Ok(());
        };
        let district = self
            .district_candidates
            .iter()
            .copied()
            .find(|d| d.id == id)
            .ok_or(GeoError::NotACandidate {
                kind: EntityKind::District,
                id,
            })?;
        self.district = Some(district);
        self.locality = None;
        self.locality_candidates = self.index.localities_of_district(id);
        debug!(
            "cascade: district {id} chosen, {} locality candidate(s)",
            self.locality_candidates.len()
        );
        Ok(())
    }

    /// Chooses a locality among the current candidates. `None` goes back to
    /// [`CascadePhase::DistrictChosen`].
    pub fn choose_locality(&mut self, locality_id: Option<EntityId>) -> Result<()> {
        if self.district.is_none() {
            return match locality_id {
                None => {
                    self.locality = None;
                    Ok(())
                }
                Some(_) => Err(GeoError::SelectionOutOfOrder {
                    level: EntityKind::Locality,
                }),
            };
        }
        let Some(id) = locality_id else {
            self.locality = None;
            return Ok(());
        };
        let locality = self
            .locality_candidates
            .iter()
            .copied()
            .find(|l| l.id == id)
            .ok_or(GeoError::NotACandidate {
                kind: EntityKind::Locality,
                id,
            })?;
        self.locality = Some(locality);
        debug!("cascade: locality {id} chosen");
        Ok(())
    }

    /// Fills all three levels from a persisted locality (edit forms).
    ///
    /// This is the only transition that skips steps. If any ancestor is
    /// missing the error is returned and the selector is left untouched.
    pub fn hydrate_from_locality(&mut self, locality_id: EntityId) -> Result<()> {
        let chain = self.index.ancestry_of_locality(locality_id)?;
        self.state = Some(chain.state);
        self.district = Some(chain.district);
        self.locality = Some(chain.locality);
        self.district_candidates = self.index.districts_of_state(chain.state.id);
        self.locality_candidates = self.index.localities_of_district(chain.district.id);
        debug!(
            "cascade: hydrated from locality {locality_id} (district {}, state {})",
            chain.district.id, chain.state.id
        );
        Ok(())
    }

    /// The locality a form may submit.
    ///
    /// Re-checks the chosen chain against the index, so an orphan or
    /// mismatched selection is never handed out, independently of the
    /// transitions that built it.
    pub fn committed_locality(&self) -> Result<EntityId> {
        let state = self.state.ok_or(GeoError::IncompleteSelection {
            missing: EntityKind::State,
        })?;
        let district = self.district.ok_or(GeoError::IncompleteSelection {
            missing: EntityKind::District,
        })?;
        let locality = self.locality.ok_or(GeoError::IncompleteSelection {
            missing: EntityKind::Locality,
        })?;

        let chain = self.index.ancestry_of_locality(locality.id)?;
        if chain.district.id != district.id {
            return Err(GeoError::InconsistentSelection(format!(
                "locality {} belongs to district {}, not {}",
                locality.id, chain.district.id, district.id
            )));
        }
        if chain.state.id != state.id {
            return Err(GeoError::InconsistentSelection(format!(
                "district {} belongs to state {}, not {}",
                district.id, chain.state.id, state.id
            )));
        }
        Ok(locality.id)
    }

    fn clear_district(&mut self) {
        self.district = None;
        self.locality = None;
        self.locality_candidates.clear();
    }
}
