// crates/pipegeo-core/src/model/convert.rs
use super::entity::{District, Locality};
use super::raw::SnapshotRaw;
use super::snapshot::Snapshot;
use super::FieldError;
use crate::common::EntityKind;
use crate::error::{GeoError, Result};
use crate::traits::Validate;

/// **Standard Converter:** Raw export -> Snapshot.
///
/// Every district without `stateId`, every locality without `districtId` and
/// every location failing its field checks (coordinate bounds, sequence) is
/// reported; nothing is converted unless the whole export is usable.
pub fn from_raw(raw: SnapshotRaw) -> Result<Snapshot> {
    let mut problems = Vec::new();

    let mut districts = Vec::with_capacity(raw.districts.len());
    for d in raw.districts {
        match d.state_id {
            Some(state_id) => districts.push(District {
                id: d.id,
                code: d.code,
                designation_ar: d.designation_ar,
                designation_en: d.designation_en,
                designation_fr: d.designation_fr,
                state_id,
            }),
            None => problems.push(FieldError::new(
                EntityKind::District,
                Some(d.id),
                "stateId",
                "is required",
            )),
        }
    }

    let mut localities = Vec::with_capacity(raw.localities.len());
    for l in raw.localities {
        match l.district_id {
            Some(district_id) => localities.push(Locality {
                id: l.id,
                code: l.code,
                designation_ar: l.designation_ar,
                designation_en: l.designation_en,
                designation_fr: l.designation_fr,
                district_id,
            }),
            None => problems.push(FieldError::new(
                EntityKind::Locality,
                Some(l.id),
                "districtId",
                "is required",
            )),
        }
    }

    problems.extend(raw.locations.iter().flat_map(Validate::validate));

    if !problems.is_empty() {
        return Err(GeoError::InvalidEntity(problems));
    }

    Ok(Snapshot {
        countries: raw.countries,
        states: raw.states,
        districts,
        localities,
        locations: raw.locations,
        zones: raw.zones,
    })
}
