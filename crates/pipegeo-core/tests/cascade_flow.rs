use pipegeo_core::{
    CascadePhase, CascadeSelector, District, GeoError, HierarchyIndex, LabelResolver, Locality,
    State,
};

fn index() -> HierarchyIndex {
    HierarchyIndex::new(
        vec![
            State::new(16, "16").with_fr("Alger").with_ar("الجزائر"),
            State::new(31, "31").with_fr("Oran"),
        ],
        vec![
            District::new(1601, "1601", 16).with_fr("Sidi M'Hamed"),
            District::new(1602, "1602", 16).with_fr("Bab El Oued"),
            District::new(3101, "3101", 31).with_fr("Es Senia"),
            // parent state is not in the snapshot
            District::new(9901, "9901", 99).with_fr("Orpheline"),
        ],
        vec![
            Locality::new(160101, "160101", 1601).with_fr("Belcourt"),
            Locality::new(160201, "160201", 1602).with_fr("Bologhine"),
            Locality::new(310101, "310101", 3101).with_fr("Es Senia centre"),
            Locality::new(990101, "990101", 9901).with_fr("Nulle part"),
        ],
    )
}

#[test]
fn address_form_walkthrough() {
    let index = index();
    let labels = LabelResolver::default();
    let mut form = CascadeSelector::new(&index);

    form.choose_state(Some(16)).unwrap();
    let names: Vec<_> = labels
        .sort_by_label(form.district_candidates().iter().copied(), "fr")
        .iter()
        .map(|d| labels.resolve(*d, "fr"))
        .collect();
    assert_eq!(names, vec!["Bab El Oued", "Sidi M'Hamed"]);

    form.choose_district(Some(1602)).unwrap();
    form.choose_locality(Some(160201)).unwrap();
    assert_eq!(form.committed_locality().unwrap(), 160201);
}

#[test]
fn changing_state_clears_children() {
    let index = index();
    let mut form = CascadeSelector::new(&index);
    form.choose_state(Some(16)).unwrap();
    form.choose_district(Some(1601)).unwrap();
    form.choose_locality(Some(160101)).unwrap();

    form.choose_state(Some(31)).unwrap();
    assert_eq!(form.phase(), CascadePhase::StateChosen);
    assert!(form.selected_district().is_none());
    assert!(form.selected_locality().is_none());
    assert!(form.locality_candidates().is_empty());
    let ids: Vec<_> = form.district_candidates().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3101]);

    // a district of the previous state is no longer selectable
    assert!(matches!(
        form.choose_district(Some(1601)),
        Err(GeoError::NotACandidate { id: 1601, .. })
    ));
}

#[test]
fn edit_form_hydrates_and_rejects_orphans() {
    let index = index();
    let mut form = CascadeSelector::new(&index);

    form.hydrate_from_locality(310101).unwrap();
    assert_eq!(form.selected_state().map(|s| s.id), Some(31));
    assert_eq!(form.selected_district().map(|d| d.id), Some(3101));
    assert_eq!(form.committed_locality().unwrap(), 310101);

    let err = form.hydrate_from_locality(990101).unwrap_err();
    assert!(err.is_not_found());
    // previous selection survives the failed hydration
    assert_eq!(form.committed_locality().unwrap(), 310101);
}

#[test]
fn two_forms_share_one_index() {
    let index = index();
    let mut birth = CascadeSelector::new(&index);
    let mut residence = CascadeSelector::new(&index);

    birth.choose_state(Some(16)).unwrap();
    residence.hydrate_from_locality(310101).unwrap();

    assert_eq!(birth.phase(), CascadePhase::StateChosen);
    assert_eq!(residence.phase(), CascadePhase::LocalityChosen);
    assert!(matches!(
        birth.committed_locality(),
        Err(GeoError::IncompleteSelection { .. })
    ));
}

#[test]
fn integrity_report_names_the_orphan() {
    let report = index().integrity_report();
    assert_eq!(report.len(), 1);
    assert!(report[0].is_not_found());
    assert!(report[0].to_string().contains("9901"));
}
