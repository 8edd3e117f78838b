//! Cascade form example for pipegeo-rs
//!
//! Simulates an address form with dependent State / District / Locality
//! pickers, then an edit form hydrated from a stored locality.

use pipegeo_core::prelude::*;

fn print_candidates(form: &CascadeSelector<'_>, labels: &LabelResolver, lang: &str) {
    let districts: Vec<String> = labels
        .sort_by_label(form.district_candidates().iter().copied(), lang)
        .into_iter()
        .map(|d| labels.resolve(d, lang))
        .collect();
    let localities: Vec<String> = labels
        .sort_by_label(form.locality_candidates().iter().copied(), lang)
        .into_iter()
        .map(|l| labels.resolve(l, lang))
        .collect();
    println!("  phase:      {:?}", form.phase());
    println!("  districts:  {districts:?}");
    println!("  localities: {localities:?}");
}

fn main() -> Result<()> {
    println!("=== pipegeo-rs Cascade Form Example ===\n");

    let index = HierarchyIndex::new(
        vec![
            State::new(16, "16").with_fr("Alger"),
            State::new(31, "31").with_fr("Oran"),
        ],
        vec![
            District::new(1601, "1601", 16).with_fr("Sidi M'Hamed"),
            District::new(1602, "1602", 16).with_fr("Bab El Oued"),
            District::new(3101, "3101", 31).with_fr("Es Senia"),
        ],
        vec![
            Locality::new(160101, "160101", 1601).with_fr("Belcourt"),
            Locality::new(160102, "160102", 1601).with_fr("Télemly"),
            Locality::new(310101, "310101", 3101).with_fr("Es Senia centre"),
        ],
    );
    let labels = LabelResolver::default();

    println!("--- New address ---");
    let mut form = CascadeSelector::new(&index);
    form.choose_state(Some(16))?;
    print_candidates(&form, &labels, "fr");
    form.choose_district(Some(1601))?;
    print_candidates(&form, &labels, "fr");
    form.choose_locality(Some(160102))?;
    println!("  submit locality {}", form.committed_locality()?);
    println!();

    println!("--- User switches to Oran ---");
    form.choose_state(Some(31))?;
    print_candidates(&form, &labels, "fr");
    match form.committed_locality() {
        Ok(id) => println!("  submit locality {id}"),
        Err(e) => println!("  cannot submit yet: {e}"),
    }
    println!();

    println!("--- Edit form for a stored record ---");
    let mut edit = CascadeSelector::new(&index);
    edit.hydrate_from_locality(310101)?;
    print_candidates(&edit, &labels, "fr");
    println!("  submit locality {}", edit.committed_locality()?);

    Ok(())
}
