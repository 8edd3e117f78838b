//! Basic usage example for pipegeo-rs
//!
//! Builds a small snapshot in memory, indexes it, and prints labels in
//! several languages along with a route measurement.

use pipegeo_core::prelude::*;

fn sample_snapshot() -> Snapshot {
    Snapshot {
        states: vec![
            State::new(16, "16").with_fr("Alger").with_en("Algiers").with_ar("الجزائر"),
            State::new(31, "31").with_fr("Oran").with_ar("وهران"),
        ],
        districts: vec![
            District::new(1601, "1601", 16).with_fr("Sidi M'Hamed"),
            District::new(1602, "1602", 16).with_fr("Bab El Oued"),
            District::new(3101, "3101", 31).with_fr("Es Senia"),
        ],
        localities: vec![
            Locality::new(160101, "160101", 1601).with_fr("Belcourt"),
            Locality::new(310101, "310101", 3101).with_fr("Es Senia centre"),
        ],
        ..Default::default()
    }
}

fn main() -> Result<()> {
    println!("=== pipegeo-rs Basic Usage Example ===\n");

    let index = sample_snapshot().into_index();
    let labels = LabelResolver::default();

    let stats = index.stats();
    println!(
        "Indexed {} states, {} districts, {} localities\n",
        stats.states, stats.districts, stats.localities
    );

    println!("--- States in every language ---");
    for state in labels.sort_by_label(index.states(), "fr") {
        println!(
            "  {:>3}  fr={:<8} en={:<8} ar={}",
            state.id,
            labels.resolve(state, "fr"),
            labels.resolve(state, "en"),
            labels.resolve(state, "ar"),
        );
    }
    println!();

    println!("--- Districts of Alger ---");
    for d in labels.sort_by_label(index.districts_of_state(16), "fr") {
        println!("  {}  {}", d.code, labels.resolve(d, "fr"));
    }
    println!();

    println!("--- Ancestry of locality 160101 ---");
    let a = index.ancestry_of_locality(160101)?;
    println!(
        "  {} > {} > {}",
        labels.resolve(a.state, "en"),
        labels.resolve(a.district, "en"),
        labels.resolve(a.locality, "en")
    );
    println!();

    println!("--- Route length ---");
    let route = Route::new(
        4,
        vec![
            Coordinate::new(1, 36.75, 3.06).on_infrastructure(4),
            Coordinate::new(2, 36.47, 2.83).on_infrastructure(4),
            Coordinate::new(3, 35.70, -0.63).on_infrastructure(4),
        ],
    )?;
    let summary = route.summary();
    println!("  {} points, {:.1} km", summary.points, summary.length_km);

    Ok(())
}
