//! Error handling example for pipegeo-rs
//!
//! Shows how lookup, cascade, validation and loader failures surface.

use pipegeo_core::prelude::*;

fn main() -> Result<()> {
    println!("=== pipegeo-rs Error Handling Example ===\n");

    let index = HierarchyIndex::new(
        vec![State::new(16, "16").with_fr("Alger")],
        vec![
            District::new(1601, "1601", 16).with_fr("Sidi M'Hamed"),
            // state 99 is missing from this snapshot
            District::new(9901, "9901", 99).with_fr("Orpheline"),
        ],
        vec![
            Locality::new(160101, "160101", 1601).with_fr("Belcourt"),
            Locality::new(990101, "990101", 9901).with_fr("Nulle part"),
        ],
    );

    // Example 1: unknown and dangling references
    println!("--- Example 1: Ancestry lookups ---");
    for id in [160101, 990101, 424242] {
        match index.ancestry_of_locality(id) {
            Ok(a) => println!("  ✓ {id}: district {} / state {}", a.district.id, a.state.id),
            Err(e) if e.is_not_found() => println!("  ✗ {id}: {e}"),
            Err(e) => return Err(e),
        }
    }
    println!();

    // Example 2: cascade misuse
    println!("--- Example 2: Cascade ordering ---");
    let mut form = CascadeSelector::new(&index);
    if let Err(e) = form.choose_district(Some(1601)) {
        println!("  ✗ {e}");
    }
    form.choose_state(Some(16))?;
    if let Err(e) = form.choose_district(Some(9901)) {
        println!("  ✗ {e}");
    }
    if let Err(e) = form.committed_locality() {
        println!("  ✗ {e}");
    }
    println!();

    // Example 3: validation collects every problem
    println!("--- Example 3: Record and route validation ---");
    let bad_state = State::new(7, "ABCDEFGHIJKL");
    for problem in bad_state.validate() {
        println!("  ✗ {problem}");
    }
    let bad_route = vec![
        Coordinate::new(1, 36.75, 3.06).on_infrastructure(4),
        Coordinate::new(1, 91.0, 3.06),
    ];
    if let Err(problems) = validate_route(&bad_route) {
        for p in problems {
            println!("  ✗ {p}");
        }
    }
    if let Err(e) = Location::new(1, 1, 36.75, 200.0) {
        println!("  ✗ {e}");
    }
    println!();

    // Example 4: loader errors
    println!("--- Example 4: Loading a missing snapshot ---");
    match Snapshot::load_binary("does-not-exist.bin") {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  ✗ {e}"),
    }

    Ok(())
}
