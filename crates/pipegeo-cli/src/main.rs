//! pipegeo — command-line inspector for pipegeo-core
//!
//! Loads a backend snapshot export and answers hierarchy questions, or
//! checks and measures a pipeline route file.
//!
//! Usage examples
//! --------------
//!
//! - Show record counts
//!   $ pipegeo --snapshot export.json stats
//!
//! - Validate every record and foreign key
//!   $ pipegeo --snapshot export.json check
//!
//! - Walk the hierarchy, labels in Arabic
//!   $ pipegeo --snapshot export.json --lang ar districts 16
//!   $ pipegeo --snapshot export.json localities 1601
//!   $ pipegeo --snapshot export.json ancestry 160101
//!
//! - Work on a route
//!   $ pipegeo route route.json validate
//!   $ pipegeo route route.json nearest 36.75 3.06
//!
//! Data source
//! -----------
//!
//! The first load of a snapshot writes a binary cache next to it; later runs
//! reuse the cache until the export changes. `RUST_LOG=debug` shows which
//! path was taken.
mod args;

use crate::args::{CliArgs, Commands, RouteAction};
use anyhow::{bail, Context};
use clap::Parser;
use log::debug;
use pipegeo_core::loader::load_route_json;
use pipegeo_core::route::{total_route_length, validate_route};
use pipegeo_core::{
    Coordinate, HierarchyIndex, LabelResolver, Language, Route, Snapshot, Validate,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let base = Language::from_tag(&args.base_lang)
        .with_context(|| format!("unsupported base language: {}", args.base_lang))?;
    let resolver = LabelResolver::new(base);
    let lang = args.lang.as_str();
    debug!("labels in {} (base {base})", resolver.normalize(lang));

    if let Commands::Route { file, action } = &args.command {
        return run_route(file, action);
    }

    let Some(path) = args.snapshot.as_deref() else {
        bail!("--snapshot <file> is required for this command");
    };
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;

    match args.command {
        Commands::Check => {
            let problems = snapshot.validate();
            let index = snapshot.into_index();
            let dangling = index.integrity_report();
            for p in &problems {
                println!("{p}");
            }
            for d in &dangling {
                println!("{d}");
            }
            if problems.is_empty() && dangling.is_empty() {
                println!("Snapshot is consistent.");
            } else {
                bail!(
                    "{} invalid field(s), {} broken reference(s)",
                    problems.len(),
                    dangling.len()
                );
            }
        }

        command => {
            let index = snapshot.into_index();
            run_query(&index, &resolver, lang, command)?;
        }
    }

    Ok(())
}

fn run_query(
    index: &HierarchyIndex,
    resolver: &LabelResolver,
    lang: &str,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::Stats => {
            let stats = index.stats();
            println!("Snapshot statistics:");
            println!("  Countries:  {}", stats.countries);
            println!("  States:     {}", stats.states);
            println!("  Districts:  {}", stats.districts);
            println!("  Localities: {}", stats.localities);
            println!("  Locations:  {}", stats.locations);
        }

        Commands::States => {
            for s in resolver.sort_by_label(index.states(), lang) {
                println!("{:>6}  {}", s.id, resolver.resolve(s, lang));
            }
        }

        Commands::Districts { state_id } => {
            let state = index
                .state(state_id)
                .with_context(|| format!("state {state_id} not found"))?;
            println!("Districts of {}:", resolver.resolve(state, lang));
            for d in resolver.sort_by_label(index.districts_of_state(state_id), lang) {
                println!("{:>8}  {}", d.id, resolver.resolve(d, lang));
            }
        }

        Commands::Localities { district_id } => {
            let (district, state) = index.ancestry_of_district(district_id)?;
            println!(
                "Localities of {} ({}):",
                resolver.resolve(district, lang),
                resolver.resolve(state, lang)
            );
            for l in resolver.sort_by_label(index.localities_of_district(district_id), lang) {
                println!("{:>10}  {}", l.id, resolver.resolve(l, lang));
            }
        }

        Commands::Ancestry { locality_id } => {
            let a = index.ancestry_of_locality(locality_id)?;
            println!("Locality: {}", resolver.resolve(a.locality, lang));
            println!("District: {}", resolver.resolve(a.district, lang));
            println!("State:    {}", resolver.resolve(a.state, lang));
        }

        Commands::Check | Commands::Route { .. } => {}
    }
    Ok(())
}

fn run_route(file: &Path, action: &RouteAction) -> anyhow::Result<()> {
    let coords = load_route_json(file)
        .with_context(|| format!("failed to read route {}", file.display()))?;

    match action {
        RouteAction::Validate => match validate_route(&coords) {
            Ok(()) => println!("Route is valid ({} points).", coords.len()),
            Err(errors) => {
                for e in &errors {
                    println!("{e}");
                }
                bail!("route has {} problem(s)", errors.len());
            }
        },

        RouteAction::Length => {
            println!("{:.3} km", total_route_length(&coords));
        }

        RouteAction::Nearest { lat, lon } => {
            match pipegeo_core::route::nearest_point(&coords, *lat, *lon) {
                Some(c) => print_coordinate(c),
                None => println!("Route has no usable points."),
            }
        }

        RouteAction::Summary => {
            let owner = coords
                .iter()
                .find_map(|c| c.infrastructure_id)
                .context("no coordinate names its infrastructureId")?;
            let route = Route::new(owner, coords)?;
            let s = route.summary();
            println!("Infrastructure: {}", s.infrastructure_id);
            println!("Points:         {}", s.points);
            println!("Length:         {:.3} km", s.length_km);
            println!("Start:          {:.6}, {:.6}", s.start.latitude, s.start.longitude);
            println!("End:            {:.6}, {:.6}", s.end.latitude, s.end.longitude);
            println!(
                "Bounds:         {:.6}, {:.6} .. {:.6}, {:.6}",
                s.bounds.min.latitude,
                s.bounds.min.longitude,
                s.bounds.max.latitude,
                s.bounds.max.longitude
            );
        }
    }
    Ok(())
}

fn print_coordinate(c: &Coordinate) {
    print!("#{}  {:.6}, {:.6}", c.sequence, c.latitude, c.longitude);
    if let Some(e) = c.elevation {
        print!("  ({e} m)");
    }
    println!();
}
