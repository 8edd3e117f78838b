use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for pipegeo
#[derive(Debug, Parser)]
#[command(
    name = "pipegeo",
    version,
    about = "Inspect administrative geography snapshots and pipeline routes"
)]
pub struct CliArgs {
    /// Path to the snapshot JSON export (`.json` or `.json.gz`)
    #[arg(short = 's', long = "snapshot", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Display language for labels (e.g. fr, ar, en-US)
    #[arg(short = 'l', long = "lang", global = true, default_value = "fr")]
    pub lang: String,

    /// Language used when --lang is not recognised
    #[arg(long = "base-lang", global = true, default_value = "fr")]
    pub base_lang: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show how many records of each kind the snapshot holds
    Stats,

    /// Validate every record and report broken parent references
    Check,

    /// List all states, sorted by label
    States,

    /// List the districts of a state
    Districts {
        /// Id of the state
        state_id: i64,
    },

    /// List the localities of a district
    Localities {
        /// Id of the district
        district_id: i64,
    },

    /// Show the state and district a locality belongs to
    Ancestry {
        /// Id of the locality
        locality_id: i64,
    },

    /// Work on a route file (JSON array of coordinates)
    Route {
        /// Path to the route JSON
        file: PathBuf,

        #[command(subcommand)]
        action: RouteAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum RouteAction {
    /// Report every validation problem
    Validate,

    /// Total length in kilometres
    Length,

    /// Waypoint closest to a position
    Nearest {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Point count, length, endpoints and bounding box
    Summary,
}
