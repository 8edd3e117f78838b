//! pipegeo-cli
//! ===========
//!
//! Command-line interface for the `pipegeo-core` crate.
//!
//! This crate primarily provides a binary (`pipegeo`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Basic usage:
//!
//! ```text
//! pipegeo --snapshot data/export.json stats
//! pipegeo --snapshot data/export.json --lang ar districts 16
//! pipegeo --snapshot data/export.json ancestry 160101
//! pipegeo route data/route-4.json validate
//! pipegeo route data/route-4.json nearest 36.75 3.06
//! ```
//!
//! Set `RUST_LOG=debug` to see loader and cache activity.
#![cfg_attr(docsrs, feature(doc_cfg))]
