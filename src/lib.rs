//! pipegeo-rs
//! ==========
//!
//! Workspace umbrella: re-exports [`pipegeo_core`] so the demos under
//! `demos/` can be run from the repository root.

pub use pipegeo_core::*;

pub mod prelude {
    pub use pipegeo_core::prelude::*;
}
