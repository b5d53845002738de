//! # pitch_core - Deterministic Statcast Pitch-Log Reconstruction
//!
//! Turns a flat per-pitch Statcast log into an ordered, consistent game
//! narrative for replay viewers.
//!
//! ## Features
//! - Typed CSV ingest with fail-fast schema and number checks
//! - Post-pitch count, outs and base state inferred per pitch
//! - At-bat grouping reconciled against the next at-bat's official outs
//! - Closed-form pitch flight sampled from release to plate
//! - JSON output with JSON Schema, multi-game inputs reconstructed in parallel
//!
//! ## Usage
//! ```no_run
//! use pitch_core::{reconstruct_csv_path, ReconstructConfig};
//!
//! let games = reconstruct_csv_path("savant.csv", &ReconstructConfig::default())?;
//! for game in &games {
//!     println!("{}: {} pitches", game.meta.team_label, game.pitch_count());
//! }
//! # Ok::<(), pitch_core::ReplayError>(())
//! ```

// Struct initialization pattern used intentionally in tests
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod replay;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main API functions
pub use api::{
    reconstruct, reconstruct_csv, reconstruct_csv_json, reconstruct_csv_path, reconstruct_game,
    ReplayDocument,
};
pub use config::{PlaybackConfig, ReconstructConfig, TrajectoryConfig};
pub use error::{ConfigError, ParseError, ReplayError, Result};

// Re-export pipeline types
pub use engine::{CountResult, PitchCall, PitchDescription, PitchOutcome, PlayEvent};
pub use engine::{Trajectory, TrajectorySample};
pub use ingest::{PitchRow, OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
pub use replay::{AtBat, DerivedPitch, Diagnostic, DiagnosticKind, GameMeta, GameReplay, PitchKey};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
