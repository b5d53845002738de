//! Replay reconstruction: at-bat grouping, labels, playback timing and the
//! game document

pub mod assembler;
pub mod grouper;
pub mod labels;
pub mod playback;
pub mod types;


pub use assembler::{assemble_game, assemble_meta};
pub use grouper::{group_at_bats, score_after, GroupedAtBats};
pub use labels::{
    format_count, format_inning, format_score, format_speed, result_label, team_label,
    CountIndicator,
};
pub use playback::{playback_duration, playback_interval_ms, PlaybackSpeed};
pub use types::*;
