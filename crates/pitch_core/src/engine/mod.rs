//! Pure per-row derivation: ordering, outcome classification, count, outs
//! and trajectory sampling

pub mod count;
pub mod outcome;
pub mod outs;
pub mod sort;
pub mod trajectory;

pub use count::{derive_post_count, infer_post_count, CountResult, MAX_BALLS, MAX_STRIKES};
pub use outcome::{PitchCall, PitchDescription, PitchOutcome, PlayEvent};
pub use outs::{carry_outs, clamp_outs, derive_outs_after, outs_increment, NextAtBat, MAX_OUTS};
pub use sort::{chronological_cmp, sort_rows};
pub use trajectory::{
    time_to_plate, time_to_plate_with, Kinematics, Trajectory, TrajectoryIter, TrajectorySample,
};
