//! Statcast column names

/// Columns every input must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 33] = [
    "game_date",
    "game_pk",
    "at_bat_number",
    "pitch_number",
    "pitch_type",
    "release_speed",
    "release_pos_x",
    "release_pos_y",
    "release_pos_z",
    "vx0",
    "vy0",
    "vz0",
    "ax",
    "ay",
    "az",
    "plate_x",
    "plate_z",
    "sz_top",
    "sz_bot",
    "balls",
    "strikes",
    "outs_when_up",
    "inning",
    "inning_topbot",
    "home_team",
    "away_team",
    "home_score",
    "away_score",
    "type",
    "description",
    "player_name",
    "batter",
    "pitcher",
];

/// Columns read when present. Empty cells are treated as absent.
pub const OPTIONAL_COLUMNS: [&str; 9] = [
    "pitch_name",
    "events",
    "post_home_score",
    "post_away_score",
    "on_1b",
    "on_2b",
    "on_3b",
    "stand",
    "p_throws",
];

/// Cell values that stand for "no value" in optional columns.
pub const MISSING_MARKERS: [&str; 6] = ["", "NA", "null", "NULL", "None", "NaN"];

pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}
