//! Fixtures shared by unit tests

use crate::engine::outcome::PitchCall;
use crate::engine::trajectory::Kinematics;
use crate::ingest::{Bases, HalfInning, PitchRow, ScoreLine, OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
use nalgebra::Vector3;

pub const GAME_PK: u64 = 745001;
pub const PITCHER: u32 = 543037;
pub const BATTER: u32 = 592450;

/// Typical four-seam fastball out of a right-hander's hand
pub fn fastball() -> Kinematics {
    Kinematics {
        release: Vector3::new(-1.5, 54.0, 6.0),
        velocity: Vector3::new(5.0, -135.0, -5.0),
        acceleration: Vector3::new(-10.0, 28.0, -20.0),
    }
}

/// Called strike at 0-0, no outs, top of the first
pub fn row(at_bat: u32, pitch: u32) -> PitchRow {
    PitchRow {
        game_date: "2024-04-02".to_string(),
        game_pk: GAME_PK,
        at_bat_number: at_bat,
        pitch_number: pitch,
        pitch_type: "FF".to_string(),
        pitch_name: Some("4-Seam Fastball".to_string()),
        release_speed: 96.4,
        kinematics: fastball(),
        plate_x: 0.1,
        plate_z: 2.6,
        sz_top: 3.4,
        sz_bot: 1.6,
        balls: 0,
        strikes: 0,
        outs_when_up: 0,
        inning: 1,
        half: HalfInning::Top,
        home_team: "NYY".to_string(),
        away_team: "HOU".to_string(),
        score: ScoreLine::default(),
        post_home_score: None,
        post_away_score: None,
        call: PitchCall::Strike,
        description: "called_strike".to_string(),
        events: None,
        player_name: "Gerrit Cole".to_string(),
        batter: BATTER + at_bat,
        pitcher: PITCHER,
        stand: None,
        p_throws: None,
        runners: Bases::EMPTY,
    }
}

/// The varying cells of one CSV line; everything else is fixed.
#[derive(Debug, Clone)]
pub struct CsvPitch {
    pub game_date: String,
    pub game_pk: u64,
    pub at_bat_number: u32,
    pub pitch_number: u32,
    pub vx0: String,
    pub vy0: String,
    pub balls: u8,
    pub strikes: u8,
    pub outs_when_up: u8,
    pub inning: u8,
    pub inning_topbot: String,
    pub home_score: u16,
    pub away_score: u16,
    pub call: String,
    pub description: String,
    pub events: String,
    pub player_name: String,
    pub batter: u32,
    pub pitcher: u32,
    pub post_home_score: String,
    pub post_away_score: String,
    pub on_1b: String,
    pub on_2b: String,
    pub on_3b: String,
}

impl Default for CsvPitch {
    fn default() -> Self {
        Self {
            game_date: "2024-04-02".to_string(),
            game_pk: GAME_PK,
            at_bat_number: 1,
            pitch_number: 1,
            vx0: "5.0".to_string(),
            vy0: "-135.0".to_string(),
            balls: 0,
            strikes: 0,
            outs_when_up: 0,
            inning: 1,
            inning_topbot: "Top".to_string(),
            home_score: 0,
            away_score: 0,
            call: "S".to_string(),
            description: "called_strike".to_string(),
            events: String::new(),
            player_name: "Gerrit Cole".to_string(),
            batter: BATTER,
            pitcher: PITCHER,
            post_home_score: String::new(),
            post_away_score: String::new(),
            on_1b: String::new(),
            on_2b: String::new(),
            on_3b: String::new(),
        }
    }
}

/// Required columns followed by optional columns
pub fn csv_header() -> String {
    REQUIRED_COLUMNS
        .iter()
        .chain(OPTIONAL_COLUMNS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

/// One CSV line matching `csv_header()`
pub fn csv_line(p: &CsvPitch) -> String {
    let cells: Vec<String> = vec![
        // required
        p.game_date.clone(),
        p.game_pk.to_string(),
        p.at_bat_number.to_string(),
        p.pitch_number.to_string(),
        "FF".to_string(),
        "96.4".to_string(),
        "-1.5".to_string(),
        "54.0".to_string(),
        "6.0".to_string(),
        p.vx0.clone(),
        p.vy0.clone(),
        "-5.0".to_string(),
        "-10.0".to_string(),
        "28.0".to_string(),
        "-20.0".to_string(),
        "0.1".to_string(),
        "2.6".to_string(),
        "3.4".to_string(),
        "1.6".to_string(),
        p.balls.to_string(),
        p.strikes.to_string(),
        p.outs_when_up.to_string(),
        p.inning.to_string(),
        p.inning_topbot.clone(),
        "NYY".to_string(),
        "HOU".to_string(),
        p.home_score.to_string(),
        p.away_score.to_string(),
        p.call.clone(),
        p.description.clone(),
        p.player_name.clone(),
        p.batter.to_string(),
        p.pitcher.to_string(),
        // optional
        "4-Seam Fastball".to_string(),
        p.events.clone(),
        p.post_home_score.clone(),
        p.post_away_score.clone(),
        p.on_1b.clone(),
        p.on_2b.clone(),
        p.on_3b.clone(),
        "R".to_string(),
        "R".to_string(),
    ];
    cells.join(",")
}

/// Header plus one line per pitch
pub fn csv_text(pitches: &[CsvPitch]) -> String {
    let mut text = csv_header();
    text.push('\n');
    for p in pitches {
        text.push_str(&csv_line(p));
        text.push('\n');
    }
    text
}
