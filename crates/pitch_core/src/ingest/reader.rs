//! Statcast CSV → `PitchRow`
//!
//! Header columns are checked once up front; every record is then coerced
//! field by field. The first failure aborts the whole read.

use super::columns::{is_missing, REQUIRED_COLUMNS};
use super::row::{Bases, Handedness, HalfInning, PitchRow, ScoreLine};
use crate::engine::outcome::PitchCall;
use crate::engine::trajectory::Kinematics;
use crate::error::ParseError;
use nalgebra::Vector3;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Anything that can answer "raw value of column X".
pub trait FieldSource {
    fn field(&self, column: &str) -> Option<&str>;
}

impl<S: BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

/// Column name → position lookup, built once from the CSV header
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    columns: FxHashMap<String, usize>,
}

impl HeaderIndex {
    /// Fails with the first required column the header lacks.
    pub fn new(headers: &csv::StringRecord) -> Result<Self, ParseError> {
        let columns: FxHashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), idx))
            .collect();

        if let Some(column) = REQUIRED_COLUMNS
            .iter()
            .copied()
            .find(|c| !columns.contains_key(*c))
        {
            return Err(ParseError::MissingColumn { column });
        }
        Ok(Self { columns })
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One CSV record viewed through its header
pub struct CsvRecord<'a> {
    pub headers: &'a HeaderIndex,
    pub record: &'a csv::StringRecord,
}

impl FieldSource for CsvRecord<'_> {
    fn field(&self, column: &str) -> Option<&str> {
        self.headers
            .position(column)
            .and_then(|idx| self.record.get(idx))
    }
}

/// Field coercion helpers bound to one source line
struct Fields<'a, S: FieldSource + ?Sized> {
    source: &'a S,
    line: u64,
}

impl<S: FieldSource + ?Sized> Fields<'_, S> {
    fn raw(&self, column: &'static str) -> Result<&str, ParseError> {
        self.source
            .field(column)
            .map(str::trim)
            .ok_or(ParseError::MissingColumn { column })
    }

    fn invalid(&self, column: &'static str, value: &str) -> ParseError {
        ParseError::InvalidNumber {
            line: self.line,
            column,
            value: value.to_string(),
        }
    }

    fn text(&self, column: &'static str) -> Result<String, ParseError> {
        Ok(self.raw(column)?.to_string())
    }

    fn float(&self, column: &'static str) -> Result<f64, ParseError> {
        let raw = self.raw(column)?;
        parse_float(raw).ok_or_else(|| self.invalid(column, raw))
    }

    fn int<T: TryFrom<u64>>(&self, column: &'static str) -> Result<T, ParseError> {
        let raw = self.raw(column)?;
        parse_integer(raw).ok_or_else(|| self.invalid(column, raw))
    }

    fn opt_text(&self, column: &'static str) -> Option<String> {
        self.source
            .field(column)
            .filter(|raw| !is_missing(raw))
            .map(|raw| raw.trim().to_string())
    }

    fn opt_int<T: TryFrom<u64>>(&self, column: &'static str) -> Result<Option<T>, ParseError> {
        match self.source.field(column) {
            Some(raw) if !is_missing(raw) => parse_integer(raw.trim())
                .map(Some)
                .ok_or_else(|| self.invalid(column, raw.trim())),
            _ => Ok(None),
        }
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `"3"` as well as `"3.0"`; rejects fractions and negatives.
fn parse_integer<T: TryFrom<u64>>(raw: &str) -> Option<T> {
    if let Ok(v) = raw.parse::<u64>() {
        return T::try_from(v).ok();
    }
    let v = parse_float(raw)?;
    if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        T::try_from(v as u64).ok()
    } else {
        None
    }
}

/// Map one record of column → raw value pairs onto a `PitchRow`.
///
/// Required columns are checked first, in schema order; numeric fields are
/// then coerced in the same order, so the error always names the first
/// offending column.
pub fn parse_row<S: FieldSource + ?Sized>(source: &S, line: u64) -> Result<PitchRow, ParseError> {
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|c| source.field(c).is_none())
    {
        return Err(ParseError::MissingColumn { column });
    }
    let f = Fields { source, line };

    let game_date = f.text("game_date")?;
    let game_pk = f.int::<u64>("game_pk")?;
    let at_bat_number = f.int::<u32>("at_bat_number")?;
    let pitch_number = f.int::<u32>("pitch_number")?;
    let pitch_type = f.text("pitch_type")?;
    let release_speed = f.float("release_speed")?;
    let release = Vector3::new(
        f.float("release_pos_x")?,
        f.float("release_pos_y")?,
        f.float("release_pos_z")?,
    );
    let velocity = Vector3::new(f.float("vx0")?, f.float("vy0")?, f.float("vz0")?);
    let acceleration = Vector3::new(f.float("ax")?, f.float("ay")?, f.float("az")?);
    let plate_x = f.float("plate_x")?;
    let plate_z = f.float("plate_z")?;
    let sz_top = f.float("sz_top")?;
    let sz_bot = f.float("sz_bot")?;
    let balls = f.int::<u8>("balls")?;
    let strikes = f.int::<u8>("strikes")?;
    let outs_when_up = f.int::<u8>("outs_when_up")?;
    let inning = f.int::<u8>("inning")?;

    let raw_half = f.raw("inning_topbot")?;
    let (half, recognized) = HalfInning::from_raw(raw_half);
    if !recognized {
        warn!(line, value = raw_half, "unrecognized inning_topbot, defaulting to top");
    }

    let home_team = f.text("home_team")?;
    let away_team = f.text("away_team")?;
    let score = ScoreLine {
        home: f.int::<u16>("home_score")?,
        away: f.int::<u16>("away_score")?,
    };
    let call = PitchCall::from_code(f.raw("type")?);
    let description = f.text("description")?;
    let player_name = f.text("player_name")?;
    let batter = f.int::<u32>("batter")?;
    let pitcher = f.int::<u32>("pitcher")?;

    let post_home_score = f.opt_int::<u16>("post_home_score")?;
    let post_away_score = f.opt_int::<u16>("post_away_score")?;
    let runners = Bases {
        first: f.opt_int::<u32>("on_1b")?,
        second: f.opt_int::<u32>("on_2b")?,
        third: f.opt_int::<u32>("on_3b")?,
    };

    Ok(PitchRow {
        game_date,
        game_pk,
        at_bat_number,
        pitch_number,
        pitch_type,
        pitch_name: f.opt_text("pitch_name"),
        release_speed,
        kinematics: Kinematics {
            release,
            velocity,
            acceleration,
        },
        plate_x,
        plate_z,
        sz_top,
        sz_bot,
        balls,
        strikes,
        outs_when_up,
        inning,
        half,
        home_team,
        away_team,
        score,
        post_home_score,
        post_away_score,
        call,
        description,
        events: f.opt_text("events"),
        player_name,
        batter,
        pitcher,
        stand: f.opt_text("stand").map(|s| Handedness::from_raw(&s)),
        p_throws: f.opt_text("p_throws").map(|s| Handedness::from_raw(&s)),
        runners,
    })
}

/// Read every row of a Statcast CSV.
///
/// Returns all rows or the first error; never a partial result.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<PitchRow>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = HeaderIndex::new(csv_reader.headers()?)?;
    debug!(columns = headers.len(), "CSV header accepted");

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        // Header is line 1
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(rows.len() as u64 + 2);
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let view = CsvRecord {
            headers: &headers,
            record: &record,
        };
        rows.push(parse_row(&view, line)?);
    }

    if rows.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    debug!(rows = rows.len(), "CSV rows parsed");
    Ok(rows)
}

pub fn read_csv_str(csv_text: &str) -> Result<Vec<PitchRow>, ParseError> {
    read_csv(csv_text.as_bytes())
}

pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Vec<PitchRow>, ParseError> {
    let file = std::fs::File::open(path)?;
    read_csv(std::io::BufReader::new(file))
}
