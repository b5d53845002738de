//! At-bat grouping
//!
//! Sorted rows are cut into contiguous (game, at-bat) runs and folded in
//! order. The fold carries the outs tracker and the next pitch sequence
//! number; each at-bat looks one at-bat ahead to reconcile its final outs
//! with the next at-bat's stated starting outs.

use super::labels::result_label;
use super::playback::playback_duration;
use super::types::{AtBat, DerivedPitch, Diagnostic, DiagnosticKind, PitchKey};
use crate::config::ReconstructConfig;
use crate::engine::count::derive_post_count;
use crate::engine::outcome::{PitchCall, PitchDescription, PitchOutcome, PlayEvent};
use crate::engine::outs::{carry_outs, derive_outs_after, NextAtBat, MAX_OUTS};
use crate::engine::trajectory::Trajectory;
use crate::ingest::{Bases, PitchRow, ScoreLine};
use tracing::{debug, warn};

/// At-bats of one fold plus everything recovered along the way
#[derive(Debug, Clone, Default)]
pub struct GroupedAtBats {
    pub at_bats: Vec<AtBat>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Accumulator threaded through the at-bat fold
struct GroupFold<'c> {
    config: &'c ReconstructConfig,
    /// (game, outs carried into the next at-bat)
    outs: Option<(u64, u8)>,
    sequence: usize,
    out: GroupedAtBats,
}

fn same_at_bat(a: &PitchRow, b: &PitchRow) -> bool {
    a.at_bat_key() == b.at_bat_key()
}

/// Group chronologically sorted rows into at-bats.
///
/// Rows of several games are accepted; the outs tracker reseeds from the
/// first row of each game.
pub fn group_at_bats(rows: &[PitchRow], config: &ReconstructConfig) -> GroupedAtBats {
    let groups: Vec<&[PitchRow]> = rows.chunk_by(same_at_bat).collect();
    debug!(rows = rows.len(), at_bats = groups.len(), "Grouping at-bats");

    let fold = groups.iter().enumerate().fold(
        GroupFold {
            config,
            outs: None,
            sequence: 0,
            out: GroupedAtBats::default(),
        },
        |acc, (i, group)| {
            let next_first = groups.get(i + 1).and_then(|g| g.first());
            acc.step(group, next_first)
        },
    );
    fold.out
}

impl GroupFold<'_> {
    fn step(mut self, group: &[PitchRow], next_first: Option<&PitchRow>) -> Self {
        let Some(first) = group.first() else {
            return self;
        };

        let outs_in = match self.outs {
            Some((game, carried)) if game == first.game_pk => {
                if carried != first.outs_when_up {
                    self.diagnose(
                        first,
                        DiagnosticKind::OutsCarryMismatch {
                            carried,
                            stated: first.outs_when_up,
                        },
                    );
                }
                carried
            }
            _ => first.outs_when_up.min(MAX_OUTS),
        };

        let mut pitches = Vec::with_capacity(group.len());
        for (j, row) in group.iter().enumerate() {
            let next_in_at_bat = group.get(j + 1);
            let is_last = next_in_at_bat.is_none();
            let pitch = self.derive_pitch(row, next_in_at_bat, next_first, outs_in, is_last);
            pitches.push(pitch);
        }

        let outs_after = pitches.last().map(|p| p.outs_after).unwrap_or(outs_in);
        self.outs = Some((first.game_pk, carry_outs(outs_after)));

        let summary_event = group
            .last()
            .and_then(PitchRow::event_text)
            .map(str::to_string);
        let label = pitches
            .last()
            .map(|p| p.result_label.clone())
            .unwrap_or_default();

        self.out.at_bats.push(AtBat {
            game_pk: first.game_pk,
            at_bat_number: first.at_bat_number,
            inning: first.inning,
            half: first.half,
            batter: first.batter,
            pitcher: first.pitcher,
            pitches,
            summary_event,
            result_label: label,
        });
        self
    }

    fn derive_pitch(
        &mut self,
        row: &PitchRow,
        next_in_at_bat: Option<&PitchRow>,
        next_first: Option<&PitchRow>,
        outs_in: u8,
        is_last: bool,
    ) -> DerivedPitch {
        let outcome = PitchOutcome::from_row(row);
        self.check_vocabulary(row, &outcome);

        let count_after = derive_post_count(row, next_in_at_bat);
        let next_at_bat = if is_last {
            NextAtBat::resolve(row, next_first)
        } else {
            NextAtBat::None
        };
        let outs_after = derive_outs_after(&outcome, outs_in, is_last, next_at_bat);

        let computed = derive_outs_after(&outcome, outs_in, is_last, NextAtBat::None);
        if is_last {
            // third out followed by a fresh half-inning is the expected rollover
            let rollover = next_at_bat.changes_half(row) && carry_outs(computed) == outs_after;
            if computed != outs_after && !rollover {
                debug!(
                    key = %PitchKey::of(row),
                    computed,
                    official = outs_after,
                    "Outs reconciled with next at-bat"
                );
                self.out.diagnostics.push(Diagnostic {
                    key: PitchKey::of(row),
                    kind: DiagnosticKind::OutsReconciled {
                        computed,
                        official: outs_after,
                    },
                });
            }
            if !count_after.is_at_bat_end {
                self.diagnose(row, DiagnosticKind::UnendedAtBat);
            }
        }

        let bases_after = match (next_in_at_bat, next_at_bat.same_half(row)) {
            (Some(next), _) => next.runners,
            (None, Some(next)) => next.runners,
            (None, None) if outs_after >= MAX_OUTS || computed >= MAX_OUTS => Bases::EMPTY,
            (None, None) => row.runners,
        };

        let score_after = score_after(row, next_in_at_bat.or(next_first));

        let trajectory = Trajectory::sample(&row.kinematics, &self.config.trajectory);
        if !trajectory.reaches_plate {
            self.diagnose(row, DiagnosticKind::NoPlateCrossing);
        }
        let playback = playback_duration(&trajectory, &self.config.playback);

        let sequence = self.sequence;
        self.sequence += 1;

        DerivedPitch {
            key: PitchKey::of(row),
            sequence,
            row: row.clone(),
            result_label: result_label(row, &outcome),
            outcome,
            trajectory,
            playback_duration: playback,
            count_after,
            outs_after,
            score_after,
            is_at_bat_end: is_last,
            highlight: is_last,
            bases_after,
        }
    }

    fn check_vocabulary(&mut self, row: &PitchRow, outcome: &PitchOutcome) {
        if let PitchCall::Unknown(code) = &outcome.call {
            self.diagnose(row, DiagnosticKind::UnknownCall { code: code.clone() });
        }
        if let PitchDescription::Unknown(description) = &outcome.description {
            self.diagnose(
                row,
                DiagnosticKind::UnknownDescription {
                    description: description.clone(),
                },
            );
        }
        if let Some(PlayEvent::Unknown(event)) = &outcome.event {
            self.diagnose(
                row,
                DiagnosticKind::UnknownEvent {
                    event: event.clone(),
                },
            );
        }
    }

    fn diagnose(&mut self, row: &PitchRow, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            key: PitchKey::of(row),
            kind,
        };
        warn!(%diagnostic, "Recovered during reconstruction");
        self.out.diagnostics.push(diagnostic);
    }
}

/// Score after `row`: its own post-pitch score, else the next row's
/// pre-pitch score in the same game, else unchanged.
pub fn score_after(row: &PitchRow, next: Option<&PitchRow>) -> ScoreLine {
    if let Some(post) = row.post_score() {
        return post;
    }
    match next {
        Some(n) if n.game_pk == row.game_pk => n.score,
        _ => row.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::HalfInning;
    use crate::test_support::row;

    fn pitch(at_bat: u32, number: u32, call: PitchCall, description: &str) -> PitchRow {
        let mut r = row(at_bat, number);
        r.call = call;
        r.description = description.to_string();
        r
    }

    fn finish(mut r: PitchRow, event: &str) -> PitchRow {
        r.events = Some(event.to_string());
        r
    }

    fn group(rows: &[PitchRow]) -> GroupedAtBats {
        group_at_bats(rows, &ReconstructConfig::default())
    }

    /// Three at-bats in the top of the first: strikeout, single, double play
    fn inning() -> Vec<PitchRow> {
        let mut rows = vec![
            pitch(1, 1, PitchCall::Strike, "called_strike"),
            {
                let mut r = pitch(1, 2, PitchCall::Strike, "swinging_strike");
                r.strikes = 1;
                r
            },
            {
                let mut r = finish(pitch(1, 3, PitchCall::Strike, "swinging_strike"), "strikeout");
                r.strikes = 2;
                r
            },
            finish(pitch(2, 1, PitchCall::InPlay, "hit_into_play"), "single"),
            finish(
                pitch(3, 1, PitchCall::InPlay, "hit_into_play"),
                "grounded_into_double_play",
            ),
        ];
        for r in rows.iter_mut().filter(|r| r.at_bat_number >= 2) {
            r.outs_when_up = 1;
        }
        rows[4].runners.first = Some(777);
        rows
    }

    #[test]
    fn test_groups_by_at_bat() {
        let grouped = group(&inning());
        assert_eq!(grouped.at_bats.len(), 3);
        assert_eq!(grouped.at_bats[0].pitches.len(), 3);
        let sequences: Vec<_> = grouped
            .at_bats
            .iter()
            .flat_map(|ab| ab.pitches.iter().map(|p| p.sequence))
            .collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_outs_threaded_across_at_bats() {
        let grouped = group(&inning());
        let outs: Vec<_> = grouped
            .at_bats
            .iter()
            .flat_map(|ab| ab.pitches.iter().map(|p| p.outs_after))
            .collect();
        assert_eq!(outs, vec![0, 0, 1, 1, 3]);
        assert!(grouped.diagnostics.is_empty(), "{:?}", grouped.diagnostics);
    }

    #[test]
    fn test_final_pitch_flags() {
        let grouped = group(&inning());
        let first = &grouped.at_bats[0];
        assert!(!first.pitches[0].is_at_bat_end);
        assert!(!first.pitches[1].highlight);
        assert!(first.pitches[2].is_at_bat_end);
        assert!(first.pitches[2].highlight);
        assert_eq!(first.result_label, "Strikeout (swinging)");
        assert_eq!(first.summary_event.as_deref(), Some("strikeout"));
        assert_eq!(grouped.at_bats[1].result_label, "Single");
    }

    #[test]
    fn test_count_after_uses_next_row() {
        let grouped = group(&inning());
        let counts: Vec<_> = grouped.at_bats[0]
            .pitches
            .iter()
            .map(|p| (p.count_after.balls, p.count_after.strikes))
            .collect();
        assert_eq!(counts, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_official_outs_override_inference() {
        let mut rows = inning();
        // the next at-bat says two were out after the single
        rows[4].outs_when_up = 2;
        let grouped = group(&rows);
        assert_eq!(grouped.at_bats[1].outs_after(), 2);
        assert!(grouped.diagnostics.iter().any(|d| matches!(
            d.kind,
            DiagnosticKind::OutsReconciled {
                computed: 1,
                official: 2
            }
        )));
    }

    #[test]
    fn test_new_half_inning_takes_stated_outs() {
        let mut rows = inning();
        // drop the double play; the bottom half follows the single
        rows.remove(4);
        let mut bottom = finish(pitch(4, 1, PitchCall::InPlay, "hit_into_play"), "home_run");
        bottom.half = HalfInning::Bottom;
        bottom.outs_when_up = 0;
        rows.push(bottom);
        rows[3].runners.second = Some(555);
        let grouped = group(&rows);
        assert_eq!(grouped.at_bats.len(), 3);
        assert_eq!(grouped.at_bats[1].outs_after(), 0);
        assert_eq!(grouped.at_bats[2].outs_after(), 0);
        // inference saw no third out, so the runner stays put
        assert_eq!(grouped.at_bats[1].pitches[0].bases_after.second, Some(555));
        assert!(grouped.diagnostics.iter().any(|d| matches!(
            d.kind,
            DiagnosticKind::OutsReconciled {
                computed: 1,
                official: 0
            }
        )));
    }

    #[test]
    fn test_third_out_rollover_is_quiet() {
        let mut out = finish(pitch(1, 1, PitchCall::InPlay, "hit_into_play"), "field_out");
        out.outs_when_up = 2;
        out.runners.first = Some(777);
        let mut bottom = finish(pitch(2, 1, PitchCall::InPlay, "hit_into_play"), "single");
        bottom.half = HalfInning::Bottom;
        bottom.outs_when_up = 0;
        let grouped = group(&[out, bottom]);
        assert_eq!(
            grouped.at_bats[0].outs_after(),
            grouped.at_bats[1].pitches[0].row.outs_when_up
        );
        assert_eq!(grouped.at_bats[0].pitches[0].bases_after, Bases::EMPTY);
        assert!(grouped.diagnostics.is_empty(), "{:?}", grouped.diagnostics);
    }

    #[test]
    fn test_filtered_export_with_at_bat_gap() {
        // one batter's plate appearances: at-bat 1 then at-bat 9 an inning later
        let mut single = finish(pitch(1, 1, PitchCall::InPlay, "hit_into_play"), "single");
        single.runners.first = Some(777);
        let mut later = finish(pitch(9, 1, PitchCall::InPlay, "hit_into_play"), "field_out");
        later.inning = 2;
        later.outs_when_up = 1;
        let grouped = group(&[single, later]);
        assert_eq!(grouped.at_bats[0].outs_after(), 1);
        assert_eq!(grouped.at_bats[0].pitches[0].bases_after.first, Some(777));
        assert_eq!(grouped.at_bats[1].outs_after(), 2);
    }

    #[test]
    fn test_bases_after() {
        let grouped = group(&inning());
        // single: next at-bat shows the runner on first
        assert_eq!(grouped.at_bats[1].pitches[0].bases_after.first, Some(777));
        // third out clears the bases
        assert_eq!(grouped.at_bats[2].pitches[0].bases_after, Bases::EMPTY);
    }

    #[test]
    fn test_score_after_prefers_post_columns() {
        let mut r = row(1, 1);
        r.score = ScoreLine { home: 0, away: 0 };
        let mut next = row(2, 1);
        next.score = ScoreLine { home: 0, away: 1 };
        assert_eq!(score_after(&r, Some(&next)), ScoreLine { home: 0, away: 1 });
        r.post_away_score = Some(2);
        r.post_home_score = Some(0);
        assert_eq!(score_after(&r, Some(&next)), ScoreLine { home: 0, away: 2 });
        let mut other_game = next.clone();
        other_game.game_pk += 1;
        r.post_away_score = None;
        r.post_home_score = None;
        assert_eq!(score_after(&r, Some(&other_game)), r.score);
    }

    #[test]
    fn test_unknown_vocabulary_is_diagnosed() {
        let rows = vec![finish(
            pitch(1, 1, PitchCall::from_code("Z"), "umpire_review"),
            "mystery_play",
        )];
        let grouped = group(&rows);
        let kinds: Vec<_> = grouped.diagnostics.iter().map(|d| &d.kind).collect();
        assert!(kinds.contains(&&DiagnosticKind::UnknownCall {
            code: "Z".to_string()
        }));
        assert!(kinds.contains(&&DiagnosticKind::UnknownDescription {
            description: "umpire_review".to_string()
        }));
        assert!(kinds.contains(&&DiagnosticKind::UnknownEvent {
            event: "mystery_play".to_string()
        }));
        // no state change from unknown text
        assert_eq!(grouped.at_bats[0].outs_after(), 0);
    }

    #[test]
    fn test_unended_final_pitch_is_diagnosed() {
        let rows = vec![pitch(1, 1, PitchCall::Ball, "ball")];
        let grouped = group(&rows);
        assert!(grouped.at_bats[0].pitches[0].is_at_bat_end);
        assert_eq!(
            grouped.diagnostics,
            vec![Diagnostic {
                key: PitchKey::of(&rows[0]),
                kind: DiagnosticKind::UnendedAtBat
            }]
        );
    }

    #[test]
    fn test_degenerate_flight_is_diagnosed() {
        let mut r = finish(pitch(1, 1, PitchCall::InPlay, "hit_into_play"), "single");
        r.kinematics.velocity.y = 10.0;
        r.kinematics.acceleration.y = 0.0;
        let grouped = group(&[r]);
        let pitch = &grouped.at_bats[0].pitches[0];
        assert!(!pitch.trajectory.reaches_plate);
        assert!(pitch.trajectory.samples.len() >= 10);
        assert_eq!(
            grouped.diagnostics.iter().map(|d| &d.kind).collect::<Vec<_>>(),
            vec![&DiagnosticKind::NoPlateCrossing]
        );
    }

    #[test]
    fn test_tracker_reseeds_per_game() {
        let mut a = finish(pitch(1, 1, PitchCall::InPlay, "hit_into_play"), "field_out");
        a.outs_when_up = 2;
        let mut b = finish(pitch(1, 1, PitchCall::InPlay, "hit_into_play"), "single");
        b.game_pk += 1;
        b.outs_when_up = 1;
        let grouped = group(&[a, b]);
        assert_eq!(grouped.at_bats[0].outs_after(), 3);
        assert_eq!(grouped.at_bats[1].outs_after(), 1);
        assert!(grouped.diagnostics.is_empty(), "{:?}", grouped.diagnostics);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn event_strategy() -> impl Strategy<Value = &'static str> {
            prop_oneof![
                Just("single"),
                Just("field_out"),
                Just("strikeout"),
                Just("grounded_into_double_play"),
                Just("walk"),
                Just("home_run"),
            ]
        }

        proptest! {
            #[test]
            fn final_outs_match_next_stated_outs(
                events in prop::collection::vec(event_strategy(), 1..12),
                stated in prop::collection::vec(0u8..=2, 12),
                half_breaks in prop::collection::vec(any::<bool>(), 12),
            ) {
                let mut inning = 1u8;
                let mut half = HalfInning::Top;
                let rows: Vec<PitchRow> = events
                    .iter()
                    .enumerate()
                    .map(|(i, event)| {
                        if i > 0 && half_breaks[i] {
                            half = match half {
                                HalfInning::Top => HalfInning::Bottom,
                                HalfInning::Bottom => {
                                    inning += 1;
                                    HalfInning::Top
                                }
                            };
                        }
                        let mut r = finish(
                            pitch(i as u32 + 1, 1, PitchCall::InPlay, "hit_into_play"),
                            event,
                        );
                        r.inning = inning;
                        r.half = half;
                        r.outs_when_up = stated[i];
                        r
                    })
                    .collect();
                let grouped = group(&rows);
                for pair in grouped.at_bats.windows(2) {
                    let next_before = pair[1].pitches[0].row.outs_when_up;
                    prop_assert_eq!(pair[0].outs_after(), next_before);
                }
                for ab in &grouped.at_bats {
                    prop_assert!(ab.outs_after() <= MAX_OUTS);
                }
            }
        }
    }
}
