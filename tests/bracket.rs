//! Integration tests for knockout advancement.

use league_tournament_web::logic::bracket::{advance, assign_team, record_result};
use league_tournament_web::logic::Advancement;
use league_tournament_web::models::{
    CompetitionError, KnockoutMatch, KnockoutRounds, MatchState, SlotSide, Stage, TBD,
};

fn round_of_16() -> KnockoutRounds {
    let mut rounds = KnockoutRounds::default();
    let matches = (0..8)
        .map(|i| {
            KnockoutMatch::between(
                Stage::RoundOf16.match_id(i),
                format!("H{i}"),
                format!("A{i}"),
            )
        })
        .collect();
    rounds.set_stage(Stage::RoundOf16, matches);
    rounds
}

#[test]
fn winner_of_first_match_opens_quarter_final() {
    let mut rounds = round_of_16();
    rounds.round_of16[0] = KnockoutMatch::between("r16-1", "X", "Y");

    let result = record_result(&mut rounds, Stage::RoundOf16, 0, Some(3), Some(1), true).unwrap();

    assert_eq!(
        result,
        Advancement::Advanced {
            winner: "X".to_string(),
            stage: Stage::QuarterFinals,
            index: 0,
            side: SlotSide::Team1,
        }
    );
    assert_eq!(rounds.quarter_finals.len(), 1);
    assert_eq!(rounds.quarter_finals[0].team1.name, "X");
    assert_eq!(rounds.quarter_finals[0].team2.name, TBD);
    assert_eq!(rounds.quarter_finals[0].id, "qf-1");
}

#[test]
fn odd_index_fills_team2_and_creates_lower_placeholders() {
    let mut rounds = round_of_16();
    record_result(&mut rounds, Stage::RoundOf16, 5, Some(0), Some(2), true).unwrap();

    assert_eq!(rounds.quarter_finals.len(), 3);
    assert_eq!(rounds.quarter_finals[2].team2.name, "A5");
    assert_eq!(rounds.quarter_finals[2].team1.name, TBD);
    for m in &rounds.quarter_finals[..2] {
        assert_eq!(m.team1.name, TBD);
        assert_eq!(m.team2.name, TBD);
        assert_eq!(m.state(), MatchState::Empty);
    }
}

#[test]
fn completed_draw_changes_nothing() {
    let mut rounds = round_of_16();
    let before = rounds.clone();
    let mut expected = before.clone();
    expected.round_of16[0].team1.score = Some(2);
    expected.round_of16[0].team2.score = Some(2);
    expected.round_of16[0].completed = true;

    let result = record_result(&mut rounds, Stage::RoundOf16, 0, Some(2), Some(2), true).unwrap();

    assert_eq!(result, Advancement::Undecided);
    assert_eq!(rounds, expected);
    assert!(rounds.quarter_finals.is_empty());
}

#[test]
fn unfinished_match_is_pending() {
    let mut rounds = round_of_16();
    let result = record_result(&mut rounds, Stage::RoundOf16, 1, Some(1), None, true).unwrap();
    assert_eq!(result, Advancement::Pending);
    let result = record_result(&mut rounds, Stage::RoundOf16, 1, Some(1), Some(0), false).unwrap();
    assert_eq!(result, Advancement::Pending);
    assert!(rounds.quarter_finals.is_empty());
}

#[test]
fn missing_source_match_is_an_error() {
    let mut rounds = KnockoutRounds::default();
    assert_eq!(
        advance(&mut rounds, Stage::SemiFinals, 0),
        Err(CompetitionError::MatchNotFound {
            stage: Stage::SemiFinals,
            index: 0
        })
    );
}

#[test]
fn score_edit_overwrites_destination_side() {
    let mut rounds = round_of_16();
    record_result(&mut rounds, Stage::RoundOf16, 2, Some(1), Some(0), true).unwrap();
    assert_eq!(rounds.quarter_finals[1].team1.name, "H2");

    record_result(&mut rounds, Stage::RoundOf16, 2, Some(1), Some(3), true).unwrap();
    assert_eq!(rounds.quarter_finals[1].team1.name, "A2");
    assert_eq!(rounds.quarter_finals.len(), 2);
}

#[test]
fn advancing_again_is_idempotent() {
    let mut rounds = round_of_16();
    record_result(&mut rounds, Stage::RoundOf16, 3, Some(2), Some(1), true).unwrap();
    let once = rounds.clone();
    advance(&mut rounds, Stage::RoundOf16, 3).unwrap();
    assert_eq!(rounds, once);
}

#[test]
fn semi_final_winners_reach_the_final_and_crown_a_champion() {
    let mut rounds = KnockoutRounds::default();
    rounds.set_stage(
        Stage::SemiFinals,
        vec![
            KnockoutMatch::between("sf-1", "A", "B"),
            KnockoutMatch::between("sf-2", "C", "D"),
        ],
    );
    record_result(&mut rounds, Stage::SemiFinals, 0, Some(1), Some(0), true).unwrap();
    record_result(&mut rounds, Stage::SemiFinals, 1, Some(0), Some(1), true).unwrap();

    let final_match = rounds.final_match.as_ref().unwrap();
    assert_eq!(final_match.id, "final");
    assert_eq!(final_match.team1.name, "A");
    assert_eq!(final_match.team2.name, "D");
    assert_eq!(rounds.champion(), None);

    let result = record_result(&mut rounds, Stage::Final, 0, Some(2), Some(4), true).unwrap();
    assert_eq!(result, Advancement::Champion("D".to_string()));
    assert_eq!(rounds.champion(), Some("D"));
}

#[test]
fn manual_assignment_creates_the_match() {
    let mut rounds = KnockoutRounds::default();
    assign_team(&mut rounds, Stage::QuarterFinals, 1, SlotSide::Team2, "Z").unwrap();
    assert_eq!(rounds.quarter_finals.len(), 2);
    assert_eq!(rounds.quarter_finals[1].team2.name, "Z");
    assert_eq!(
        assign_team(&mut rounds, Stage::Final, 1, SlotSide::Team1, "Z"),
        Err(CompetitionError::MatchNotFound {
            stage: Stage::Final,
            index: 1
        })
    );
}

#[test]
fn editing_a_source_after_the_destination_was_played_only_renames() {
    let mut rounds = round_of_16();
    record_result(&mut rounds, Stage::RoundOf16, 0, Some(2), Some(0), true).unwrap();
    record_result(&mut rounds, Stage::RoundOf16, 1, Some(1), Some(0), true).unwrap();
    record_result(&mut rounds, Stage::QuarterFinals, 0, Some(2), Some(1), true).unwrap();
    assert_eq!(rounds.quarter_finals[0].team1.name, "H0");
    assert_eq!(rounds.semi_finals[0].team1.name, "H0");

    let result = record_result(&mut rounds, Stage::RoundOf16, 0, Some(0), Some(2), true).unwrap();

    assert!(matches!(result, Advancement::Advanced { stage: Stage::QuarterFinals, index: 0, .. }));
    let qf = &rounds.quarter_finals[0];
    assert_eq!(qf.team1.name, "A0");
    assert_eq!(qf.team2.name, "H1");
    assert_eq!((qf.team1.score, qf.team2.score), (Some(2), Some(1)));
    assert!(qf.completed);
    assert_eq!(rounds.semi_finals[0].team1.name, "H0");
}

#[test]
fn placeholder_side_never_advances() {
    let mut rounds = KnockoutRounds::default();
    rounds.set_stage(
        Stage::QuarterFinals,
        vec![
            KnockoutMatch::between("qf-1", TBD, "B"),
            KnockoutMatch::between("qf-2", "C", "Por Definir"),
        ],
    );

    let result = record_result(&mut rounds, Stage::QuarterFinals, 0, Some(3), Some(0), true).unwrap();
    assert_eq!(result, Advancement::Undecided);
    assert_eq!(rounds.quarter_finals[0].winner(), None);
    assert!(rounds.semi_finals.is_empty());

    let result = record_result(&mut rounds, Stage::QuarterFinals, 1, Some(0), Some(1), true).unwrap();
    assert_eq!(result, Advancement::Undecided);
    assert!(rounds.semi_finals.is_empty());

    let result = record_result(&mut rounds, Stage::QuarterFinals, 0, Some(0), Some(1), true).unwrap();
    assert!(matches!(result, Advancement::Advanced { ref winner, .. } if winner == "B"));
}
