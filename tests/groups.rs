//! Integration tests for the group stage and knockout seeding.

use league_tournament_web::logic::{
    advance_groups, draw_groups, entry_stage, generate_group_matches, group_stage_finished,
    refresh_group, refresh_upcoming, seed_knockout,
};
use league_tournament_web::models::{
    CompetitionError, Group, KnockoutMatch, KnockoutRounds, MatchKind, Stage, Tournament,
    UpcomingMatch, TBD,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn group(letter: char, teams: &[&str]) -> Group {
    let mut g = Group::lettered(letter);
    g.teams = teams.iter().map(|t| t.to_string()).collect();
    generate_group_matches(&mut g);
    g
}

fn finish(group: &mut Group, index: usize, score1: u32, score2: u32) {
    let m = &mut group.matches[index];
    m.team1_score = Some(score1);
    m.team2_score = Some(score2);
    m.completed = true;
}

#[test]
fn every_pair_plays_once() {
    let g = group('A', &["A1", "A2", "A3", "A4"]);
    assert_eq!(g.matches.len(), 6);
    assert_eq!(g.matches[0].id, "group-A-match-0-1");
    assert_eq!(g.matches[5].id, "group-A-match-2-3");
    assert!(g.matches.iter().all(|m| !m.completed && m.team1_score.is_none()));
}

#[test]
fn qualifiers_follow_the_group_table() {
    let mut g = group('B', &["B1", "B2", "B3"]);
    // B1-B2, B1-B3, B2-B3
    finish(&mut g, 0, 0, 1);
    finish(&mut g, 1, 0, 2);
    finish(&mut g, 2, 1, 1);
    refresh_group(&mut g);
    assert_eq!(g.qualified, vec!["B3".to_string(), "B2".to_string()]);
    assert_eq!(g.standings[0].team, "B3");
    assert_eq!(g.standings[2].team, "B1");

    g.qualifiers_count = 1;
    refresh_group(&mut g);
    assert_eq!(g.qualified, vec!["B3".to_string()]);
}

#[test]
fn entry_stage_by_qualifier_count() {
    assert_eq!(entry_stage(16), Some(Stage::RoundOf16));
    assert_eq!(entry_stage(20), Some(Stage::RoundOf16));
    assert_eq!(entry_stage(8), Some(Stage::QuarterFinals));
    assert_eq!(entry_stage(12), Some(Stage::QuarterFinals));
    assert_eq!(entry_stage(4), Some(Stage::SemiFinals));
    assert_eq!(entry_stage(2), Some(Stage::Final));
    assert_eq!(entry_stage(6), None);
    assert_eq!(entry_stage(0), None);
}

#[test]
fn seeding_pairs_consecutive_qualifiers() {
    let mut rounds = KnockoutRounds::default();
    let qualified: Vec<String> = ["A1", "A2", "B1", "B2"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seed_knockout(&mut rounds, &qualified), Some(Stage::SemiFinals));
    assert_eq!(rounds.semi_finals.len(), 2);
    assert_eq!(rounds.semi_finals[0].id, "sf-1");
    assert_eq!(
        (rounds.semi_finals[1].team1.name.as_str(), rounds.semi_finals[1].team2.name.as_str()),
        ("B1", "B2")
    );
}

#[test]
fn seeding_leaves_a_filled_stage_alone() {
    let mut rounds = KnockoutRounds::default();
    rounds.set_stage(Stage::SemiFinals, vec![KnockoutMatch::between("sf-1", "X", "Y")]);
    let qualified: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seed_knockout(&mut rounds, &qualified), None);
    assert_eq!(rounds.semi_finals.len(), 1);
    assert_eq!(rounds.semi_finals[0].team1.name, "X");
}

#[test]
fn odd_qualifier_count_gets_a_tbd_opponent() {
    let mut rounds = KnockoutRounds::default();
    let qualified: Vec<String> = (0..9).map(|i| format!("Q{i}")).collect();
    assert_eq!(seed_knockout(&mut rounds, &qualified), Some(Stage::QuarterFinals));
    assert_eq!(rounds.quarter_finals.len(), 4);
    assert_eq!(rounds.quarter_finals[3].team2.name, "Q7");

    let mut rounds = KnockoutRounds::default();
    let qualified: Vec<String> = (0..16).map(|i| format!("Q{i}")).chain(["Q16".to_string()]).collect();
    seed_knockout(&mut rounds, &qualified);
    assert_eq!(rounds.round_of16.len(), 8);
    assert!(rounds.round_of16.iter().all(|m| m.team2.name != TBD));
}

#[test]
fn knockout_waits_for_the_whole_group_stage() {
    let mut tournament = Tournament::default();
    tournament.groups = vec![group('A', &["A1", "A2"]), group('B', &["B1", "B2"])];
    assert!(!group_stage_finished(&tournament.groups));

    finish(&mut tournament.groups[0], 0, 2, 0);
    assert_eq!(advance_groups(&mut tournament), None);
    assert!(tournament.knockout_rounds.semi_finals.is_empty());

    finish(&mut tournament.groups[1], 0, 0, 1);
    assert_eq!(advance_groups(&mut tournament), Some(Stage::SemiFinals));
    let sf = &tournament.knockout_rounds.semi_finals;
    assert_eq!((sf[0].team1.name.as_str(), sf[0].team2.name.as_str()), ("A1", "A2"));
    assert_eq!((sf[1].team1.name.as_str(), sf[1].team2.name.as_str()), ("B2", "B1"));
}

#[test]
fn draw_splits_teams_evenly() {
    let teams: Vec<String> = (0..10).map(|i| format!("T{i}")).collect();
    let mut rng = StdRng::seed_from_u64(7);
    let groups = draw_groups(&teams, 3, &mut rng).unwrap();

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].id, "group-A");
    assert_eq!(groups[2].name, "Group C");
    let mut sizes: Vec<usize> = groups.iter().map(|g| g.teams.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3, 4]);

    let drawn: HashSet<&String> = groups.iter().flat_map(|g| g.teams.iter()).collect();
    assert_eq!(drawn.len(), 10);
    for g in &groups {
        let n = g.teams.len();
        assert_eq!(g.matches.len(), n * (n - 1) / 2);
        assert_eq!(g.standings.len(), n);
    }
    assert_eq!(
        draw_groups(&teams, 0, &mut rng),
        Err(CompetitionError::InvalidGroupCount { requested: 0, teams: 10 })
    );
    assert_eq!(
        draw_groups(&teams, 11, &mut rng),
        Err(CompetitionError::InvalidGroupCount { requested: 11, teams: 10 })
    );
}

#[test]
fn draw_is_limited_to_one_group_per_letter() {
    let teams: Vec<String> = (0..54).map(|i| format!("T{i}")).collect();
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(
        draw_groups(&teams, 27, &mut rng),
        Err(CompetitionError::InvalidGroupCount { requested: 27, teams: 54 })
    );

    let groups = draw_groups(&teams, 26, &mut rng).unwrap();
    let ids: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), 26);
    assert_eq!(groups[25].id, "group-Z");
}

#[test]
fn upcoming_lists_open_cup_matches_then_league_entries() {
    let mut tournament = Tournament::default();
    tournament.knockout_rounds.set_stage(
        Stage::QuarterFinals,
        vec![
            KnockoutMatch::between("qf-1", "A", "B"),
            KnockoutMatch::between("qf-2", "C", TBD),
        ],
    );
    tournament.knockout_rounds.set_stage(Stage::Final, vec![KnockoutMatch::between("final", "E", "F")]);
    let mut decided = KnockoutMatch::between("qf-3", "G", "H");
    decided.team1.score = Some(1);
    decided.team2.score = Some(0);
    decided.completed = true;
    tournament.knockout_rounds.quarter_finals.push(decided);

    let league = UpcomingMatch::league("L1", "L2", "2026-05-01");
    let stale_cup = UpcomingMatch {
        kind: MatchKind::Cup,
        ..UpcomingMatch::league("X", "Y", "TBD")
    };
    let upcoming = refresh_upcoming(&tournament, &[stale_cup, league.clone()]);

    let ids: Vec<&str> = upcoming.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["qf-1", "final", league.id.as_str()]);
    assert!(upcoming[..2].iter().all(|m| m.kind == MatchKind::Cup && m.time == "20:00"));
}
