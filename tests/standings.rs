//! Integration tests for table computation and ranking.

use league_tournament_web::logic::{apply_result, rank_teams, recompute, reverse_result};
use league_tournament_web::models::{
    Fixture, GoalTimeline, GroupMatch, Record, RecordUpdate, Standing, Team,
};

fn played(home: &str, away: &str, home_goals: u32, away_goals: u32) -> Fixture {
    let mut f = Fixture::new("default", 1, home, away);
    let minutes = |n: u32| (0..n).map(|i| 10 + i * 5).collect::<Vec<u32>>();
    f.set_result(GoalTimeline::new(minutes(home_goals), minutes(away_goals)));
    f
}

fn row<'a>(table: &'a [Standing], team: &str) -> &'a Standing {
    table.iter().find(|s| s.team == team).unwrap()
}

#[test]
fn every_roster_team_gets_a_row() {
    let fixtures: Vec<Fixture> = Vec::new();
    let table = recompute(["A", "B", "C"], &fixtures);
    assert_eq!(table.len(), 3);
    assert!(table.iter().all(|s| s.record == Record::default()));
    assert_eq!(
        table.iter().map(|s| s.position).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn win_draw_and_loss_are_counted() {
    let fixtures = vec![played("A", "B", 2, 0), played("B", "C", 1, 1)];
    let table = recompute(["A", "B", "C"], &fixtures);

    let a = row(&table, "A");
    assert_eq!((a.record.played, a.record.wins, a.record.points), (1, 1, 3));
    assert_eq!(a.record.goal_difference, 2);

    let b = row(&table, "B");
    assert_eq!(
        (b.record.played, b.record.wins, b.record.draws, b.record.losses),
        (2, 0, 1, 1)
    );
    assert_eq!((b.record.goals_for, b.record.goals_against), (1, 3));
    assert_eq!(b.record.goal_difference, -2);
    assert_eq!(b.record.points, 1);

    let c = row(&table, "C");
    assert_eq!(c.record.points, 1);
    assert_eq!(table[0].team, "A");
}

#[test]
fn scheduled_fixtures_are_ignored() {
    let fixtures = vec![Fixture::new("default", 1, "A", "B"), played("A", "B", 0, 1)];
    let table = recompute(["A", "B"], &fixtures);
    assert_eq!(row(&table, "A").record.played, 1);
    assert_eq!(table[0].team, "B");
}

#[test]
fn unknown_teams_are_skipped() {
    let fixtures = vec![played("A", "Ghosts", 5, 0), played("A", "B", 1, 0)];
    let table = recompute(["A", "B"], &fixtures);
    assert_eq!(table.len(), 2);
    assert_eq!(row(&table, "A").record.played, 1);
    assert_eq!(row(&table, "A").record.goals_for, 1);
}

#[test]
fn goal_difference_breaks_equal_points() {
    let fixtures = vec![
        played("A", "C", 1, 0),
        played("B", "D", 4, 0),
    ];
    let table = recompute(["A", "B", "C", "D"], &fixtures);
    assert_eq!(table[0].team, "B");
    assert_eq!(table[1].team, "A");
    assert_eq!(table[0].position, 1);
    assert_eq!(table[1].position, 2);
}

#[test]
fn full_ties_keep_roster_order() {
    let fixtures = vec![played("A", "B", 1, 1), played("C", "D", 2, 2)];
    let table = recompute(["D", "C", "B", "A"], &fixtures);
    let order: Vec<&str> = table.iter().map(|s| s.team.as_str()).collect();
    assert_eq!(order, vec!["D", "C", "B", "A"]);
}

#[test]
fn recompute_is_idempotent() {
    let fixtures = vec![
        played("A", "B", 3, 1),
        played("B", "C", 0, 0),
        played("C", "A", 2, 1),
    ];
    let first = recompute(["A", "B", "C"], &fixtures);
    let second = recompute(["A", "B", "C"], &fixtures);
    assert_eq!(first, second);
}

#[test]
fn group_matches_count_once_completed_with_scores() {
    let mut done = GroupMatch::new("g-0-1", "A", "B");
    done.team1_score = Some(0);
    done.team2_score = Some(2);
    done.completed = true;
    let mut open = GroupMatch::new("g-0-2", "A", "C");
    open.team1_score = Some(1);
    open.completed = true;
    let mut unconfirmed = GroupMatch::new("g-1-2", "B", "C");
    unconfirmed.team1_score = Some(1);
    unconfirmed.team2_score = Some(0);

    let matches = vec![done, open, unconfirmed];
    let table = recompute(["A", "B", "C"], &matches);
    assert_eq!(table[0].team, "B");
    assert_eq!(row(&table, "B").record.played, 1);
    assert_eq!(row(&table, "C").record.played, 0);
}

#[test]
fn apply_then_reverse_restores_records() {
    let mut home = Record::default();
    let mut away = Record::default();
    apply_result(&mut home, &mut away, 1, 1);
    let (home_before, away_before) = (home, away);

    for (h, a) in [(3, 1), (0, 0), (0, 4)] {
        apply_result(&mut home, &mut away, h, a);
        reverse_result(&mut home, &mut away, h, a);
        assert_eq!(home, home_before);
        assert_eq!(away, away_before);
    }
}

#[test]
fn reverse_clamps_at_zero() {
    let mut record = Record::default();
    record.reverse(3, 0);
    assert_eq!(record, Record::default());
}

#[test]
fn rank_teams_reorders_table_and_positions() {
    let mut teams = vec![Team::new("A"), Team::new("B"), Team::new("C")];
    teams[2].record.apply(2, 0);
    teams[1].record.apply(1, 1);
    rank_teams(&mut teams);
    let order: Vec<(&str, u32)> = teams.iter().map(|t| (t.name.as_str(), t.position)).collect();
    assert_eq!(order, vec![("C", 1), ("B", 2), ("A", 3)]);
}

#[test]
fn counters_saturate_instead_of_overflowing() {
    let mut record = Record::default();
    record.apply(u32::MAX, 0);
    record.apply(1, 0);
    assert_eq!(record.goals_for, u32::MAX);
    assert_eq!(record.goal_difference, i32::MAX);
    assert_eq!((record.played, record.wins, record.points), (2, 2, 6));

    let mut losing = Record::default();
    losing.apply(0, u32::MAX);
    assert_eq!(losing.goal_difference, i32::MIN);
}

#[test]
fn hand_edited_counters_recount_played_and_points() {
    let mut record = Record::default();
    record.edit(&RecordUpdate {
        wins: Some(2),
        draws: Some(1),
        goals_for: Some(5),
        goals_against: Some(7),
        ..RecordUpdate::default()
    });
    assert_eq!((record.played, record.points), (3, 7));
    assert_eq!(record.goal_difference, -2);

    record.edit(&RecordUpdate {
        losses: Some(1),
        points: Some(10),
        ..RecordUpdate::default()
    });
    assert_eq!((record.played, record.points), (4, 10));
}
