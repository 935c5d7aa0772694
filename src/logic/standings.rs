//! Standings: derive tables from finished matches and rank them.

use crate::models::{Fixture, GroupMatch, Record, Standing, Team};
use std::collections::HashMap;

/// Final score of a finished match, home side first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchResult<'a> {
    pub home: &'a str,
    pub away: &'a str,
    pub home_goals: u32,
    pub away_goals: u32,
}

/// Anything that can count towards a table once it is finished.
pub trait Scoreline {
    /// `None` until the match is finished with both scores known.
    fn final_result(&self) -> Option<MatchResult<'_>>;
}

impl Scoreline for Fixture {
    fn final_result(&self) -> Option<MatchResult<'_>> {
        let (home_goals, away_goals) = self.score()?;
        Some(MatchResult {
            home: &self.home_team,
            away: &self.away_team,
            home_goals,
            away_goals,
        })
    }
}

impl Scoreline for GroupMatch {
    fn final_result(&self) -> Option<MatchResult<'_>> {
        if !self.completed {
            return None;
        }
        Some(MatchResult {
            home: &self.team1,
            away: &self.team2,
            home_goals: self.team1_score?,
            away_goals: self.team2_score?,
        })
    }
}

/// Build a ranked table from scratch.
///
/// Every roster name gets a row, even without games. Matches that are not
/// finished are ignored; results naming a team outside the roster are
/// skipped with a warning. Recomputing the same input always yields the
/// same table.
pub fn recompute<'a, N, M, S>(roster: N, matches: M) -> Vec<Standing>
where
    N: IntoIterator<Item = &'a str>,
    M: IntoIterator<Item = &'a S>,
    S: Scoreline + 'a,
{
    let mut table: Vec<Standing> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for name in roster {
        if !index.contains_key(name) {
            index.insert(name.to_string(), table.len());
            table.push(Standing::new(name));
        }
    }

    for m in matches {
        let Some(result) = m.final_result() else {
            continue;
        };
        let (Some(&home), Some(&away)) = (index.get(result.home), index.get(result.away)) else {
            log::warn!(
                "Skipping result {} {}-{} {}: team not in table",
                result.home,
                result.home_goals,
                result.away_goals,
                result.away
            );
            continue;
        };
        table[home].record.apply(result.home_goals, result.away_goals);
        table[away].record.apply(result.away_goals, result.home_goals);
    }

    rank_standings(&mut table);
    table
}

/// Sort by points, then goal difference, and renumber positions from 1.
/// Rows still level keep their previous relative order.
pub fn rank_standings(table: &mut [Standing]) {
    table.sort_by(|a, b| a.record.table_order(&b.record));
    for (i, row) in table.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }
}

/// Same ordering as [`rank_standings`], applied to the league table itself.
pub fn rank_teams(teams: &mut [Team]) {
    teams.sort_by(|a, b| a.record.table_order(&b.record));
    for (i, team) in teams.iter_mut().enumerate() {
        team.position = i as u32 + 1;
    }
}

/// Add a single result to both sides' records.
pub fn apply_result(home: &mut Record, away: &mut Record, home_goals: u32, away_goals: u32) {
    home.apply(home_goals, away_goals);
    away.apply(away_goals, home_goals);
}

/// Undo [`apply_result`] for the same score.
pub fn reverse_result(home: &mut Record, away: &mut Record, home_goals: u32, away_goals: u32) {
    home.reverse(home_goals, away_goals);
    away.reverse(away_goals, home_goals);
}
