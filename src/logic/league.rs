//! League operations on a competition: calendar, results, and the league table.

use crate::logic::cup::check_score;
use crate::logic::schedule;
use crate::logic::standings::{rank_teams, recompute};
use crate::models::{
    Competition, CompetitionError, FixtureId, GoalTimeline, LeagueInfo, RecordUpdate, Team,
};

/// Switch to league `id`, registering it with `name` if it is new.
pub fn start_league(competition: &mut Competition, id: &str, name: &str) {
    if !competition.leagues.iter().any(|l| l.id == id) {
        competition.leagues.push(LeagueInfo {
            id: id.to_string(),
            name: name.to_string(),
        });
    }
    competition.current_league_id = id.to_string();
    competition.touch();
}

/// Generate the double round-robin calendar for the current league from the
/// league table order. Replaces that league's fixtures, leaves other leagues
/// alone. Returns the number of fixtures created.
pub fn generate_league_schedule(competition: &mut Competition) -> Result<usize, CompetitionError> {
    let fixtures = schedule::generate(&competition.league.teams, &competition.current_league_id)?;
    let count = fixtures.len();
    let league_id = competition.current_league_id.clone();
    competition.league_matches.retain(|f| f.league_id != league_id);
    competition.league_matches.extend(fixtures);
    competition.touch();
    Ok(count)
}

/// Store the goal timeline of a fixture, mark it played and rebuild the table.
pub fn record_fixture_result(
    competition: &mut Competition,
    id: FixtureId,
    timeline: GoalTimeline,
) -> Result<(), CompetitionError> {
    let (home_goals, away_goals) = timeline.score();
    check_score(Some(home_goals))?;
    check_score(Some(away_goals))?;
    let fixture = competition.fixture_mut(id)?;
    fixture.set_result(timeline);
    log::info!(
        "Matchday {}: {} {}-{} {}",
        fixture.matchday,
        fixture.home_team,
        fixture.timeline.home.len(),
        fixture.timeline.away.len(),
        fixture.away_team
    );
    refresh_league_table(competition);
    Ok(())
}

/// Put a played fixture back to scheduled and rebuild the table.
pub fn reopen_fixture(competition: &mut Competition, id: FixtureId) -> Result<(), CompetitionError> {
    competition.fixture_mut(id)?.reopen();
    refresh_league_table(competition);
    Ok(())
}

/// Rebuild every team's record and position from the current league's
/// played fixtures. Counters entered by hand are overwritten.
pub fn refresh_league_table(competition: &mut Competition) {
    let standings = recompute(
        competition.league.teams.iter().map(|t| t.name.as_str()),
        competition.current_fixtures(),
    );
    for standing in standings {
        if let Some(team) = competition.team_mut(&standing.team) {
            team.record = standing.record;
            team.position = standing.position;
        }
    }
    competition.league.teams.sort_by_key(|t| t.position);
    competition.touch();
}

fn check_pair(team1: &str, team2: &str) -> Result<(), CompetitionError> {
    if team1.is_empty() || team2.is_empty() {
        return Err(CompetitionError::InvalidTeamName);
    }
    if team1 == team2 {
        return Err(CompetitionError::SameTeam(team1.to_string()));
    }
    Ok(())
}

/// Add a one-off result straight into the league table, without a fixture.
/// Teams not in the table yet are added.
pub fn apply_manual_result(
    competition: &mut Competition,
    team1: &str,
    goals1: u32,
    team2: &str,
    goals2: u32,
) -> Result<(), CompetitionError> {
    let (team1, team2) = (team1.trim(), team2.trim());
    check_pair(team1, team2)?;
    check_score(Some(goals1))?;
    check_score(Some(goals2))?;
    for name in [team1, team2] {
        if competition.team(name).is_none() {
            competition.add_team(Team::new(name))?;
        }
    }
    if let Some(team) = competition.team_mut(team1) {
        team.record.apply(goals1, goals2);
    }
    if let Some(team) = competition.team_mut(team2) {
        team.record.apply(goals2, goals1);
    }
    rank_teams(&mut competition.league.teams);
    competition.touch();
    Ok(())
}

/// Replace a result entered with [`apply_manual_result`]: the old score is
/// taken off both records, then the new one applied.
pub fn correct_manual_result(
    competition: &mut Competition,
    team1: &str,
    team2: &str,
    old: (u32, u32),
    new: (u32, u32),
) -> Result<(), CompetitionError> {
    let (team1, team2) = (team1.trim(), team2.trim());
    check_pair(team1, team2)?;
    for goals in [old.0, old.1, new.0, new.1] {
        check_score(Some(goals))?;
    }
    for name in [team1, team2] {
        if competition.team(name).is_none() {
            return Err(CompetitionError::TeamNotFound(name.to_string()));
        }
    }
    if let Some(team) = competition.team_mut(team1) {
        team.record.reverse(old.0, old.1);
        team.record.apply(new.0, new.1);
    }
    if let Some(team) = competition.team_mut(team2) {
        team.record.reverse(old.1, old.0);
        team.record.apply(new.1, new.0);
    }
    rank_teams(&mut competition.league.teams);
    competition.touch();
    Ok(())
}

/// Overwrite a team's league-table counters by hand and re-rank the table.
pub fn edit_team_record(
    competition: &mut Competition,
    name: &str,
    update: RecordUpdate,
) -> Result<(), CompetitionError> {
    let team = competition
        .team_mut(name)
        .ok_or_else(|| CompetitionError::TeamNotFound(name.to_string()))?;
    team.record.edit(&update);
    log::info!("Edited record of '{}': {} pts", name, team.record.points);
    rank_teams(&mut competition.league.teams);
    competition.touch();
    Ok(())
}

/// Zero every record in the league table; teams and their looks stay.
pub fn clear_league_table(competition: &mut Competition) {
    for team in &mut competition.league.teams {
        team.reset_record();
    }
    for (i, team) in competition.league.teams.iter_mut().enumerate() {
        team.position = i as u32 + 1;
    }
    competition.touch();
}
