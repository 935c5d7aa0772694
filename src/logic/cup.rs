//! Cup operations on a competition: groups, knockout results, reset.

use crate::logic::bracket::{self, Advancement};
use crate::logic::groups::{advance_groups, draw_groups, generate_group_matches, refresh_group};
use crate::logic::upcoming::refresh_upcoming;
use crate::models::{
    Competition, CompetitionError, Group, League, SlotSide, Stage, TournamentKind, MAX_GOALS,
    MAX_GROUPS,
};
use rand::Rng;

fn refresh_upcoming_matches(competition: &mut Competition) {
    competition.upcoming_matches =
        refresh_upcoming(&competition.tournament, &competition.upcoming_matches);
}

/// Reject a single-match score above [`MAX_GOALS`]. Missing scores pass.
pub(crate) fn check_score(score: Option<u32>) -> Result<(), CompetitionError> {
    match score {
        Some(goals) if goals > MAX_GOALS => Err(CompetitionError::ScoreOutOfRange { goals }),
        _ => Ok(()),
    }
}

/// Append an empty group named after the next free letter. Returns its id.
/// Fails once all 26 letters are taken.
pub fn add_group(competition: &mut Competition) -> Result<String, CompetitionError> {
    let groups = &mut competition.tournament.groups;
    let group = (0..MAX_GROUPS)
        .filter_map(Group::letter_for)
        .map(Group::lettered)
        .find(|candidate| !groups.iter().any(|g| g.id == candidate.id))
        .ok_or(CompetitionError::TooManyGroups)?;
    let id = group.id.clone();
    groups.push(group);
    competition.tournament.kind = TournamentKind::Groups;
    competition.touch();
    Ok(id)
}

/// Set the teams of a group. Its matches are regenerated when the team list
/// changed; then tables, qualifiers and the knockout entry stage are refreshed.
pub fn set_group_teams(
    competition: &mut Competition,
    group_id: &str,
    teams: Vec<String>,
    qualifiers_count: Option<usize>,
) -> Result<(), CompetitionError> {
    let group = competition.tournament.group_mut(group_id)?;
    let teams: Vec<String> = teams
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if group.teams != teams || group.matches.is_empty() {
        group.teams = teams;
        generate_group_matches(group);
    }
    if let Some(n) = qualifiers_count {
        group.qualifiers_count = n;
    }
    refresh_group(group);
    advance_groups(&mut competition.tournament);
    refresh_upcoming_matches(competition);
    competition.touch();
    Ok(())
}

/// Enter a group match score. A completed match with both scores refreshes
/// the knockout seeding; otherwise only the group table is recomputed.
pub fn record_group_result(
    competition: &mut Competition,
    group_id: &str,
    match_index: usize,
    score1: Option<u32>,
    score2: Option<u32>,
    completed: bool,
) -> Result<(), CompetitionError> {
    check_score(score1)?;
    check_score(score2)?;
    let group = competition.tournament.group_mut(group_id)?;
    let m = group
        .matches
        .get_mut(match_index)
        .ok_or_else(|| CompetitionError::GroupMatchNotFound {
            group: group_id.to_string(),
            index: match_index,
        })?;
    m.team1_score = score1;
    m.team2_score = score2;
    m.completed = completed;
    let decided = completed && score1.is_some() && score2.is_some();
    refresh_group(group);
    if decided {
        advance_groups(&mut competition.tournament);
        refresh_upcoming_matches(competition);
    }
    competition.touch();
    Ok(())
}

/// Replace the groups with a random draw of the league table's teams.
pub fn draw_cup_groups<R: Rng + ?Sized>(
    competition: &mut Competition,
    group_count: usize,
    rng: &mut R,
) -> Result<(), CompetitionError> {
    let names: Vec<String> = competition.league.teams.iter().map(|t| t.name.clone()).collect();
    competition.tournament.groups = draw_groups(&names, group_count, rng)?;
    competition.tournament.kind = TournamentKind::Groups;
    competition.touch();
    Ok(())
}

/// Enter a knockout score and push the winner forward.
pub fn record_knockout_result(
    competition: &mut Competition,
    stage: Stage,
    index: usize,
    score1: Option<u32>,
    score2: Option<u32>,
    completed: bool,
) -> Result<Advancement, CompetitionError> {
    check_score(score1)?;
    check_score(score2)?;
    let advancement = bracket::record_result(
        &mut competition.tournament.knockout_rounds,
        stage,
        index,
        score1,
        score2,
        completed,
    )?;
    refresh_upcoming_matches(competition);
    competition.touch();
    Ok(advancement)
}

/// Put a team into a knockout slot by hand.
pub fn assign_knockout_team(
    competition: &mut Competition,
    stage: Stage,
    index: usize,
    side: SlotSide,
    team: &str,
) -> Result<(), CompetitionError> {
    bracket::assign_team(&mut competition.tournament.knockout_rounds, stage, index, side, team)?;
    refresh_upcoming_matches(competition);
    competition.touch();
    Ok(())
}

/// Start over: the cup, the upcoming list, league fixtures and league ids are
/// cleared. Teams stay with zeroed records; colors, stadiums and trophies are kept.
pub fn reset_cup(competition: &mut Competition) {
    let mut teams = std::mem::take(&mut competition.league.teams);
    for (i, team) in teams.iter_mut().enumerate() {
        team.reset_record();
        team.position = i as u32 + 1;
    }
    *competition = Competition {
        league: League { teams },
        ..Competition::new()
    };
    competition.touch();
}
