//! Upcoming matches list: cup entries derived from the knockout bracket,
//! league entries kept by hand.

use crate::models::{
    Competition, CompetitionError, MatchKind, MatchState, Stage, Tournament, UpcomingMatch,
    UpcomingUpdate, DATE_TBD, DEFAULT_KICKOFF,
};
use std::collections::HashSet;

/// Cup matches still to be played with both teams known, in bracket order,
/// followed by the `existing` entries that are not cup entries.
///
/// Old cup entries are dropped because the bracket is the source of truth
/// for them.
pub fn refresh_upcoming(tournament: &Tournament, existing: &[UpcomingMatch]) -> Vec<UpcomingMatch> {
    let rounds = &tournament.knockout_rounds;
    let mut upcoming: Vec<UpcomingMatch> = Stage::ALL
        .iter()
        .flat_map(|&stage| rounds.matches(stage))
        .filter(|m| m.state() == MatchState::AwaitingResult && !m.completed)
        .map(|m| UpcomingMatch {
            id: m.id.clone(),
            team1: m.team1.name.clone(),
            team2: m.team2.name.clone(),
            date: m.date.clone(),
            time: DEFAULT_KICKOFF.to_string(),
            kind: MatchKind::Cup,
        })
        .collect();

    let ids: HashSet<String> = upcoming.iter().map(|m| m.id.clone()).collect();
    upcoming.extend(
        existing
            .iter()
            .filter(|m| m.kind != MatchKind::Cup && !ids.contains(&m.id))
            .cloned(),
    );
    upcoming
}

/// Add an upcoming entry. Teams default to the first two of the league table,
/// the date to `TBD`; `update` then overrides any field. Returns the new id.
pub fn add_upcoming(competition: &mut Competition, update: UpcomingUpdate) -> String {
    let mut names = competition.league.teams.iter().map(|t| t.name.clone());
    let team1 = names.next().unwrap_or_default();
    let team2 = names.next().unwrap_or_default();
    let mut entry = UpcomingMatch::league(team1, team2, DATE_TBD);
    entry.edit(update);
    let id = entry.id.clone();
    log::info!("Added upcoming match {}: {} vs {}", id, entry.team1, entry.team2);
    competition.upcoming_matches.push(entry);
    competition.touch();
    id
}

fn upcoming_mut<'a>(
    competition: &'a mut Competition,
    id: &str,
) -> Result<&'a mut UpcomingMatch, CompetitionError> {
    competition
        .upcoming_matches
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| CompetitionError::UpcomingNotFound(id.to_string()))
}

/// Change fields of an upcoming entry.
pub fn update_upcoming(
    competition: &mut Competition,
    id: &str,
    update: UpcomingUpdate,
) -> Result<(), CompetitionError> {
    upcoming_mut(competition, id)?.edit(update);
    competition.touch();
    Ok(())
}

/// Drop an upcoming entry.
pub fn remove_upcoming(competition: &mut Competition, id: &str) -> Result<(), CompetitionError> {
    let before = competition.upcoming_matches.len();
    competition.upcoming_matches.retain(|m| m.id != id);
    if competition.upcoming_matches.len() == before {
        return Err(CompetitionError::UpcomingNotFound(id.to_string()));
    }
    competition.touch();
    Ok(())
}
