//! Archive the league table or the cup before clearing it.

use crate::logic::cup::reset_cup;
use crate::logic::league::clear_league_table;
use crate::models::{Archive, Competition, CompetitionError, History};
use chrono::{DateTime, Utc};

/// Save the current competition as the league archive, then clear the table.
/// Fails when the league table has no teams.
pub fn archive_league(
    history: &mut History,
    competition: &mut Competition,
    now: DateTime<Utc>,
) -> Result<(), CompetitionError> {
    if competition.league.teams.is_empty() {
        return Err(CompetitionError::NothingToArchive);
    }
    history.league = Some(Archive {
        snapshot: competition.clone(),
        saved_at: now,
    });
    clear_league_table(competition);
    log::info!("Archived league table with {} teams", competition.league.teams.len());
    Ok(())
}

/// Save the current competition as the cup archive, then reset it with
/// [`reset_cup`]: teams stay, everything else starts over.
pub fn archive_cup(history: &mut History, competition: &mut Competition, now: DateTime<Utc>) {
    history.cup = Some(Archive {
        snapshot: competition.clone(),
        saved_at: now,
    });
    reset_cup(competition);
    log::info!("Archived cup and reset it");
}
