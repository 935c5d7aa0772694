//! Knockout bracket: record results and move winners into the next stage.

use crate::models::{CompetitionError, KnockoutRounds, MatchState, SlotSide, Stage};

/// What a call to [`advance`] did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Advancement {
    /// Not completed, or a score is missing. Nothing changed.
    Pending,
    /// Completed level, or the higher score sits on a `TBD` side. Nobody goes through.
    Undecided,
    /// `winner` was written into `side` of `stage[index]`.
    Advanced {
        winner: String,
        stage: Stage,
        index: usize,
        side: SlotSide,
    },
    /// The final is decided.
    Champion(String),
}

/// Move the winner of `stage[index]` into the next stage.
///
/// The destination is match `index / 2` of the next stage, team1 for an even
/// `index` and team2 for an odd one. A missing destination match is created
/// with both sides `TBD`. Calling this again after a score edit overwrites
/// the destination side. A destination that was already completed with
/// another team is not rolled back; that is only logged.
pub fn advance(
    rounds: &mut KnockoutRounds,
    stage: Stage,
    index: usize,
) -> Result<Advancement, CompetitionError> {
    let source = rounds
        .get(stage, index)
        .ok_or(CompetitionError::MatchNotFound { stage, index })?;
    if source.state() != MatchState::Completed {
        return Ok(Advancement::Pending);
    }
    let Some(winner) = source.winner().map(str::to_string) else {
        log::debug!(
            "No winner in {} match {} ({:?}-{:?}), nobody advances",
            stage,
            index + 1,
            source.team1.score,
            source.team2.score
        );
        return Ok(Advancement::Undecided);
    };

    let Some(next) = stage.next() else {
        log::info!("{} wins the final", winner);
        return Ok(Advancement::Champion(winner));
    };

    let dest_index = index / 2;
    let side = SlotSide::for_index(index);
    let dest = rounds
        .get_or_create(next, dest_index)
        .ok_or(CompetitionError::MatchNotFound {
            stage: next,
            index: dest_index,
        })?;

    let already_played = dest.state() == MatchState::Completed;
    let slot = dest.slot_mut(side);
    if already_played && slot.name != winner {
        log::warn!(
            "{} match {} was already played with {}; it now lists {} and is not replayed",
            next,
            dest_index + 1,
            slot.name,
            winner
        );
    }
    slot.name = winner.clone();

    log::info!(
        "{} advances from {} match {} to {} match {} ({:?})",
        winner,
        stage,
        index + 1,
        next,
        dest_index + 1,
        side
    );
    Ok(Advancement::Advanced {
        winner,
        stage: next,
        index: dest_index,
        side,
    })
}

/// Set the scores and completion flag of `stage[index]`, then re-run [`advance`].
pub fn record_result(
    rounds: &mut KnockoutRounds,
    stage: Stage,
    index: usize,
    score1: Option<u32>,
    score2: Option<u32>,
    completed: bool,
) -> Result<Advancement, CompetitionError> {
    let m = rounds
        .get_mut(stage, index)
        .ok_or(CompetitionError::MatchNotFound { stage, index })?;
    m.team1.score = score1;
    m.team2.score = score2;
    m.completed = completed;
    advance(rounds, stage, index)
}

/// Put a team into one side of `stage[index]` by hand, creating the match if needed.
pub fn assign_team(
    rounds: &mut KnockoutRounds,
    stage: Stage,
    index: usize,
    side: SlotSide,
    team: &str,
) -> Result<(), CompetitionError> {
    let m = rounds
        .get_or_create(stage, index)
        .ok_or(CompetitionError::MatchNotFound { stage, index })?;
    m.slot_mut(side).name = team.to_string();
    Ok(())
}
