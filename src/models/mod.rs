//! Data structures for the competition: teams, fixtures, groups, knockout rounds, archives.

mod competition;
mod fixture;
mod group;
mod history;
mod knockout;
mod team;

pub use competition::{
    Competition, CompetitionError, League, LeagueInfo, TeamUpdate, Tournament, TournamentKind,
    TEAM_COLORS,
};
pub use fixture::{
    Fixture, FixtureId, FixtureStatus, GoalTimeline, MatchKind, UpcomingMatch, UpcomingUpdate,
    DATE_TBD, DEFAULT_KICKOFF,
};
pub use group::{Group, GroupMatch, DEFAULT_QUALIFIERS, MAX_GROUPS};
pub use history::{Archive, History};
pub use knockout::{KnockoutMatch, KnockoutRounds, MatchState, Slot, SlotSide, Stage, TBD};
pub use team::{
    Outcome, Record, RecordUpdate, Standing, Team, MAX_GOALS, POINTS_FOR_DRAW, POINTS_FOR_WIN,
};
