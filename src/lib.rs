//! League and cup web app: library with models, competition logic and persistence.

pub mod auth;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_groups, apply_manual_result, archive_cup, archive_league, correct_manual_result,
    generate_league_schedule, record_fixture_result, record_knockout_result, refresh_league_table,
    reset_cup, Advancement,
};
pub use models::{
    Competition, CompetitionError, Fixture, FixtureId, Group, History, KnockoutMatch,
    KnockoutRounds, Stage, Standing, Team,
};
pub use store::{EditError, Store, StoreError, StorePaths};
