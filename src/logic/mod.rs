//! Competition rules: calendar, tables, group stage, knockout bracket and archives.

pub mod bracket;
mod cup;
mod groups;
mod history;
mod league;
pub mod schedule;
pub mod standings;
mod upcoming;

pub use bracket::Advancement;
pub use cup::{
    add_group, assign_knockout_team, draw_cup_groups, record_group_result, record_knockout_result,
    reset_cup, set_group_teams,
};
pub use groups::{
    advance_groups, draw_groups, entry_stage, generate_group_matches, group_stage_finished,
    group_standings, refresh_group, seed_knockout,
};
pub use history::{archive_cup, archive_league};
pub use league::{
    apply_manual_result, clear_league_table, correct_manual_result, edit_team_record,
    generate_league_schedule, record_fixture_result, refresh_league_table, reopen_fixture, start_league,
};
pub use standings::{apply_result, rank_standings, rank_teams, recompute, reverse_result, MatchResult, Scoreline};
pub use upcoming::{add_upcoming, refresh_upcoming, remove_upcoming, update_upcoming};
