//! Group stage: match generation, group tables, qualifiers and knockout seeding.

use crate::logic::standings::recompute;
use crate::models::{
    CompetitionError, Group, GroupMatch, KnockoutMatch, KnockoutRounds, Stage, Standing,
    Tournament, MAX_GROUPS, TBD,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Every pair of group teams once, in roster order.
/// Ids look like `group-A-match-0-1`; scores start empty.
pub fn generate_group_matches(group: &mut Group) {
    let teams = &group.teams;
    let mut matches = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for i in 0..teams.len() {
        for j in i + 1..teams.len() {
            matches.push(GroupMatch::new(
                format!("{}-match-{}-{}", group.id, i, j),
                &teams[i],
                &teams[j],
            ));
        }
    }
    group.matches = matches;
}

/// Table of a group over its completed matches. Every group team has a row.
pub fn group_standings(group: &Group) -> Vec<Standing> {
    recompute(group.teams.iter().map(String::as_str), &group.matches)
}

/// Recompute the group table and the list of teams going through.
pub fn refresh_group(group: &mut Group) {
    group.standings = group_standings(group);
    group.qualified = group
        .standings
        .iter()
        .take(group.qualifiers_count)
        .map(|s| s.team.clone())
        .collect();
}

/// Stage the knockout starts at for a number of qualifiers.
pub fn entry_stage(qualifiers: usize) -> Option<Stage> {
    match qualifiers {
        n if n >= 16 => Some(Stage::RoundOf16),
        8..=15 => Some(Stage::QuarterFinals),
        4 => Some(Stage::SemiFinals),
        2 => Some(Stage::Final),
        _ => None,
    }
}

/// Fill the entry stage with consecutive pairs of `qualified`.
///
/// Nothing happens when the qualifier count has no entry stage or that stage
/// already holds matches. A missing opponent is `TBD`; qualifiers beyond the
/// stage size are left out and logged. Returns the seeded stage.
pub fn seed_knockout(rounds: &mut KnockoutRounds, qualified: &[String]) -> Option<Stage> {
    let stage = entry_stage(qualified.len())?;
    if !rounds.matches(stage).is_empty() {
        return None;
    }
    let capacity = stage.capacity();
    if qualified.len() > capacity * 2 {
        log::warn!(
            "{} qualifiers for a {} of {} matches; {} left out",
            qualified.len(),
            stage,
            capacity,
            qualified.len() - capacity * 2
        );
    }
    let matches: Vec<KnockoutMatch> = qualified
        .chunks(2)
        .take(capacity)
        .enumerate()
        .map(|(i, pair)| {
            let team1 = pair.first().map(String::as_str).unwrap_or(TBD);
            let team2 = pair.get(1).map(String::as_str).unwrap_or(TBD);
            KnockoutMatch::between(stage.match_id(i), team1, team2)
        })
        .collect();
    log::info!("Seeded {} with {} matches", stage, matches.len());
    rounds.set_stage(stage, matches);
    Some(stage)
}

/// True once every group has matches and all of them are completed with scores.
pub fn group_stage_finished(groups: &[Group]) -> bool {
    !groups.is_empty()
        && groups.iter().all(|g| {
            !g.matches.is_empty()
                && g.matches
                    .iter()
                    .all(|m| m.completed && m.team1_score.is_some() && m.team2_score.is_some())
        })
}

/// Refresh every group, collect qualifiers in group order and, once the group
/// stage is finished, seed the knockout.
pub fn advance_groups(tournament: &mut Tournament) -> Option<Stage> {
    let mut qualified = Vec::new();
    for group in &mut tournament.groups {
        refresh_group(group);
        qualified.extend(group.qualified.iter().cloned());
    }
    if !group_stage_finished(&tournament.groups) {
        return None;
    }
    seed_knockout(&mut tournament.knockout_rounds, &qualified)
}

/// Randomly split `teams` into `group_count` lettered groups of near-equal size
/// and generate each group's matches.
///
/// Fails unless `1 <= group_count <= 26` and there is at least one team per group.
pub fn draw_groups<R: Rng + ?Sized>(
    teams: &[String],
    group_count: usize,
    rng: &mut R,
) -> Result<Vec<Group>, CompetitionError> {
    let invalid = CompetitionError::InvalidGroupCount {
        requested: group_count,
        teams: teams.len(),
    };
    if group_count == 0 || group_count > MAX_GROUPS || group_count > teams.len() {
        return Err(invalid);
    }
    let mut groups = Vec::with_capacity(group_count);
    for i in 0..group_count {
        let letter = Group::letter_for(i).ok_or_else(|| invalid.clone())?;
        groups.push(Group::lettered(letter));
    }

    let mut pool = teams.to_vec();
    pool.shuffle(rng);
    for (i, team) in pool.into_iter().enumerate() {
        groups[i % group_count].teams.push(team);
    }
    for group in &mut groups {
        generate_group_matches(group);
        refresh_group(group);
    }
    log::info!("Drew {} teams into {} groups", teams.len(), group_count);
    Ok(groups)
}
