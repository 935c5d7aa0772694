//! Double round-robin league schedule.

use crate::models::{CompetitionError, Fixture, Team};
use std::collections::HashSet;

/// Home/away index pairs for every round of one full round robin.
///
/// Odd `n`: in round `r` team `r` sits out and the rest pair up as
/// `(r + i) mod n` against `(r - i) mod n` for `i` in `1..=(n - 1) / 2`,
/// with home and away swapped on odd rounds.
///
/// Even `n`: the odd rotation runs over the first `n - 1` teams and the last
/// team meets whoever would have sat out, alternating venue by round parity.
/// That gives `n - 1` rounds of `n / 2` pairs each.
pub fn first_leg_pairings(n: usize) -> Vec<Vec<(usize, usize)>> {
    if n < 2 {
        return Vec::new();
    }
    if n % 2 == 1 {
        return rotate(n);
    }
    let fixed = n - 1;
    rotate(n - 1)
        .into_iter()
        .enumerate()
        .map(|(round, mut pairs)| {
            let pair = if round % 2 == 0 {
                (round, fixed)
            } else {
                (fixed, round)
            };
            pairs.insert(0, pair);
            pairs
        })
        .collect()
}

fn rotate(n: usize) -> Vec<Vec<(usize, usize)>> {
    (0..n)
        .map(|round| {
            (1..=(n - 1) / 2)
                .map(|i| {
                    let home = (round + i) % n;
                    let away = (round + n - i) % n;
                    if round % 2 == 1 {
                        (away, home)
                    } else {
                        (home, away)
                    }
                })
                .collect()
        })
        .collect()
}

/// Generate the complete double round-robin fixture list for `teams`.
///
/// The first leg takes matchdays `1..=R` (R = `n - 1` for even `n`, `n` for
/// odd), the second leg replays it with venues swapped on `R + 1..=2R`.
/// Every fixture starts scheduled, undated, at the home team's stadium.
pub fn generate(teams: &[Team], league_id: &str) -> Result<Vec<Fixture>, CompetitionError> {
    if teams.len() < 2 {
        return Err(CompetitionError::InsufficientTeams { found: teams.len() });
    }
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(CompetitionError::DuplicateTeamName(team.name.clone()));
        }
    }

    let rounds = first_leg_pairings(teams.len());
    let leg_length = rounds.len() as u32;
    let mut fixtures = Vec::with_capacity(teams.len() * (teams.len() - 1));

    for (round, pairs) in rounds.iter().enumerate() {
        let matchday = round as u32 + 1;
        for &(home, away) in pairs {
            fixtures.push(fixture(teams, league_id, matchday, home, away));
        }
    }
    for (round, pairs) in rounds.iter().enumerate() {
        let matchday = leg_length + round as u32 + 1;
        for &(home, away) in pairs {
            fixtures.push(fixture(teams, league_id, matchday, away, home));
        }
    }

    log::info!(
        "Generated {} fixtures over {} matchdays for {} teams (league '{}')",
        fixtures.len(),
        leg_length * 2,
        teams.len(),
        league_id
    );
    Ok(fixtures)
}

fn fixture(teams: &[Team], league_id: &str, matchday: u32, home: usize, away: usize) -> Fixture {
    let mut f = Fixture::new(league_id, matchday, &teams[home].name, &teams[away].name);
    f.stadium = teams[home].stadium().to_string();
    f
}
