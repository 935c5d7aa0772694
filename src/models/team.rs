//! Team, its cumulative Record, and ranked Standing rows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Points for a win. A draw is worth 1, a loss 0.
pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Largest score accepted for one side of a single match.
pub const MAX_GOALS: u32 = 99;

/// Result of a single match seen from one side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::Loss,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Outcome::Win => POINTS_FOR_WIN,
            Outcome::Draw => POINTS_FOR_DRAW,
            Outcome::Loss => 0,
        }
    }
}

/// Cumulative counters for a team in a table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Always `goals_for - goals_against`; kept in the document for readers.
    pub goal_difference: i32,
    pub points: u32,
}

impl Record {
    /// Add one match result to the counters. Counters saturate instead of wrapping.
    pub fn apply(&mut self, goals_for: u32, goals_against: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        let outcome = Outcome::from_goals(goals_for, goals_against);
        match outcome {
            Outcome::Win => self.wins = self.wins.saturating_add(1),
            Outcome::Draw => self.draws = self.draws.saturating_add(1),
            Outcome::Loss => self.losses = self.losses.saturating_add(1),
        }
        self.points = self.points.saturating_add(outcome.points());
        self.refresh_goal_difference();
    }

    /// Remove a previously applied result. Exact inverse of [`Record::apply`];
    /// every counter is clamped at zero so a stale edit never goes negative.
    pub fn reverse(&mut self, goals_for: u32, goals_against: u32) {
        self.played = self.played.saturating_sub(1);
        self.goals_for = self.goals_for.saturating_sub(goals_for);
        self.goals_against = self.goals_against.saturating_sub(goals_against);
        let outcome = Outcome::from_goals(goals_for, goals_against);
        match outcome {
            Outcome::Win => self.wins = self.wins.saturating_sub(1),
            Outcome::Draw => self.draws = self.draws.saturating_sub(1),
            Outcome::Loss => self.losses = self.losses.saturating_sub(1),
        }
        self.points = self.points.saturating_sub(outcome.points());
        self.refresh_goal_difference();
    }

    fn refresh_goal_difference(&mut self) {
        let diff = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.goal_difference = diff.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    }

    /// Overwrite counters by hand.
    ///
    /// Changing wins, draws or losses recounts `played` and `points` from
    /// them; an explicit `played` or `points` in the same update wins over
    /// the recount. Goal difference always follows the goal counters.
    pub fn edit(&mut self, update: &RecordUpdate) {
        if let Some(n) = update.wins {
            self.wins = n;
        }
        if let Some(n) = update.draws {
            self.draws = n;
        }
        if let Some(n) = update.losses {
            self.losses = n;
        }
        if update.wins.is_some() || update.draws.is_some() || update.losses.is_some() {
            self.played = self.wins.saturating_add(self.draws).saturating_add(self.losses);
            self.points = self
                .wins
                .saturating_mul(POINTS_FOR_WIN)
                .saturating_add(self.draws.saturating_mul(POINTS_FOR_DRAW));
        }
        if let Some(n) = update.played {
            self.played = n;
        }
        if let Some(n) = update.points {
            self.points = n;
        }
        if let Some(n) = update.goals_for {
            self.goals_for = n;
        }
        if let Some(n) = update.goals_against {
            self.goals_against = n;
        }
        self.refresh_goal_difference();
    }

    /// Table order: more points first, then better goal difference.
    /// Anything past that compares equal and is left to a stable sort.
    pub fn table_order(&self, other: &Record) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.goal_difference.cmp(&self.goal_difference))
    }
}

/// Counters an admin may set directly on a league-table row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordUpdate {
    pub played: Option<u32>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub points: Option<u32>,
}

/// A team in the league table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium_image: Option<String>,
    #[serde(default)]
    pub leagues_won: u32,
    #[serde(default)]
    pub cups_won: u32,
    #[serde(flatten)]
    pub record: Record,
}

impl Team {
    /// Create a new team with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stadium(mut self, stadium: impl Into<String>) -> Self {
        self.stadium_name = Some(stadium.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Stadium name, or an empty string when none is configured.
    pub fn stadium(&self) -> &str {
        self.stadium_name.as_deref().unwrap_or("")
    }

    /// Zero the record, keeping identity, display attributes and trophies.
    pub fn reset_record(&mut self) {
        self.record = Record::default();
        self.position = 0;
    }
}

/// One row of a computed table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    #[serde(default)]
    pub team: String,
    #[serde(flatten)]
    pub record: Record,
    #[serde(default)]
    pub position: u32,
}

impl Standing {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            ..Self::default()
        }
    }
}
