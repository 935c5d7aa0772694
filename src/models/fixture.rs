//! League fixtures, their goal timeline, and upcoming-match entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a league fixture.
pub type FixtureId = Uuid;

/// Date shown for a fixture that has not been given one yet.
pub const DATE_TBD: &str = "TBD";

/// Lifecycle of a league fixture.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    #[serde(alias = "por_jugar")]
    Scheduled,
    #[serde(alias = "jugado")]
    Played,
}

/// Scoring minutes per side. The score is the number of entries on each side.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalTimeline {
    #[serde(alias = "local")]
    pub home: Vec<u32>,
    pub away: Vec<u32>,
}

impl GoalTimeline {
    pub fn new(home: Vec<u32>, away: Vec<u32>) -> Self {
        let mut timeline = Self { home, away };
        timeline.home.sort_unstable();
        timeline.away.sort_unstable();
        timeline
    }

    pub fn score(&self) -> (u32, u32) {
        (self.home.len() as u32, self.away.len() as u32)
    }
}

/// A league match between a home and an away team on a given matchday.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: FixtureId,
    #[serde(default = "default_league_id")]
    pub league_id: String,
    #[serde(default)]
    pub matchday: u32,
    #[serde(default, alias = "localTeam")]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: FixtureStatus,
    #[serde(default)]
    pub stadium: String,
    #[serde(default, alias = "historial")]
    pub timeline: GoalTimeline,
    #[serde(default, alias = "repeticion", skip_serializing_if = "Option::is_none")]
    pub replay_url: Option<String>,
}

pub(crate) fn default_league_id() -> String {
    "default".to_string()
}

impl Fixture {
    pub fn new(
        league_id: impl Into<String>,
        matchday: u32,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id: league_id.into(),
            matchday,
            home_team: home_team.into(),
            away_team: away_team.into(),
            date: DATE_TBD.to_string(),
            status: FixtureStatus::Scheduled,
            stadium: String::new(),
            timeline: GoalTimeline::default(),
            replay_url: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.status == FixtureStatus::Played
    }

    /// Final score `(home, away)`, only once the fixture is played.
    pub fn score(&self) -> Option<(u32, u32)> {
        self.is_played().then(|| self.timeline.score())
    }

    /// Store the goal timeline and mark the fixture played.
    pub fn set_result(&mut self, timeline: GoalTimeline) {
        self.timeline = timeline;
        self.status = FixtureStatus::Played;
    }

    /// Back to `scheduled`, dropping the recorded goals.
    pub fn reopen(&mut self) {
        self.timeline = GoalTimeline::default();
        self.status = FixtureStatus::Scheduled;
    }
}

/// Kind of an upcoming-match entry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    #[default]
    #[serde(alias = "Liga")]
    League,
    #[serde(alias = "Copa")]
    Cup,
}

/// Default kick-off time for generated upcoming entries.
pub const DEFAULT_KICKOFF: &str = "20:00";

/// An entry in the "upcoming matches" list shown on the public page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMatch {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub team1: String,
    #[serde(default)]
    pub team2: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, rename = "type")]
    pub kind: MatchKind,
}

impl UpcomingMatch {
    /// A manually entered league entry with a fresh id.
    pub fn league(team1: impl Into<String>, team2: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: format!("up-{}", Uuid::new_v4()),
            team1: team1.into(),
            team2: team2.into(),
            date: date.into(),
            time: DEFAULT_KICKOFF.to_string(),
            kind: MatchKind::League,
        }
    }
}

/// Fields an admin may set on an upcoming-match entry.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpcomingUpdate {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<MatchKind>,
}

impl UpcomingMatch {
    /// Apply the fields present in `update`.
    pub fn edit(&mut self, update: UpcomingUpdate) {
        if let Some(team) = update.team1 {
            self.team1 = team.trim().to_string();
        }
        if let Some(team) = update.team2 {
            self.team2 = team.trim().to_string();
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
    }
}
