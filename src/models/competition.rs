//! The competition snapshot: league table, fixtures, cup, and the errors its operations raise.

use crate::models::fixture::{default_league_id, Fixture, FixtureId, UpcomingMatch};
use crate::models::group::{Group, MAX_GROUPS};
use crate::models::knockout::{KnockoutRounds, Stage};
use crate::models::team::{Team, MAX_GOALS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur during competition operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompetitionError {
    /// A schedule needs at least two teams.
    InsufficientTeams { found: usize },
    /// Team names are unique within a competition.
    DuplicateTeamName(String),
    /// Team name is empty after trimming.
    InvalidTeamName,
    /// A match needs two different teams.
    SameTeam(String),
    TeamNotFound(String),
    FixtureNotFound(FixtureId),
    GroupNotFound(String),
    /// No group match at this index.
    GroupMatchNotFound { group: String, index: usize },
    /// No knockout match at this stage and index.
    MatchNotFound { stage: Stage, index: usize },
    /// The league table is empty, there is nothing to archive.
    NothingToArchive,
    /// A single-match score above the accepted maximum.
    ScoreOutOfRange { goals: u32 },
    /// A group draw needs between 1 and 26 groups and no more groups than teams.
    InvalidGroupCount { requested: usize, teams: usize },
    /// Every letter A to Z is taken.
    TooManyGroups,
    UpcomingNotFound(String),
}

impl std::fmt::Display for CompetitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionError::InsufficientTeams { found } => {
                write!(f, "Need at least 2 teams to generate a schedule (found {})", found)
            }
            CompetitionError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            CompetitionError::InvalidTeamName => write!(f, "Team name must not be empty"),
            CompetitionError::SameTeam(name) => {
                write!(f, "'{}' cannot play against itself", name)
            }
            CompetitionError::TeamNotFound(name) => write!(f, "Team '{}' not found", name),
            CompetitionError::FixtureNotFound(id) => write!(f, "Fixture {} not found", id),
            CompetitionError::GroupNotFound(id) => write!(f, "Group '{}' not found", id),
            CompetitionError::GroupMatchNotFound { group, index } => {
                write!(f, "Group '{}' has no match {}", group, index)
            }
            CompetitionError::MatchNotFound { stage, index } => {
                write!(f, "No {} match at index {}", stage, index)
            }
            CompetitionError::NothingToArchive => write!(f, "The league table is empty"),
            CompetitionError::ScoreOutOfRange { goals } => {
                write!(f, "Score {} is out of range (max {})", goals, MAX_GOALS)
            }
            CompetitionError::InvalidGroupCount { requested, teams } => write!(
                f,
                "Cannot draw {} groups from {} teams (1 to {} groups, at most one per team)",
                requested, teams, MAX_GROUPS
            ),
            CompetitionError::TooManyGroups => {
                write!(f, "All {} group letters are in use", MAX_GROUPS)
            }
            CompetitionError::UpcomingNotFound(id) => write!(f, "Upcoming match '{}' not found", id),
        }
    }
}

impl std::error::Error for CompetitionError {}

/// The league table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct League {
    pub teams: Vec<Team>,
}

/// A named league season that fixtures belong to.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueInfo {
    pub id: String,
    pub name: String,
}

/// How the cup is played.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentKind {
    /// Group stage feeding a knockout bracket.
    #[default]
    Groups,
    /// Straight knockout.
    Direct,
}

/// The cup: optional groups plus the knockout bracket.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tournament {
    #[serde(rename = "type")]
    pub kind: TournamentKind,
    pub groups: Vec<Group>,
    pub knockout_rounds: KnockoutRounds,
}

impl Tournament {
    pub fn group_mut(&mut self, id: &str) -> Result<&mut Group, CompetitionError> {
        self.groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| CompetitionError::GroupNotFound(id.to_string()))
    }
}

/// Colors handed out to new teams, first unused wins.
pub const TEAM_COLORS: [&str; 12] = [
    "#e63946", "#2a9d8f", "#f4a261", "#457b9d", "#8ecae6", "#ffb703",
    "#6a4c93", "#90be6d", "#f15bb5", "#00bbf9", "#fb8500", "#43aa8b",
];

/// Fields an admin may change on an existing team.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamUpdate {
    pub color: Option<String>,
    pub color_secondary: Option<String>,
    pub stadium_name: Option<String>,
    pub stadium_image: Option<String>,
    pub leagues_won: Option<u32>,
    pub cups_won: Option<u32>,
}

/// Full competition state as stored and served.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(default)]
    pub league: League,
    #[serde(default)]
    pub leagues: Vec<LeagueInfo>,
    #[serde(default = "default_league_id")]
    pub current_league_id: String,
    /// League fixtures of every league; the calendar shows the current one.
    #[serde(default)]
    pub league_matches: Vec<Fixture>,
    #[serde(default)]
    pub upcoming_matches: Vec<UpcomingMatch>,
    #[serde(default)]
    pub tournament: Tournament,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Competition {
    fn default() -> Self {
        Self::new()
    }
}

impl Competition {
    /// Empty competition on the default league.
    pub fn new() -> Self {
        Self {
            league: League::default(),
            leagues: Vec::new(),
            current_league_id: default_league_id(),
            league_matches: Vec::new(),
            upcoming_matches: Vec::new(),
            tournament: Tournament::default(),
            updated_at: None,
        }
    }

    /// Competition with an initial league table.
    pub fn with_teams(teams: Vec<Team>) -> Self {
        let mut this = Self::new();
        this.league.teams = teams;
        this
    }

    /// Mark the snapshot as changed now.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.league.teams.iter().find(|t| t.name == name)
    }

    pub fn team_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.league.teams.iter_mut().find(|t| t.name == name)
    }

    /// Fixtures of the current league.
    pub fn current_fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.league_matches
            .iter()
            .filter(move |f| f.league_id == self.current_league_id)
    }

    pub fn fixture_mut(&mut self, id: FixtureId) -> Result<&mut Fixture, CompetitionError> {
        self.league_matches
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(CompetitionError::FixtureNotFound(id))
    }

    /// Add a team to the league table. Names are trimmed, non-empty and unique.
    /// A team without a color gets the first palette color nobody uses yet.
    pub fn add_team(&mut self, mut team: Team) -> Result<(), CompetitionError> {
        let name = team.name.trim().to_string();
        if name.is_empty() {
            return Err(CompetitionError::InvalidTeamName);
        }
        if self.team(&name).is_some() {
            return Err(CompetitionError::DuplicateTeamName(name));
        }
        team.name = name;
        if team.color.is_none() {
            team.color = Some(self.next_free_color().to_string());
        }
        team.position = self.league.teams.len() as u32 + 1;
        self.league.teams.push(team);
        self.touch();
        Ok(())
    }

    fn next_free_color(&self) -> &'static str {
        TEAM_COLORS
            .iter()
            .copied()
            .find(|c| !self.league.teams.iter().any(|t| t.color.as_deref() == Some(*c)))
            .unwrap_or(TEAM_COLORS[self.league.teams.len() % TEAM_COLORS.len()])
    }

    /// Change display attributes or trophy counts of a team.
    pub fn update_team(&mut self, name: &str, update: TeamUpdate) -> Result<(), CompetitionError> {
        let team = self
            .team_mut(name)
            .ok_or_else(|| CompetitionError::TeamNotFound(name.to_string()))?;
        if let Some(color) = update.color {
            team.color = Some(color);
        }
        if let Some(color) = update.color_secondary {
            team.color_secondary = Some(color);
        }
        if let Some(stadium) = update.stadium_name {
            team.stadium_name = Some(stadium);
        }
        if let Some(image) = update.stadium_image {
            team.stadium_image = Some(image);
        }
        if let Some(n) = update.leagues_won {
            team.leagues_won = n;
        }
        if let Some(n) = update.cups_won {
            team.cups_won = n;
        }
        self.touch();
        Ok(())
    }

    /// Remove a team from the table. Fixtures that name it are left untouched.
    pub fn remove_team(&mut self, name: &str) -> Result<(), CompetitionError> {
        let idx = self
            .league
            .teams
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| CompetitionError::TeamNotFound(name.to_string()))?;
        self.league.teams.remove(idx);
        for (i, team) in self.league.teams.iter_mut().enumerate() {
            team.position = i as u32 + 1;
        }
        self.touch();
        Ok(())
    }
}
