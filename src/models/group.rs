//! Groups of the cup's group stage and their matches.

use crate::models::team::Standing;
use serde::{Deserialize, Serialize};

/// Teams that go through from a group unless configured otherwise.
pub const DEFAULT_QUALIFIERS: usize = 2;

/// Groups are lettered A to Z.
pub const MAX_GROUPS: usize = 26;

fn default_qualifiers() -> usize {
    DEFAULT_QUALIFIERS
}

/// A match inside a group. Each pair of group teams meets once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupMatch {
    pub id: String,
    pub team1: String,
    pub team2: String,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub completed: bool,
    pub date: String,
}

impl GroupMatch {
    pub fn new(id: impl Into<String>, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            team1: team1.into(),
            team2: team2.into(),
            ..Self::default()
        }
    }
}

/// A named subset of teams playing each other once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub matches: Vec<GroupMatch>,
    #[serde(default)]
    pub standings: Vec<Standing>,
    /// How many teams go through to the knockout stage.
    #[serde(default = "default_qualifiers")]
    pub qualifiers_count: usize,
    #[serde(default)]
    pub qualified: Vec<String>,
}

impl Group {
    /// Group named after a letter: id `group-A`, name `Group A`.
    pub fn lettered(letter: char) -> Self {
        Self {
            id: format!("group-{letter}"),
            name: format!("Group {letter}"),
            teams: Vec::new(),
            matches: Vec::new(),
            standings: Vec::new(),
            qualifiers_count: DEFAULT_QUALIFIERS,
            qualified: Vec::new(),
        }
    }

    /// Letter for the group at `index` (0 → A, 1 → B, ...). `None` past Z.
    pub fn letter_for(index: usize) -> Option<char> {
        (index < MAX_GROUPS).then(|| char::from(b'A' + index as u8))
    }
}
