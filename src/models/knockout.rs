//! Knockout stages, their matches, and the round containers holding them.

use serde::{Deserialize, Serialize};

/// Team name used for a side that is not decided yet.
pub const TBD: &str = "TBD";

/// Placeholder name found in older documents.
const LEGACY_TBD: &str = "Por Definir";

/// Elimination stage, in bracket order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    Final,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::RoundOf16,
        Stage::QuarterFinals,
        Stage::SemiFinals,
        Stage::Final,
    ];

    /// Stage the winners of this one move into. `None` after the final.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::RoundOf16 => Some(Stage::QuarterFinals),
            Stage::QuarterFinals => Some(Stage::SemiFinals),
            Stage::SemiFinals => Some(Stage::Final),
            Stage::Final => None,
        }
    }

    /// Number of matches in a full stage.
    pub fn capacity(self) -> usize {
        match self {
            Stage::RoundOf16 => 8,
            Stage::QuarterFinals => 4,
            Stage::SemiFinals => 2,
            Stage::Final => 1,
        }
    }

    /// Stable match id for a slot: `r16-1`, `qf-2`, `sf-1`, `final`.
    pub fn match_id(self, index: usize) -> String {
        match self {
            Stage::RoundOf16 => format!("r16-{}", index + 1),
            Stage::QuarterFinals => format!("qf-{}", index + 1),
            Stage::SemiFinals => format!("sf-{}", index + 1),
            Stage::Final => "final".to_string(),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::RoundOf16 => "round of 16",
            Stage::QuarterFinals => "quarter-finals",
            Stage::SemiFinals => "semi-finals",
            Stage::Final => "final",
        };
        f.write_str(name)
    }
}

/// One side of a knockout match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slot {
    pub name: String,
    pub score: Option<u32>,
}

impl Slot {
    pub fn tbd() -> Self {
        Self::team(TBD)
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
        }
    }

    /// True when no real team occupies the slot.
    pub fn is_placeholder(&self) -> bool {
        let name = self.name.trim();
        name.is_empty() || name == TBD || name == LEGACY_TBD
    }
}

/// Which side of a knockout match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSide {
    Team1,
    Team2,
}

impl SlotSide {
    /// Side of the destination match fed by source match `index`.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            SlotSide::Team1
        } else {
            SlotSide::Team2
        }
    }
}

/// Progress of a knockout match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchState {
    /// At least one side is still `TBD`.
    Empty,
    /// Both teams known, no final result yet.
    AwaitingResult,
    /// Marked completed with both scores present.
    Completed,
}

/// A single elimination match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockoutMatch {
    pub id: String,
    pub team1: Slot,
    pub team2: Slot,
    pub completed: bool,
    pub date: String,
}

impl KnockoutMatch {
    /// A match with both sides `TBD`.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self::between(id, TBD, TBD)
    }

    pub fn between(id: impl Into<String>, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            team1: Slot::team(team1),
            team2: Slot::team(team2),
            completed: false,
            date: String::new(),
        }
    }

    pub fn state(&self) -> MatchState {
        if self.completed && self.team1.score.is_some() && self.team2.score.is_some() {
            MatchState::Completed
        } else if self.team1.is_placeholder() || self.team2.is_placeholder() {
            MatchState::Empty
        } else {
            MatchState::AwaitingResult
        }
    }

    /// Winner of a completed match. `None` while undecided, drawn, or when the
    /// higher score belongs to a placeholder side.
    pub fn winner(&self) -> Option<&str> {
        if self.state() != MatchState::Completed {
            return None;
        }
        let (s1, s2) = (self.team1.score?, self.team2.score?);
        let slot = if s1 > s2 {
            &self.team1
        } else if s2 > s1 {
            &self.team2
        } else {
            return None;
        };
        (!slot.is_placeholder()).then_some(slot.name.as_str())
    }

    pub fn slot_mut(&mut self, side: SlotSide) -> &mut Slot {
        match side {
            SlotSide::Team1 => &mut self.team1,
            SlotSide::Team2 => &mut self.team2,
        }
    }
}

/// Every knockout stage of the cup.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnockoutRounds {
    pub round_of16: Vec<KnockoutMatch>,
    pub quarter_finals: Vec<KnockoutMatch>,
    pub semi_finals: Vec<KnockoutMatch>,
    #[serde(rename = "final")]
    pub final_match: Option<KnockoutMatch>,
}

impl KnockoutRounds {
    pub fn matches(&self, stage: Stage) -> &[KnockoutMatch] {
        match stage {
            Stage::RoundOf16 => &self.round_of16,
            Stage::QuarterFinals => &self.quarter_finals,
            Stage::SemiFinals => &self.semi_finals,
            Stage::Final => self.final_match.as_slice(),
        }
    }

    pub fn get(&self, stage: Stage, index: usize) -> Option<&KnockoutMatch> {
        self.matches(stage).get(index)
    }

    pub fn get_mut(&mut self, stage: Stage, index: usize) -> Option<&mut KnockoutMatch> {
        match stage {
            Stage::RoundOf16 => self.round_of16.get_mut(index),
            Stage::QuarterFinals => self.quarter_finals.get_mut(index),
            Stage::SemiFinals => self.semi_finals.get_mut(index),
            Stage::Final if index == 0 => self.final_match.as_mut(),
            Stage::Final => None,
        }
    }

    /// Match at `index`, creating `TBD` placeholders up to and including it.
    /// `None` only for a final index past 0.
    pub fn get_or_create(&mut self, stage: Stage, index: usize) -> Option<&mut KnockoutMatch> {
        let matches = match stage {
            Stage::RoundOf16 => &mut self.round_of16,
            Stage::QuarterFinals => &mut self.quarter_finals,
            Stage::SemiFinals => &mut self.semi_finals,
            Stage::Final => {
                if index != 0 {
                    return None;
                }
                return Some(
                    self.final_match
                        .get_or_insert_with(|| KnockoutMatch::placeholder(Stage::Final.match_id(0))),
                );
            }
        };
        while matches.len() <= index {
            let id = stage.match_id(matches.len());
            matches.push(KnockoutMatch::placeholder(id));
        }
        matches.get_mut(index)
    }

    /// Replace a whole stage.
    pub fn set_stage(&mut self, stage: Stage, mut matches: Vec<KnockoutMatch>) {
        match stage {
            Stage::RoundOf16 => self.round_of16 = matches,
            Stage::QuarterFinals => self.quarter_finals = matches,
            Stage::SemiFinals => self.semi_finals = matches,
            Stage::Final => self.final_match = matches.drain(..).next(),
        }
    }

    /// Champion once the final is decided.
    pub fn champion(&self) -> Option<&str> {
        self.final_match.as_ref().and_then(KnockoutMatch::winner)
    }
}
