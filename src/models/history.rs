//! Archived league tables and cups.

use crate::models::competition::Competition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A competition snapshot and when it was archived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub snapshot: Competition,
    pub saved_at: DateTime<Utc>,
}

/// Last archived league and last archived cup. Each archive replaces the previous one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    pub league: Option<Archive>,
    pub cup: Option<Archive>,
}

impl History {
    pub fn is_empty(&self) -> bool {
        self.league.is_none() && self.cup.is_none()
    }

    /// Drop both archives.
    pub fn clear(&mut self) {
        self.league = None;
        self.cup = None;
    }
}
