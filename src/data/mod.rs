//! Core data models for OSRS hiscores
//!
//! This module contains the player and skill statistics types, the static skill
//! catalog, the payload parser and the remote hiscores client.

pub mod client;
pub mod parser;
pub mod skills;

pub use client::{ClientConfig, HiscoresClient, PlayerSource, TransportError};
pub use parser::{parse_stats, ParseError, ParseMode};
pub use skills::SKILLS;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Statistics for a single skill of a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillStat {
    /// Total experience in the skill
    pub experience: i64,
    /// Position on the skill's leaderboard (-1 when unranked)
    pub rank: i64,
    /// Skill level
    pub level: i64,
}

impl fmt::Display for SkillStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level {}, xp {}, rank {}",
            self.level, self.experience, self.rank
        )
    }
}

/// The requested skill name is not in the relevant set of skills
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid skill '{skill}'. Valid skills: {}", .valid_skills.join(","))]
pub struct InvalidSkillError {
    /// The name that was requested
    pub skill: String,
    /// Every name that would have been accepted
    pub valid_skills: Vec<String>,
}

/// All fetched statistics for one player
///
/// Records are created on a successful fetch and replaced wholesale on re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name used for the lookup
    pub identifier: String,
    /// When the stats were fetched
    pub fetched_at: DateTime<Utc>,
    /// Stats keyed by skill name
    pub stats: HashMap<String, SkillStat>,
}

impl PlayerRecord {
    /// Creates a new record from parsed stats
    pub fn new(
        identifier: impl Into<String>,
        fetched_at: DateTime<Utc>,
        stats: HashMap<String, SkillStat>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            fetched_at,
            stats,
        }
    }

    /// Returns the stats for a single skill
    ///
    /// Validity is checked against the skills present in this record, not the
    /// global catalog. A record parsed with a reduced catalog therefore rejects
    /// names that [`crate::Hiscores`] lookups would accept, and the error lists
    /// only this record's skills.
    pub fn get_skill(&self, skill: &str) -> Result<SkillStat, InvalidSkillError> {
        self.stats.get(skill).copied().ok_or_else(|| {
            let mut valid_skills: Vec<String> = self.stats.keys().cloned().collect();
            valid_skills.sort();
            InvalidSkillError {
                skill: skill.to_string(),
                valid_skills,
            }
        })
    }

    /// Iterates over the record's stats in catalog order
    ///
    /// Skills missing from the record are skipped.
    pub fn skills(&self) -> impl Iterator<Item = (&'static str, SkillStat)> + '_ {
        SKILLS
            .iter()
            .filter_map(|skill| self.stats.get(*skill).map(|stat| (*skill, *stat)))
    }
}
