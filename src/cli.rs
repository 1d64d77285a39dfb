//! Command-line interface parsing and output rendering for the hiscores CLI
//!
//! This module handles parsing of CLI arguments using clap, validation of the
//! optional --skill argument against the skill catalog, and formatting of
//! looked-up records as a text table or JSON.

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use crate::data::client::DEFAULT_BASE_URL;
use crate::data::skills::{find_skill, SKILLS};
use crate::data::{ClientConfig, ParseMode, PlayerRecord, SkillStat};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified skill name is not recognized
    #[error("Invalid skill: '{}'. Valid skills: {}", .0, SKILLS.join(", "))]
    InvalidSkill(String),
}

/// Old School RuneScape hiscores lookup
#[derive(Parser, Debug)]
#[command(name = "hiscores")]
#[command(about = "Look up Old School RuneScape hiscores for a player")]
#[command(version)]
pub struct Cli {
    /// Player name to look up
    pub player: String,

    /// Show a single skill instead of every skill
    ///
    /// Examples:
    ///   hiscores zezima --skill strength
    ///   hiscores "lynx titan" --skill overall --json
    #[arg(long, short, value_name = "SKILL")]
    pub skill: Option<String>,

    /// Print JSON instead of a text table
    #[arg(long)]
    pub json: bool,

    /// Reject unparseable numbers in the response instead of reading them as zero
    #[arg(long)]
    pub strict: bool,

    /// Hiscores endpoint to query
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

/// Output formats supported by the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Player to look up
    pub player: String,
    /// Single skill to show (validated against the catalog)
    pub skill: Option<&'static str>,
    /// How to print the result
    pub format: OutputFormat,
    /// How to treat unparseable numbers
    pub parse_mode: ParseMode,
    /// HTTP client settings
    pub client: ClientConfig,
}

/// Parses a skill string argument into its catalog name.
///
/// # Returns
/// * `Ok(&'static str)` if the string names a skill
/// * `Err(CliError::InvalidSkill)` if it doesn't
pub fn parse_skill_arg(s: &str) -> Result<&'static str, CliError> {
    find_skill(&s.to_lowercase()).ok_or_else(|| CliError::InvalidSkill(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid skill was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let skill = cli.skill.as_deref().map(parse_skill_arg).transpose()?;

        Ok(StartupConfig {
            player: cli.player.clone(),
            skill,
            format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Table
            },
            parse_mode: if cli.strict {
                ParseMode::Strict
            } else {
                ParseMode::Permissive
            },
            client: ClientConfig {
                base_url: cli.base_url.clone(),
                timeout: Duration::from_secs(cli.timeout),
            },
        })
    }
}

/// One skill row in JSON output
#[derive(Debug, Serialize)]
struct SkillRow<'a> {
    skill: &'a str,
    #[serde(flatten)]
    stat: SkillStat,
}

/// JSON output for a player, with skills in catalog order
#[derive(Debug, Serialize)]
struct PlayerOutput<'a> {
    player: &'a str,
    fetched_at: DateTime<Utc>,
    skills: Vec<SkillRow<'a>>,
}

/// Renders every skill of a record as an aligned text table
pub fn render_table(record: &PlayerRecord) -> String {
    let mut out = format!("Hiscores for {}\n", record.identifier);
    out.push_str(&format!(
        "{:<14}{:>7}{:>14}{:>12}\n",
        "Skill", "Level", "XP", "Rank"
    ));
    for (skill, stat) in record.skills() {
        out.push_str(&format!(
            "{:<14}{:>7}{:>14}{:>12}\n",
            skill, stat.level, stat.experience, stat.rank
        ));
    }
    out
}

/// Renders a single skill as one line of text
pub fn render_skill(player: &str, skill: &str, stat: &SkillStat) -> String {
    format!("{} {}: {}", player, skill, stat)
}

/// Renders a record as pretty JSON, optionally limited to one skill
pub fn render_json(record: &PlayerRecord, only: Option<&str>) -> serde_json::Result<String> {
    let skills = record
        .skills()
        .filter(|(skill, _)| only.map_or(true, |only| only == *skill))
        .map(|(skill, stat)| SkillRow { skill, stat })
        .collect();

    serde_json::to_string_pretty(&PlayerOutput {
        player: &record.identifier,
        fetched_at: record.fetched_at,
        skills,
    })
}
