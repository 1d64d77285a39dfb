//! Parser for the hiscores "lite" payload
//!
//! The endpoint returns newline-delimited rows of `experience,level,rank`, one
//! per skill in catalog order. Rows past the end of the catalog (activities and
//! minigames) are ignored.

use std::collections::HashMap;

use thiserror::Error;

use super::SkillStat;

/// How numeric fields that fail to parse are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Unparseable numbers become zero
    #[default]
    Permissive,
    /// Unparseable numbers fail the whole parse
    Strict,
}

/// Errors that can occur when parsing a raw payload
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A row did not contain exactly three comma-separated fields
    #[error("unable to parse response row {line}: expected 3 fields, found {fields}")]
    MalformedRow { line: usize, fields: usize },

    /// The payload ended before every skill had a row
    #[error("unable to parse response row {line}: missing row for skill '{skill}'")]
    MissingRow { line: usize, skill: String },

    /// A numeric field could not be parsed (strict mode only)
    #[error("unable to parse response row {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
}

/// Parses a raw payload into a per-skill statistics mapping
///
/// # Arguments
/// * `payload` - Raw response body from the hiscores endpoint
/// * `catalog` - Ordered skill names; row `i` belongs to `catalog[i]`
/// * `mode` - Whether bad numbers become zero or an error
///
/// # Returns
/// * `Ok(HashMap)` with one entry per catalog skill
/// * `Err(ParseError)` if any row is malformed or missing; no partial map is returned
pub fn parse_stats(
    payload: &str,
    catalog: &[&str],
    mode: ParseMode,
) -> Result<HashMap<String, SkillStat>, ParseError> {
    let mut rows = payload.lines();
    let mut stats = HashMap::with_capacity(catalog.len());

    for (line, skill) in catalog.iter().enumerate() {
        let row = rows.next().ok_or_else(|| ParseError::MissingRow {
            line,
            skill: skill.to_string(),
        })?;

        let stat = parse_row(row, line, mode)?;
        stats.insert(skill.to_string(), stat);
    }

    Ok(stats)
}

/// Parses a single `experience,level,rank` row
fn parse_row(row: &str, line: usize, mode: ParseMode) -> Result<SkillStat, ParseError> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() != 3 {
        return Err(ParseError::MalformedRow {
            line,
            fields: fields.len(),
        });
    }

    Ok(SkillStat {
        experience: parse_number(fields[0], line, mode)?,
        level: parse_number(fields[1], line, mode)?,
        rank: parse_number(fields[2], line, mode)?,
    })
}

fn parse_number(field: &str, line: usize, mode: ParseMode) -> Result<i64, ParseError> {
    match field.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(_) if mode == ParseMode::Permissive => Ok(0),
        Err(_) => Err(ParseError::InvalidNumber {
            line,
            value: field.to_string(),
        }),
    }
}
