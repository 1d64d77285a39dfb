//! Static skill catalog
//!
//! The hiscores endpoint returns one row per skill in a fixed order. This list
//! defines both that row order and the set of skill names accepted by lookups.

/// Ordered list of every skill reported by the hiscores endpoint
///
/// Index `i` corresponds to row `i` of the raw payload.
pub static SKILLS: [&str; 24] = [
    "overall",
    "attack",
    "defence",
    "strength",
    "hitpoints",
    "ranged",
    "prayer",
    "magic",
    "cooking",
    "woodcutting",
    "fletching",
    "fishing",
    "firemaking",
    "crafting",
    "smithing",
    "mining",
    "herblore",
    "agility",
    "thieving",
    "slayer",
    "farming",
    "runecraft",
    "hunter",
    "construction",
];

/// Looks up a skill in the catalog
///
/// # Returns
///
/// Returns the catalog's `&'static str` for the skill if it exists, `None` otherwise
///
/// # Example
///
/// ```
/// use osrs_hiscores::data::skills::find_skill;
///
/// assert_eq!(find_skill("strength"), Some("strength"));
/// assert_eq!(find_skill("swimming"), None);
/// ```
pub fn find_skill(name: &str) -> Option<&'static str> {
    SKILLS.iter().copied().find(|skill| *skill == name)
}

/// Returns true if `name` is a skill in the catalog
pub fn is_valid_skill(name: &str) -> bool {
    find_skill(name).is_some()
}

/// Returns the catalog as owned strings, for error reporting
pub fn valid_skill_names() -> Vec<String> {
    SKILLS.iter().map(|s| s.to_string()).collect()
}
