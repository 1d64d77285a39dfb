//! OSRS Hiscores Library
//!
//! Fetches Old School RuneScape player statistics from the hiscores endpoint
//! and caches them per player for one hour.
//!
//! ```no_run
//! use osrs_hiscores::Hiscores;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut hiscores = Hiscores::live();
//!
//! let zezima = hiscores.get_player("zezima").await?;
//! println!("{}", zezima.get_skill("strength")?);
//!
//! let ranged = hiscores.get_player_skill_level("sudo2", "ranged").await?;
//! println!("{}", ranged);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod data;
pub mod hiscores;

pub use cache::{Clock, ManualClock, SystemClock, CACHE_TTL_SECS};
pub use data::{
    HiscoresClient, InvalidSkillError, ParseError, PlayerRecord, PlayerSource, SkillStat,
    TransportError, SKILLS,
};
pub use hiscores::{FetchError, Hiscores, LookupError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
