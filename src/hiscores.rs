//! Cache-backed hiscores lookups
//!
//! [`Hiscores`] answers player and per-skill queries from its own
//! [`PlayerCache`], falling back to a single remote fetch when the cached
//! record is missing or has outlived the TTL.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::cache::{Clock, PlayerCache, SystemClock};
use crate::data::skills::{find_skill, valid_skill_names};
use crate::data::{
    parse_stats, HiscoresClient, InvalidSkillError, ParseError, ParseMode, PlayerRecord,
    PlayerSource, SkillStat, TransportError, SKILLS,
};

/// Errors that can occur when fetching a player's record
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote read failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The payload could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur when looking up a single skill value
#[derive(Debug, Error)]
pub enum LookupError {
    /// Fetching the player failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The skill name is not in the catalog
    #[error(transparent)]
    InvalidSkill(#[from] InvalidSkillError),
}

/// Player statistics lookups backed by a TTL cache
///
/// Each instance owns an independent cache. All cache-touching methods take
/// `&mut self`, so the check-evict-fetch-insert sequence for a player cannot
/// interleave with another caller on the same instance.
pub struct Hiscores<S = HiscoresClient, C = SystemClock> {
    /// Where raw payloads come from
    source: S,
    /// Fetched records
    cache: PlayerCache<C>,
    /// Treatment of unparseable numbers in payloads
    parse_mode: ParseMode,
}

impl Hiscores<HiscoresClient, SystemClock> {
    /// Creates a service that queries the live hiscores endpoint
    pub fn live() -> Self {
        Self::new(HiscoresClient::new())
    }
}

impl<S: PlayerSource> Hiscores<S, SystemClock> {
    /// Creates a service reading from `source` with wall-clock expiry
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: PlayerSource, C: Clock> Hiscores<S, C> {
    /// Creates a service reading from `source` with expiry driven by `clock`
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            cache: PlayerCache::with_clock(clock),
            parse_mode: ParseMode::default(),
        }
    }

    /// Sets how unparseable numbers in payloads are handled
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Returns all stats for a player
    ///
    /// # Behavior
    /// - A cached record younger than the TTL is returned without a remote read
    /// - A stale cached record is evicted
    /// - Otherwise the payload is fetched, parsed and stored
    ///
    /// Nothing is stored if the fetch or the parse fails.
    pub async fn get_player(&mut self, identifier: &str) -> Result<Arc<PlayerRecord>, FetchError> {
        if let Some(record) = self.cache.get_fresh(identifier) {
            return Ok(record);
        }

        self.fetch_player(identifier).await
    }

    /// Returns a player's level in `skill`
    pub async fn get_player_skill_level(
        &mut self,
        identifier: &str,
        skill: &str,
    ) -> Result<i64, LookupError> {
        Ok(self.skill_stat(identifier, skill).await?.level)
    }

    /// Returns a player's rank in `skill`
    pub async fn get_player_skill_rank(
        &mut self,
        identifier: &str,
        skill: &str,
    ) -> Result<i64, LookupError> {
        Ok(self.skill_stat(identifier, skill).await?.rank)
    }

    /// Returns a player's experience in `skill`
    pub async fn get_player_skill_xp(
        &mut self,
        identifier: &str,
        skill: &str,
    ) -> Result<i64, LookupError> {
        Ok(self.skill_stat(identifier, skill).await?.experience)
    }

    /// Drops a player's cached record regardless of its age
    ///
    /// # Returns
    /// * `true` if a record was removed
    pub fn invalidate(&mut self, identifier: &str) -> bool {
        self.cache.remove(identifier)
    }

    /// Names of players currently held in the cache, including stale entries
    pub fn cached_players(&self) -> Vec<String> {
        self.cache.identifiers().map(str::to_string).collect()
    }

    /// Validates `skill` against the catalog, then reads it from a fresh record
    ///
    /// At most one remote fetch happens: the record returned by the fetch is
    /// fresh by construction and is read directly.
    async fn skill_stat(&mut self, identifier: &str, skill: &str) -> Result<SkillStat, LookupError> {
        let skill = find_skill(skill).ok_or_else(|| InvalidSkillError {
            skill: skill.to_string(),
            valid_skills: valid_skill_names(),
        })?;

        let record = self.get_player(identifier).await?;
        Ok(record.get_skill(skill)?)
    }

    /// Fetches, parses and caches a player's record
    async fn fetch_player(&mut self, identifier: &str) -> Result<Arc<PlayerRecord>, FetchError> {
        debug!(player = identifier, "Cache miss, fetching from source");

        let payload = self.source.fetch_raw_payload(identifier).await?;
        let stats = parse_stats(&payload, &SKILLS, self.parse_mode)?;
        let record = PlayerRecord::new(identifier, self.cache.now(), stats);

        Ok(self.cache.insert(record))
    }
}
