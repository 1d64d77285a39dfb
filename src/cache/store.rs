//! Player record store keyed by player name
//!
//! Provides a `PlayerCache` that holds fetched records behind `Arc` and drops
//! any record whose age has reached the TTL the next time it is looked up.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use crate::data::PlayerRecord;

/// Time-to-live for cached player records in seconds
pub const CACHE_TTL_SECS: i64 = 3600;

/// In-memory cache of player records
///
/// Every record returned by [`PlayerCache::get_fresh`] is younger than the TTL.
/// Stale records stay in the map until a lookup observes them and evicts them.
#[derive(Debug)]
pub struct PlayerCache<C = SystemClock> {
    /// Cached records keyed by player name
    entries: HashMap<String, Arc<PlayerRecord>>,
    /// Source of the current time
    clock: C,
    /// Maximum age of a record that may be served
    ttl: Duration,
}

impl PlayerCache<SystemClock> {
    /// Creates an empty cache using wall-clock time
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for PlayerCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PlayerCache<C> {
    /// Creates an empty cache reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            ttl: Duration::seconds(CACHE_TTL_SECS),
        }
    }

    /// Returns the current time according to the cache's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns true if a record fetched at `fetched_at` may still be served
    pub fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        self.now() - fetched_at < self.ttl
    }

    /// Returns the cached record for `identifier` if it is still fresh
    ///
    /// A stale record is removed from the cache before `None` is returned.
    pub fn get_fresh(&mut self, identifier: &str) -> Option<Arc<PlayerRecord>> {
        let fresh = self
            .entries
            .get(identifier)
            .map(|record| self.is_fresh(record.fetched_at))?;

        if fresh {
            debug!(player = identifier, "Cache hit");
            self.entries.get(identifier).cloned()
        } else {
            debug!(player = identifier, "Cache entry expired, evicting");
            self.entries.remove(identifier);
            None
        }
    }

    /// Stores a record, replacing any previous record for the same player
    pub fn insert(&mut self, record: PlayerRecord) -> Arc<PlayerRecord> {
        let record = Arc::new(record);
        self.entries
            .insert(record.identifier.clone(), Arc::clone(&record));
        record
    }

    /// Removes a record regardless of its age
    ///
    /// # Returns
    /// * `true` if a record was removed
    pub fn remove(&mut self, identifier: &str) -> bool {
        self.entries.remove(identifier).is_some()
    }

    /// Returns true if any record, fresh or stale, is held for `identifier`
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Number of records held, including stale ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all players with a record in the cache
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::data::SkillStat;
    use chrono::TimeZone;

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap()
    }

    fn create_test_cache() -> (PlayerCache<ManualClock>, ManualClock) {
        let clock = ManualClock::new(start_time());
        (PlayerCache::with_clock(clock.clone()), clock)
    }

    fn record(identifier: &str, fetched_at: DateTime<Utc>, level: i64) -> PlayerRecord {
        let stats = [(
            "attack".to_string(),
            SkillStat {
                experience: 0,
                rank: 1,
                level,
            },
        )]
        .into_iter()
        .collect();
        PlayerRecord::new(identifier, fetched_at, stats)
    }

    #[test]
    fn test_get_fresh_returns_none_for_missing_key() {
        let (mut cache, _clock) = create_test_cache();
        assert!(cache.get_fresh("nobody").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_fresh_returns_record_within_ttl() {
        let (mut cache, clock) = create_test_cache();
        cache.insert(record("zezima", start_time(), 99));

        clock.advance(Duration::seconds(CACHE_TTL_SECS - 1));

        let cached = cache.get_fresh("zezima").expect("Record should be fresh");
        assert_eq!(cached.get_skill("attack").unwrap().level, 99);
    }

    #[test]
    fn test_record_at_exact_ttl_is_evicted() {
        let (mut cache, clock) = create_test_cache();
        cache.insert(record("zezima", start_time(), 99));

        clock.advance(Duration::seconds(CACHE_TTL_SECS));

        assert!(cache.get_fresh("zezima").is_none());
        assert!(!cache.contains("zezima"), "Stale record should be evicted");
    }

    #[test]
    fn test_stale_record_stays_until_observed() {
        let (mut cache, clock) = create_test_cache();
        cache.insert(record("zezima", start_time(), 99));

        clock.advance(Duration::hours(5));

        assert!(cache.contains("zezima"));
        assert_eq!(cache.len(), 1);
        cache.get_fresh("zezima");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_replaces_existing_record() {
        let (mut cache, _clock) = create_test_cache();
        cache.insert(record("zezima", start_time(), 50));
        cache.insert(record("zezima", start_time(), 60));

        let cached = cache.get_fresh("zezima").unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cached.get_skill("attack").unwrap().level, 60);
    }

    #[test]
    fn test_remove() {
        let (mut cache, _clock) = create_test_cache();
        cache.insert(record("zezima", start_time(), 50));

        assert!(cache.remove("zezima"));
        assert!(!cache.remove("zezima"));
    }

    #[test]
    fn test_identifiers_lists_cached_players() {
        let (mut cache, _clock) = create_test_cache();
        cache.insert(record("zezima", start_time(), 1));
        cache.insert(record("lynx titan", start_time(), 1));

        let mut names: Vec<&str> = cache.identifiers().collect();
        names.sort();

        assert_eq!(names, vec!["lynx titan", "zezima"]);
    }

    #[test]
    fn test_is_fresh_boundary() {
        let (cache, _clock) = create_test_cache();
        let now = start_time();

        assert!(cache.is_fresh(now));
        assert!(cache.is_fresh(now - Duration::seconds(CACHE_TTL_SECS - 1)));
        assert!(!cache.is_fresh(now - Duration::seconds(CACHE_TTL_SECS)));
    }

    #[test]
    fn test_new_uses_system_clock() {
        let cache = PlayerCache::new();
        let before = Utc::now();
        assert!(cache.now() >= before);
    }
}
