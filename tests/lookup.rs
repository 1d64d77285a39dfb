//! End-to-end lookup tests through the public API
//!
//! A scripted in-memory source stands in for the hiscores endpoint and a
//! manual clock drives cache expiry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use osrs_hiscores::data::{parse_stats, ParseMode};
use osrs_hiscores::{
    FetchError, Hiscores, LookupError, ManualClock, ParseError, PlayerSource, SkillStat,
    TransportError, CACHE_TTL_SECS, SKILLS,
};

/// Serves fixed payloads per player and counts every read
#[derive(Clone, Default)]
struct ScriptedSource {
    payloads: Arc<HashMap<String, String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(payloads: &[(&str, String)]) -> Self {
        Self {
            payloads: Arc::new(
                payloads
                    .iter()
                    .map(|(name, body)| (name.to_string(), body.clone()))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerSource for ScriptedSource {
    async fn fetch_raw_payload(&self, identifier: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads
            .get(identifier)
            .cloned()
            .ok_or_else(|| TransportError::PlayerNotFound(identifier.to_string()))
    }
}

/// Payload for "zezima": row 3 (strength) matches the live hiscores example,
/// followed by activity rows the parser must ignore
fn zezima_payload() -> String {
    let mut rows: Vec<String> = (0..SKILLS.len())
        .map(|i| format!("{},{},{}", 1000 * i, i + 1, 50_000 + i))
        .collect();
    rows[3] = "1142579,75,1271864".to_string();
    rows.push("-1,-1".to_string());
    rows.push("-1,-1".to_string());
    rows.join("\n")
}

fn sudo2_payload() -> String {
    let mut rows: Vec<String> = (0..SKILLS.len()).map(|_| "0,1,-1".to_string()).collect();
    rows[5] = "13034431,99,4200".to_string();
    rows.join("\n")
}

fn setup() -> (Hiscores<ScriptedSource, ManualClock>, ScriptedSource, ManualClock) {
    let source = ScriptedSource::new(&[("zezima", zezima_payload()), ("sudo2", sudo2_payload())]);
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let hiscores = Hiscores::with_clock(source.clone(), clock.clone());
    (hiscores, source, clock)
}

#[tokio::test]
async fn test_zezima_strength_end_to_end() {
    let (mut hiscores, _source, _clock) = setup();

    let zezima = hiscores.get_player("zezima").await.unwrap();
    let strength = zezima.get_skill("strength").unwrap();

    assert_eq!(
        strength,
        SkillStat {
            experience: 1_142_579,
            rank: 1_271_864,
            level: 75
        }
    );
}

#[tokio::test]
async fn test_skill_level_lookup_fetches_on_demand() {
    let (mut hiscores, source, _clock) = setup();

    let ranged = hiscores.get_player_skill_level("sudo2", "ranged").await.unwrap();

    assert_eq!(ranged, 99);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_freshness_window() {
    let (mut hiscores, source, clock) = setup();

    let stored = hiscores.get_player("zezima").await.unwrap();
    clock.advance(Duration::seconds(CACHE_TTL_SECS - 1));
    let served = hiscores.get_player("zezima").await.unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(served.stats, stored.stats);
    assert_eq!(served.fetched_at, stored.fetched_at);
}

#[tokio::test]
async fn test_expired_record_refetched_exactly_once() {
    let (mut hiscores, source, clock) = setup();

    let first = hiscores.get_player("zezima").await.unwrap();
    clock.advance(Duration::seconds(CACHE_TTL_SECS));

    let level = hiscores.get_player_skill_level("zezima", "strength").await.unwrap();
    let second = hiscores.get_player("zezima").await.unwrap();

    assert_eq!(level, 75);
    assert_eq!(source.calls(), 2);
    assert!(second.fetched_at > first.fetched_at);
}

#[tokio::test]
async fn test_level_rank_xp_sequence_single_read() {
    let (mut hiscores, source, _clock) = setup();

    let level = hiscores.get_player_skill_level("zezima", "strength").await.unwrap();
    let rank = hiscores.get_player_skill_rank("zezima", "strength").await.unwrap();
    let xp = hiscores.get_player_skill_xp("zezima", "strength").await.unwrap();

    assert_eq!((level, rank, xp), (75, 1_271_864, 1_142_579));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_invalid_skill_regardless_of_cache_state() {
    let (mut hiscores, source, _clock) = setup();

    // Cold cache
    let cold = hiscores.get_player_skill_level("zezima", "swimming").await;
    assert_eq!(source.calls(), 0);

    // Warm cache
    hiscores.get_player("zezima").await.unwrap();
    let warm = hiscores.get_player_skill_level("zezima", "swimming").await;
    assert_eq!(source.calls(), 1);

    for result in [cold, warm] {
        match result {
            Err(LookupError::InvalidSkill(err)) => {
                assert_eq!(err.valid_skills.len(), SKILLS.len());
                assert!(err.to_string().contains("overall,attack,defence"));
            }
            other => panic!("Expected InvalidSkill, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_unknown_player_is_transport_error() {
    let (mut hiscores, _source, _clock) = setup();

    let err = hiscores.get_player("nobody").await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::Transport(TransportError::PlayerNotFound(ref name)) if name == "nobody"
    ));
    assert!(hiscores.cached_players().is_empty());
}

#[tokio::test]
async fn test_malformed_payload_is_not_cached() {
    let source = ScriptedSource::new(&[("broken", "1,2,3,4\n".repeat(SKILLS.len()))]);
    let mut hiscores = Hiscores::new(source.clone());

    let err = hiscores.get_player("broken").await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::Parse(ParseError::MalformedRow { line: 0, fields: 4 })
    ));
    assert!(hiscores.cached_players().is_empty());

    // A second attempt goes back to the source
    let _ = hiscores.get_player("broken").await;
    assert_eq!(source.calls(), 2);
}

#[test]
fn test_record_accessor_uses_record_keys_not_catalog() {
    // A record parsed with a reduced catalog rejects names the service would accept
    let stats = parse_stats("1000,10,500\n2000,20,600", &["overall", "attack"], ParseMode::Permissive)
        .unwrap();
    let record = osrs_hiscores::PlayerRecord::new("tester", Utc::now(), stats);

    let err = record.get_skill("strength").unwrap_err();

    assert_eq!(err.valid_skills, vec!["attack", "overall"]);
    assert_eq!(record.get_skill("attack").unwrap().level, 20);
}
