//! In-memory player cache with lazy TTL eviction
//!
//! Records are kept for [`CACHE_TTL_SECS`] seconds. Staleness is only detected
//! when an entry is read; there is no background sweep. Time comes from an
//! injected [`Clock`] so expiry can be driven deterministically in tests.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{PlayerCache, CACHE_TTL_SECS};
