//! Nonce issuance, redemption, and expiry sweeping.
//!
//! # Implementation
//!
//! Live tokens sit in a concurrent hash map (DashMap) keyed by token text,
//! so issuance and redemption from many request tasks never contend on a
//! global lock. `DashMap::remove` provides the atomic lookup-and-delete
//! that makes redemption exactly-once: of any number of concurrent callers
//! redeeming the same token, exactly one observes the entry.
//!
//! A single atomic watermark approximates the earliest expiry among live
//! tokens and gates how often the full sweep runs. It is advisory: updates
//! race and may install a value that is not the true minimum, which only
//! ever costs an extra sweep or delays one until the next
//! [`NonceManager::tidy`] installs a fresh estimate. Expired tokens are
//! unredeemable regardless of whether a sweep has removed them yet.
//!
//! Token text is never logged; a live token is a capability.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;

/// Default lifetime of an issued nonce.
pub const DEFAULT_NONCE_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// Random bytes drawn per token; encodes to 28 URL-safe characters.
const NONCE_ENTROPY_BYTES: usize = 21;

/// Errors from nonce issuance.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NonceError {
    /// The operating system's entropy source could not produce random
    /// bytes. Fatal to this call only; the manager stays usable.
    #[error("entropy source unavailable")]
    EntropyUnavailable(#[from] rand::Error),
}

/// Issues and redeems single-use, time-bounded anti-replay tokens.
///
/// Shared across all request tasks (typically behind an `Arc`); every
/// operation takes `&self` and is safe under unbounded concurrency.
#[derive(Debug)]
pub struct NonceManager {
    /// Token -> absolute expiry, unix milliseconds.
    entries: DashMap<String, i64>,
    /// Earliest known expiry among live tokens, unix milliseconds.
    /// 0 means unset. Best-effort minimum, see module docs.
    next_expiry: AtomicI64,
    window: Duration,
}

impl NonceManager {
    /// Create a manager with the default 15-minute expiry window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_expiry(DEFAULT_NONCE_EXPIRY)
    }

    /// Create a manager with a custom expiry window.
    #[must_use]
    pub fn with_expiry(window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            next_expiry: AtomicI64::new(0),
            window,
        }
    }

    /// Issue a fresh single-use token.
    ///
    /// Returns the token and its absolute expiry. Fails only when the OS
    /// entropy source does; the map insert itself cannot fail.
    pub fn issue(&self) -> Result<(String, DateTime<Utc>), NonceError> {
        let token = generate_token()?;
        let now = Utc::now();
        let expires_at = now + TimeDelta::milliseconds(self.window_millis());
        let expires_ms = expires_at.timestamp_millis();

        self.entries.insert(token.clone(), expires_ms);

        // Racy by contract: concurrent issuers may overwrite each other and
        // any winner is acceptable. A stale value is corrected by the next
        // sweep, which always installs a fresh estimate.
        let watermark = self.next_expiry.load(Ordering::Relaxed);
        if now.timestamp_millis() > watermark || expires_ms < watermark {
            self.next_expiry.store(expires_ms, Ordering::Relaxed);
        }

        tracing::trace!(expires_at = %expires_at, "issued nonce");
        Ok((token, expires_at))
    }

    /// Redeem a token, consuming it.
    ///
    /// The entry is removed whether or not redemption succeeds; the return
    /// value alone distinguishes a live token (`true`) from one that was
    /// never issued, already redeemed, or past its expiry (`false`). At
    /// most one of any number of concurrent callers gets `true` for a
    /// given token.
    #[must_use = "an unredeemable nonce must fail the request"]
    pub fn redeem(&self, token: &str) -> bool {
        match self.entries.remove(token) {
            Some((_, expires_ms)) => Utc::now().timestamp_millis() <= expires_ms,
            None => false,
        }
    }

    /// Run [`Self::tidy`] if the watermark says a sweep could matter.
    ///
    /// Cheap enough to call opportunistically (the embedding service
    /// typically calls it once per issued nonce); when the watermark is
    /// still in the future this is a single atomic load.
    pub fn maybe_tidy(&self) {
        let watermark = self.next_expiry.load(Ordering::Relaxed);
        if watermark == 0 || Utc::now().timestamp_millis() > watermark {
            self.tidy();
        }
    }

    /// Sweep out every expired token and reset the watermark.
    ///
    /// The new watermark is the earliest expiry among surviving tokens or,
    /// when none survive, `now + window` as a safe forward estimate. The
    /// sweep locks one map shard at a time and is safe to run concurrently
    /// with issuance and redemption; a token issued mid-sweep is simply
    /// picked up by the next one.
    pub fn tidy(&self) {
        let now = Utc::now().timestamp_millis();
        let mut removed = 0usize;
        let mut min_surviving = i64::MAX;

        self.entries.retain(|_, expires_ms| {
            if now > *expires_ms {
                removed += 1;
                false
            } else {
                min_surviving = min_surviving.min(*expires_ms);
                true
            }
        });

        let next = if min_surviving == i64::MAX {
            now + self.window_millis()
        } else {
            min_surviving
        };
        self.next_expiry.store(next, Ordering::Relaxed);

        tracing::debug!(removed, remaining = self.entries.len(), "swept expired nonces");
    }

    /// Number of outstanding tokens, including expired-but-unswept ones
    /// (for monitoring).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tokens are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured expiry window.
    #[must_use]
    pub fn expiry_window(&self) -> Duration {
        self.window
    }

    fn window_millis(&self) -> i64 {
        self.window.as_millis() as i64
    }

    /// Insert a token with an explicit expiry, bypassing issuance (test helper).
    #[cfg(test)]
    fn insert_with_expiry(&self, token: &str, expires_ms: i64) {
        self.entries.insert(token.to_string(), expires_ms);
    }

    /// Backdate an existing token so it reads as expired (test helper).
    #[cfg(test)]
    fn force_expire(&self, token: &str) {
        if let Some(mut entry) = self.entries.get_mut(token) {
            *entry = 0;
        }
    }

    /// Current watermark, unix milliseconds, 0 = unset (test helper).
    #[cfg(test)]
    fn watermark(&self) -> i64 {
        self.next_expiry.load(Ordering::Relaxed)
    }
}

impl Default for NonceManager {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_token() -> Result<String, NonceError> {
    let mut data = [0u8; NONCE_ENTROPY_BYTES];
    OsRng.try_fill_bytes(&mut data)?;
    Ok(URL_SAFE_NO_PAD.encode(data))
}
