//! Cache Entry Module
//!
//! Defines a single stored value together with its absolute expiry instant.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Expiry is stored as an absolute monotonic instant rather than a remaining
/// duration, so an entry that sits unread for a long time still compares
/// correctly.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being live
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A zero `ttl` produces an entry that is already expired.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    /// Creates a new entry as if written at `now`.
    pub fn new_at(value: V, ttl: Duration, now: Instant) -> Self {
        // Saturate instead of panicking on absurd TTLs.
        let expires_at = now.checked_add(ttl).unwrap_or_else(|| far_future(now));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is live strictly before `expires_at`; at `expires_at` and after
    /// it is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

fn far_future(now: Instant) -> Instant {
    // Roughly thirty years; enough to never expire within a process lifetime.
    now.checked_add(Duration::from_secs(60 * 60 * 24 * 365 * 30))
        .unwrap_or(now)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "test_value");
        assert!(entry.ttl_remaining() > Duration::from_secs(59));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value", Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new(1u32, Duration::ZERO);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new_at("test", Duration::from_secs(10), now);

        assert!(!entry.is_expired_at(now + Duration::from_secs(9)));
        assert!(entry.is_expired_at(now + Duration::from_secs(10)), "expired at boundary");
        assert!(entry.is_expired_at(now + Duration::from_secs(11)));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("test_value", Duration::from_secs(10));

        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("test_value", Duration::ZERO);
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new("forever", Duration::MAX);
        assert!(!entry.is_expired());
    }
}
