use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// An expiry past the representable range is clamped to `DateTime::<Utc>::MAX_UTC`.
    pub fn new(value: T, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_expires_exactly_at_ttl() {
        let now = Utc::now();
        let entry = CacheEntry::new("x", Duration::seconds(10), now);

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::seconds(9)));
        assert!(entry.is_expired(now + Duration::seconds(10)));
    }

    #[test]
    fn oversized_ttl_clamps_instead_of_overflowing() {
        let now = Utc::now();
        let entry = CacheEntry::new("x", Duration::MAX, now);

        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!entry.is_expired(now));
    }
}
