use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::models::{cache::CacheEntry, weather::WeatherRecord};

/// In-memory weather cache keyed by normalized city name.
///
/// Entries expire a fixed TTL after they were written. Expired entries are
/// dropped when read, or by [`WeatherCache::purge_expired_at`].
#[derive(Clone)]
pub struct WeatherCache {
    entries: Arc<DashMap<String, CacheEntry<WeatherRecord>>>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Canonical cache key: surrounding whitespace trimmed, lower-cased.
    pub fn normalize_key(city: &str) -> String {
        city.trim().to_lowercase()
    }

    pub fn get(&self, city: &str) -> Option<WeatherRecord> {
        self.get_at(city, Utc::now())
    }

    pub fn get_at(&self, city: &str, now: DateTime<Utc>) -> Option<WeatherRecord> {
        let key = Self::normalize_key(city);
        let hit = self
            .entries
            .get(&key)
            .map(|entry| (entry.is_expired(now), entry.value.clone()));

        match hit {
            Some((false, record)) => Some(record),
            Some((true, _)) => {
                // Only evict if nobody refreshed the entry in between.
                self.entries.remove_if(&key, |_, entry| entry.is_expired(now));
                None
            }
            None => None,
        }
    }

    pub fn set(&self, city: &str, record: WeatherRecord) {
        self.set_at(city, record, Utc::now());
    }

    pub fn set_at(&self, city: &str, record: WeatherRecord, now: DateTime<Utc>) {
        self.entries.insert(
            Self::normalize_key(city),
            CacheEntry::new(record, self.ttl, now),
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str) -> WeatherRecord {
        WeatherRecord {
            city: city.to_string(),
            temperature: "21.5°C".to_string(),
            humidity: "60%".to_string(),
            description: "Clear sky".to_string(),
            wind_speed: "3.4 м/с".to_string(),
        }
    }

    #[test]
    fn keys_ignore_case_and_surrounding_whitespace() {
        let cache = WeatherCache::new(Duration::seconds(3600));
        cache.set("Paris", record("Paris"));

        assert_eq!(cache.get(" paris "), Some(record("Paris")));
        assert_eq!(cache.get("PARIS"), Some(record("Paris")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entry_is_a_miss_and_gets_evicted() {
        let cache = WeatherCache::new(Duration::seconds(3600));
        let now = Utc::now();
        cache.set_at("Paris", record("Paris"), now);

        assert!(cache.get_at("Paris", now + Duration::seconds(3599)).is_some());
        assert!(cache.get_at("Paris", now + Duration::seconds(3600)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn repeated_set_keeps_latest_record() {
        let cache = WeatherCache::new(Duration::seconds(3600));
        cache.set("Paris", record("Paris"));
        cache.set("Paris", record("Paris"));
        assert_eq!(cache.get("Paris"), Some(record("Paris")));

        cache.set("paris", record("Paris, FR"));
        assert_eq!(cache.get("Paris"), Some(record("Paris, FR")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn newer_set_restarts_the_ttl() {
        let cache = WeatherCache::new(Duration::seconds(100));
        let now = Utc::now();
        cache.set_at("Oslo", record("Oslo"), now);
        cache.set_at("Oslo", record("Oslo"), now + Duration::seconds(50));

        assert!(cache.get_at("Oslo", now + Duration::seconds(120)).is_some());
    }

    #[test]
    fn purge_only_removes_expired_entries() {
        let cache = WeatherCache::new(Duration::seconds(60));
        let now = Utc::now();
        cache.set_at("Paris", record("Paris"), now);
        cache.set_at("Rome", record("Rome"), now + Duration::seconds(30));

        assert_eq!(cache.purge_expired_at(now + Duration::seconds(60)), 1);
        assert!(cache.get_at("Rome", now + Duration::seconds(60)).is_some());
    }

    #[test]
    fn huge_ttl_does_not_overflow_on_set() {
        let cache = WeatherCache::new(Duration::MAX);
        cache.set("Paris", record("Paris"));

        assert_eq!(cache.get("Paris"), Some(record("Paris")));
    }
}
