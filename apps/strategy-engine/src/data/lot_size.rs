//! Lot sizes per symbol, refreshed monthly.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Cached lot sizes keyed by symbol.
///
/// Exchanges revise lot sizes at series rollover, so every entry is dropped
/// on the first lookup in a new calendar month.
#[derive(Debug, Clone, Default)]
pub struct LotSizeCache {
    entries: HashMap<String, u32>,
    month: Option<(i32, u32)>,
}

impl LotSizeCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached lot size, loading it on a miss.
    ///
    /// Loader errors are returned unchanged and nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the loader's error.
    pub fn get_or_load<E, F>(&mut self, symbol: &str, today: NaiveDate, loader: F) -> Result<u32, E>
    where
        F: FnOnce(&str) -> Result<u32, E>,
    {
        self.roll(today);
        if let Some(&lot_size) = self.entries.get(symbol) {
            return Ok(lot_size);
        }
        let lot_size = loader(symbol)?;
        debug!(symbol, lot_size, "Cached lot size");
        self.entries.insert(symbol.to_string(), lot_size);
        Ok(lot_size)
    }

    /// Cached lot size without loading.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.entries.get(symbol).copied()
    }

    /// Number of cached symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn roll(&mut self, today: NaiveDate) {
        let month = (today.year(), today.month());
        if self.month != Some(month) {
            if !self.entries.is_empty() {
                debug!(entries = self.entries.len(), "Month rollover, clearing lot sizes");
            }
            self.entries.clear();
            self.month = Some(month);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_loads_once_within_month() {
        let mut cache = LotSizeCache::new();
        let calls = Cell::new(0);
        let loader = |_: &str| {
            calls.set(calls.get() + 1);
            Ok::<_, String>(75)
        };

        assert_eq!(cache.get_or_load("NIFTY", date(2026, 3, 2), loader), Ok(75));
        assert_eq!(cache.get_or_load("NIFTY", date(2026, 3, 27), loader), Ok(75));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.get("NIFTY"), Some(75));
    }

    #[test]
    fn test_clears_on_month_rollover() {
        let mut cache = LotSizeCache::new();
        cache
            .get_or_load("NIFTY", date(2026, 3, 31), |_| Ok::<_, String>(75))
            .unwrap();
        cache
            .get_or_load("BANKNIFTY", date(2026, 3, 31), |_| Ok::<_, String>(30))
            .unwrap();
        assert_eq!(cache.len(), 2);

        let lot = cache
            .get_or_load("NIFTY", date(2026, 4, 1), |_| Ok::<_, String>(65))
            .unwrap();
        assert_eq!(lot, 65);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("BANKNIFTY"), None);
    }

    #[test]
    fn test_same_month_next_year_is_rollover() {
        let mut cache = LotSizeCache::new();
        cache
            .get_or_load("NIFTY", date(2026, 3, 2), |_| Ok::<_, String>(75))
            .unwrap();
        let lot = cache
            .get_or_load("NIFTY", date(2027, 3, 2), |_| Ok::<_, String>(50))
            .unwrap();
        assert_eq!(lot, 50);
    }

    #[test]
    fn test_loader_error_not_cached() {
        let mut cache = LotSizeCache::new();
        let err = cache.get_or_load("XYZ", date(2026, 3, 2), |s| Err(format!("{s} not listed")));
        assert_eq!(err, Err("XYZ not listed".to_string()));
        assert!(cache.is_empty());
    }
}
