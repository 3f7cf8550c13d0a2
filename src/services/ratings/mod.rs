use crate::config::{FilterConfig, SessionConfig};
use crate::error::{PrepError, Result};
use crate::models::{RatingRecord, RawEvent, SessionEvent};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Filters raw ratings by score and collection window and assigns each
/// surviving rating to a fixed-width time bucket anchored at the earliest
/// retained timestamp.
pub struct RatingLoader<'a> {
    filter: &'a FilterConfig,
    session: &'a SessionConfig,
}

impl<'a> RatingLoader<'a> {
    pub fn new(filter: &'a FilterConfig, session: &'a SessionConfig) -> Self {
        Self { filter, session }
    }

    pub fn load(&self, records: Vec<RatingRecord>) -> Result<Vec<RawEvent>> {
        let total = records.len();
        let mut out_of_range = 0usize;
        let mut out_of_window = 0usize;

        let retained: Vec<RatingRecord> = records
            .into_iter()
            .filter(|r| {
                if !self.filter.accepts_rating(r.rating) {
                    out_of_range += 1;
                    false
                } else if !self.filter.accepts_timestamp(r.timestamp) {
                    out_of_window += 1;
                    false
                } else {
                    true
                }
            })
            .collect();

        debug!(
            "Dropped {} of {} ratings: {} outside rating bounds, {} outside the collection window",
            out_of_range + out_of_window,
            total,
            out_of_range,
            out_of_window
        );

        let Some(t_min) = retained.iter().map(|r| r.timestamp).reduce(f64::min) else {
            warn!("No ratings survived score and collection window filtering");
            return Ok(Vec::new());
        };

        info!(
            "Collection window {} .. {}, sessions span {} day(s)",
            format_epoch(self.filter.min_timestamp),
            format_epoch(self.filter.max_timestamp),
            self.session.session_days
        );

        let width = self.session.bucket_seconds();
        retained
            .into_iter()
            .map(|r| {
                let time_id = time_bucket(r.timestamp - t_min, width)?;
                Ok(SessionEvent::new(r.user_id, r.item_id, r.rating, r.timestamp as i64, time_id))
            })
            .collect()
    }
}

/// `floor(offset / width)`, refusing buckets that do not fit a `u32`.
fn time_bucket(offset: f64, width: f64) -> Result<u32> {
    let bucket = (offset / width).floor();
    if bucket >= 0.0 && bucket <= f64::from(u32::MAX) {
        Ok(bucket as u32)
    } else {
        Err(PrepError::Configuration(format!(
            "time bucket {} is out of range, the session width of {} seconds is too small",
            bucket, width
        )))
    }
}

fn format_epoch(seconds: f64) -> String {
    DateTime::<Utc>::from_timestamp(seconds as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn record(user: &str, item: &str, rating: i32, timestamp: f64) -> RatingRecord {
        RatingRecord {
            user_id: user.to_string(),
            item_id: item.to_string(),
            rating,
            timestamp,
        }
    }

    #[test]
    fn test_drops_out_of_range_ratings_and_timestamps() {
        let config = Config::default();
        let loader = RatingLoader::new(&config.filter, &config.session);
        let records = vec![
            record("a", "x", 0, 1.3e9),
            record("a", "x", 7, 1.3e9),
            record("a", "y", 1, 1.3e9),
            record("a", "z", 6, 1.3e9),
            record("b", "x", 3, 1.1e9),
            record("b", "x", 3, 1.485e9),
            record("b", "x", 3, 1.2e9),
        ];

        let events = loader.load(records).unwrap();
        assert_eq!(events.len(), 3);
        for event in &events {
            assert!((1..=6).contains(&event.rating));
            assert!(event.timestamp >= 1_200_000_000 && event.timestamp < 1_485_000_000);
        }
    }

    #[test]
    fn test_time_buckets_anchor_at_minimum() {
        let config = Config::default();
        let loader = RatingLoader::new(&config.filter, &config.session);
        let t0 = 1.3e9;
        let records = vec![
            record("A", "x", 4, t0 + 86400.0 * 8.0),
            record("A", "y", 4, t0),
            record("A", "z", 4, t0 + 86400.0 * 7.0 - 1.0),
            record("B", "z", 4, t0 + 86400.0 * 14.0),
        ];

        let events = loader.load(records).unwrap();
        let ids: Vec<(u32, &str)> = events.iter().map(|e| (e.time_id, e.session_id.as_str())).collect();
        assert_eq!(ids, vec![(1, "A_1"), (0, "A_0"), (0, "A_0"), (2, "B_2")]);
    }

    #[test]
    fn test_custom_session_width() {
        let mut config = Config::default();
        config.session.session_days = 1.0;
        let loader = RatingLoader::new(&config.filter, &config.session);
        let t0 = 1.3e9;
        let events = loader
            .load(vec![record("A", "x", 4, t0), record("A", "y", 4, t0 + 86400.0 * 3.5)])
            .unwrap();
        assert_eq!(events[1].time_id, 3);
        assert_eq!(events[1].session_id, "A_3");
    }

    #[test]
    fn test_everything_filtered() {
        let config = Config::default();
        let loader = RatingLoader::new(&config.filter, &config.session);
        assert!(loader.load(vec![record("a", "x", 9, 1.3e9)]).unwrap().is_empty());
    }

    #[test]
    fn test_tiny_width_is_refused_instead_of_merging_buckets() {
        let mut config = Config::default();
        config.session.session_days = 1e-7;
        let loader = RatingLoader::new(&config.filter, &config.session);
        let records = vec![record("A", "x", 4, 1.2e9), record("A", "y", 4, 1.3e9), record("A", "z", 4, 1.4e9)];
        assert!(matches!(loader.load(records), Err(PrepError::Configuration(_))));
    }

    #[test]
    fn test_time_bucket_bounds() {
        assert_eq!(time_bucket(0.0, 604800.0).unwrap(), 0);
        assert_eq!(time_bucket(604800.0 * 3.0 + 1.0, 604800.0).unwrap(), 3);
        assert!(time_bucket(1e10, 1e-3).is_err());
    }
}
