use crate::config::Config;
use crate::error::{PrepError, Result};

fn invalid(message: impl Into<String>) -> PrepError {
    PrepError::Configuration(message.into())
}

pub fn validate_config(config: &Config) -> Result<()> {
    validate_session_days(config.session.session_days)?;

    if config.session.max_length < 2 {
        return Err(invalid(format!(
            "max session length must be at least 2, got {}",
            config.session.max_length
        )));
    }

    let filter = &config.filter;
    if filter.min_rating > filter.max_rating {
        return Err(invalid(format!(
            "rating bounds are inverted: [{}, {}]",
            filter.min_rating, filter.max_rating
        )));
    }

    if !filter.min_timestamp.is_finite() || !filter.max_timestamp.is_finite() {
        return Err(invalid("timestamp window bounds must be finite"));
    }

    if filter.min_timestamp >= filter.max_timestamp {
        return Err(invalid(format!(
            "timestamp window [{}, {}) is empty",
            filter.min_timestamp, filter.max_timestamp
        )));
    }

    let buckets = (filter.max_timestamp - filter.min_timestamp) / config.session.bucket_seconds();
    if buckets > f64::from(u32::MAX) {
        return Err(invalid(format!(
            "session width of {} days splits the timestamp window into {:.0} buckets, more than {}",
            config.session.session_days,
            buckets,
            u32::MAX
        )));
    }

    let ratio = config.split.valid_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(invalid(format!("valid ratio must lie in [0, 1], got {}", ratio)));
    }

    Ok(())
}

pub fn validate_session_days(session_days: f64) -> Result<()> {
    if !session_days.is_finite() || session_days <= 0.0 {
        return Err(invalid(format!(
            "session width must be a positive number of days, got {}",
            session_days
        )));
    }
    Ok(())
}
