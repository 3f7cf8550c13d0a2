use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub session: SessionConfig,
    pub filter: FilterConfig,
    pub split: SplitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub ratings_path: PathBuf,
    pub social_path: PathBuf,
    pub has_headers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Width of one session bucket, in days.
    pub session_days: f64,
    pub max_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub min_rating: i32,
    pub max_rating: i32,
    /// Inclusive lower bound, epoch seconds.
    pub min_timestamp: f64,
    /// Exclusive upper bound, epoch seconds.
    pub max_timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Sessions ending before `tmax - holdout_offset` go to train.
    pub holdout_offset: u32,
    pub min_item_support: usize,
    pub min_predictable_support: usize,
    pub valid_ratio: f64,
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn bucket_seconds(&self) -> f64 {
        86400.0 * self.session_days
    }
}

impl FilterConfig {
    pub fn accepts_rating(&self, rating: i32) -> bool {
        (self.min_rating..=self.max_rating).contains(&rating)
    }

    pub fn accepts_timestamp(&self, timestamp: f64) -> bool {
        timestamp >= self.min_timestamp && timestamp < self.max_timestamp
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                ratings_path: PathBuf::from("Douban/movie/douban_movie.tsv"),
                social_path: PathBuf::from("Douban/socialnet/socialnet.tsv"),
                has_headers: true,
            },
            output: OutputConfig {
                dir: PathBuf::from("."),
            },
            session: SessionConfig {
                session_days: 7.0,
                max_length: 30,
            },
            filter: FilterConfig {
                min_rating: 1,
                max_rating: 6,
                min_timestamp: 1.2e9,
                max_timestamp: 1.485e9,
            },
            split: SplitConfig {
                holdout_offset: 26,
                min_item_support: 20,
                min_predictable_support: 50,
                valid_ratio: 0.5,
                seed: None,
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SESSIONPREP").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> crate::Result<()> {
        crate::utils::validation::validate_config(self)
    }
}
