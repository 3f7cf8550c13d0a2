use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::models::{FollowEdge, RatingRecord};
use crate::services::cross_filter::cross_filter;
use crate::services::latest_session::LatestSessionIndex;
use crate::services::ratings::RatingLoader;
use crate::services::remapper::{remap, RemappedDataset};
use crate::services::social::dedup_edges;
use crate::services::splitter::Splitter;
use crate::utils::metrics::{RunReport, SocialStats, TableStats};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Final outputs of one run, ready to be written.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub remapped: RemappedDataset,
    pub latest: LatestSessionIndex,
    pub tmax: u32,
    pub report: RunReport,
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_from_files(&self) -> Result<PreparedDataset> {
        let input = &self.config.input;
        info!("Reading ratings from {}", input.ratings_path.display());
        let ratings = io::read_ratings_file(&input.ratings_path, input.has_headers)?;
        info!("Reading social network from {}", input.social_path.display());
        let social = io::read_social_file(&input.social_path, input.has_headers)?;
        self.run(ratings, social)
    }

    pub fn run(&self, ratings: Vec<RatingRecord>, social: Vec<FollowEdge>) -> Result<PreparedDataset> {
        let started = Instant::now();
        let mut report = RunReport::default();

        let events = RatingLoader::new(&self.config.filter, &self.config.session).load(ratings)?;
        report.ratings = TableStats::from_events(&events);
        report.ratings.log("Statistics of user ratings");

        let edges = dedup_edges(social);
        report.social = SocialStats::from_edges(&edges);
        report.social.log("Statistics of social network");

        let filtered = cross_filter(events, edges, self.config.session.max_length);
        report.cross_filtered = TableStats::from_events(&filtered.events);
        report.cross_filtered.log("After cross-filtering");

        let split = Splitter::new(&self.config.split).split(filtered.events)?;
        report.predictable_items = split.predictable.len();
        report.tmax = split.tmax;

        let remapped = remap(&split, &filtered.edges)?;
        report.num_users = remapped.num_users();
        report.num_items = remapped.num_items();
        report.train = TableStats::from_events(&remapped.train);
        report.valid = TableStats::from_events(&remapped.valid);
        report.test = TableStats::from_events(&remapped.test);
        report.train.log("Train set");
        report.valid.log("Valid set");
        report.test.log("Test set");

        let latest = LatestSessionIndex::build(&remapped.total, remapped.num_users(), split.tmax)?;
        info!(
            "Built latest-session index for {} users over {} time steps in {:?}",
            latest.num_users(),
            u64::from(split.tmax) + 1,
            started.elapsed()
        );

        Ok(PreparedDataset {
            remapped,
            latest,
            tmax: split.tmax,
            report,
        })
    }
}

impl PreparedDataset {
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let data = &self.remapped;

        io::write_events(io::create(dir, io::TRAIN_FILE)?, &data.train)?;
        io::write_events(io::create(dir, io::VALID_FILE)?, &data.valid)?;
        io::write_events(io::create(dir, io::TEST_FILE)?, &data.test)?;
        io::write_edges(io::create(dir, io::ADJ_FILE)?, &data.edges)?;
        io::write_id_map(io::create(dir, io::USER_MAP_FILE)?, &data.user_map)?;
        io::write_id_map(io::create(dir, io::ITEM_MAP_FILE)?, &data.item_map)?;
        io::write_latest_sessions(io::create(dir, io::LATEST_SESSIONS_FILE)?, &self.latest)?;
        io::write_json(io::create(dir, io::STATS_FILE)?, &self.report)?;

        info!("Wrote prepared dataset to {}", dir.display());
        Ok(())
    }
}
