use anyhow::{Context, Result};
use clap::Parser;
use sessionprep::{init_tracing, Config, Pipeline};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Ratings TSV (UserId, ItemId, Rating, Timestamp)
    #[arg(long)]
    ratings: Option<PathBuf>,

    /// Social TSV (Follower, Followee)
    #[arg(long)]
    social: Option<PathBuf>,

    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Seed for the validation/test shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Session bucket width in days
    #[arg(long)]
    session_days: Option<f64>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.ratings {
            config.input.ratings_path = path.clone();
        }
        if let Some(path) = &self.social {
            config.input.social_path = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            config.split.seed = Some(seed);
        }
        if let Some(days) = self.session_days {
            config.session.session_days = days;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", &args.log_level);
    }
    init_tracing();

    let mut config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config).with_context(|| format!("loading config from {}", args.config))?
    } else {
        info!("Config file not found, using default configuration");
        Config::default()
    };
    args.apply(&mut config);
    info!("Session config: {:?}, split config: {:?}", config.session, config.split);

    let pipeline = Pipeline::new(config).context("invalid configuration")?;
    let prepared = pipeline.run_from_files().context("preparing dataset")?;

    let output_dir = &pipeline.config().output.dir;
    prepared
        .write_to(output_dir)
        .with_context(|| format!("writing outputs to {}", output_dir.display()))?;

    info!(
        "Done: {} users, {} items, tmax {}",
        prepared.report.num_users, prepared.report.num_items, prepared.tmax
    );
    Ok(())
}
