pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{PrepError, Result};
pub use models::*;
pub use services::pipeline::{Pipeline, PreparedDataset};

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
