pub mod cross_filter;
pub mod latest_session;
pub mod pipeline;
pub mod ratings;
pub mod remapper;
pub mod social;
pub mod splitter;
