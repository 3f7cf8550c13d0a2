use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Raw rating row as it appears in the ratings TSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "ItemId")]
    pub item_id: String,
    #[serde(rename = "Rating")]
    pub rating: i32,
    #[serde(rename = "Timestamp")]
    pub timestamp: f64,
}

/// A rating annotated with its time bucket and session key.
///
/// `session_id` is derived from `user_id` and `time_id` on construction, so
/// rewriting the user id always goes through [`SessionEvent::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent<U = String, I = String> {
    #[serde(rename = "UserId")]
    pub user_id: U,
    #[serde(rename = "ItemId")]
    pub item_id: I,
    #[serde(rename = "Rating")]
    pub rating: i32,
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
    #[serde(rename = "TimeId")]
    pub time_id: u32,
    #[serde(rename = "SessionId")]
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowEdge<U = String> {
    #[serde(rename = "Follower")]
    pub follower: U,
    #[serde(rename = "Followee")]
    pub followee: U,
}

pub type RawEvent = SessionEvent<String, String>;
pub type DenseEvent = SessionEvent<u32, u32>;
pub type DenseEdge = FollowEdge<u32>;

pub const EVENT_COLUMNS: [&str; 6] = ["UserId", "ItemId", "Rating", "Timestamp", "TimeId", "SessionId"];
pub const EDGE_COLUMNS: [&str; 2] = ["Follower", "Followee"];

/// Sentinel written for time steps that precede a user's first session.
pub const NULL_SESSION: &str = "NULL";

pub fn session_key(user_id: impl Display, time_id: u32) -> String {
    format!("{}_{}", user_id, time_id)
}

impl<U: Display, I> SessionEvent<U, I> {
    pub fn new(user_id: U, item_id: I, rating: i32, timestamp: i64, time_id: u32) -> Self {
        let session_id = session_key(&user_id, time_id);
        Self {
            user_id,
            item_id,
            rating,
            timestamp,
            time_id,
            session_id,
        }
    }
}

impl<U> FollowEdge<U> {
    pub fn new(follower: U, followee: U) -> Self {
        Self { follower, followee }
    }
}
