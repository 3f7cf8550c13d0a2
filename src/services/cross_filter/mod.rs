use crate::models::{FollowEdge, RawEvent};
use crate::utils::retain_by_count;
use std::collections::HashSet;
use tracing::debug;

/// Ratings and follow edges restricted to each other, with bounded sessions.
#[derive(Debug, Clone)]
pub struct CrossFiltered {
    pub events: Vec<RawEvent>,
    pub edges: Vec<FollowEdge>,
}

/// Restricts the graph to rating users, then the ratings to followers of the
/// restricted graph, then keeps sessions with `1 < len <= max_length`.
///
/// The two restrictions run once each, in this order, so the result is not
/// necessarily closed in both directions.
pub fn cross_filter(events: Vec<RawEvent>, edges: Vec<FollowEdge>, max_length: usize) -> CrossFiltered {
    let rating_users: HashSet<&str> = events.iter().map(|e| e.user_id.as_str()).collect();
    let edges: Vec<FollowEdge> = edges
        .into_iter()
        .filter(|e| rating_users.contains(e.follower.as_str()) && rating_users.contains(e.followee.as_str()))
        .collect();

    let followers: HashSet<&str> = edges.iter().map(|e| e.follower.as_str()).collect();
    let before = events.len();
    let events: Vec<RawEvent> = events
        .iter()
        .filter(|e| followers.contains(e.user_id.as_str()))
        .cloned()
        .collect();
    debug!("{} of {} ratings belong to users outside the social graph", before - events.len(), before);

    let before = events.len();
    let events = retain_by_count(events, |e| e.session_id.clone(), |len| len > 1 && len <= max_length);
    debug!("{} ratings fall in sessions outside [2, {}]", before - events.len(), max_length);

    CrossFiltered { events, edges }
}
