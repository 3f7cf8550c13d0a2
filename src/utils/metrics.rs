use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use crate::models::{FollowEdge, SessionEvent};
use crate::utils::{count_by, mean};

/// Summary of an annotated event table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    pub events: usize,
    pub sessions: usize,
    pub users: usize,
    pub items: usize,
    pub avg_session_length: f64,
    pub avg_events_per_user: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialStats {
    pub edges: usize,
    pub followers: usize,
    pub avg_friends: f64,
}

/// Everything reported about one preparation run, persisted as `stats.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub ratings: TableStats,
    pub social: SocialStats,
    pub cross_filtered: TableStats,
    pub train: TableStats,
    pub valid: TableStats,
    pub test: TableStats,
    pub predictable_items: usize,
    pub num_users: usize,
    pub num_items: usize,
    pub tmax: u32,
}

impl TableStats {
    pub fn from_events<U, I>(events: &[SessionEvent<U, I>]) -> Self
    where
        U: Eq + Hash,
        I: Eq + Hash,
    {
        let sessions = count_by(events, |e| e.session_id.as_str()).len();
        let users = events.iter().map(|e| &e.user_id).collect::<HashSet<_>>().len();
        let items = events.iter().map(|e| &e.item_id).collect::<HashSet<_>>().len();

        Self {
            events: events.len(),
            sessions,
            users,
            items,
            avg_session_length: mean(events.len(), sessions),
            avg_events_per_user: mean(events.len(), users),
        }
    }

    pub fn log(&self, label: &str) {
        tracing::info!(
            "{}: {} events, {} sessions, {} users, {} items, avg session length {:.3}, avg events per user {:.3}",
            label,
            self.events,
            self.sessions,
            self.users,
            self.items,
            self.avg_session_length,
            self.avg_events_per_user
        );
    }
}

impl SocialStats {
    pub fn from_edges<U: Eq + Hash>(edges: &[FollowEdge<U>]) -> Self {
        let followers = count_by(edges, |e| &e.follower).len();
        Self {
            edges: edges.len(),
            followers,
            avg_friends: mean(edges.len(), followers),
        }
    }

    pub fn log(&self, label: &str) {
        tracing::info!(
            "{}: {} edges, {} followers, avg friends per follower {:.3}",
            label,
            self.edges,
            self.followers,
            self.avg_friends
        );
    }
}
