use crate::error::{PrepError, Result};
use crate::models::{session_key, DenseEvent, NULL_SESSION};
use std::collections::HashSet;

/// For every dense user and time step `t` in `0..=tmax`, the user's session
/// from the latest bucket strictly before `t`, or `None` before any activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestSessionIndex {
    rows: Vec<Vec<Option<String>>>,
}

impl LatestSessionIndex {
    pub fn build(events: &[DenseEvent], num_users: usize, tmax: u32) -> Result<Self> {
        let mut active: Vec<HashSet<u32>> = vec![HashSet::new(); num_users];
        for event in events {
            let buckets = active.get_mut(event.user_id as usize).ok_or_else(|| {
                PrepError::UnmappedIdentifier {
                    kind: "user",
                    id: event.user_id.to_string(),
                }
            })?;
            buckets.insert(event.time_id);
        }

        let rows = active
            .iter()
            .enumerate()
            .map(|(user, buckets)| carry_forward(user as u32, buckets, tmax))
            .collect();
        Ok(Self { rows })
    }

    pub fn get(&self, user: u32, t: u32) -> Option<&str> {
        self.rows
            .get(user as usize)
            .and_then(|row| row.get(t as usize))
            .and_then(|entry| entry.as_deref())
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn num_users(&self) -> usize {
        self.rows.len()
    }

    /// One comma-separated line per user, `NULL` for empty steps.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| {
            row.iter()
                .map(|entry| entry.as_deref().unwrap_or(NULL_SESSION))
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

fn carry_forward(user: u32, buckets: &HashSet<u32>, tmax: u32) -> Vec<Option<String>> {
    std::iter::once(None)
        .chain((1..=tmax).scan(None, |latest: &mut Option<String>, t| {
            if buckets.contains(&(t - 1)) {
                *latest = Some(session_key(user, t - 1));
            }
            Some(latest.clone())
        }))
        .collect()
}
