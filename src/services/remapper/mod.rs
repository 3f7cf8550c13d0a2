use crate::error::{PrepError, Result};
use crate::models::{DenseEdge, DenseEvent, FollowEdge, RawEvent, SessionEvent};
use crate::services::splitter::SplitResult;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Dense ids handed out in first-occurrence order, starting at `base`.
#[derive(Debug, Clone)]
pub struct IdMap {
    kind: &'static str,
    base: u32,
    to_dense: HashMap<String, u32>,
    originals: Vec<String>,
}

impl IdMap {
    pub fn from_first_occurrence<'a>(
        kind: &'static str,
        base: u32,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut map = Self {
            kind,
            base,
            to_dense: HashMap::new(),
            originals: Vec::new(),
        };
        for id in ids {
            if !map.to_dense.contains_key(id) {
                let dense = base + map.originals.len() as u32;
                map.to_dense.insert(id.to_string(), dense);
                map.originals.push(id.to_string());
            }
        }
        map
    }

    pub fn get(&self, id: &str) -> Result<u32> {
        self.to_dense
            .get(id)
            .copied()
            .ok_or_else(|| PrepError::UnmappedIdentifier {
                kind: self.kind,
                id: id.to_string(),
            })
    }

    pub fn original(&self, dense: u32) -> Option<&str> {
        dense
            .checked_sub(self.base)
            .and_then(|offset| self.originals.get(offset as usize))
            .map(String::as_str)
    }

    /// `(original, dense)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.originals
            .iter()
            .enumerate()
            .map(move |(i, id)| (id.as_str(), self.base + i as u32))
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

/// All tables rewritten onto dense ids.
#[derive(Debug, Clone)]
pub struct RemappedDataset {
    pub total: Vec<DenseEvent>,
    pub train: Vec<DenseEvent>,
    pub valid: Vec<DenseEvent>,
    pub test: Vec<DenseEvent>,
    pub edges: Vec<DenseEdge>,
    pub user_map: IdMap,
    pub item_map: IdMap,
}

impl RemappedDataset {
    pub fn num_users(&self) -> usize {
        self.user_map.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_map.len()
    }
}

/// Unions the splits, closes the graph over the union's users and rewrites
/// every table with dense user ids from 0 and dense item ids from 1.
pub fn remap(split: &SplitResult, edges: &[FollowEdge]) -> Result<RemappedDataset> {
    let total: Vec<&RawEvent> = split.train.iter().chain(&split.valid).chain(&split.test).collect();
    if total.is_empty() {
        return Err(PrepError::EmptyDataset(
            "train, valid and test are all empty, no ids to assign".into(),
        ));
    }

    let users: HashSet<&str> = total.iter().map(|e| e.user_id.as_str()).collect();
    let edges: Vec<&FollowEdge> = edges
        .iter()
        .filter(|e| users.contains(e.follower.as_str()) && users.contains(e.followee.as_str()))
        .collect();

    let user_map = IdMap::from_first_occurrence("user", 0, total.iter().map(|e| e.user_id.as_str()));
    let item_map = IdMap::from_first_occurrence("item", 1, total.iter().map(|e| e.item_id.as_str()));
    info!("Assigned {} dense user ids and {} dense item ids", user_map.len(), item_map.len());

    let mapped = RemappedDataset {
        total: remap_events(total.iter().copied(), &user_map, &item_map)?,
        train: remap_events(&split.train, &user_map, &item_map)?,
        valid: remap_events(&split.valid, &user_map, &item_map)?,
        test: remap_events(&split.test, &user_map, &item_map)?,
        edges: edges
            .into_iter()
            .map(|e| -> Result<DenseEdge> {
                Ok(FollowEdge::new(user_map.get(&e.follower)?, user_map.get(&e.followee)?))
            })
            .collect::<Result<_>>()?,
        user_map,
        item_map,
    };
    Ok(mapped)
}

/// Rebuilds each event so the session id is derived from the dense user id.
pub fn remap_events<'a>(
    events: impl IntoIterator<Item = &'a RawEvent>,
    users: &IdMap,
    items: &IdMap,
) -> Result<Vec<DenseEvent>> {
    events
        .into_iter()
        .map(|e| -> Result<DenseEvent> {
            Ok(SessionEvent::new(
                users.get(&e.user_id)?,
                items.get(&e.item_id)?,
                e.rating,
                e.timestamp,
                e.time_id,
            ))
        })
        .collect()
}
