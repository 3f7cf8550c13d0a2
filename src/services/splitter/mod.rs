use crate::config::SplitConfig;
use crate::error::{PrepError, Result};
use crate::models::RawEvent;
use crate::utils::{count_by, retain_by_count, unique_in_order};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Train/validation/test partitions of the cross-filtered ratings.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub train: Vec<RawEvent>,
    pub valid: Vec<RawEvent>,
    pub test: Vec<RawEvent>,
    /// Items frequent enough in train to be evaluation targets.
    pub predictable: HashSet<String>,
    /// Largest time bucket among the split's input.
    pub tmax: u32,
}

pub struct Splitter<'a> {
    config: &'a SplitConfig,
    rng: StdRng,
}

impl<'a> Splitter<'a> {
    pub fn new(config: &'a SplitConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn split(&mut self, events: Vec<RawEvent>) -> Result<SplitResult> {
        let tmax = events
            .iter()
            .map(|e| e.time_id)
            .max()
            .ok_or_else(|| PrepError::EmptyDataset("no ratings left to split after cross-filtering".into()))?;

        let cutoff = i64::from(tmax) - i64::from(self.config.holdout_offset);
        let (train, holdout) = partition_by_end_time(events, cutoff);
        info!("Number of train/holdout events: {}/{}", train.len(), holdout.len());

        // A cutoff at or below zero leaves nothing for train, predictable items
        // or evaluation, so every output would be empty.
        if self.config.holdout_offset >= tmax {
            return Err(PrepError::Configuration(format!(
                "holdout offset {} covers the whole observed span of {} time bucket(s), nothing is left for training",
                self.config.holdout_offset, tmax
            )));
        }
        if train.is_empty() {
            warn!("Train split is empty: no session ends before time bucket {}", cutoff);
        }

        let train = self.filter_train(train);
        let predictable = self.predictable_items(&train);
        info!("Item size in train data: {}", count_by(&train, |e| e.item_id.as_str()).len());
        info!("Size of to predict: {}", predictable.len());

        let (valid, test) = self.split_holdout(holdout);
        let valid = restrict_to_items(valid, &predictable);
        let test = restrict_to_items(test, &predictable);

        if valid.is_empty() || test.is_empty() {
            warn!(
                "Evaluation split is empty after predictable-item filtering (valid: {} events, test: {} events)",
                valid.len(),
                test.len()
            );
        }

        Ok(SplitResult {
            train,
            valid,
            test,
            predictable,
            tmax,
        })
    }

    /// Rare-item floor first, then the session-length floor. The second pass
    /// must see the first pass's removals.
    fn filter_train(&self, train: Vec<RawEvent>) -> Vec<RawEvent> {
        let min_support = self.config.min_item_support;
        let train = retain_by_count(train, |e| e.item_id.clone(), |n| n >= min_support);
        let train = retain_by_count(train, |e| e.session_id.clone(), |len| len > 1);
        if train.is_empty() {
            warn!("Train split is empty after the item support floor of {}", min_support);
        }
        train
    }

    fn predictable_items(&self, train: &[RawEvent]) -> HashSet<String> {
        count_by(train, |e| e.item_id.as_str())
            .into_iter()
            .filter(|&(_, n)| n >= self.config.min_predictable_support)
            .map(|(item, _)| item.to_string())
            .collect()
    }

    /// Shuffles holdout session ids and cuts them at `floor(n * valid_ratio)`.
    fn split_holdout(&mut self, holdout: Vec<RawEvent>) -> (Vec<RawEvent>, Vec<RawEvent>) {
        let mut session_ids = unique_in_order(&holdout, |e| e.session_id.clone());
        if session_ids.is_empty() {
            warn!("Holdout split is empty: every session ends before the cutoff");
        }
        session_ids.shuffle(&mut self.rng);

        let valid_count =
            ((session_ids.len() as f64 * self.config.valid_ratio).floor() as usize).min(session_ids.len());
        let valid_ids: HashSet<String> = session_ids.drain(..valid_count).collect();

        holdout.into_iter().partition(|e| valid_ids.contains(&e.session_id))
    }
}

/// Sessions whose last bucket is strictly before `cutoff` are train; the rest
/// are holdout.
pub fn partition_by_end_time(events: Vec<RawEvent>, cutoff: i64) -> (Vec<RawEvent>, Vec<RawEvent>) {
    let mut session_end: HashMap<&str, u32> = HashMap::new();
    for event in &events {
        let end = session_end.entry(event.session_id.as_str()).or_insert(event.time_id);
        *end = (*end).max(event.time_id);
    }
    let train_sessions: HashSet<String> = session_end
        .into_iter()
        .filter(|&(_, end)| i64::from(end) < cutoff)
        .map(|(session, _)| session.to_string())
        .collect();

    events.into_iter().partition(|e| train_sessions.contains(&e.session_id))
}

/// Keeps predictable items, then drops sessions left with a single event.
pub fn restrict_to_items(events: Vec<RawEvent>, items: &HashSet<String>) -> Vec<RawEvent> {
    let events: Vec<RawEvent> = events.into_iter().filter(|e| items.contains(&e.item_id)).collect();
    retain_by_count(events, |e| e.session_id.clone(), |len| len > 1)
}
