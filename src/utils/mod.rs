use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub mod metrics;
pub mod validation;

/// Number of records per key.
pub fn count_by<'a, T, K, F>(records: &'a [T], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Keeps the records whose key group size satisfies `keep`.
///
/// Group sizes are computed once over the input, so every record is judged
/// against the same counts regardless of what else gets dropped.
pub fn retain_by_count<T, K, F, P>(records: Vec<T>, key: F, keep: P) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    P: Fn(usize) -> bool,
{
    let counts = count_by(&records, &key);
    records
        .into_iter()
        .filter(|record| counts.get(&key(record)).map_or(false, |&n| keep(n)))
        .collect()
}

/// Unique keys in first-occurrence order.
pub fn unique_in_order<T, K, F>(records: &[T], key: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for record in records {
        let k = key(record);
        if seen.insert(k.clone()) {
            ordered.push(k);
        }
    }
    ordered
}

pub fn mean(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by() {
        let words = vec!["a", "b", "a", "c", "a"];
        let counts = count_by(&words, |w| *w);
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 1);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_retain_by_count_keeps_order() {
        let words = vec!["a", "b", "a", "c", "b", "a"];
        let kept = retain_by_count(words, |w| *w, |n| n >= 2);
        assert_eq!(kept, vec!["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn test_retain_by_count_range() {
        let words = vec!["x", "y", "y", "z", "z", "z"];
        let kept = retain_by_count(words, |w| *w, |n| n > 1 && n <= 2);
        assert_eq!(kept, vec!["y", "y"]);
    }

    #[test]
    fn test_unique_in_order() {
        let words = vec!["b", "a", "b", "c", "a"];
        assert_eq!(unique_in_order(&words, |w| *w), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert_eq!(mean(0, 0), 0.0);
        assert_eq!(mean(6, 4), 1.5);
    }
}
