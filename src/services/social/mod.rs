use crate::models::FollowEdge;
use std::collections::HashSet;
use tracing::debug;

/// Drops repeated (follower, followee) pairs, keeping first occurrences in order.
pub fn dedup_edges(edges: Vec<FollowEdge>) -> Vec<FollowEdge> {
    let total = edges.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<FollowEdge> = edges
        .into_iter()
        .filter(|edge| seen.insert((edge.follower.clone(), edge.followee.clone())))
        .collect();

    debug!("Removed {} duplicate follow edges", total - unique.len());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: &str, b: &str) -> FollowEdge {
        FollowEdge::new(a.to_string(), b.to_string())
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let edges = vec![edge("a", "b"), edge("b", "a"), edge("a", "b"), edge("c", "a"), edge("b", "a")];
        assert_eq!(dedup_edges(edges), vec![edge("a", "b"), edge("b", "a"), edge("c", "a")]);
    }

    #[test]
    fn test_no_other_filtering() {
        let edges = vec![edge("a", "a"), edge("x", "y")];
        assert_eq!(dedup_edges(edges.clone()), edges);
    }
}
