//! Property-based тесты NodeSelector и RecentHistory

use bevy::prelude::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sentinel_simulation::ai::next_waypoint;
use sentinel_simulation::{PatrolGraph, RecentHistory};

fn graph_strategy() -> impl Strategy<Value = PatrolGraph> {
    prop::collection::vec((-40.0f32..40.0, -40.0f32..40.0), 1..12)
        .prop_map(|points| PatrolGraph::new(points.into_iter().map(|(x, z)| Vec3::new(x, 0.0, z)).collect()))
}

proptest! {
    #[test]
    fn selector_never_returns_recent_waypoint(
        graph in graph_strategy(),
        visited in prop::collection::vec(0usize..12, 0..8),
        current_hint in 0usize..12,
        range in 0.0f32..30.0,
        seed in any::<u64>(),
    ) {
        let current = current_hint % graph.len();
        let mut history = RecentHistory::default();
        for index in visited.into_iter().filter(|index| *index < graph.len()) {
            history.push(index);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let next = next_waypoint(current, &history, &graph, range, &mut rng);

        prop_assert!(next < graph.len());
        let all_visited = (0..graph.len()).all(|index| history.contains(index));
        if all_visited {
            prop_assert_eq!(next, current);
        } else {
            prop_assert!(!history.contains(next), "picked recent {} from {:?}", next, history.to_vec());
        }
    }

    #[test]
    fn history_keeps_last_pushes_in_order(
        pushes in prop::collection::vec(0usize..20, 0..40),
        limit in 1usize..8,
    ) {
        let mut history = RecentHistory::new(limit);
        for index in &pushes {
            history.push(*index);
            prop_assert!(history.len() <= limit);
        }

        let expected: Vec<usize> = pushes.iter().rev().take(limit).rev().copied().collect();
        prop_assert_eq!(history.to_vec(), expected);
    }
}
