//! Node selector - выбор следующего patrol waypoint'а
//!
//! Два уровня кандидатов (оба без индексов из RecentHistory и без текущего):
//! 1. соседи в радиусе `proximity_bias_range` от текущего waypoint'а
//! 2. любой waypoint графа
//!
//! Оба пусты → остаёмся на текущем (stand-in-place).
//! Случайность только через переданный RNG (DeterministicRng в ECS).

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::ai::RecentHistory;
use crate::components::PatrolGraph;

/// NextWaypoint(current, history, graph)
pub fn next_waypoint<R: Rng + ?Sized>(
    current: usize,
    history: &RecentHistory,
    graph: &PatrolGraph,
    proximity_bias_range: f32,
    rng: &mut R,
) -> usize {
    let eligible: Vec<(usize, Vec3)> = graph
        .iter()
        .filter(|(index, _)| *index != current && !history.contains(*index))
        .collect();

    if let Some(origin) = graph.get(current) {
        let nearby: Vec<usize> = eligible
            .iter()
            .filter(|(_, position)| origin.distance(*position) <= proximity_bias_range)
            .map(|(index, _)| *index)
            .collect();

        if let Some(&index) = nearby.choose(&mut *rng) {
            return index;
        }
    }

    let everything: Vec<usize> = eligible.iter().map(|(index, _)| *index).collect();
    everything.choose(rng).copied().unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn line_graph() -> PatrolGraph {
        PatrolGraph::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn test_proximity_bias_picks_only_node_in_range() {
        let graph = line_graph();
        let history = RecentHistory::default();

        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(next_waypoint(0, &history, &graph, 10.0, &mut rng), 1);
        }
    }

    #[test]
    fn test_falls_back_to_whole_graph_when_neighbours_visited() {
        let graph = line_graph();
        let mut history = RecentHistory::default();
        history.push(0);
        history.push(1);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // Из N1 в радиусе только N0 (в истории) → fallback на N2
        assert_eq!(next_waypoint(1, &history, &graph, 10.0, &mut rng), 2);
    }

    #[test]
    fn test_history_covering_graph_stands_in_place() {
        let graph = line_graph();
        let mut history = RecentHistory::default();
        for index in 0..3 {
            history.push(index);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(next_waypoint(2, &history, &graph, 10.0, &mut rng), 2);
    }

    #[test]
    fn test_single_node_graph_returns_current() {
        let graph = PatrolGraph::new(vec![Vec3::ZERO]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(next_waypoint(0, &RecentHistory::default(), &graph, 10.0, &mut rng), 0);
    }

    #[test]
    fn test_uniform_among_nearby_candidates() {
        let graph = PatrolGraph::new(vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(50.0, 0.0, 0.0),
        ]);
        let history = RecentHistory::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut counts = [0usize; 5];
        for _ in 0..900 {
            counts[next_waypoint(0, &history, &graph, 10.0, &mut rng)] += 1;
        }

        assert_eq!(counts[0], 0);
        assert_eq!(counts[4], 0);
        for &count in &counts[1..4] {
            assert!((200..=400).contains(&count), "skewed distribution: {:?}", counts);
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let graph = PatrolGraph::new((0..8).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect());
        let history = RecentHistory::default();

        let picks = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..16)
                .map(|_| next_waypoint(3, &history, &graph, 10.0, &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(99), picks(99));
    }
}
