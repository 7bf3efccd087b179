//! Инициализация: сборка PatrolGraph и стартовый waypoint агентов.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::controller::adopt_waypoint;
use crate::ai::{AgentConfig, PatrolProgress, RecentHistory};
use crate::components::{PatrolAgent, PatrolGraph, PatrolRoute, PatrolWaypoint};
use crate::DeterministicRng;

/// Система: собрать PatrolGraph (один раз)
///
/// Источники по приоритету:
/// 1. PatrolRoute: дочерние Transform'ы в порядке Children
/// 2. отдельные PatrolWaypoint, отсортированные по `order`
///
/// Если resource уже вставлен (вручную или ранее) - ничего не делаем:
/// граф неизменен после инициализации.
pub fn build_patrol_graph(
    mut commands: Commands,
    existing: Option<Res<PatrolGraph>>,
    routes: Query<(&Transform, &Children), With<PatrolRoute>>,
    route_nodes: Query<&Transform, Without<PatrolRoute>>,
    waypoints: Query<(&PatrolWaypoint, &Transform)>,
) {
    if existing.is_some() {
        return;
    }

    if let Some((route_transform, children)) = routes.iter().next() {
        let child_entities: &[Entity] = children;
        let locals = child_entities
            .iter()
            .filter_map(|child| route_nodes.get(*child).ok())
            .map(|transform| transform.translation);

        let graph = PatrolGraph::from_child_positions(route_transform, locals);
        crate::log(&format!("PatrolGraph: built {} nodes from PatrolRoute", graph.len()));
        commands.insert_resource(graph);
        return;
    }

    let mut ordered: Vec<(PatrolWaypoint, Vec3)> = waypoints
        .iter()
        .map(|(waypoint, transform)| (*waypoint, transform.translation))
        .collect();
    if ordered.is_empty() {
        return;
    }
    ordered.sort_by_key(|(waypoint, _)| *waypoint);

    let graph = PatrolGraph::new(ordered.into_iter().map(|(_, position)| position).collect());
    crate::log(&format!("PatrolGraph: built {} nodes from PatrolWaypoint markers", graph.len()));
    commands.insert_resource(graph);
}

/// Система: стартовый waypoint для новых агентов
///
/// `spawn_at_random_waypoint` → случайный узел + телепорт на него,
/// иначе ближайший к позиции спавна. В обоих случаях узел попадает в историю.
pub fn initialize_patrol_agents(
    mut agents: Query<
        (Entity, &mut Transform, &AgentConfig, &mut PatrolProgress, &mut RecentHistory),
        With<PatrolAgent>,
    >,
    graph: Option<Res<PatrolGraph>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let Some(graph) = graph else {
        return;
    };
    if graph.is_empty() {
        return;
    }

    for (entity, mut transform, config, mut progress, mut history) in agents.iter_mut() {
        if progress.current.is_some() {
            continue;
        }

        let index = if config.spawn_at_random_waypoint {
            let index = rng.rng.gen_range(0..graph.len());
            if let Some(position) = graph.get(index) {
                transform.translation = position;
            }
            index
        } else {
            let Some(index) = graph.nearest(transform.translation) else {
                continue;
            };
            index
        };

        adopt_waypoint(&mut progress, &mut history, index);
        crate::log(&format!(
            "AI: {:?} starts patrol at waypoint {} ({:?})",
            entity, index, transform.translation
        ));
    }
}
