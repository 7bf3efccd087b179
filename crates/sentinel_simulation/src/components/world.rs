//! World компоненты: patrol graph (waypoint arena) и маркеры маршрута

use bevy::prelude::*;

/// Patrol graph - плоский массив позиций waypoint'ов
///
/// Waypoint идентифицируется только индексом. После инициализации не меняется:
/// индексы стабильны всё время жизни агента. Пустой граф → patrol no-op.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PatrolGraph {
    nodes: Vec<Vec3>,
}

impl PatrolGraph {
    pub fn new(nodes: Vec<Vec3>) -> Self {
        Self { nodes }
    }

    /// Собрать граф из дочерних позиций маршрута (local → world через parent Transform)
    pub fn from_child_positions(
        parent: &Transform,
        children: impl IntoIterator<Item = Vec3>,
    ) -> Self {
        Self {
            nodes: children
                .into_iter()
                .map(|local| parent.transform_point(local))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.nodes.get(index).copied()
    }

    pub fn nodes(&self) -> &[Vec3] {
        &self.nodes
    }

    /// (index, position) всех waypoint'ов
    pub fn iter(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        self.nodes.iter().copied().enumerate()
    }

    /// Индекс ближайшего waypoint'а к точке
    pub fn nearest(&self, position: Vec3) -> Option<usize> {
        self.iter()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(position).total_cmp(&b.distance_squared(position))
            })
            .map(|(index, _)| index)
    }
}

/// Маркер: родитель patrol маршрута, дети (Transform) = waypoint'ы по порядку
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PatrolRoute;

/// Отдельный waypoint без иерархии (order задаёт индекс в графе)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PatrolWaypoint {
    pub order: u32,
}
