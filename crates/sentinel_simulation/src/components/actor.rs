//! Actor компоненты: патрульный агент, цель, классификация контактов

use bevy::prelude::*;

/// Маркер: patrol/chase агент (единственный writer своего Transform)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PatrolAgent;

/// Target provider: кого агент преследует
///
/// `None` (или despawned entity) → цель считается невидимой, агент патрулирует.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ChaseTarget {
    pub entity: Option<Entity>,
}

impl ChaseTarget {
    pub fn new(entity: Entity) -> Self {
        Self { entity: Some(entity) }
    }
}

/// Классификация тела для contact signal
///
/// Вешается на цель и на препятствия. Тела без тега контакты не генерируют.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum ContactTag {
    /// Преследуемая цель → terminal outcome
    Target,
    /// Стена / препятствие → reactive reorientation
    Obstacle,
}
