//! Chase memory - последняя известная позиция цели с таймаутом.

use bevy::prelude::*;

/// Память о цели: {Empty, Tracking}
///
/// - Empty → Tracking: цель увидели (`observe`), elapsed = 0
/// - Tracking: каждый тик без видимости elapsed += dt (`advance`)
/// - Tracking → Empty: elapsed ≥ duration, либо агент дошёл до позиции (`clear_if_reached`)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum ChaseMemory {
    #[default]
    Empty,
    Tracking {
        /// Последняя подтверждённая позиция цели
        position: Vec3,
        /// Секунд с последнего подтверждения
        elapsed: f32,
    },
}

impl ChaseMemory {
    /// Цель видна: запоминаем позицию, таймер держим в нуле
    pub fn observe(&mut self, position: Vec3) {
        *self = ChaseMemory::Tracking {
            position,
            elapsed: 0.0,
        };
    }

    /// Тик без видимости. Возвращает позицию, если память ещё не истекла.
    pub fn advance(&mut self, dt: f32, duration: f32) -> Option<Vec3> {
        let ChaseMemory::Tracking { position, elapsed } = self else {
            return None;
        };

        *elapsed += dt;
        if *elapsed >= duration {
            *self = ChaseMemory::Empty;
            return None;
        }

        Some(*position)
    }

    /// Очистить память если агент подошёл ближе `reach_threshold`
    pub fn clear_if_reached(&mut self, agent_position: Vec3, reach_threshold: f32) -> bool {
        match self.last_known() {
            Some(position) if agent_position.distance(position) < reach_threshold => {
                *self = ChaseMemory::Empty;
                true
            }
            _ => false,
        }
    }

    pub fn forget(&mut self) {
        *self = ChaseMemory::Empty;
    }

    pub fn last_known(&self) -> Option<Vec3> {
        match self {
            ChaseMemory::Empty => None,
            ChaseMemory::Tracking { position, .. } => Some(*position),
        }
    }

    pub fn elapsed(&self) -> Option<f32> {
        match self {
            ChaseMemory::Empty => None,
            ChaseMemory::Tracking { elapsed, .. } => Some(*elapsed),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, ChaseMemory::Tracking { .. })
    }
}
