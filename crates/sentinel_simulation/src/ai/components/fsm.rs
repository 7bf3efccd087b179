//! FSM AI components (mode, config).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Режим агента на текущем тике
///
/// Приоритет (строго): Chase > Investigate > Patrol.
/// Пересчитывается каждый тик в `tick_agent`, здесь хранится для
/// логирования переходов и debug overlay.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AgentMode {
    /// Patrol - обход waypoint'ов графа
    Patrol,

    /// Chase - цель видна прямо сейчас
    Chase {
        target: Entity,
    },

    /// Investigate - цель потеряна, идём к последней известной позиции
    Investigate {
        position: Vec3,
    },
}

impl Default for AgentMode {
    fn default() -> Self {
        Self::Patrol
    }
}

impl AgentMode {
    pub fn label(&self) -> &'static str {
        match self {
            AgentMode::Patrol => "Patrol",
            AgentMode::Chase { .. } => "Chase",
            AgentMode::Investigate { .. } => "Investigate",
        }
    }

    /// Смена режима (вариант), а не параметров внутри режима
    pub fn differs_in_kind(&self, other: &AgentMode) -> bool {
        std::mem::discriminant(self) != std::mem::discriminant(other)
    }
}

/// Ёмкость RecentHistory по умолчанию
pub const DEFAULT_HISTORY_LIMIT: usize = 4;

/// Верхняя граница history_limit (история сканируется линейно каждый выбор)
pub const MAX_HISTORY_LIMIT: usize = 1024;

/// Параметры агента
///
/// Углы в градусах, дистанции в метрах, скорости в m/s (rotation - slerp factor/sec).
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AgentConfig {
    /// Базовая скорость (patrol / investigate)
    pub move_speed: f32,
    /// Множитель скорости при Chase
    pub chase_speed_multiplier: f32,
    /// Скорость поворота (slerp factor = rotation_speed * dt)
    pub rotation_speed: f32,
    /// Дистанция "дошли до точки"
    pub reach_threshold: f32,
    /// Радиус предпочтительного выбора соседних waypoint'ов
    pub proximity_bias_range: f32,
    /// Дальность зрения
    pub view_distance: f32,
    /// Полный угол конуса зрения
    pub field_of_view: f32,
    /// Длина forward probe луча
    pub obstacle_detection_distance: f32,
    /// Сила уклонения из исходного тюнинга, steering её пока не читает
    pub avoid_strength: f32,
    /// Высота origin'а probe луча над позицией агента
    pub probe_height: f32,
    /// Сколько секунд помним последнюю позицию цели
    pub chase_memory_duration: f32,
    /// Ёмкость anti-repeat истории
    pub history_limit: usize,
    /// Разворот на месте, если probe заблокирован и нет видимых waypoint'ов
    pub avoidance_turn_degrees: f32,
    /// Поворот при контакте с препятствием (перед поиском waypoint'а)
    pub contact_turn_degrees: f32,
    /// Радиус тела агента для headless contact detection
    pub contact_radius: f32,
    /// При инициализации телепортироваться в случайный waypoint
    pub spawn_at_random_waypoint: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            chase_speed_multiplier: 1.5,
            rotation_speed: 5.0,
            reach_threshold: 0.1,
            proximity_bias_range: 10.0,
            view_distance: 10.0,
            field_of_view: 90.0,
            obstacle_detection_distance: 2.0,
            avoid_strength: 3.0,
            probe_height: 0.5,
            chase_memory_duration: 5.0,
            history_limit: DEFAULT_HISTORY_LIMIT,
            avoidance_turn_degrees: 180.0,
            contact_turn_degrees: 90.0,
            contact_radius: 0.6,
            spawn_at_random_waypoint: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("field_of_view must be in (0, 360] degrees, got {0}")]
    FieldOfView(f32),
    #[error("history_limit must be at least 1")]
    EmptyHistory,
    #[error("history_limit must be at most {max}, got {value}")]
    HistoryTooLarge { value: usize, max: usize },
}

impl AgentConfig {
    pub fn half_fov(&self) -> f32 {
        self.field_of_view * 0.5
    }

    pub fn chase_speed(&self) -> f32 {
        self.move_speed * self.chase_speed_multiplier
    }

    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    pub fn with_view(mut self, distance: f32, field_of_view: f32) -> Self {
        self.view_distance = distance;
        self.field_of_view = field_of_view;
        self
    }

    pub fn with_reach_threshold(mut self, threshold: f32) -> Self {
        self.reach_threshold = threshold;
        self
    }

    pub fn with_proximity_bias_range(mut self, range: f32) -> Self {
        self.proximity_bias_range = range;
        self
    }

    pub fn with_chase_memory(mut self, seconds: f32) -> Self {
        self.chase_memory_duration = seconds;
        self
    }

    pub fn with_obstacle_detection(mut self, distance: f32) -> Self {
        self.obstacle_detection_distance = distance;
        self
    }

    pub fn with_spawn_at_random_waypoint(mut self, enabled: bool) -> Self {
        self.spawn_at_random_waypoint = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("chase_speed_multiplier", self.chase_speed_multiplier),
            ("rotation_speed", self.rotation_speed),
            ("reach_threshold", self.reach_threshold),
            ("view_distance", self.view_distance),
            ("obstacle_detection_distance", self.obstacle_detection_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("proximity_bias_range", self.proximity_bias_range),
            ("avoid_strength", self.avoid_strength),
            ("probe_height", self.probe_height),
            ("chase_memory_duration", self.chase_memory_duration),
            ("contact_radius", self.contact_radius),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !(self.field_of_view > 0.0 && self.field_of_view <= 360.0) {
            return Err(ConfigError::FieldOfView(self.field_of_view));
        }

        if self.history_limit == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        if self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::HistoryTooLarge {
                value: self.history_limit,
                max: MAX_HISTORY_LIMIT,
            });
        }

        Ok(())
    }
}
