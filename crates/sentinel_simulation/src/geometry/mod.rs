//! Geometry query service - raycast'ы против препятствий мира
//!
//! AI core знает только `GeometryQuery::probe` (hit / no hit).
//! Реализации:
//! - `ObstacleField` - headless (spheres + AABB через `bevy::math::bounding`)
//! - любой engine backend, реализующий тот же trait
//!
//! Ошибка запроса НЕ означает "путь свободен": все вызывающие стороны
//! трактуют `Err` как препятствие (fail-closed).

use bevy::prelude::*;
use thiserror::Error;

pub mod layers;
pub mod obstacle_field;

pub use layers::*;
pub use obstacle_field::{sync_obstacle_field, ObstacleField, ObstacleShape};

/// Результат попадания луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Дистанция от origin до точки попадания (метры)
    pub distance: f32,
    /// Точка попадания (world coordinates)
    pub point: Vec3,
    /// Entity препятствия (если backend его знает)
    pub entity: Option<Entity>,
}

/// Фильтр: какие collision layers считаются препятствием
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstructionFilter {
    pub mask: u32,
}

impl ObstructionFilter {
    pub const fn new(mask: u32) -> Self {
        Self { mask }
    }

    pub fn matches(&self, layer_bits: u32) -> bool {
        self.mask & layer_bits != 0
    }
}

impl Default for ObstructionFilter {
    fn default() -> Self {
        Self::new(COLLISION_MASK_OBSTRUCTION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("ray direction is degenerate: {0:?}")]
    DegenerateDirection(Vec3),
    #[error("max distance must be finite and non-negative, got {0}")]
    InvalidDistance(f32),
    #[error("geometry backend unavailable")]
    Unavailable,
}

/// Raycast сервис (external collaborator)
pub trait GeometryQuery {
    /// Ближайшее попадание луча `origin + direction * t`, `t ∈ [0, max_distance]`.
    ///
    /// `direction` не обязан быть нормализован.
    fn probe(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: ObstructionFilter,
    ) -> Result<Option<RaycastHit>, GeometryError>;
}

impl<T: GeometryQuery + ?Sized> GeometryQuery for &T {
    fn probe(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: ObstructionFilter,
    ) -> Result<Option<RaycastHit>, GeometryError> {
        (**self).probe(origin, direction, max_distance, filter)
    }
}

/// Проверка прямой видимости между двумя точками (fail-closed).
///
/// Returns:
/// - `Ok(true)` - луч свободен
/// - `Ok(false)` - есть препятствие
/// - `Err` - запрос упал, вызывающий обязан считать путь перекрытым
pub fn line_of_sight(
    geometry: &impl GeometryQuery,
    from: Vec3,
    to: Vec3,
    filter: ObstructionFilter,
) -> Result<bool, GeometryError> {
    let delta = to - from;
    let distance = delta.length();

    // Совпадающие точки - лучу нечего пересекать
    if distance <= f32::EPSILON {
        return Ok(true);
    }

    geometry
        .probe(from, delta, distance, filter)
        .map(|hit| hit.is_none())
}
