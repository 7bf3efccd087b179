//! ObstacleField - headless реализация GeometryQuery
//!
//! Хранит препятствия как простые объёмы (sphere / axis-aligned box).
//! Пересобирается каждый тик из entities с `ObstacleShape` (sync_obstacle_field).
//! Ray tests - через `bevy::math::bounding::RayCast3d`.

use bevy::math::bounding::{Aabb3d, BoundingSphere, RayCast3d};
use bevy::math::Ray3d;
use bevy::prelude::*;

use super::{GeometryError, GeometryQuery, ObstructionFilter, RaycastHit, COLLISION_LAYER_ENVIRONMENT};

/// Форма препятствия (component на entity со Transform)
///
/// Rotation у Transform игнорируется: box всегда axis-aligned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum ObstacleShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Volume {
    Sphere { center: Vec3, radius: f32 },
    Cuboid { center: Vec3, half_extents: Vec3 },
}

impl Volume {
    fn ray_distance(&self, ray: &RayCast3d) -> Option<f32> {
        match *self {
            Volume::Sphere { center, radius } => {
                ray.sphere_intersection_at(&BoundingSphere::new(center, radius))
            }
            Volume::Cuboid { center, half_extents } => {
                ray.aabb_intersection_at(&Aabb3d::new(center, half_extents))
            }
        }
    }

    /// Дистанция от точки до поверхности (0 если точка внутри)
    fn distance_to(&self, point: Vec3) -> f32 {
        match *self {
            Volume::Sphere { center, radius } => (point.distance(center) - radius).max(0.0),
            Volume::Cuboid { center, half_extents } => {
                let clamped = point.clamp(center - half_extents, center + half_extents);
                point.distance(clamped)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ObstacleEntry {
    entity: Option<Entity>,
    volume: Volume,
    layers: u32,
}

/// Resource: все препятствия мира (headless geometry backend)
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleField {
    entries: Vec<ObstacleEntry>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sphere(mut self, center: Vec3, radius: f32) -> Self {
        self.insert_sphere(None, center, radius, COLLISION_LAYER_ENVIRONMENT);
        self
    }

    pub fn with_cuboid(mut self, center: Vec3, half_extents: Vec3) -> Self {
        self.insert_cuboid(None, center, half_extents, COLLISION_LAYER_ENVIRONMENT);
        self
    }

    pub fn insert_sphere(&mut self, entity: Option<Entity>, center: Vec3, radius: f32, layers: u32) {
        self.entries.push(ObstacleEntry {
            entity,
            volume: Volume::Sphere { center, radius },
            layers,
        });
    }

    pub fn insert_cuboid(&mut self, entity: Option<Entity>, center: Vec3, half_extents: Vec3, layers: u32) {
        self.entries.push(ObstacleEntry {
            entity,
            volume: Volume::Cuboid { center, half_extents },
            layers,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Препятствия (entity, дистанция до поверхности) в радиусе `radius` от точки.
    ///
    /// Используется headless contact detector'ом вместо физических коллайдеров.
    pub fn touching(&self, point: Vec3, radius: f32) -> impl Iterator<Item = (Option<Entity>, f32)> + '_ {
        self.entries.iter().filter_map(move |entry| {
            let distance = entry.volume.distance_to(point);
            (distance <= radius).then_some((entry.entity, distance))
        })
    }
}

impl GeometryQuery for ObstacleField {
    fn probe(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: ObstructionFilter,
    ) -> Result<Option<RaycastHit>, GeometryError> {
        if !max_distance.is_finite() || max_distance < 0.0 {
            return Err(GeometryError::InvalidDistance(max_distance));
        }
        let Ok(dir) = Dir3::new(direction) else {
            return Err(GeometryError::DegenerateDirection(direction));
        };

        let ray = RayCast3d::from_ray(Ray3d { origin, direction: dir }, max_distance);

        let nearest = self
            .entries
            .iter()
            .filter(|entry| filter.matches(entry.layers))
            .filter_map(|entry| entry.volume.ray_distance(&ray).map(|d| (entry, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        Ok(nearest.map(|(entry, distance)| RaycastHit {
            distance,
            point: origin + *dir * distance,
            entity: entry.entity,
        }))
    }
}

/// Система: пересборка ObstacleField из `ObstacleShape` entities
///
/// Дёшево для десятков препятствий; выполняется первой в FixedUpdate цепочке.
pub fn sync_obstacle_field(
    mut field: ResMut<ObstacleField>,
    obstacles: Query<(Entity, &Transform, &ObstacleShape)>,
) {
    field.clear();

    for (entity, transform, shape) in obstacles.iter() {
        match *shape {
            ObstacleShape::Sphere { radius } => {
                field.insert_sphere(Some(entity), transform.translation, radius, COLLISION_LAYER_ENVIRONMENT);
            }
            ObstacleShape::Cuboid { half_extents } => {
                field.insert_cuboid(Some(entity), transform.translation, half_extents, COLLISION_LAYER_ENVIRONMENT);
            }
        }
    }
}
