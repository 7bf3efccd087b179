//! Spawn helpers: агент, цель, препятствия, маршрут
//!
//! Каждое тело несёт и headless данные (ObstacleShape / ContactTag),
//! и rapier коллайдер: так один и тот же мир работает и без физического
//! движка, и с RapierPhysicsPlugin + RapierContactBridgePlugin.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::contacts::ContactState;
use crate::ai::{AgentConfig, AgentDiagnostics, AgentMode, ChaseMemory, ConfigError, PatrolProgress, RecentHistory};
use crate::components::{ChaseTarget, ContactTag, PatrolAgent, PatrolRoute};
use crate::geometry::{
    ObstacleShape, COLLISION_LAYER_ACTORS, COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_TARGET, COLLISION_MASK_ACTORS,
};

/// Collision groups: membership + filter из наших layer констант
pub fn collision_groups(memberships: u32, filters: u32) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(memberships), Group::from_bits_truncate(filters))
}

/// Spawn patrol агента
///
/// Создает entity с полным набором компонентов:
/// - Transform (spawn позиция; при spawn_at_random_waypoint будет перенесён на waypoint)
/// - AI: AgentConfig, AgentMode, ChaseMemory, PatrolProgress, RecentHistory
/// - ChaseTarget (кого преследуем, может быть None)
/// - Rapier: kinematic capsule + collision events
///
/// Невалидный конфиг не спавнится.
pub fn spawn_patrol_agent(
    commands: &mut Commands,
    position: Vec3,
    config: AgentConfig,
    target: Option<Entity>,
) -> Result<Entity, ConfigError> {
    config.validate()?;
    let history = RecentHistory::new(config.history_limit);

    let entity = commands
        .spawn((
            (
                Transform::from_translation(position),
                PatrolAgent,
                config,
                ChaseTarget { entity: target },
                AgentMode::default(),
                ChaseMemory::default(),
                PatrolProgress::default(),
                history,
                AgentDiagnostics::default(),
                ContactState::default(),
            ),
            (
                RigidBody::KinematicPositionBased,
                Collider::capsule_y(0.5, 0.4), // Высота 1.0m (0.5 + 0.5), радиус 0.4m
                ActiveEvents::COLLISION_EVENTS,
                // Kinematic ↔ static/kinematic по умолчанию событий не даёт
                ActiveCollisionTypes::default()
                    | ActiveCollisionTypes::KINEMATIC_STATIC
                    | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
                collision_groups(COLLISION_LAYER_ACTORS, COLLISION_MASK_ACTORS),
            ),
        ))
        .id();

    Ok(entity)
}

/// Spawn цели (её Transform двигает внешний слой, агент только читает)
pub fn spawn_chase_target(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            ContactTag::Target,
            RigidBody::KinematicPositionBased,
            Collider::ball(0.4),
            collision_groups(COLLISION_LAYER_TARGET, COLLISION_LAYER_ACTORS | COLLISION_LAYER_ENVIRONMENT),
        ))
        .id()
}

/// Spawn статичного препятствия (видно и ObstacleField, и rapier)
pub fn spawn_obstacle(commands: &mut Commands, position: Vec3, shape: ObstacleShape) -> Entity {
    let collider = match shape {
        ObstacleShape::Sphere { radius } => Collider::ball(radius),
        ObstacleShape::Cuboid { half_extents } => {
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    };

    commands
        .spawn((
            Transform::from_translation(position),
            shape,
            ContactTag::Obstacle,
            RigidBody::Fixed,
            collider,
            collision_groups(COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_ACTORS | COLLISION_LAYER_TARGET),
        ))
        .id()
}

/// Spawn маршрута: родитель PatrolRoute + дочерние waypoint'ы (local позиции)
pub fn spawn_patrol_route(
    commands: &mut Commands,
    origin: Vec3,
    waypoints: impl IntoIterator<Item = Vec3>,
) -> Entity {
    let locals: Vec<Vec3> = waypoints.into_iter().collect();

    commands
        .spawn((Transform::from_translation(origin), PatrolRoute))
        .with_children(|route| {
            for local in locals {
                route.spawn(Transform::from_translation(local));
            }
        })
        .id()
}
