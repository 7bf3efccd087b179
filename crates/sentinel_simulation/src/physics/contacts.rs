//! Contact signal: откуда берутся AgentContact события
//!
//! Два взаимоисключающих источника (выбор через `ContactSource`):
//! - Headless: `detect_proximity_contacts` - дистанция до цели + `ObstacleField::touching`
//! - Rapier: `bridge_rapier_contacts` - `CollisionEvent::Started` из bevy_rapier3d
//!
//! Оба эмитят контакт один раз на его начало.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use std::collections::HashSet;

use crate::ai::{react_to_contacts, AgentConfig, AgentContact};
use crate::components::{ContactTag, PatrolAgent};
use crate::geometry::{get_layer_name, ObstacleField, COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_TARGET};

/// Кто генерирует AgentContact
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactSource {
    /// Proximity detector по ObstacleField (без физического движка)
    #[default]
    Headless,
    /// CollisionEvent от rapier
    Rapier,
}

/// Run condition: headless detector активен
pub fn headless_contacts_enabled(source: Option<Res<ContactSource>>) -> bool {
    source.map_or(true, |source| *source == ContactSource::Headless)
}

/// Тела, которых агент касался на прошлом тике (headless detector)
#[derive(Component, Debug, Clone, Default)]
pub struct ContactState {
    pub touching: HashSet<Entity>,
}

/// Система: headless contact detection
///
/// - цель (ContactTag::Target): дистанция между позициями ≤ contact_radius
/// - препятствие (ContactTag::Obstacle): поверхность ObstacleShape ближе contact_radius
pub fn detect_proximity_contacts(
    mut agents: Query<(Entity, &Transform, &AgentConfig, &mut ContactState), With<PatrolAgent>>,
    tagged: Query<(Entity, &Transform, &ContactTag), Without<PatrolAgent>>,
    field: Res<ObstacleField>,
    mut contacts: EventWriter<AgentContact>,
) {
    for (agent, transform, config, mut state) in agents.iter_mut() {
        let position = transform.translation;
        let mut now_touching: Vec<(Entity, ContactTag, u32)> = Vec::new();

        for (other, other_transform, tag) in tagged.iter() {
            if *tag == ContactTag::Target && position.distance(other_transform.translation) <= config.contact_radius {
                now_touching.push((other, ContactTag::Target, COLLISION_LAYER_TARGET));
            }
        }

        for (obstacle, _) in field.touching(position, config.contact_radius) {
            let Some(obstacle) = obstacle else {
                continue;
            };
            if let Ok((_, _, ContactTag::Obstacle)) = tagged.get(obstacle) {
                now_touching.push((obstacle, ContactTag::Obstacle, COLLISION_LAYER_ENVIRONMENT));
            }
        }

        for (other, kind, layer) in &now_touching {
            if state.touching.contains(other) {
                continue;
            }
            crate::log(&format!(
                "Contact: {:?} touched {:?} ({})",
                agent,
                other,
                get_layer_name(*layer)
            ));
            contacts.write(AgentContact {
                agent,
                other: *other,
                kind: *kind,
            });
        }

        state.touching = now_touching.into_iter().map(|(other, _, _)| other).collect();
    }
}

/// Система: rapier CollisionEvent → AgentContact
///
/// Порядок entity в событии произвольный: агентом считается та, у кого PatrolAgent.
/// Тела без ContactTag игнорируются.
pub fn bridge_rapier_contacts(
    mut collisions: EventReader<CollisionEvent>,
    agents: Query<(), With<PatrolAgent>>,
    tags: Query<&ContactTag>,
    mut contacts: EventWriter<AgentContact>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(first, second, _) = collision else {
            continue;
        };

        let (agent, other) = if agents.contains(*first) {
            (*first, *second)
        } else if agents.contains(*second) {
            (*second, *first)
        } else {
            continue;
        };

        let Ok(kind) = tags.get(other) else {
            continue;
        };

        crate::log(&format!("Contact (rapier): {:?} touched {:?} ({:?})", agent, other, kind));
        contacts.write(AgentContact {
            agent,
            other,
            kind: *kind,
        });
    }
}

/// Plugin: контакты из rapier вместо headless detector'а
///
/// Сам RapierPhysicsPlugin не добавляет (это решает host приложение).
pub struct RapierContactBridgePlugin;

impl Plugin for RapierContactBridgePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ContactSource::Rapier)
            .add_event::<CollisionEvent>()
            .add_systems(FixedUpdate, bridge_rapier_contacts.before(react_to_contacts));
    }
}
