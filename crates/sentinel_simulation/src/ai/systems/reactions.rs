//! AI reaction systems (contact signal → terminal outcome / reorientation).

use bevy::prelude::*;

use crate::ai::controller::react_to_obstacle_contact;
use crate::ai::{AgentConfig, AgentContact, PatrolProgress, RecentHistory, TargetCaught};
use crate::components::{ContactTag, PatrolAgent, PatrolGraph};
use crate::geometry::ObstacleField;

/// System: обработка AgentContact
///
/// - Target → TargetCaught (сессию завершает внешний слой)
/// - Obstacle → поворот на contact_turn_degrees + поиск видимого waypoint'а
pub fn react_to_contacts(
    mut contacts: EventReader<AgentContact>,
    mut caught: EventWriter<TargetCaught>,
    mut agents: Query<(&mut Transform, &AgentConfig, &mut PatrolProgress, &mut RecentHistory), With<PatrolAgent>>,
    graph: Option<Res<PatrolGraph>>,
    field: Res<ObstacleField>,
) {
    let empty_graph = PatrolGraph::default();
    let graph = graph.as_deref().unwrap_or(&empty_graph);

    for contact in contacts.read() {
        match contact.kind {
            ContactTag::Target => {
                caught.write(TargetCaught {
                    agent: contact.agent,
                    target: contact.other,
                });
                crate::log_info(&format!("🎯 {:?} caught target {:?}", contact.agent, contact.other));
            }
            ContactTag::Obstacle => {
                let Ok((mut transform, config, mut progress, mut history)) = agents.get_mut(contact.agent) else {
                    continue;
                };

                match react_to_obstacle_contact(
                    &mut transform,
                    &mut progress,
                    &mut history,
                    config,
                    graph,
                    &*field,
                ) {
                    Some(waypoint) => crate::log(&format!(
                        "AI: {:?} bumped into {:?} → waypoint {}",
                        contact.agent, contact.other, waypoint
                    )),
                    None => crate::log(&format!(
                        "AI: {:?} bumped into {:?} → turned, no visible waypoint",
                        contact.agent, contact.other
                    )),
                }
            }
        }
    }
}
