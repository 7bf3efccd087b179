//! AI decision-making module
//!
//! Patrol / chase агент:
//! - perception: конус зрения + line-of-sight
//! - memory: последняя известная позиция цели (ChaseMemory)
//! - selector: следующий waypoint (proximity bias + anti-repeat history)
//! - steering: damped поворот + движение с obstacle avoidance
//! - controller: тик агента, приоритет Chase > Investigate > Patrol

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod perception;
pub mod selector;
pub mod steering;
pub mod systems;


// Re-export основных типов
pub use components::*;
pub use controller::{adopt_waypoint, react_to_obstacle_contact, tick_agent, AgentState, TickReport};
pub use events::{AgentContact, TargetCaught};
pub use perception::{can_see, evaluate_visibility, PerceptionOutcome, ViewCone};
pub use selector::next_waypoint;
pub use steering::{ProbeOutcome, StepOutcome};
pub use systems::*;

use crate::geometry::{sync_obstacle_field, ObstacleField};
use crate::physics::{detect_proximity_contacts, headless_contacts_enabled};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. sync_obstacle_field - пересборка headless geometry
/// 2. build_patrol_graph - один раз, когда появились waypoint'ы
/// 3. initialize_patrol_agents - стартовый waypoint новых агентов
/// 4. patrol_agent_tick - perception / memory / selector / steering
/// 5. detect_proximity_contacts - headless contact signal (если нет rapier bridge)
/// 6. react_to_contacts - TargetCaught / obstacle reorientation
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AgentContact>()
            .add_event::<TargetCaught>()
            .init_resource::<ObstacleField>()
            .register_type::<AgentConfig>()
            .register_type::<AgentMode>()
            .register_type::<ChaseMemory>()
            .register_type::<PatrolProgress>()
            .add_systems(
                FixedUpdate,
                (
                    sync_obstacle_field,
                    systems::build_patrol_graph,
                    systems::initialize_patrol_agents,
                    systems::patrol_agent_tick,
                    detect_proximity_contacts.run_if(headless_contacts_enabled),
                    systems::react_to_contacts,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
