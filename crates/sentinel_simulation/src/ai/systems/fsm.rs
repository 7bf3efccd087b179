//! Patrol agent tick system (Chase > Investigate > Patrol).

use bevy::prelude::*;

use crate::ai::controller::{tick_agent, AgentState};
use crate::ai::perception::ViewCone;
use crate::ai::steering::StepOutcome;
use crate::ai::{AgentConfig, AgentDiagnostics, AgentMode, ChaseMemory, PatrolProgress, RecentHistory};
use crate::components::{ChaseTarget, PatrolAgent, PatrolGraph};
use crate::geometry::ObstacleField;
use crate::DeterministicRng;

/// Система: один controller тик на каждого агента
///
/// Агент - единственный writer своего Transform. Цель только читается
/// (despawned цель = невидима). Нет PatrolGraph → patrol no-op.
pub fn patrol_agent_tick(
    mut agents: Query<
        (
            Entity,
            &mut Transform,
            &AgentConfig,
            &ChaseTarget,
            &mut AgentMode,
            &mut ChaseMemory,
            &mut PatrolProgress,
            &mut RecentHistory,
            Option<&mut AgentDiagnostics>,
        ),
        With<PatrolAgent>,
    >,
    targets: Query<&Transform, Without<PatrolAgent>>,
    graph: Option<Res<PatrolGraph>>,
    field: Res<ObstacleField>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    let empty_graph = PatrolGraph::default();
    let graph = graph.as_deref().unwrap_or(&empty_graph);

    for (entity, mut transform, config, chase_target, mut mode, mut memory, mut progress, mut history, diagnostics) in
        agents.iter_mut()
    {
        let target = chase_target
            .entity
            .and_then(|target| targets.get(target).ok().map(|t| (target, t.translation)));

        let mut state = AgentState {
            transform: &mut transform,
            mode: &mut mode,
            memory: &mut memory,
            progress: &mut progress,
            history: &mut history,
        };
        let report = tick_agent(&mut state, config, target, graph, &*field, &mut rng.rng, dt);

        if report.mode_changed() {
            crate::log(&format!(
                "AI: {:?} {} → {}",
                entity,
                report.previous_mode.label(),
                report.mode.label()
            ));
        }

        match report.step {
            Some(StepOutcome::Deflected { waypoint }) => {
                crate::log(&format!("AI: {:?} path blocked → deflect to waypoint {}", entity, waypoint));
            }
            Some(StepOutcome::Reversed) => {
                crate::log(&format!("AI: {:?} path blocked, no visible waypoint → turning around", entity));
            }
            _ => {}
        }

        if let Some(next) = report.arrived {
            crate::log(&format!("AI: {:?} reached waypoint → next {}", entity, next));
        }

        if let Some(mut diagnostics) = diagnostics {
            diagnostics.view_cone = ViewCone::from_pose(&transform, config);
            diagnostics.perception = report.perception;
            diagnostics.probe = report.probe;
            diagnostics.last_step = report.step;
            diagnostics.ticks += 1;
        }
    }
}
