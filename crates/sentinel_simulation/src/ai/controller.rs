//! Agent controller - один тик патрульного агента
//!
//! Приоритет режимов (строго, пересчитывается каждый тик):
//! 1. Chase - цель видна → memory.observe, скорость chase_speed
//! 2. Investigate - память не истекла → идём к последней позиции
//! 3. Patrol - идём к текущему waypoint'у, по прибытии NodeSelector
//!
//! Всё движение идёт через `steering::step_with_avoidance`.
//! Контакты обрабатываются отдельно (`react_to_obstacle_contact`).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::perception::{evaluate_visibility, PerceptionOutcome};
use crate::ai::selector::next_waypoint;
use crate::ai::steering::{
    nearest_visible_waypoint, step_with_avoidance, turn_towards, yaw_clockwise, ProbeOutcome, StepOutcome,
};
use crate::ai::{AgentConfig, AgentMode, ChaseMemory, PatrolProgress, RecentHistory};
use crate::components::PatrolGraph;
use crate::geometry::GeometryQuery;

/// Изменяемое состояние одного агента (заимствовано из ECS query или собрано в тесте)
pub struct AgentState<'a> {
    pub transform: &'a mut Transform,
    pub mode: &'a mut AgentMode,
    pub memory: &'a mut ChaseMemory,
    pub progress: &'a mut PatrolProgress,
    pub history: &'a mut RecentHistory,
}

/// Что произошло за тик (логирование переходов + diagnostics)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub previous_mode: AgentMode,
    pub mode: AgentMode,
    pub perception: PerceptionOutcome,
    pub probe: ProbeOutcome,
    /// `None` - двигаться было некуда (пустой граф)
    pub step: Option<StepOutcome>,
    /// Новый waypoint, выбранный по прибытии
    pub arrived: Option<usize>,
}

impl TickReport {
    pub fn mode_changed(&self) -> bool {
        self.previous_mode.differs_in_kind(&self.mode)
    }
}

/// Tick(dt)
///
/// `target` - (entity, позиция) цели, если она существует.
pub fn tick_agent<R: Rng + ?Sized>(
    state: &mut AgentState,
    config: &AgentConfig,
    target: Option<(Entity, Vec3)>,
    graph: &PatrolGraph,
    geometry: &impl GeometryQuery,
    rng: &mut R,
    dt: f32,
) -> TickReport {
    let previous_mode = *state.mode;

    let perception = match target {
        Some((_, position)) => evaluate_visibility(state.transform, position, config, geometry),
        None => PerceptionOutcome::NoTarget,
    };

    // 1. Chase
    if let Some((entity, position)) = target.filter(|_| perception.is_visible()) {
        state.memory.observe(position);
        *state.mode = AgentMode::Chase { target: entity };

        let (step, probe) = move_towards(state, position, config.chase_speed(), config, graph, geometry, dt);
        return TickReport {
            previous_mode,
            mode: *state.mode,
            perception,
            probe,
            step: Some(step),
            arrived: None,
        };
    }

    // 2. Investigate
    if let Some(position) = state.memory.advance(dt, config.chase_memory_duration) {
        *state.mode = AgentMode::Investigate { position };

        let (step, probe) = move_towards(state, position, config.move_speed, config, graph, geometry, dt);
        state.memory.clear_if_reached(state.transform.translation, config.reach_threshold);
        return TickReport {
            previous_mode,
            mode: *state.mode,
            perception,
            probe,
            step: Some(step),
            arrived: None,
        };
    }

    // 3. Patrol
    *state.mode = AgentMode::Patrol;
    let mut report = TickReport {
        previous_mode,
        mode: AgentMode::Patrol,
        perception,
        probe: ProbeOutcome::NotProbed,
        step: None,
        arrived: None,
    };

    let Some(current) = current_or_nearest(state, graph) else {
        // Пустой граф → patrol no-op
        return report;
    };
    let Some(node) = graph.get(current) else {
        return report;
    };

    let (step, probe) = move_towards(state, node, config.move_speed, config, graph, geometry, dt);
    report.step = Some(step);
    report.probe = probe;

    // Прибытие проверяем к узлу, на который шли в этом тике
    if state.transform.translation.distance(node) < config.reach_threshold {
        let from = state.progress.current.unwrap_or(current);
        let next = next_waypoint(from, state.history, graph, config.proximity_bias_range, rng);
        adopt_waypoint(state.progress, state.history, next);
        report.arrived = Some(next);
    }

    report
}

/// OnContact(obstacle): поворот на contact_turn_degrees, затем поиск видимого waypoint'а.
///
/// Fallback разворота нет: поворот уже сделан.
pub fn react_to_obstacle_contact(
    transform: &mut Transform,
    progress: &mut PatrolProgress,
    history: &mut RecentHistory,
    config: &AgentConfig,
    graph: &PatrolGraph,
    geometry: &impl GeometryQuery,
) -> Option<usize> {
    yaw_clockwise(transform, config.contact_turn_degrees);

    let waypoint = nearest_visible_waypoint(transform, config, graph, geometry)?;
    adopt_waypoint(progress, history, waypoint);
    Some(waypoint)
}

/// Новый текущий waypoint всегда попадает в историю
pub fn adopt_waypoint(progress: &mut PatrolProgress, history: &mut RecentHistory, index: usize) {
    progress.current = Some(index);
    history.push(index);
}

fn move_towards(
    state: &mut AgentState,
    destination: Vec3,
    speed: f32,
    config: &AgentConfig,
    graph: &PatrolGraph,
    geometry: &impl GeometryQuery,
    dt: f32,
) -> (StepOutcome, ProbeOutcome) {
    turn_towards(state.transform, destination, config.rotation_speed, dt);

    let direction = destination - state.transform.translation;
    let (step, probe) = step_with_avoidance(state.transform, direction, speed, dt, config, graph, geometry);

    if let StepOutcome::Deflected { waypoint } = step {
        adopt_waypoint(state.progress, state.history, waypoint);
    }

    (step, probe)
}

/// Агент без waypoint'а (граф появился позже спавна) → ближайший узел
fn current_or_nearest(state: &mut AgentState, graph: &PatrolGraph) -> Option<usize> {
    match state.progress.current {
        Some(index) if index < graph.len() => Some(index),
        _ => {
            let nearest = graph.nearest(state.transform.translation)?;
            adopt_waypoint(state.progress, state.history, nearest);
            Some(nearest)
        }
    }
}
