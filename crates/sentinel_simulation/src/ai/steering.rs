//! Locomotion / steering
//!
//! Один переиспользуемый примитив для Chase / Investigate / Patrol:
//! 1. forward probe луч (origin поднят на probe_height) по направлению движения
//! 2. свободно → сдвиг на direction * speed * dt
//! 3. заблокировано → позиция НЕ меняется; ищем ближайший видимый waypoint
//!    (deflect) или разворачиваемся на месте (avoidance_turn_degrees)
//!
//! Поворот - всегда damped slerp, никогда не мгновенный snap
//! (кроме fallback разворота на месте).

use bevy::prelude::*;

use crate::ai::perception::evaluate_visibility;
use crate::ai::AgentConfig;
use crate::components::PatrolGraph;
use crate::geometry::{GeometryQuery, ObstructionFilter};

/// Результат forward probe (для diagnostics)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProbeOutcome {
    #[default]
    NotProbed,
    Clear,
    Blocked {
        distance: f32,
    },
    /// Geometry запрос упал → считаем заблокированным
    Failed,
}

impl ProbeOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, ProbeOutcome::Blocked { .. } | ProbeOutcome::Failed)
    }
}

/// Что сделал steering на этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Сдвинулись (или стояли на месте при нулевом направлении)
    Moved,
    /// Путь перекрыт → новый текущий waypoint (caller пушит в историю)
    Deflected { waypoint: usize },
    /// Путь перекрыт, видимых waypoint'ов нет → разворот на месте
    Reversed,
}

/// Rotation, при которой forward() смотрит в `direction`
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let dir = Dir3::new(direction).ok()?;
    Some(Transform::IDENTITY.looking_to(dir, Dir3::Y).rotation)
}

/// Damped поворот к точке: slerp с фактором `rotation_speed * dt` (clamp в [0, 1])
pub fn turn_towards(transform: &mut Transform, target_position: Vec3, rotation_speed: f32, dt: f32) {
    let Some(target_rotation) = look_rotation(target_position - transform.translation) else {
        return;
    };
    let factor = (rotation_speed * dt).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(target_rotation, factor).normalize();
}

/// Поворот на месте по часовой стрелке (вид сверху), положительные градусы = вправо
pub fn yaw_clockwise(transform: &mut Transform, degrees: f32) {
    transform.rotate_local_y(-degrees.to_radians());
}

/// Forward probe: короткий луч по направлению движения от "тела" агента
pub fn probe_forward(
    transform: &Transform,
    move_direction: Vec3,
    config: &AgentConfig,
    geometry: &impl GeometryQuery,
) -> ProbeOutcome {
    let direction = move_direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return ProbeOutcome::NotProbed;
    }

    let origin = transform.translation + Vec3::Y * config.probe_height;
    match geometry.probe(
        origin,
        direction,
        config.obstacle_detection_distance,
        ObstructionFilter::default(),
    ) {
        Ok(None) => ProbeOutcome::Clear,
        Ok(Some(hit)) => ProbeOutcome::Blocked { distance: hit.distance },
        Err(err) => {
            crate::log_warning(&format!(
                "Steering: obstacle probe failed ({}), treating path as blocked",
                err
            ));
            ProbeOutcome::Failed
        }
    }
}

/// Ближайший waypoint: в радиусе зрения, в конусе текущего forward, без препятствий
pub fn nearest_visible_waypoint(
    transform: &Transform,
    config: &AgentConfig,
    graph: &PatrolGraph,
    geometry: &impl GeometryQuery,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, position) in graph.iter() {
        let Some(distance) = evaluate_visibility(transform, position, config, geometry).visible_distance() else {
            continue;
        };

        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }

    best.map(|(index, _)| index)
}

/// Step(agent, moveDirection, speed, dt) с obstacle avoidance
///
/// Deflected: агент уже начал поворот к новому waypoint'у, подхватывать
/// индекс (current + history) обязан вызывающий.
pub fn step_with_avoidance(
    transform: &mut Transform,
    move_direction: Vec3,
    speed: f32,
    dt: f32,
    config: &AgentConfig,
    graph: &PatrolGraph,
    geometry: &impl GeometryQuery,
) -> (StepOutcome, ProbeOutcome) {
    let probe = probe_forward(transform, move_direction, config, geometry);

    if !probe.is_blocked() {
        // NotProbed = нулевое направление, сдвиг тоже нулевой
        transform.translation += move_direction.normalize_or_zero() * speed * dt;
        return (StepOutcome::Moved, probe);
    }

    if let Some(waypoint) = nearest_visible_waypoint(transform, config, graph, geometry) {
        if let Some(position) = graph.get(waypoint) {
            turn_towards(transform, position, config.rotation_speed, dt);
        }
        return (StepOutcome::Deflected { waypoint }, probe);
    }

    yaw_clockwise(transform, config.avoidance_turn_degrees);
    (StepOutcome::Reversed, probe)
}
