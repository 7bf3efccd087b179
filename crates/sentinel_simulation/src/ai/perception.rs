//! Perception - видит ли агент точку (цель или waypoint)
//!
//! Видимость = дистанция ≤ view_distance
//!           И угол от forward ≤ field_of_view / 2
//!           И луч до точки не перекрыт препятствием.
//!
//! Луч идёт из позиции агента (без eye offset). Ошибка geometry запроса
//! трактуется как перекрытие (fail-closed) - ложной прямой видимости не бывает.

use bevy::prelude::*;

use crate::ai::AgentConfig;
use crate::geometry::{line_of_sight, GeometryQuery, ObstructionFilter};

/// Допуск на границе конуса (градусы): acos() на ребре даёт шум в последних битах
pub const FOV_EDGE_TOLERANCE_DEGREES: f32 = 1e-3;

/// Результат проверки видимости (для diagnostics)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PerceptionOutcome {
    /// Цель не задана / despawned
    #[default]
    NoTarget,
    OutOfRange {
        distance: f32,
    },
    OutsideCone {
        angle: f32,
    },
    Occluded {
        distance: f32,
    },
    /// Geometry запрос упал → считаем перекрытым
    QueryFailed,
    Visible {
        distance: f32,
    },
}

impl PerceptionOutcome {
    pub fn is_visible(&self) -> bool {
        matches!(self, PerceptionOutcome::Visible { .. })
    }

    pub fn visible_distance(&self) -> Option<f32> {
        match self {
            PerceptionOutcome::Visible { distance } => Some(*distance),
            _ => None,
        }
    }
}

/// Угол между векторами в градусах (0 для вырожденных векторов)
pub fn angle_degrees(from: Vec3, to: Vec3) -> f32 {
    let denominator = (from.length_squared() * to.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    let cos = (from.dot(to) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Полная проверка видимости точки из позы агента
pub fn evaluate_visibility(
    transform: &Transform,
    point: Vec3,
    config: &AgentConfig,
    geometry: &impl GeometryQuery,
) -> PerceptionOutcome {
    let origin = transform.translation;
    let to_point = point - origin;
    let distance = to_point.length();

    if distance > config.view_distance {
        return PerceptionOutcome::OutOfRange { distance };
    }

    let angle = angle_degrees(*transform.forward(), to_point);
    if angle > config.half_fov() + FOV_EDGE_TOLERANCE_DEGREES {
        return PerceptionOutcome::OutsideCone { angle };
    }

    match line_of_sight(geometry, origin, point, ObstructionFilter::default()) {
        Ok(true) => PerceptionOutcome::Visible { distance },
        Ok(false) => PerceptionOutcome::Occluded { distance },
        Err(err) => {
            crate::log_warning(&format!(
                "Perception: LOS query failed ({}), treating {:?} as occluded",
                err, point
            ));
            PerceptionOutcome::QueryFailed
        }
    }
}

/// CanSee(agentPose, target)
pub fn can_see(
    transform: &Transform,
    target: Vec3,
    config: &AgentConfig,
    geometry: &impl GeometryQuery,
) -> bool {
    evaluate_visibility(transform, target, config, geometry).is_visible()
}

/// Конус зрения для debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewCone {
    pub origin: Vec3,
    pub forward: Vec3,
    pub view_distance: f32,
    pub half_angle_degrees: f32,
}

impl ViewCone {
    pub fn from_pose(transform: &Transform, config: &AgentConfig) -> Self {
        Self {
            origin: transform.translation,
            forward: *transform.forward(),
            view_distance: config.view_distance,
            half_angle_degrees: config.half_fov(),
        }
    }

    /// Левый и правый лучи по краю конуса (в горизонтальной плоскости)
    pub fn edge_rays(&self) -> (Vec3, Vec3) {
        let half = self.half_angle_degrees.to_radians();
        let reach = self.forward * self.view_distance;
        (
            Quat::from_rotation_y(half) * reach,
            Quat::from_rotation_y(-half) * reach,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryError, ObstacleField, RaycastHit};

    struct BrokenGeometry;

    impl GeometryQuery for BrokenGeometry {
        fn probe(
            &self,
            _origin: Vec3,
            _direction: Vec3,
            _max_distance: f32,
            _filter: ObstructionFilter,
        ) -> Result<Option<RaycastHit>, GeometryError> {
            Err(GeometryError::Unavailable)
        }
    }

    /// Точка на дистанции `distance` под углом `degrees` от forward (-Z) агента в origin
    fn point_at(distance: f32, degrees: f32) -> Vec3 {
        let rad = degrees.to_radians();
        Vec3::new(rad.sin() * distance, 0.0, -rad.cos() * distance)
    }

    #[test]
    fn test_visible_within_range_and_cone() {
        let agent = Transform::IDENTITY;
        let config = AgentConfig::default().with_view(10.0, 90.0);
        let target = point_at(5.0, 10.0);

        assert!(can_see(&agent, target, &config, &ObstacleField::new()));
    }

    #[test]
    fn test_obstruction_blocks_visibility() {
        let agent = Transform::IDENTITY;
        let config = AgentConfig::default().with_view(10.0, 90.0);
        let target = point_at(5.0, 10.0);
        // Сфера на луче: попадание на дистанции 3
        let field = ObstacleField::new().with_sphere(point_at(3.5, 10.0), 0.5);

        let outcome = evaluate_visibility(&agent, target, &config, &field);
        assert!(matches!(outcome, PerceptionOutcome::Occluded { .. }), "{:?}", outcome);
    }

    #[test]
    fn test_out_of_range_ignores_obstruction_state() {
        let agent = Transform::IDENTITY;
        let config = AgentConfig::default().with_view(10.0, 90.0);
        let target = point_at(10.5, 0.0);

        assert!(!can_see(&agent, target, &config, &ObstacleField::new()));
        assert!(!can_see(&agent, target, &config, &BrokenGeometry));
        assert!(matches!(
            evaluate_visibility(&agent, target, &config, &BrokenGeometry),
            PerceptionOutcome::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_cone_edge_depends_only_on_occlusion() {
        let agent = Transform::IDENTITY;
        let config = AgentConfig::default().with_view(10.0, 90.0);
        let edge = point_at(5.0, 45.0);

        assert!(can_see(&agent, edge, &config, &ObstacleField::new()));
        // Допуск только на шум acos, 45.01° уже вне конуса
        let outcome = evaluate_visibility(&agent, point_at(5.0, 45.01), &config, &ObstacleField::new());
        assert!(matches!(outcome, PerceptionOutcome::OutsideCone { .. }), "{:?}", outcome);

        let blocked = ObstacleField::new().with_sphere(point_at(2.5, 45.0), 0.3);
        assert!(!can_see(&agent, edge, &config, &blocked));
    }

    #[test]
    fn test_outside_cone_not_visible() {
        let agent = Transform::IDENTITY;
        let config = AgentConfig::default().with_view(10.0, 90.0);

        let outcome = evaluate_visibility(&agent, point_at(5.0, 60.0), &config, &ObstacleField::new());
        assert!(matches!(outcome, PerceptionOutcome::OutsideCone { .. }));

        // Прямо за спиной
        assert!(!can_see(&agent, Vec3::new(0.0, 0.0, 3.0), &config, &ObstacleField::new()));
    }

    #[test]
    fn test_query_failure_fails_closed() {
        let agent = Transform::IDENTITY;
        let config = AgentConfig::default();

        let outcome = evaluate_visibility(&agent, point_at(5.0, 0.0), &config, &BrokenGeometry);
        assert_eq!(outcome, PerceptionOutcome::QueryFailed);
        assert!(!outcome.is_visible());
    }

    #[test]
    fn test_forward_follows_rotation() {
        // Агент смотрит в +X
        let agent = Transform::IDENTITY.looking_to(Dir3::X, Dir3::Y);
        let config = AgentConfig::default();

        assert!(can_see(&agent, Vec3::new(4.0, 0.0, 0.0), &config, &ObstacleField::new()));
        assert!(!can_see(&agent, Vec3::new(0.0, 0.0, -4.0), &config, &ObstacleField::new()));
    }

    #[test]
    fn test_view_cone_edges() {
        let config = AgentConfig::default().with_view(10.0, 90.0);
        let cone = ViewCone::from_pose(&Transform::IDENTITY, &config);
        let (left, right) = cone.edge_rays();

        assert!((left.length() - 10.0).abs() < 1e-4);
        assert!((angle_degrees(cone.forward, left) - 45.0).abs() < 1e-3);
        assert!((angle_degrees(cone.forward, right) - 45.0).abs() < 1e-3);
        assert!(left.x < 0.0 && right.x > 0.0);
    }
}
