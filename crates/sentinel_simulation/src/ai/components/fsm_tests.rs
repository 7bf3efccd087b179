//! Tests for FSM AI components (mode, config validation).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::fsm::{AgentConfig, AgentMode, ConfigError, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

    #[test]
    fn test_agent_mode_default() {
        let mode = AgentMode::default();
        assert!(matches!(mode, AgentMode::Patrol));
        assert_eq!(mode.label(), "Patrol");
    }

    #[test]
    fn test_agent_config_default() {
        let config = AgentConfig::default();
        assert_eq!(config.move_speed, 3.0);
        assert_eq!(config.rotation_speed, 5.0);
        assert_eq!(config.reach_threshold, 0.1);
        assert_eq!(config.proximity_bias_range, 10.0);
        assert_eq!(config.view_distance, 10.0);
        assert_eq!(config.field_of_view, 90.0);
        assert_eq!(config.obstacle_detection_distance, 2.0);
        assert_eq!(config.chase_memory_duration, 5.0);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.avoidance_turn_degrees, 180.0);
        assert_eq!(config.contact_turn_degrees, 90.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_values() {
        let config = AgentConfig::default();
        assert_eq!(config.half_fov(), 45.0);
        assert_eq!(config.chase_speed(), 4.5);
    }

    #[test]
    fn test_mode_kind_comparison() {
        let a = AgentMode::Investigate { position: Vec3::ZERO };
        let b = AgentMode::Investigate { position: Vec3::ONE };
        let chase = AgentMode::Chase { target: Entity::from_raw(1) };

        assert!(!a.differs_in_kind(&b));
        assert!(a.differs_in_kind(&chase));
        assert_eq!(chase.label(), "Chase");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_speed = AgentConfig::default().with_move_speed(0.0);
        assert_eq!(
            zero_speed.validate(),
            Err(ConfigError::NonPositive { field: "move_speed", value: 0.0 })
        );

        let wide_fov = AgentConfig::default().with_view(10.0, 400.0);
        assert_eq!(wide_fov.validate(), Err(ConfigError::FieldOfView(400.0)));

        let negative_memory = AgentConfig::default().with_chase_memory(-1.0);
        assert!(matches!(
            negative_memory.validate(),
            Err(ConfigError::Negative { field: "chase_memory_duration", .. })
        ));

        let no_history = AgentConfig {
            history_limit: 0,
            ..AgentConfig::default()
        };
        assert_eq!(no_history.validate(), Err(ConfigError::EmptyHistory));
    }

    #[test]
    fn test_validate_rejects_huge_history() {
        let at_max = AgentConfig {
            history_limit: MAX_HISTORY_LIMIT,
            ..AgentConfig::default()
        };
        assert_eq!(at_max.validate(), Ok(()));

        let huge = AgentConfig {
            history_limit: usize::MAX,
            ..AgentConfig::default()
        };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::HistoryTooLarge {
                value: usize::MAX,
                max: MAX_HISTORY_LIMIT,
            })
        );
    }

    #[test]
    fn test_nan_rejected() {
        let config = AgentConfig::default().with_rotation_speed(f32::NAN);
        assert!(config.validate().is_err());
    }
}
