//! Sentinel Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: patrol/chase агент (headless).
//!
//! Слои:
//! - ai: perception, memory, node selector, steering, controller
//! - geometry: raycast сервис (GeometryQuery) + headless ObstacleField
//! - physics: contact signal (headless / rapier bridge), spawn helpers
//!
//! Один writer на агента, один fixed тик = один `tick_agent`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod geometry;
pub mod logger;
pub mod physics;

// Re-export базовых компонентов для удобства
pub use ai::{
    AIPlugin, AgentConfig, AgentContact, AgentDiagnostics, AgentMode, ChaseMemory, ConfigError, PatrolProgress,
    RecentHistory, TargetCaught,
};
pub use components::{ChaseTarget, ContactTag, PatrolAgent, PatrolGraph, PatrolRoute, PatrolWaypoint};
pub use geometry::{GeometryError, GeometryQuery, ObstacleField, ObstacleShape, ObstructionFilter, RaycastHit};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, set_logger_if_needed, LogLevel,
    LogPrinter,
};
pub use physics::{
    spawn_chase_target, spawn_obstacle, spawn_patrol_agent, spawn_patrol_route, ContactSource,
    RapierContactBridgePlugin,
};

/// Частота simulation tick
pub const FIXED_HZ: f64 = 60.0;

/// Seed по умолчанию, если хост не вставил свой DeterministicRng
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed хоста (create_headless_app) не перезаписываем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .add_plugins(AIPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Единственный источник случайности симуляции (выбор waypoint'ов).
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно один fixed tick
/// (кроме самого первого, у него delta = 0).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ)) // 60Hz FixedUpdate
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / FIXED_HZ)));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
