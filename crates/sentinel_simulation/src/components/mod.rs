//! ECS Components для entity симуляции
//!
//! Организация по доменам:
//! - actor: патрульный агент, цель, классификация контактов (PatrolAgent, ChaseTarget, ContactTag)
//! - world: patrol graph и маркеры маршрута (PatrolGraph, PatrolRoute, PatrolWaypoint)
//! - ai: состояние агента (AgentMode, AgentConfig, ChaseMemory, RecentHistory)

pub mod actor;
pub mod ai;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use world::*;
