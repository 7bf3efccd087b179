//! Physics / world adapters
//!
//! Headless contact detection, rapier bridge и spawn helpers.
//! Движение агента - в `ai::steering` (kinematic, без rapier forces).

pub mod contacts;
pub mod spawn;


// Re-export основных типов
pub use contacts::{
    bridge_rapier_contacts, detect_proximity_contacts, headless_contacts_enabled, ContactSource, ContactState,
    RapierContactBridgePlugin,
};
pub use spawn::{collision_groups, spawn_chase_target, spawn_obstacle, spawn_patrol_agent, spawn_patrol_route};
