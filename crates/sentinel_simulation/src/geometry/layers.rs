//! Collision Layers Constants
//!
//! ## Layers (битовая маска):
//! - Layer 1 (0b1 = 1): Reserved
//! - Layer 2 (0b10 = 2): Actors (patrol agent)
//! - Layer 3 (0b100 = 4): Environment (walls, obstacles)
//! - Layer 4 (0b1000 = 8): Target (tracked entity)
//!
//! Perception и obstacle probe смотрят только в Environment:
//! сам агент и цель никогда не перекрывают луч.

/// Layer 2: Actors (patrol agent)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: Environment (walls, obstacles, terrain)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 4: Target (преследуемая entity)
pub const COLLISION_LAYER_TARGET: u32 = 0b1000; // 8

/// Mask: что перекрывает line-of-sight и obstacle probe
pub const COLLISION_MASK_OBSTRUCTION: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Mask: агент физически контактирует с окружением и целью
pub const COLLISION_MASK_ACTORS: u32 = COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_TARGET;

/// Получить название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_ACTORS => "Actors",
        COLLISION_LAYER_ENVIRONMENT => "Environment",
        COLLISION_LAYER_TARGET => "Target",
        _ => "Unknown",
    }
}
