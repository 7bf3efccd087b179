//! AI Events - contact signal (in) и terminal outcome (out)
//!
//! Источник AgentContact:
//! - headless: `physics::detect_proximity_contacts` (ObstacleField + дистанция до цели)
//! - rapier: `physics::bridge_rapier_contacts` (CollisionEvent::Started)
//!
//! Core не знает, кто именно сгенерировал контакт.

use bevy::prelude::*;

use crate::components::ContactTag;

/// Тело агента коснулось тела с ContactTag
///
/// Отправляется один раз на начало контакта (не каждый тик пока касаемся).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AgentContact {
    /// Entity агента
    pub agent: Entity,
    /// Entity другого тела
    pub other: Entity,
    /// Классификация другого тела
    pub kind: ContactTag,
}

/// Terminal outcome: агент поймал цель
///
/// Читает внешний game/session слой; симуляция сама сессию не завершает.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCaught {
    pub agent: Entity,
    pub target: Entity,
}
