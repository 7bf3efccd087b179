//! Read-only debug данные агента (view cone, последняя видимость, последний probe).
//!
//! На поведение не влияют: пишет только `patrol_agent_tick`.

use bevy::prelude::*;

use crate::ai::perception::{PerceptionOutcome, ViewCone};
use crate::ai::steering::{ProbeOutcome, StepOutcome};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentDiagnostics {
    pub view_cone: ViewCone,
    pub perception: PerceptionOutcome,
    pub probe: ProbeOutcome,
    pub last_step: Option<StepOutcome>,
    /// Количество fixed тиков, обработанных агентом
    pub ticks: u64,
}
