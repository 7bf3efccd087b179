//! AI компоненты: state machine, config, memory, history

// NOTE: типы определены в crate::ai::components, здесь только re-export для единообразия
pub use crate::ai::{AgentConfig, AgentDiagnostics, AgentMode, ChaseMemory, PatrolProgress, RecentHistory};
