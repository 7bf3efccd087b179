//! Patrol progress: текущий waypoint + anti-repeat история.

use bevy::prelude::*;
use std::collections::VecDeque;

use super::fsm::DEFAULT_HISTORY_LIMIT;

/// Текущий waypoint агента (индекс в PatrolGraph, не владение)
///
/// `None` - агент ещё не инициализирован (граф не собран / пуст).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PatrolProgress {
    pub current: Option<usize>,
}

/// FIFO последних посещённых waypoint'ов (ёмкость `limit`)
///
/// Длина никогда не превышает `limit`; при переполнении вытесняется самый старый.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    entries: VecDeque<usize>,
    limit: usize,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl RecentHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.saturating_add(1).min(16)),
            limit,
        }
    }

    pub fn push(&mut self, index: usize) {
        self.entries.push_back(index);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// От самого старого к самому новому
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.entries.back().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
