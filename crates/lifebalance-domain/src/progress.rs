use serde::{Deserialize, Serialize};

use crate::streak::is_qualifying_ratio;

/// Anything that can be ticked off on today's checklist.
pub trait Completable {
    fn is_completed(&self) -> bool;
}

impl Completable for bool {
    fn is_completed(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub completed: bool,
}

impl Completable for ChecklistItem {
    fn is_completed(&self) -> bool {
        self.completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodayProgress {
    pub completed: u32,
    pub total: u32,
}

impl TodayProgress {
    /// `None` for an empty checklist.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.completed as f64 / self.total as f64)
    }

    pub fn is_qualifying(&self) -> bool {
        self.ratio().is_some_and(is_qualifying_ratio)
    }
}

pub fn compute_today_progress<T: Completable>(items: &[T]) -> TodayProgress {
    let completed = items.iter().filter(|item| item.is_completed()).count();

    TodayProgress {
        completed: completed as u32,
        total: items.len() as u32,
    }
}
