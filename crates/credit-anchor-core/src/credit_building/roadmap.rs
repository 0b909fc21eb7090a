//! Credit-ready roadmap: a fixed catalog of learning tasks worth points.
//!
//! Completion is one-way. A task moves incomplete -> completed at most once
//! and the running total only ever grows; there is no rollback.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CreditAnchorError;
use crate::types::{ratio_or_zero, Percent};
use crate::CreditAnchorResult;

pub type TaskId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadmapTask {
    pub id: TaskId,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u32,
}

pub const ROADMAP_TASKS: [RoadmapTask; 3] = [
    RoadmapTask {
        id: 1,
        title: "Complete \"How Interest Works\" Module",
        description: "Learn the basics of interest calculation in 2 minutes",
        points: 50,
    },
    RoadmapTask {
        id: 2,
        title: "Set up a Mock Savings Goal",
        description: "Demonstrate financial consistency by setting a savings target",
        points: 75,
    },
    RoadmapTask {
        id: 3,
        title: "Track Your First Credit Payment",
        description: "Make and track your first on-time payment",
        points: 100,
    },
];

pub fn find_task(id: TaskId) -> Option<&'static RoadmapTask> {
    ROADMAP_TASKS.iter().find(|t| t.id == id)
}

/// Per-task view used by [`RoadmapProgress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapProgress {
    pub tasks: Vec<TaskStatus>,
    pub total_points: u32,
    pub max_points: u32,
    pub progress_pct: Percent,
    pub finished: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roadmap {
    completed: BTreeSet<TaskId>,
    total_points: u32,
}

impl Roadmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a task completed and credit its points.
    ///
    /// Returns `Ok(false)` if the task was already completed.
    pub fn complete(&mut self, id: TaskId) -> CreditAnchorResult<bool> {
        let task = find_task(id).ok_or_else(|| {
            CreditAnchorError::invalid("task_id", format!("Unknown roadmap task {id}."))
        })?;
        if !self.completed.insert(id) {
            return Ok(false);
        }
        self.total_points += task.points;
        Ok(true)
    }

    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn max_points(&self) -> u32 {
        ROADMAP_TASKS.iter().map(|t| t.points).sum()
    }

    pub fn progress_pct(&self) -> Percent {
        ratio_or_zero(
            Decimal::from(self.total_points),
            Decimal::from(self.max_points()),
        ) * dec!(100)
    }

    pub fn is_finished(&self) -> bool {
        self.completed.len() == ROADMAP_TASKS.len()
    }

    pub fn snapshot(&self) -> RoadmapProgress {
        RoadmapProgress {
            tasks: ROADMAP_TASKS
                .iter()
                .map(|t| TaskStatus {
                    id: t.id,
                    title: t.title.to_string(),
                    description: t.description.to_string(),
                    points: t.points,
                    completed: self.is_completed(t.id),
                })
                .collect(),
            total_points: self.total_points,
            max_points: self.max_points(),
            progress_pct: self.progress_pct(),
            finished: self.is_finished(),
        }
    }
}

/// Replay a list of completions onto a fresh roadmap.
pub fn replay(completed_ids: &[TaskId]) -> CreditAnchorResult<Roadmap> {
    let mut roadmap = Roadmap::new();
    for id in completed_ids {
        roadmap.complete(*id)?;
    }
    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: BTreeSet<TaskId> = ROADMAP_TASKS.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), ROADMAP_TASKS.len());
        assert!(ROADMAP_TASKS.iter().all(|t| t.points > 0));
    }

    #[test]
    fn test_fresh_roadmap_is_empty() {
        let r = Roadmap::new();
        assert_eq!(r.total_points(), 0);
        assert_eq!(r.max_points(), 225);
        assert_eq!(r.progress_pct(), Decimal::ZERO);
        assert!(!r.is_finished());
    }

    #[test]
    fn test_complete_credits_points_once() {
        let mut r = Roadmap::new();
        assert!(r.complete(2).unwrap());
        assert!(!r.complete(2).unwrap());
        assert_eq!(r.total_points(), 75);
    }

    #[test]
    fn test_all_tasks_finish_roadmap() {
        let mut r = Roadmap::new();
        for t in ROADMAP_TASKS.iter() {
            r.complete(t.id).unwrap();
        }
        assert!(r.is_finished());
        assert_eq!(r.total_points(), r.max_points());
        assert_eq!(r.progress_pct(), dec!(100));
    }

    #[test]
    fn test_unknown_task_rejected_without_side_effects() {
        let mut r = Roadmap::new();
        r.complete(1).unwrap();
        let err = r.complete(99).unwrap_err();
        assert!(matches!(err, CreditAnchorError::InvalidInput { .. }));
        assert_eq!(r.total_points(), 50);
    }

    #[test]
    fn test_snapshot_reflects_completion() {
        let r = replay(&[3, 1, 3]).unwrap();
        let snap = r.snapshot();
        let flags: Vec<bool> = snap.tasks.iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(snap.total_points, 150);
        assert!(!snap.finished);
    }
}
