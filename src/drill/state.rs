//! Progress state: score, counters and the current problem.

use serde::{Deserialize, Serialize};

use crate::config::{POINTS_CORRECT, POINTS_WRONG, TARGET_SCORE};

use super::evaluate::Evaluation;
use super::problem::Problem;

/// Cumulative progress. This is also the persisted record, so field names
/// follow the stored JSON (`correctCount`, `currProblem`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub score: i32,
    pub correct_count: u32,
    pub wrong_count: u32,
    #[serde(rename = "currProblem", default)]
    pub current_problem: Option<Problem>,
    /// Set once the score reaches [`TARGET_SCORE`]; only a reset clears it.
    #[serde(default)]
    pub has_celebrated: bool,
    #[serde(default)]
    pub can_show_answer: bool,
}

/// Figures shown in the report overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub score: i32,
    pub total: u32,
    pub correct: u32,
    /// Whole percent, 0 when nothing has been answered.
    pub accuracy: u32,
}

impl ProgressState {
    /// Zeroed state with no current problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a scored answer; score and counters saturate at their bounds.
    /// Returns true when this answer triggered the one-time celebration.
    pub fn record(&mut self, evaluation: &Evaluation) -> bool {
        if evaluation.correct {
            self.score = self.score.saturating_add(POINTS_CORRECT);
            self.correct_count = self.correct_count.saturating_add(1);
        } else {
            self.score = self.score.saturating_sub(POINTS_WRONG);
            self.wrong_count = self.wrong_count.saturating_add(1);
        }
        self.update_celebration()
    }

    /// Flip `has_celebrated` the first time the score reaches the target.
    /// Returns true only on that flip.
    pub fn update_celebration(&mut self) -> bool {
        if self.score >= TARGET_SCORE && !self.has_celebrated {
            self.has_celebrated = true;
            return true;
        }
        false
    }

    pub fn install_problem(&mut self, problem: Problem) {
        self.current_problem = Some(problem);
    }

    /// Progress towards the target in 0.0..=1.0.
    pub fn progress_ratio(&self) -> f64 {
        (self.score as f64 / TARGET_SCORE as f64).clamp(0.0, 1.0)
    }

    pub fn total_answered(&self) -> u32 {
        self.correct_count.saturating_add(self.wrong_count)
    }

    pub fn report(&self) -> Report {
        let total = self.total_answered();
        let accuracy = if total > 0 {
            (self.correct_count as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Report {
            score: self.score,
            total,
            correct: self.correct_count,
            accuracy,
        }
    }
}
