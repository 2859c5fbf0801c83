use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interview::session::Turn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub correctness: f64,
    pub efficiency: f64,
    pub clarity: f64,
    pub mastery: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            correctness: 0.40,
            efficiency: 0.30,
            clarity: 0.20,
            mastery: 0.10,
        }
    }
}

/// Per-criterion scores on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub correctness: f64,
    pub efficiency: f64,
    pub clarity: f64,
    pub mastery: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    /// Advanced from 80, Intermediate from 60.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ProficiencyLevel::Advanced
        } else if score >= 60.0 {
            ProficiencyLevel::Intermediate
        } else {
            ProficiencyLevel::Beginner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
        }
    }
}

/// Final aggregate report. `overall_score` is always computed locally from the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub overall_score: f64,
    pub averages: ScoreBreakdown,
    pub proficiency: ProficiencyLevel,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendation_text: String,
    pub generated_at: DateTime<Utc>,
}

/// Mean of each sub-score across all turns. `None` for an empty history.
pub fn average_scores(turns: &[Turn]) -> Option<ScoreBreakdown> {
    if turns.is_empty() {
        return None;
    }
    let n = turns.len() as f64;
    let sum = turns.iter().fold(
        ScoreBreakdown {
            correctness: 0.0,
            efficiency: 0.0,
            clarity: 0.0,
            mastery: 0.0,
        },
        |acc, t| ScoreBreakdown {
            correctness: acc.correctness + t.evaluation.correctness,
            efficiency: acc.efficiency + t.evaluation.efficiency,
            clarity: acc.clarity + t.evaluation.clarity,
            mastery: acc.mastery + t.evaluation.mastery,
        },
    );
    Some(ScoreBreakdown {
        correctness: sum.correctness / n,
        efficiency: sum.efficiency / n,
        clarity: sum.clarity / n,
        mastery: sum.mastery / n,
    })
}

/// Weighted overall score: 0.40*correctness + 0.30*efficiency + 0.20*clarity + 0.10*mastery
pub fn compute_overall_score(scores: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    (weights.correctness * scores.correctness
        + weights.efficiency * scores.efficiency
        + weights.clarity * scores.clarity
        + weights.mastery * scores.mastery)
        .clamp(0.0, 100.0)
}

/// Weighted score of a single turn, used in history summaries.
pub fn turn_score(turn: &Turn, weights: &ScoringWeights) -> f64 {
    let e = &turn.evaluation;
    compute_overall_score(
        &ScoreBreakdown {
            correctness: e.correctness,
            efficiency: e.efficiency,
            clarity: e.clarity,
            mastery: e.mastery,
        },
        weights,
    )
}
