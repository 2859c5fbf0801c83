//! Session State: the durable record of one interview. No business logic lives here
//! beyond guarding the invariants: bounded history and the phase transition table.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::error::InterviewError;
use crate::interview::scoring::Report;

/// Upper bound accepted for `max_questions`.
pub const MAX_QUESTIONS_LIMIT: usize = 10;
pub const DEFAULT_MAX_QUESTIONS: usize = 3;
pub const DEFAULT_DIFFICULTY_LEVELS: &[&str] = &["intermediate", "intermediate_advanced", "advanced"];
pub const DEFAULT_TOPIC: &str = "Microsoft Excel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Introduction,
    Questioning,
    Feedback,
    Report,
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Introduction => "introduction",
            Phase::Questioning => "questioning",
            Phase::Feedback => "feedback",
            Phase::Report => "report",
            Phase::Complete => "complete",
        }
    }

    /// Forward-only edges, plus the Questioning <-> Feedback loop.
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Introduction, Phase::Questioning)
                | (Phase::Questioning, Phase::Feedback)
                | (Phase::Feedback, Phase::Questioning)
                | (Phase::Feedback, Phase::Report)
                | (Phase::Report, Phase::Complete)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub max_questions: usize,
    /// Ordered from easiest to hardest.
    pub difficulty_levels: Vec<String>,
    /// Subject the interview assesses; passed to every gateway request.
    pub topic: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            difficulty_levels: DEFAULT_DIFFICULTY_LEVELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), InterviewError> {
        if self.max_questions < 1 {
            return Err(InterviewError::Config(
                "max_questions must be at least 1".to_string(),
            ));
        }
        if self.max_questions > MAX_QUESTIONS_LIMIT {
            return Err(InterviewError::Config(format!(
                "max_questions must be at most {MAX_QUESTIONS_LIMIT}"
            )));
        }
        if self.difficulty_levels.is_empty() {
            return Err(InterviewError::Config(
                "difficulty_levels must not be empty".to_string(),
            ));
        }
        if self.difficulty_levels.iter().any(|l| l.trim().is_empty()) {
            return Err(InterviewError::Config(
                "difficulty_levels must not contain blank labels".to_string(),
            ));
        }
        if self.topic.trim().is_empty() {
            return Err(InterviewError::Config("topic must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A generated question awaiting an answer. Becomes part of a `Turn` once evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the interview.
    pub number: usize,
    pub difficulty: String,
    pub text: String,
    pub ideal_solution: Option<String>,
    pub key_concepts: Vec<String>,
}

/// Sub-scores are on a 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correctness: f64,
    pub efficiency: f64,
    pub clarity: f64,
    pub mastery: f64,
    pub feedback_text: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// One question/answer/evaluation triple. Never modified after it enters the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub question_text: String,
    pub difficulty_level: String,
    pub ideal_solution: Option<String>,
    pub answer_text: String,
    pub evaluation: Evaluation,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub phase: Phase,
    /// Number of completed turns; selects the difficulty of the next question.
    pub question_index: usize,
    pub history: Vec<Turn>,
    pub config: SessionConfig,
    /// Display-only welcome text produced during Introduction.
    pub welcome: Option<String>,
    pub pending_question: Option<Question>,
    pub pending_answer: Option<String>,
    pub report: Option<Report>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn create(config: SessionConfig) -> Result<Self, InterviewError> {
        config.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            phase: Phase::Introduction,
            question_index: 0,
            history: Vec::new(),
            config,
            welcome: None,
            pending_question: None,
            pending_answer: None,
            report: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn append_turn(&mut self, turn: Turn) -> Result<(), InterviewError> {
        if self.history.len() >= self.config.max_questions {
            return Err(InterviewError::Capacity {
                max_questions: self.config.max_questions,
            });
        }
        self.history.push(turn);
        self.touch();
        Ok(())
    }

    pub fn advance_phase(&mut self, next: Phase) -> Result<(), InterviewError> {
        if !self.phase.can_transition_to(next) {
            return Err(InterviewError::IllegalTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        self.touch();
        Ok(())
    }

    /// Difficulty for the question at `question_index`; clamps to the last level.
    pub fn current_difficulty(&self) -> &str {
        difficulty_at(&self.config.difficulty_levels, self.question_index)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// `levels` is validated non-empty at session creation.
pub fn difficulty_at(levels: &[String], index: usize) -> &str {
    let last = levels.len().saturating_sub(1);
    levels
        .get(index.min(last))
        .map(String::as_str)
        .unwrap_or_default()
}
