//! Test fixtures shared by the interview and route tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::interview::gateway::{AiGateway, GatewayRequest};
use crate::interview::session::{Evaluation, Turn};
use crate::llm_client::LlmError;

/// Gateway fake that replays queued responses in order and records every request.
/// An exhausted queue answers with `LlmError::EmptyContent`.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn push_api_error(&self, status: u16) {
        self.responses.lock().unwrap().push_back(Err(LlmError::Api {
            status,
            message: "upstream unavailable".to_string(),
        }));
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AiGateway for ScriptedGateway {
    async fn complete(&self, request: &GatewayRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn welcome_text() -> String {
    "Hello! I'm your interviewer today. We'll go through a few questions.".to_string()
}

pub fn question_json(text: &str) -> String {
    json!({
        "question_text": text,
        "ideal_solution": "=XLOOKUP(A2, Products!A:A, Products!C:C)",
        "key_concepts": ["XLOOKUP"]
    })
    .to_string()
}

pub fn evaluation_json(correctness: f64, efficiency: f64, clarity: f64, mastery: f64) -> String {
    json!({
        "correctness": correctness,
        "efficiency": efficiency,
        "clarity": clarity,
        "mastery": mastery,
        "feedback_text": "Good approach; consider a structured reference.",
        "strengths": ["lookup functions"],
        "improvements": ["explain edge cases"]
    })
    .to_string()
}

pub fn report_json() -> String {
    json!({
        "overall_score": 12,
        "strengths": ["Clear explanations"],
        "improvements": ["Dynamic arrays"],
        "recommendation_text": "Practice dynamic array formulas and LET."
    })
    .to_string()
}

pub fn turn_with_scores(correctness: f64, efficiency: f64, clarity: f64, mastery: f64) -> Turn {
    Turn {
        question_text: "How would you total sales per region?".to_string(),
        difficulty_level: "intermediate".to_string(),
        ideal_solution: Some("=SUMIFS(C:C, A:A, \"West\")".to_string()),
        answer_text: "I'd use SUMIFS on the region column.".to_string(),
        evaluation: Evaluation {
            correctness,
            efficiency,
            clarity,
            mastery,
            feedback_text: "Correct.".to_string(),
            strengths: vec![],
            improvements: vec![],
        },
        answered_at: Utc::now(),
    }
}

pub fn sample_turn(difficulty: &str, score: f64) -> Turn {
    Turn {
        difficulty_level: difficulty.to_string(),
        ..turn_with_scores(score, score, score, score)
    }
}
