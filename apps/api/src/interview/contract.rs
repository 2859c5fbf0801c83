//! Response contract: validates raw gateway text against the shape each task expects.
//!
//! Text with no parseable JSON object is treated as a transient failure
//! (`RetryableGateway`). JSON that parses but does not fit the expected shape,
//! e.g. a missing or out-of-range sub-score, is a `MalformedResponse`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::interview::error::InterviewError;
use crate::interview::gateway::GatewayTask;
use crate::interview::session::Evaluation;
use crate::llm_client::extract_json_object;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionPayload {
    pub question_text: String,
    #[serde(default)]
    pub ideal_solution: Option<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportPayload {
    /// The provider's own figure; informational only.
    #[serde(default)]
    pub overall_score: Option<f64>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendation_text: String,
}

pub fn parse_welcome(text: &str) -> Result<String, InterviewError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InterviewError::RetryableGateway {
            task: GatewayTask::Welcome,
            message: "empty welcome text".to_string(),
        });
    }
    Ok(text.to_string())
}

pub fn parse_question(text: &str) -> Result<QuestionPayload, InterviewError> {
    let task = GatewayTask::GenerateQuestion;
    let payload: QuestionPayload = parse_shape(task, text)?;
    if payload.question_text.trim().is_empty() {
        return Err(malformed(task, "question_text is empty"));
    }
    Ok(QuestionPayload {
        question_text: payload.question_text.trim().to_string(),
        ideal_solution: payload
            .ideal_solution
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        key_concepts: payload.key_concepts,
    })
}

pub fn parse_evaluation(text: &str) -> Result<Evaluation, InterviewError> {
    let task = GatewayTask::EvaluateAnswer;
    let evaluation: Evaluation = parse_shape(task, text)?;
    for (name, score) in [
        ("correctness", evaluation.correctness),
        ("efficiency", evaluation.efficiency),
        ("clarity", evaluation.clarity),
        ("mastery", evaluation.mastery),
    ] {
        check_score(task, name, score)?;
    }
    Ok(evaluation)
}

pub fn parse_report(text: &str) -> Result<ReportPayload, InterviewError> {
    let task = GatewayTask::GenerateReport;
    let payload: ReportPayload = parse_shape(task, text)?;
    if let Some(score) = payload.overall_score {
        check_score(task, "overall_score", score)?;
    }
    if payload.recommendation_text.trim().is_empty() {
        return Err(malformed(task, "recommendation_text is empty"));
    }
    Ok(payload)
}

fn parse_shape<T: DeserializeOwned>(task: GatewayTask, text: &str) -> Result<T, InterviewError> {
    let json = extract_json_object(text).ok_or_else(|| InterviewError::RetryableGateway {
        task,
        message: "response contained no JSON object".to_string(),
    })?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| InterviewError::RetryableGateway {
            task,
            message: format!("response JSON could not be parsed: {e}"),
        })?;
    serde_json::from_value(value).map_err(|e| malformed(task, &e.to_string()))
}

fn check_score(task: GatewayTask, name: &str, score: f64) -> Result<(), InterviewError> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(malformed(task, &format!("{name} must be between 0 and 100, got {score}")))
    }
}

fn malformed(task: GatewayTask, message: &str) -> InterviewError {
    InterviewError::MalformedResponse {
        task,
        message: message.to_string(),
    }
}
