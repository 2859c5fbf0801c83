use serde::Serialize;
use uuid::Uuid;

use crate::interview::scoring::{turn_score, Report, ScoringWeights};
use crate::interview::session::{Phase, Session};

/// What the client should do next to make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Advance,
    Answer,
    None,
}

/// The question as shown to the candidate. The ideal solution stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub difficulty: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnSummary {
    pub number: usize,
    pub difficulty: String,
    pub question_text: String,
    pub answer_text: String,
    pub weighted_score: f64,
    pub correctness: f64,
    pub efficiency: f64,
    pub clarity: f64,
    pub mastery: f64,
    pub feedback_text: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewView {
    pub session_id: Uuid,
    pub phase: Phase,
    pub question_index: usize,
    pub max_questions: usize,
    pub topic: String,
    pub welcome: Option<String>,
    pub current_question: Option<QuestionView>,
    pub pending_answer: Option<String>,
    pub last_feedback: Option<String>,
    pub history_summary: Vec<TurnSummary>,
    pub report: Option<Report>,
    pub next_action: NextAction,
}

impl From<&Session> for InterviewView {
    fn from(session: &Session) -> Self {
        let weights = ScoringWeights::default();
        let history_summary = session
            .history
            .iter()
            .enumerate()
            .map(|(i, turn)| TurnSummary {
                number: i + 1,
                difficulty: turn.difficulty_level.clone(),
                question_text: turn.question_text.clone(),
                answer_text: turn.answer_text.clone(),
                weighted_score: turn_score(turn, &weights),
                correctness: turn.evaluation.correctness,
                efficiency: turn.evaluation.efficiency,
                clarity: turn.evaluation.clarity,
                mastery: turn.evaluation.mastery,
                feedback_text: turn.evaluation.feedback_text.clone(),
                strengths: turn.evaluation.strengths.clone(),
                improvements: turn.evaluation.improvements.clone(),
            })
            .collect();

        Self {
            session_id: session.id,
            phase: session.phase,
            question_index: session.question_index,
            max_questions: session.config.max_questions,
            topic: session.config.topic.clone(),
            welcome: session.welcome.clone(),
            current_question: session.pending_question.as_ref().map(|q| QuestionView {
                number: q.number,
                difficulty: q.difficulty.clone(),
                text: q.text.clone(),
            }),
            pending_answer: session.pending_answer.clone(),
            last_feedback: session
                .history
                .last()
                .map(|t| t.evaluation.feedback_text.clone()),
            history_summary,
            report: session.report.clone(),
            next_action: next_action(session),
        }
    }
}

fn next_action(session: &Session) -> NextAction {
    match session.phase {
        Phase::Questioning if session.pending_question.is_some() => NextAction::Answer,
        Phase::Complete => NextAction::None,
        _ => NextAction::Advance,
    }
}
