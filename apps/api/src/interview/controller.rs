//! Interview Controller: drives the phase state machine.
//!
//! Each operation takes the current `Session` by reference and returns the next one.
//! At most one phase transition and at most one gateway call happen per operation.
//! On any error the input session is untouched, so reissuing the same step sends an
//! identical gateway request.
//!
//! Flow: Introduction → Questioning → Feedback → (Questioning → Feedback)* → Report → Complete

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::interview::contract;
use crate::interview::error::InterviewError;
use crate::interview::gateway::{AiGateway, GatewayRequest, GatewayTask};
use crate::interview::scoring::{
    average_scores, compute_overall_score, ProficiencyLevel, Report, ScoringWeights,
};
use crate::interview::session::{Phase, Question, Session, Turn};

/// Runs one tick of the state machine.
///
/// - Introduction: fetch the welcome text, move to Questioning.
/// - Questioning: fetch the next question unless one is already awaiting an answer.
/// - Feedback: evaluate the pending answer, record the Turn, move to Questioning or Report.
/// - Report: fetch the aggregate report, move to Complete.
/// - Complete: nothing.
pub async fn advance(session: &Session, gateway: &dyn AiGateway) -> Result<Session, InterviewError> {
    let Some(request) = next_request(session)? else {
        debug!(
            "Session {} in {}: nothing to request",
            session.id, session.phase
        );
        return Ok(session.clone());
    };

    let text = call_gateway(session, gateway, &request).await?;

    match request.task {
        GatewayTask::Welcome => apply_welcome(session, &text),
        GatewayTask::GenerateQuestion => apply_question(session, &text),
        GatewayTask::EvaluateAnswer => apply_evaluation(session, &text),
        GatewayTask::GenerateReport => apply_report(session, &text),
    }
}

/// Records the candidate's answer to the pending question and moves to Feedback.
///
/// Resubmitting the same answer while its evaluation is outstanding is a no-op.
pub fn submit_answer(session: &Session, answer: &str) -> Result<Session, InterviewError> {
    let answer = answer.trim();

    match session.phase {
        Phase::Feedback if session.pending_answer.as_deref() == Some(answer) => {
            Ok(session.clone())
        }
        Phase::Questioning if session.pending_question.is_some() => {
            if answer.is_empty() {
                return Err(InterviewError::EmptyAnswer);
            }
            let mut next = session.clone();
            next.pending_answer = Some(answer.to_string());
            next.advance_phase(Phase::Feedback)?;
            info!(
                "Session {}: answer recorded for question {}",
                session.id,
                session.question_index + 1
            );
            Ok(next)
        }
        from => Err(InterviewError::IllegalTransition {
            from,
            to: Phase::Feedback,
        }),
    }
}

/// The gateway request the next `advance` would send, or `None` when the tick is a no-op.
pub fn next_request(session: &Session) -> Result<Option<GatewayRequest>, InterviewError> {
    let topic = &session.config.topic;
    let request = match session.phase {
        Phase::Introduction => GatewayRequest {
            task: GatewayTask::Welcome,
            context: json!({
                "topic": topic,
                "max_questions": session.config.max_questions,
                "difficulty_levels": session.config.difficulty_levels,
            }),
        },
        Phase::Questioning if session.pending_question.is_some() => return Ok(None),
        Phase::Questioning => GatewayRequest {
            task: GatewayTask::GenerateQuestion,
            context: json!({
                "topic": topic,
                "difficulty": session.current_difficulty(),
                "question_number": session.question_index + 1,
                "max_questions": session.config.max_questions,
                "history": history_context(session),
            }),
        },
        Phase::Feedback => {
            let (question, answer) = pending_pair(session)?;
            GatewayRequest {
                task: GatewayTask::EvaluateAnswer,
                context: json!({
                    "topic": topic,
                    "question_number": question.number,
                    "difficulty": question.difficulty,
                    "question": question.text,
                    "ideal_solution": question.ideal_solution,
                    "key_concepts": question.key_concepts,
                    "answer": answer,
                    "history": history_context(session),
                }),
            }
        }
        Phase::Report => {
            let weights = ScoringWeights::default();
            let averages = average_scores(&session.history).ok_or(
                InterviewError::IllegalTransition {
                    from: Phase::Report,
                    to: Phase::Complete,
                },
            )?;
            GatewayRequest {
                task: GatewayTask::GenerateReport,
                context: json!({
                    "topic": topic,
                    "overall_score": compute_overall_score(&averages, &weights),
                    "averages": {
                        "correctness": averages.correctness,
                        "efficiency": averages.efficiency,
                        "clarity": averages.clarity,
                        "mastery": averages.mastery,
                    },
                    "weights": {
                        "correctness": weights.correctness,
                        "efficiency": weights.efficiency,
                        "clarity": weights.clarity,
                        "mastery": weights.mastery,
                    },
                    "history": history_context(session),
                }),
            }
        }
        Phase::Complete => return Ok(None),
    };
    Ok(Some(request))
}

async fn call_gateway(
    session: &Session,
    gateway: &dyn AiGateway,
    request: &GatewayRequest,
) -> Result<String, InterviewError> {
    debug!("Session {}: requesting {}", session.id, request.task);
    gateway.complete(request).await.map_err(|e| {
        warn!(
            "Session {}: {} request failed, phase stays {}: {e}",
            session.id, request.task, session.phase
        );
        InterviewError::RetryableGateway {
            task: request.task,
            message: e.to_string(),
        }
    })
}

fn apply_welcome(session: &Session, text: &str) -> Result<Session, InterviewError> {
    let welcome = contract::parse_welcome(text)?;
    let mut next = session.clone();
    next.welcome = Some(welcome);
    next.advance_phase(Phase::Questioning)?;
    info!("Session {}: introduction delivered", session.id);
    Ok(next)
}

fn apply_question(session: &Session, text: &str) -> Result<Session, InterviewError> {
    let payload = contract::parse_question(text)?;
    let mut next = session.clone();
    let question = Question {
        number: session.question_index + 1,
        difficulty: session.current_difficulty().to_string(),
        text: payload.question_text,
        ideal_solution: payload.ideal_solution,
        key_concepts: payload.key_concepts,
    };
    info!(
        "Session {}: question {}/{} ({})",
        session.id, question.number, session.config.max_questions, question.difficulty
    );
    next.pending_question = Some(question);
    next.touch();
    Ok(next)
}

fn apply_evaluation(session: &Session, text: &str) -> Result<Session, InterviewError> {
    let evaluation = contract::parse_evaluation(text)?;
    let (question, answer) = pending_pair(session)?;

    let mut next = session.clone();
    next.append_turn(Turn {
        question_text: question.text.clone(),
        difficulty_level: question.difficulty.clone(),
        ideal_solution: question.ideal_solution.clone(),
        answer_text: answer.to_string(),
        evaluation,
        answered_at: Utc::now(),
    })?;
    next.question_index += 1;
    next.pending_question = None;
    next.pending_answer = None;

    let target = if next.question_index < next.config.max_questions {
        Phase::Questioning
    } else {
        Phase::Report
    };
    next.advance_phase(target)?;
    info!(
        "Session {}: answer {} evaluated, moving to {}",
        session.id, next.question_index, target
    );
    Ok(next)
}

fn apply_report(session: &Session, text: &str) -> Result<Session, InterviewError> {
    let payload = contract::parse_report(text)?;
    let averages = average_scores(&session.history).ok_or(InterviewError::IllegalTransition {
        from: Phase::Report,
        to: Phase::Complete,
    })?;
    let overall_score = compute_overall_score(&averages, &ScoringWeights::default());

    if let Some(reported) = payload.overall_score {
        if (reported - overall_score).abs() > 1.0 {
            debug!(
                "Session {}: provider reported overall {reported:.1}, using computed {overall_score:.1}",
                session.id
            );
        }
    }

    let mut next = session.clone();
    next.report = Some(Report {
        overall_score,
        averages,
        proficiency: ProficiencyLevel::from_score(overall_score),
        strengths: payload.strengths,
        improvements: payload.improvements,
        recommendation_text: payload.recommendation_text,
        generated_at: Utc::now(),
    });
    next.advance_phase(Phase::Complete)?;
    info!(
        "Session {}: interview complete, overall score {:.1}",
        session.id, overall_score
    );
    Ok(next)
}

fn pending_pair(session: &Session) -> Result<(&Question, &str), InterviewError> {
    match (&session.pending_question, session.pending_answer.as_deref()) {
        (Some(question), Some(answer)) => Ok((question, answer)),
        _ => Err(InterviewError::IllegalTransition {
            from: session.phase,
            to: Phase::Questioning,
        }),
    }
}

/// Full prior history, oldest first, so each request sees every earlier exchange.
fn history_context(session: &Session) -> Value {
    Value::Array(
        session
            .history
            .iter()
            .enumerate()
            .map(|(i, turn)| {
                json!({
                    "question_number": i + 1,
                    "difficulty": turn.difficulty_level,
                    "question": turn.question_text,
                    "answer": turn.answer_text,
                    "evaluation": {
                        "correctness": turn.evaluation.correctness,
                        "efficiency": turn.evaluation.efficiency,
                        "clarity": turn.evaluation.clarity,
                        "mastery": turn.evaluation.mastery,
                        "feedback_text": turn.evaluation.feedback_text,
                    },
                })
            })
            .collect(),
    )
}
