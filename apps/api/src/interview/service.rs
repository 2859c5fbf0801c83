//! Interview service: binds sessions in the store to controller steps.
//!
//! Single-writer discipline: a session's mutex is held for the entire controller call,
//! including the gateway round-trip. The stored session is only replaced once a step
//! succeeds, so a failed step leaves nothing half-applied.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::controller;
use crate::interview::export::render_report_markdown;
use crate::interview::gateway::AiGateway;
use crate::interview::session::{Session, SessionConfig};
use crate::interview::store::SessionStore;
use crate::interview::view::InterviewView;

/// Per-interview overrides of the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInterviewRequest {
    pub max_questions: Option<usize>,
    pub difficulty_levels: Option<Vec<String>>,
    pub topic: Option<String>,
}

#[derive(Clone)]
pub struct InterviewService {
    store: SessionStore,
    gateway: Arc<dyn AiGateway>,
    defaults: SessionConfig,
}

impl InterviewService {
    pub fn new(store: SessionStore, gateway: Arc<dyn AiGateway>, defaults: SessionConfig) -> Self {
        Self {
            store,
            gateway,
            defaults,
        }
    }

    pub async fn create(&self, request: CreateInterviewRequest) -> Result<InterviewView, AppError> {
        let config = SessionConfig {
            max_questions: request
                .max_questions
                .unwrap_or(self.defaults.max_questions),
            difficulty_levels: request
                .difficulty_levels
                .unwrap_or_else(|| self.defaults.difficulty_levels.clone()),
            topic: request
                .topic
                .unwrap_or_else(|| self.defaults.topic.clone()),
        };
        let session = Session::create(config)?;
        let view = InterviewView::from(&session);
        info!(
            "Created interview {} ({} questions, topic: {})",
            session.id, session.config.max_questions, session.config.topic
        );
        self.store.insert(session).await;
        Ok(view)
    }

    pub async fn get_view(&self, id: Uuid) -> Result<InterviewView, AppError> {
        let slot = self.slot(id).await?;
        let session = slot.lock().await;
        Ok(InterviewView::from(&*session))
    }

    /// Runs one controller tick.
    pub async fn advance(&self, id: Uuid) -> Result<InterviewView, AppError> {
        let slot = self.slot(id).await?;
        let mut session = slot.lock().await;
        let next = controller::advance(&session, self.gateway.as_ref()).await?;
        *session = next;
        Ok(InterviewView::from(&*session))
    }

    /// Records the answer and moves the interview to Feedback. Evaluation happens on the
    /// next `advance`, so this call never touches the gateway.
    pub async fn submit_answer(&self, id: Uuid, answer: &str) -> Result<InterviewView, AppError> {
        let slot = self.slot(id).await?;
        let mut session = slot.lock().await;
        let next = controller::submit_answer(&session, answer)?;
        *session = next;
        Ok(InterviewView::from(&*session))
    }

    pub async fn export_report(&self, id: Uuid) -> Result<String, AppError> {
        let slot = self.slot(id).await?;
        let session = slot.lock().await;
        render_report_markdown(&session).ok_or_else(|| {
            AppError::UnprocessableEntity(format!(
                "Interview {id} has no report yet (phase: {})",
                session.phase
            ))
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.remove(id).await {
            return Err(AppError::NotFound(format!("Interview {id} not found")));
        }
        info!("Deleted interview {id}");
        Ok(())
    }

    async fn slot(&self, id: Uuid) -> Result<Arc<tokio::sync::Mutex<Session>>, AppError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::error::InterviewError;
    use crate::interview::session::Phase;
    use crate::interview::testing::{
        evaluation_json, question_json, report_json, welcome_text, ScriptedGateway,
    };
    use crate::interview::view::NextAction;

    fn service(gateway: Arc<ScriptedGateway>) -> InterviewService {
        InterviewService::new(SessionStore::new(), gateway, SessionConfig::default())
    }

    #[tokio::test]
    async fn test_create_applies_overrides() {
        let svc = service(Arc::new(ScriptedGateway::new()));
        let view = svc
            .create(CreateInterviewRequest {
                max_questions: Some(5),
                difficulty_levels: None,
                topic: Some("PostgreSQL".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(view.max_questions, 5);
        assert_eq!(view.topic, "PostgreSQL");
        assert_eq!(view.phase, Phase::Introduction);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_config() {
        let svc = service(Arc::new(ScriptedGateway::new()));
        let err = svc
            .create(CreateInterviewRequest {
                max_questions: Some(0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Interview(InterviewError::Config(_))));
    }

    #[tokio::test]
    async fn test_submit_answer_commits_feedback_without_gateway_call() {
        let gateway = Arc::new(ScriptedGateway::new());
        let svc = service(gateway.clone());
        let id = svc.create(Default::default()).await.unwrap().session_id;

        gateway.push_ok(welcome_text());
        gateway.push_ok(question_json("Q1"));
        svc.advance(id).await.unwrap();
        let view = svc.advance(id).await.unwrap();
        assert_eq!(view.next_action, NextAction::Answer);

        let view = svc.submit_answer(id, "Use XLOOKUP").await.unwrap();
        assert_eq!(view.phase, Phase::Feedback);
        assert_eq!(view.next_action, NextAction::Advance);
        assert_eq!(gateway.call_count(), 2);

        // The response matches what was stored.
        let stored = svc.get_view(id).await.unwrap();
        assert_eq!(stored.phase, Phase::Feedback);
        assert_eq!(stored.pending_answer.as_deref(), Some("Use XLOOKUP"));
    }

    #[tokio::test]
    async fn test_failed_evaluation_keeps_feedback_and_advance_retries() {
        let gateway = Arc::new(ScriptedGateway::new());
        let svc = service(gateway.clone());
        let id = svc.create(Default::default()).await.unwrap().session_id;

        gateway.push_ok(welcome_text());
        gateway.push_ok(question_json("Q1"));
        svc.advance(id).await.unwrap();
        svc.advance(id).await.unwrap();
        svc.submit_answer(id, "Use XLOOKUP").await.unwrap();

        gateway.push_api_error(502);
        let err = svc.advance(id).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Interview(InterviewError::RetryableGateway { .. })
        ));

        let view = svc.get_view(id).await.unwrap();
        assert_eq!(view.phase, Phase::Feedback);
        assert_eq!(view.pending_answer.as_deref(), Some("Use XLOOKUP"));
        assert!(view.history_summary.is_empty());

        gateway.push_ok(evaluation_json(90.0, 90.0, 90.0, 90.0));
        let view = svc.advance(id).await.unwrap();
        assert_eq!(view.phase, Phase::Questioning);
        assert_eq!(view.history_summary.len(), 1);
        assert_eq!(view.question_index, 1);
    }

    #[tokio::test]
    async fn test_export_requires_report() {
        let gateway = Arc::new(ScriptedGateway::new());
        let svc = service(gateway.clone());
        let id = svc
            .create(CreateInterviewRequest {
                max_questions: Some(1),
                ..Default::default()
            })
            .await
            .unwrap()
            .session_id;

        assert!(matches!(
            svc.export_report(id).await.unwrap_err(),
            AppError::UnprocessableEntity(_)
        ));

        gateway.push_ok(welcome_text());
        gateway.push_ok(question_json("Q1"));
        gateway.push_ok(evaluation_json(80.0, 80.0, 80.0, 80.0));
        gateway.push_ok(report_json());
        svc.advance(id).await.unwrap();
        svc.advance(id).await.unwrap();
        svc.submit_answer(id, "answer").await.unwrap();
        let view = svc.advance(id).await.unwrap();
        assert_eq!(view.phase, Phase::Report);
        let view = svc.advance(id).await.unwrap();
        assert_eq!(view.phase, Phase::Complete);
        assert_eq!(view.next_action, NextAction::None);

        let md = svc.export_report(id).await.unwrap();
        assert!(md.contains("**Overall score:** 80.0/100"));
    }

    #[tokio::test]
    async fn test_concurrent_advances_call_gateway_once() {
        let gateway = Arc::new(ScriptedGateway::new());
        let svc = service(gateway.clone());
        let id = svc.create(Default::default()).await.unwrap().session_id;
        gateway.push_ok(welcome_text());
        gateway.push_ok(question_json("Q1"));
        svc.advance(id).await.unwrap();

        let (a, b) = tokio::join!(svc.advance(id), svc.advance(id));
        assert!(a.is_ok() && b.is_ok());
        // One tick fetched the question; the other found it pending and did nothing.
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_and_deleted_sessions_are_not_found() {
        let svc = service(Arc::new(ScriptedGateway::new()));
        assert!(matches!(
            svc.get_view(Uuid::new_v4()).await.unwrap_err(),
            AppError::NotFound(_)
        ));

        let id = svc.create(Default::default()).await.unwrap().session_id;
        svc.delete(id).await.unwrap();
        assert!(matches!(svc.advance(id).await.unwrap_err(), AppError::NotFound(_)));
        assert!(matches!(svc.delete(id).await.unwrap_err(), AppError::NotFound(_)));
    }
}
