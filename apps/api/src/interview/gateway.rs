//! AI Gateway: the request/response seam between the interview controller and the LLM.
//!
//! The controller only ever sees `AiGateway`; `LlmClient` is the production backend and
//! tests plug in a scripted fake. Responses come back as raw text and are validated by
//! `interview::contract`.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interview::prompts;
use crate::llm_client::{LlmClient, LlmError, Sampling};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayTask {
    Welcome,
    GenerateQuestion,
    EvaluateAnswer,
    GenerateReport,
}

impl GatewayTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayTask::Welcome => "welcome",
            GatewayTask::GenerateQuestion => "generate_question",
            GatewayTask::EvaluateAnswer => "evaluate_answer",
            GatewayTask::GenerateReport => "generate_report",
        }
    }

    pub fn sampling(&self) -> Sampling {
        match self {
            GatewayTask::Welcome => Sampling {
                temperature: 0.6,
                max_tokens: 800,
            },
            GatewayTask::GenerateQuestion => Sampling {
                temperature: 0.7,
                max_tokens: 1500,
            },
            GatewayTask::EvaluateAnswer => Sampling {
                temperature: 0.3,
                max_tokens: 1000,
            },
            GatewayTask::GenerateReport => Sampling {
                temperature: 0.5,
                max_tokens: 2000,
            },
        }
    }
}

impl fmt::Display for GatewayTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single gateway request. Built deterministically from session state, so reissuing
/// a failed step produces an identical request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayRequest {
    pub task: GatewayTask,
    pub context: Value,
}

#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Returns the raw generated text for `request`.
    async fn complete(&self, request: &GatewayRequest) -> Result<String, LlmError>;
}

#[async_trait]
impl AiGateway for LlmClient {
    async fn complete(&self, request: &GatewayRequest) -> Result<String, LlmError> {
        let system = prompts::system_prompt(request.task);
        let prompt = prompts::user_prompt(request);
        self.call_text(&prompt, &system, request.task.sampling())
            .await
    }
}
