// Interview prompt templates. All prompts for the interview module are defined here.
// Every template receives the request context as pretty-printed JSON in `{context_json}`.

use crate::interview::gateway::{GatewayRequest, GatewayTask};
use crate::llm_client::prompts::{INTERVIEWER_PERSONA, JSON_ONLY_INSTRUCTION};

pub const WELCOME_PROMPT_TEMPLATE: &str = r#"Write the opening message of a mock interview.

INTERVIEW CONTEXT:
{context_json}

The message must:
1. Greet the candidate and introduce yourself as their interviewer for the given topic
2. State how many questions will be asked and that they increase in difficulty across the listed levels
3. Ask the candidate to describe their approach and the specific functions, formulas or techniques they would use
4. Explain that each answer is scored on correctness, efficiency, clarity and mastery
5. Mention that a comprehensive feedback report is delivered at the end

Respond in plain prose (no JSON), 2-3 short paragraphs."#;

pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate the next interview question.

INTERVIEW CONTEXT (difficulty, question number, topic and every previous question/answer/evaluation):
{context_json}

Requirements:
1. Create a realistic, practical scenario relevant to business or professional work
2. Test the skill level named by "difficulty"; do not repeat topics already covered in "history"
3. Build on the candidate's previous answers: probe weaker areas, skip what they clearly mastered
4. Include specific data structures or examples
5. Avoid typical textbook questions

Return a JSON object with this EXACT schema:
{
  "question_text": "The full question shown to the candidate",
  "ideal_solution": "The best approach or formula",
  "key_concepts": ["concept1", "concept2"]
}"#;

pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate's answer.

EVALUATION CONTEXT (question, ideal solution, answer and prior history):
{context_json}

Score each criterion from 0 to 100:
- correctness: technical accuracy; would it work? (90-100 flawless, 70-89 minor issues, 50-69 partially correct, 30-49 significant errors, 0-29 incorrect)
- efficiency: is this the optimal, modern approach?
- clarity: how well was the reasoning explained?
- mastery: depth of understanding beyond the immediate question

Return a JSON object with this EXACT schema:
{
  "correctness": 0,
  "efficiency": 0,
  "clarity": 0,
  "mastery": 0,
  "feedback_text": "Acknowledge the answer, give constructive feedback, mention the ideal solution if needed (2-3 paragraphs max)",
  "strengths": ["strength1"],
  "improvements": ["area1"]
}"#;

pub const REPORT_PROMPT_TEMPLATE: &str = r#"Generate the final assessment report for this interview.

PERFORMANCE DATA (full history, per-criterion averages and the weighted overall score):
{context_json}

The overall score is already computed; do not recompute it.
Identify what the candidate did well, the specific skills to develop, and concrete next steps
and study suggestions. Be professional, encouraging and actionable.

Return a JSON object with this EXACT schema:
{
  "overall_score": 0,
  "strengths": ["strength1", "strength2"],
  "improvements": ["area1", "area2"],
  "recommendation_text": "Executive summary, recommendations and an encouraging close"
}"#;

pub fn system_prompt(task: GatewayTask) -> String {
    match task {
        GatewayTask::Welcome => INTERVIEWER_PERSONA.to_string(),
        GatewayTask::GenerateQuestion
        | GatewayTask::EvaluateAnswer
        | GatewayTask::GenerateReport => {
            format!("{INTERVIEWER_PERSONA} {JSON_ONLY_INSTRUCTION}")
        }
    }
}

pub fn user_prompt(request: &GatewayRequest) -> String {
    let template = match request.task {
        GatewayTask::Welcome => WELCOME_PROMPT_TEMPLATE,
        GatewayTask::GenerateQuestion => QUESTION_PROMPT_TEMPLATE,
        GatewayTask::EvaluateAnswer => EVALUATION_PROMPT_TEMPLATE,
        GatewayTask::GenerateReport => REPORT_PROMPT_TEMPLATE,
    };
    template.replace("{context_json}", &format!("{:#}", request.context))
}
