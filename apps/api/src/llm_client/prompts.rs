// Shared prompt constants and prompt-building utilities.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona shared by every interviewer prompt.
pub const INTERVIEWER_PERSONA: &str = "\
    You are a seasoned, professional senior analyst conducting a mock technical interview. \
    Be encouraging and supportive while maintaining professionalism. \
    Be specific: name concrete functions, formulas, tools or techniques. \
    Be fair, constructive and educational.";
