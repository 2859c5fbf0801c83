// Interview Engine
// Implements: session state, the phase state machine, gateway contract validation,
// scoring and report export. All LLM calls go through llm_client via the AiGateway trait.

pub mod contract;
pub mod controller;
pub mod error;
pub mod export;
pub mod gateway;
pub mod handlers;
pub mod prompts;
pub mod scoring;
pub mod service;
pub mod session;
pub mod store;
pub mod view;

#[cfg(test)]
pub mod testing;
