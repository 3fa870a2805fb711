//! Posture Common - Shared types and pipeline pieces for the posture daemon.
//!
//! The questionnaire contract, the prompt templates, the completion-gateway
//! client and the response shape validator live here so they can be used and
//! tested without the HTTP daemon.

pub mod analysis;
pub mod assessment;
pub mod llm_client;
pub mod prompts;
pub mod validator;

pub use analysis::*;
pub use assessment::*;
pub use llm_client::*;
