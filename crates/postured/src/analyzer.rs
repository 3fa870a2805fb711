//! Analysis invoker.
//!
//! Drives one assessment through the pipeline: completeness validation,
//! prompt construction, exactly one completion call, shape validation.
//! Every failure collapses into the `AnalysisError` taxonomy the routes
//! (and through them the questionnaire) branch on. No retries, no caching:
//! every submission re-invokes the model.

use std::sync::Arc;

use posture_common::llm_client::{CompletionClient, CompletionError};
use posture_common::prompts::build_prompts;
use posture_common::validator::validate;
use posture_common::{AnalysisResult, AssessmentForm, Severity};
use tracing::{error, info, warn};

/// Terminal outcome classification for one analysis attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The assessment was incomplete or out of range; nothing was sent.
    #[error("incomplete assessment: {0}")]
    Validation(String),

    /// The gateway rate limited us. The user should retry shortly by hand.
    #[error("rate limit exceeded, please try again in a few moments")]
    RateLimited,

    /// The gateway reported quota/billing exhaustion.
    #[error("quota exhausted, please add credits to the workspace")]
    QuotaExceeded,

    /// Opaque transport or configuration failure.
    #[error("completion provider error: {0}")]
    Provider(String),

    /// The model's payload was not JSON or violated the analysis shape.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl From<CompletionError> for AnalysisError {
    fn from(error: CompletionError) -> Self {
        match error {
            CompletionError::MissingApiKey => {
                AnalysisError::Provider("missing credential".to_string())
            }
            CompletionError::RateLimited => AnalysisError::RateLimited,
            CompletionError::QuotaExceeded => AnalysisError::QuotaExceeded,
            CompletionError::Gateway { .. } | CompletionError::Transport(_) => {
                AnalysisError::Provider(error.to_string())
            }
            CompletionError::EmptyChoices | CompletionError::InvalidJson(_) => {
                AnalysisError::MalformedResponse(error.to_string())
            }
        }
    }
}

/// Runs assessments through the completion gateway.
pub struct Analyzer {
    client: Arc<dyn CompletionClient>,
}

impl Analyzer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Analyze one submitted questionnaire.
    ///
    /// Incomplete forms fail here without touching the network; everything
    /// else makes exactly one gateway call.
    pub async fn invoke(&self, form: &AssessmentForm) -> Result<AnalysisResult, AnalysisError> {
        let assessment = form.complete().map_err(|e| {
            warn!("Rejecting incomplete assessment: {e}");
            AnalysisError::Validation(e.to_string())
        })?;

        let (system_prompt, user_prompt) = build_prompts(&assessment);

        info!("Requesting posture analysis from completion gateway");
        let raw = self
            .client
            .complete_json(system_prompt, &user_prompt)
            .await
            .map_err(|e| {
                error!("Completion call failed: {e}");
                AnalysisError::from(e)
            })?;

        let result = validate(&raw).map_err(|e| {
            error!("Model response failed shape validation: {e}");
            AnalysisError::MalformedResponse(e.to_string())
        })?;

        // The escalation rule is a prompt instruction, not a hard invariant.
        // Log disagreements instead of overriding the model.
        if assessment.duration == posture_common::DiscomfortDuration::OverOneMonth
            && assessment.yes_count() >= 2
            && result.severity != Severity::NeedsAttention
        {
            warn!(
                "Model returned severity {:?} despite long-duration, multi-symptom assessment",
                result.severity.as_str()
            );
        }

        info!("Analysis complete, severity: {}", result.severity.as_str());
        Ok(result)
    }
}
