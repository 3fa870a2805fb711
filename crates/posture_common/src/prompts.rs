//! Prompt templates for posture analysis.
//!
//! Both halves are pure functions of the assessment: the system prompt is a
//! fixed constant, the user prompt a fixed template interpolating the five
//! field literals verbatim. Field values come from closed enumerations, so
//! no sanitization is needed before interpolation.

use crate::assessment::Assessment;

/// System prompt for the analysis call.
///
/// The escalation rule (">1 month with multiple yes answers") is a soft
/// instruction delegated to the model; the pipeline never enforces it.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a professional physiotherapy and chiropractic AI assistant specializing in posture analysis and minor alignment issues.

Based on the user's assessment responses, provide:
1. A brief analysis of their condition (2-3 sentences)
2. A severity level: "mild", "moderate", or "needs_attention"
3. A list of specific alignment issues identified
4. 3-4 recommended exercises with detailed steps, duration, and frequency
5. 3-5 practical posture correction tips and daily activity modifications

IMPORTANT SAFETY GUIDELINES:
- If the user reports severe or persistent pain (duration >1 month with multiple yes answers), set severity to "needs_attention" and recommend medical consultation
- Keep recommendations focused on minor alignment issues only
- Be clear that this is guidance, not medical diagnosis
- All exercises should be gentle and safe for beginners

Return your response as JSON in this exact format:
{
  "analysis": "Brief 2-3 sentence analysis",
  "severity": "mild" | "moderate" | "needs_attention",
  "issues": ["issue 1", "issue 2", ...],
  "exercises": [
    {
      "name": "Exercise name",
      "steps": ["step 1", "step 2", "step 3"],
      "duration": "X minutes",
      "frequency": "X times per day"
    }
  ],
  "tips": ["tip 1", "tip 2", ...]
}"#;

/// Render the user prompt for one assessment.
pub fn build_user_prompt(assessment: &Assessment) -> String {
    format!(
        "Assessment Results:\n\
         - Neck pain: {}\n\
         - Back pain: {}\n\
         - Shoulder stiffness: {}\n\
         - Poor sitting posture: {}\n\
         - Duration of discomfort: {}\n\
         \n\
         Please analyze this assessment and provide personalized recommendations.",
        assessment.neck_pain.as_str(),
        assessment.back_pain.as_str(),
        assessment.shoulder_stiffness.as_str(),
        assessment.poor_posture.as_str(),
        assessment.duration.as_str(),
    )
}

/// The (system, user) prompt pair for one assessment.
pub fn build_prompts(assessment: &Assessment) -> (&'static str, String) {
    (ANALYSIS_SYSTEM_PROMPT, build_user_prompt(assessment))
}
