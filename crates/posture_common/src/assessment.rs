//! Questionnaire data contract.
//!
//! The browser form submits five answers as raw strings (`AssessmentForm`);
//! an `Assessment` only exists once every field parsed against its fixed set
//! of allowed values. Partial forms never reach the prompt builder.

use serde::{Deserialize, Serialize};

/// A yes/no answer to one symptom question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// The exact wire literal, used verbatim in the user prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Answer::Yes)
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(Answer::Yes),
            "no" => Some(Answer::No),
            _ => None,
        }
    }
}

/// How long the discomfort has been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscomfortDuration {
    #[serde(rename = "1-7days")]
    UpToOneWeek,
    #[serde(rename = "1-4weeks")]
    UpToOneMonth,
    #[serde(rename = ">1month")]
    OverOneMonth,
}

impl DiscomfortDuration {
    /// The exact wire literal, used verbatim in the user prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscomfortDuration::UpToOneWeek => "1-7days",
            DiscomfortDuration::UpToOneMonth => "1-4weeks",
            DiscomfortDuration::OverOneMonth => ">1month",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "1-7days" => Some(DiscomfortDuration::UpToOneWeek),
            "1-4weeks" => Some(DiscomfortDuration::UpToOneMonth),
            ">1month" => Some(DiscomfortDuration::OverOneMonth),
            _ => None,
        }
    }
}

/// An assessment field failed completeness validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    MissingField(&'static str),

    #[error("`{field}` must be one of {allowed}, got {value:?}")]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}

/// The questionnaire exactly as submitted: raw strings, possibly empty.
///
/// Absent keys deserialize as empty strings so that an incomplete submission
/// is reported as a missing field, not a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentForm {
    #[serde(rename = "neckPain", default)]
    pub neck_pain: String,
    #[serde(rename = "backPain", default)]
    pub back_pain: String,
    #[serde(rename = "shoulderStiffness", default)]
    pub shoulder_stiffness: String,
    #[serde(rename = "poorPosture", default)]
    pub poor_posture: String,
    #[serde(default)]
    pub duration: String,
}

impl AssessmentForm {
    /// Validate completeness and produce the typed assessment.
    ///
    /// Fails on the first missing or out-of-range field, naming it.
    pub fn complete(&self) -> Result<Assessment, ValidationError> {
        Ok(Assessment {
            neck_pain: parse_answer("neckPain", &self.neck_pain)?,
            back_pain: parse_answer("backPain", &self.back_pain)?,
            shoulder_stiffness: parse_answer("shoulderStiffness", &self.shoulder_stiffness)?,
            poor_posture: parse_answer("poorPosture", &self.poor_posture)?,
            duration: parse_duration("duration", &self.duration)?,
        })
    }
}

fn parse_answer(field: &'static str, value: &str) -> Result<Answer, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Answer::parse(value).ok_or_else(|| ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        allowed: r#""yes"/"no""#,
    })
}

fn parse_duration(field: &'static str, value: &str) -> Result<DiscomfortDuration, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    DiscomfortDuration::parse(value).ok_or_else(|| ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        allowed: r#""1-7days"/"1-4weeks"/">1month""#,
    })
}

/// A complete, validated questionnaire. Read-only input to the prompt builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "neckPain")]
    pub neck_pain: Answer,
    #[serde(rename = "backPain")]
    pub back_pain: Answer,
    #[serde(rename = "shoulderStiffness")]
    pub shoulder_stiffness: Answer,
    #[serde(rename = "poorPosture")]
    pub poor_posture: Answer,
    pub duration: DiscomfortDuration,
}

impl Assessment {
    /// Number of symptom questions answered "yes" (duration excluded).
    pub fn yes_count(&self) -> usize {
        [
            self.neck_pain,
            self.back_pain,
            self.shoulder_stiffness,
            self.poor_posture,
        ]
        .iter()
        .filter(|a| a.is_yes())
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AssessmentForm {
        AssessmentForm {
            neck_pain: "yes".to_string(),
            back_pain: "no".to_string(),
            shoulder_stiffness: "yes".to_string(),
            poor_posture: "no".to_string(),
            duration: "1-4weeks".to_string(),
        }
    }

    #[test]
    fn complete_form_parses() {
        let assessment = filled_form().complete().unwrap();
        assert_eq!(assessment.neck_pain, Answer::Yes);
        assert_eq!(assessment.back_pain, Answer::No);
        assert_eq!(assessment.duration, DiscomfortDuration::UpToOneMonth);
        assert_eq!(assessment.yes_count(), 2);
    }

    #[test]
    fn every_missing_field_is_named() {
        let fields: [(&str, fn(&mut AssessmentForm)); 5] = [
            ("neckPain", |f| f.neck_pain.clear()),
            ("backPain", |f| f.back_pain.clear()),
            ("shoulderStiffness", |f| f.shoulder_stiffness.clear()),
            ("poorPosture", |f| f.poor_posture.clear()),
            ("duration", |f| f.duration.clear()),
        ];

        for (name, clear) in fields {
            let mut form = filled_form();
            clear(&mut form);
            assert_eq!(
                form.complete().unwrap_err(),
                ValidationError::MissingField(name)
            );
        }
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let mut form = filled_form();
        form.duration = "forever".to_string();
        match form.complete().unwrap_err() {
            ValidationError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "duration");
                assert_eq!(value, "forever");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn absent_keys_deserialize_as_missing_fields() {
        let form: AssessmentForm = serde_json::from_str(r#"{"neckPain":"yes"}"#).unwrap();
        assert_eq!(
            form.complete().unwrap_err(),
            ValidationError::MissingField("backPain")
        );
    }

    #[test]
    fn wire_literals_round_trip() {
        for (answer, literal) in [(Answer::Yes, "\"yes\""), (Answer::No, "\"no\"")] {
            assert_eq!(serde_json::to_string(&answer).unwrap(), literal);
        }
        for (duration, literal) in [
            (DiscomfortDuration::UpToOneWeek, "\"1-7days\""),
            (DiscomfortDuration::UpToOneMonth, "\"1-4weeks\""),
            (DiscomfortDuration::OverOneMonth, "\">1month\""),
        ] {
            assert_eq!(serde_json::to_string(&duration).unwrap(), literal);
            assert_eq!(
                serde_json::to_string(&duration).unwrap(),
                format!("{:?}", duration.as_str())
            );
        }
    }
}
