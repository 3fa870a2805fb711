//! Shape validation for the model's analysis payload.
//!
//! The model is instructed to return an exact JSON shape; nothing it sends is
//! trusted until it passes these checks. Checks run in a fixed order and stop
//! at the first failure, and every error names the offending field.

use serde_json::Value;

use crate::analysis::{AnalysisResult, Exercise, Severity};

/// The payload violated the expected analysis shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("`{0}` must be a string")]
    NotAString(&'static str),

    #[error("`severity` must be \"mild\", \"moderate\" or \"needs_attention\", got {0}")]
    InvalidSeverity(String),

    #[error("`{0}` must be an array of strings")]
    NotAStringArray(&'static str),

    #[error("`exercises` must be an array")]
    ExercisesNotAnArray,

    #[error("`exercises[{0}].name` must be a non-empty string")]
    ExerciseName(usize),

    #[error("`exercises[{0}].steps` must be a non-empty array of strings")]
    ExerciseSteps(usize),

    #[error("`exercises[{index}].{field}` must be a string")]
    ExerciseField { index: usize, field: &'static str },
}

/// Check a decoded payload against the analysis contract.
pub fn validate(raw: &Value) -> Result<AnalysisResult, ShapeError> {
    let object = raw.as_object().ok_or(ShapeError::NotAnObject)?;

    let analysis = match object.get("analysis") {
        None => return Err(ShapeError::MissingField("analysis")),
        Some(value) => value
            .as_str()
            .ok_or(ShapeError::NotAString("analysis"))?
            .to_string(),
    };

    let severity = match object.get("severity") {
        None => return Err(ShapeError::MissingField("severity")),
        Some(value) => {
            // Render the offending value as raw JSON in both branches.
            let literal = value
                .as_str()
                .ok_or_else(|| ShapeError::InvalidSeverity(value.to_string()))?;
            Severity::parse(literal)
                .ok_or_else(|| ShapeError::InvalidSeverity(value.to_string()))?
        }
    };

    let issues = string_array(object.get("issues"), "issues")?;
    let tips = string_array(object.get("tips"), "tips")?;

    let raw_exercises = match object.get("exercises") {
        None => return Err(ShapeError::MissingField("exercises")),
        Some(value) => value.as_array().ok_or(ShapeError::ExercisesNotAnArray)?,
    };

    let mut exercises = Vec::with_capacity(raw_exercises.len());
    for (index, entry) in raw_exercises.iter().enumerate() {
        exercises.push(validate_exercise(index, entry)?);
    }

    Ok(AnalysisResult {
        analysis,
        severity,
        issues,
        exercises,
        tips,
    })
}

fn string_array(value: Option<&Value>, field: &'static str) -> Result<Vec<String>, ShapeError> {
    let entries = match value {
        None => return Err(ShapeError::MissingField(field)),
        Some(value) => value.as_array().ok_or(ShapeError::NotAStringArray(field))?,
    };

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or(ShapeError::NotAStringArray(field))
        })
        .collect()
}

fn validate_exercise(index: usize, entry: &Value) -> Result<Exercise, ShapeError> {
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(ShapeError::ExerciseName(index))?;

    let steps: Vec<String> = entry
        .get("steps")
        .and_then(Value::as_array)
        .ok_or(ShapeError::ExerciseSteps(index))?
        .iter()
        .map(|step| {
            step.as_str()
                .map(str::to_string)
                .ok_or(ShapeError::ExerciseSteps(index))
        })
        .collect::<Result<_, _>>()?;
    if steps.is_empty() {
        return Err(ShapeError::ExerciseSteps(index));
    }

    let duration = entry
        .get("duration")
        .and_then(Value::as_str)
        .ok_or(ShapeError::ExerciseField {
            index,
            field: "duration",
        })?;
    let frequency = entry
        .get("frequency")
        .and_then(Value::as_str)
        .ok_or(ShapeError::ExerciseField {
            index,
            field: "frequency",
        })?;

    Ok(Exercise {
        name: name.to_string(),
        steps,
        duration: duration.to_string(),
        frequency: frequency.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical() -> Value {
        json!({
            "analysis": "ok",
            "severity": "mild",
            "issues": [],
            "exercises": [{
                "name": "Chin Tuck",
                "steps": ["Tuck chin", "Hold 5s"],
                "duration": "5 minutes",
                "frequency": "3x/day"
            }],
            "tips": ["Sit upright"]
        })
    }

    #[test]
    fn canonical_payload_validates() {
        let result = validate(&canonical()).unwrap();
        assert_eq!(result.analysis, "ok");
        assert_eq!(result.severity, Severity::Mild);
        assert!(result.issues.is_empty());
        assert_eq!(result.exercises.len(), 1);
        assert_eq!(result.exercises[0].steps, vec!["Tuck chin", "Hold 5s"]);
        assert_eq!(result.tips, vec!["Sit upright"]);
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert_eq!(validate(&json!([])).unwrap_err(), ShapeError::NotAnObject);
        assert_eq!(validate(&json!("hi")).unwrap_err(), ShapeError::NotAnObject);
        assert_eq!(validate(&json!(3)).unwrap_err(), ShapeError::NotAnObject);
    }

    #[test]
    fn unknown_severity_names_the_field() {
        let mut payload = canonical();
        payload["severity"] = json!("severe");
        let err = validate(&payload).unwrap_err();
        assert_eq!(err, ShapeError::InvalidSeverity("\"severe\"".to_string()));
        assert!(err.to_string().contains("severity"));
    }

    #[test]
    fn non_string_severity_is_rejected() {
        let mut payload = canonical();
        payload["severity"] = json!(2);
        assert_eq!(
            validate(&payload).unwrap_err(),
            ShapeError::InvalidSeverity("2".to_string())
        );
    }

    #[test]
    fn severity_errors_render_the_value_as_json() {
        let mut payload = canonical();
        payload["severity"] = json!("severe");
        let unknown_literal = validate(&payload).unwrap_err().to_string();

        payload["severity"] = json!(["mild"]);
        let wrong_type = validate(&payload).unwrap_err().to_string();

        assert!(unknown_literal.ends_with("got \"severe\""));
        assert!(wrong_type.ends_with("got [\"mild\"]"));
    }

    #[test]
    fn empty_steps_are_rejected() {
        let mut payload = canonical();
        payload["exercises"][0]["steps"] = json!([]);
        assert_eq!(
            validate(&payload).unwrap_err(),
            ShapeError::ExerciseSteps(0)
        );
    }

    #[test]
    fn missing_fields_are_named_in_order() {
        let mut payload = canonical();
        payload.as_object_mut().unwrap().remove("analysis");
        assert_eq!(
            validate(&payload).unwrap_err(),
            ShapeError::MissingField("analysis")
        );

        let mut payload = canonical();
        payload.as_object_mut().unwrap().remove("tips");
        assert_eq!(
            validate(&payload).unwrap_err(),
            ShapeError::MissingField("tips")
        );
    }

    #[test]
    fn mixed_type_tips_are_rejected() {
        let mut payload = canonical();
        payload["tips"] = json!(["Sit upright", 7]);
        assert_eq!(
            validate(&payload).unwrap_err(),
            ShapeError::NotAStringArray("tips")
        );
    }

    #[test]
    fn exercise_without_name_is_rejected() {
        let mut payload = canonical();
        payload["exercises"][0]["name"] = json!("");
        assert_eq!(validate(&payload).unwrap_err(), ShapeError::ExerciseName(0));
    }

    #[test]
    fn empty_sequences_are_allowed_where_the_contract_says_so() {
        let mut payload = canonical();
        payload["issues"] = json!([]);
        payload["tips"] = json!([]);
        payload["exercises"] = json!([]);
        let result = validate(&payload).unwrap();
        assert!(result.issues.is_empty());
        assert!(result.tips.is_empty());
        assert!(result.exercises.is_empty());
    }
}
