//! Post-call shaping of raw model output.
//!
//! The normalizer guarantees that every schema-declared list field is
//! present (empty when the model omitted it), that mandatory scalars are
//! non-empty, and that optional per-item detail fields are absent rather
//! than blank. It is a pure function of (task, report kind, raw output).

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::result::{ExtractionResult, LabelAnalysis, PrescriptionAnalysis, ReportSummary};
use crate::schema::{FieldPresence, FieldShape, FieldSpec, schema_for};
use crate::task::{ReportKind, TaskKind};

// Blood-only informational fields, forced empty for every other report kind.
const BLOOD_ONLY_FIELDS: &[&str] = &["possibleCauses", "dietaryRecommendations", "commonMedications"];

pub fn normalize(
    task: TaskKind,
    report_kind: Option<ReportKind>,
    raw: Value,
) -> Result<ExtractionResult> {
    let mut object = match raw {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ExtractionError::InvalidShape(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )));
        }
    };

    let schema = schema_for(task);
    for field in schema.fields {
        match field.shape {
            FieldShape::Scalar => check_scalar(&object, field, field.name)?,
            FieldShape::ScalarList => default_list(&mut object, field.name)?,
            FieldShape::ObjectList(item_fields) => {
                default_list(&mut object, field.name)?;
                normalize_items(&mut object, field.name, item_fields)?;
            }
        }
    }

    if task == TaskKind::MedicalReport && report_kind != Some(ReportKind::Blood) {
        for name in BLOOD_ONLY_FIELDS {
            object.insert((*name).to_string(), Value::Array(Vec::new()));
        }
    }

    debug!(task = task.as_str(), "model output normalized");
    into_typed(task, Value::Object(object))
}

/// A required scalar must be a non-empty string; anything else is a shape
/// violation naming the field.
fn check_scalar(object: &Map<String, Value>, field: &FieldSpec, path: &str) -> Result<()> {
    match object.get(field.name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        _ if field.presence == FieldPresence::Optional => Ok(()),
        _ => Err(ExtractionError::InvalidShape(path.to_string())),
    }
}

/// Declared list fields are never absent: missing or null becomes an empty
/// array, and a present non-array value is a shape violation.
fn default_list(object: &mut Map<String, Value>, name: &str) -> Result<()> {
    match object.get(name) {
        None | Some(Value::Null) => {
            object.insert(name.to_string(), Value::Array(Vec::new()));
            Ok(())
        }
        Some(Value::Array(_)) => Ok(()),
        Some(other) => Err(ExtractionError::InvalidShape(format!(
            "{} must be an array, got {}",
            name,
            kind_of(other)
        ))),
    }
}

fn normalize_items(
    object: &mut Map<String, Value>,
    list_name: &str,
    item_fields: &'static [FieldSpec],
) -> Result<()> {
    // default_list ran first, so the entry exists and is an array
    let Some(Value::Array(items)) = object.get_mut(list_name) else {
        return Ok(());
    };

    for (index, item) in items.iter_mut().enumerate() {
        let Value::Object(entry) = item else {
            return Err(ExtractionError::InvalidShape(format!(
                "{}[{}] must be an object",
                list_name, index
            )));
        };

        for field in item_fields {
            let path = format!("{}[{}].{}", list_name, index, field.name);
            match field.presence {
                FieldPresence::Required => match entry.get(field.name) {
                    Some(Value::String(s)) if !s.trim().is_empty() => {}
                    _ => return Err(ExtractionError::InvalidShape(path)),
                },
                // Optional detail fields are absent, never blank: drop
                // nulls and whitespace-only strings.
                FieldPresence::Optional => {
                    let drop = match entry.get(field.name) {
                        Some(Value::Null) => true,
                        Some(Value::String(s)) => s.trim().is_empty(),
                        Some(_) | None => false,
                    };
                    if drop {
                        entry.remove(field.name);
                    }
                }
            }
        }
    }
    Ok(())
}

fn into_typed(task: TaskKind, value: Value) -> Result<ExtractionResult> {
    let result = match task {
        TaskKind::ProductLabel => serde_json::from_value::<LabelAnalysis>(value)
            .map(ExtractionResult::Label),
        TaskKind::Prescription => serde_json::from_value::<PrescriptionAnalysis>(value)
            .map(ExtractionResult::Prescription),
        TaskKind::MedicalReport => serde_json::from_value::<ReportSummary>(value)
            .map(ExtractionResult::Report),
    };
    result.map_err(|e| ExtractionError::InvalidShape(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
