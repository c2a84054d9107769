use serde_json::{Map, Value, json};

use crate::task::TaskKind;

/// Whether a field must be present in the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPresence {
    Required,
    Optional,
}

/// Shape of a declared output field.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    /// A single string value.
    Scalar,
    /// An ordered list of string values.
    ScalarList,
    /// An ordered list of objects, each with its own field table.
    ObjectList(&'static [FieldSpec]),
}

/// One declared field of an extraction schema. Field names use the wire
/// spelling (camelCase) so the same table drives both the model's response
/// format and the normalizer.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: FieldPresence,
    pub shape: FieldShape,
    pub description: &'static str,
}

/// The declared output shape for one extraction task. Three fixed schemas
/// exist, one per task; all are immutable statics.
#[derive(Debug)]
pub struct ExtractionSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

const INGREDIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        presence: FieldPresence::Required,
        shape: FieldShape::Scalar,
        description: "The name of the ingredient as it appears on the label.",
    },
    FieldSpec {
        name: "description",
        presence: FieldPresence::Optional,
        shape: FieldShape::Scalar,
        description: "A brief description of what the ingredient is.",
    },
    FieldSpec {
        name: "commonUses",
        presence: FieldPresence::Optional,
        shape: FieldShape::Scalar,
        description: "Common uses or functions of the ingredient in products.",
    },
    FieldSpec {
        name: "prosCons",
        presence: FieldPresence::Optional,
        shape: FieldShape::Scalar,
        description: "Potential benefits and drawbacks or considerations.",
    },
    FieldSpec {
        name: "sideEffectsAllergens",
        presence: FieldPresence::Optional,
        shape: FieldShape::Scalar,
        description: "Known potential side effects or allergen information.",
    },
    FieldSpec {
        name: "warningsRegulatory",
        presence: FieldPresence::Optional,
        shape: FieldShape::Scalar,
        description: "Specific warnings, safety notes, or regulatory status.",
    },
];

const MEDICINE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        presence: FieldPresence::Required,
        shape: FieldShape::Scalar,
        description: "The full name of the medicine, including dosage if available.",
    },
    FieldSpec {
        name: "description",
        presence: FieldPresence::Required,
        shape: FieldShape::Scalar,
        description: "What the medicine is typically used for, or its drug class.",
    },
    FieldSpec {
        name: "sideEffects",
        presence: FieldPresence::Required,
        shape: FieldShape::Scalar,
        description: "Common and potentially serious side effects.",
    },
    FieldSpec {
        name: "precautions",
        presence: FieldPresence::Required,
        shape: FieldShape::Scalar,
        description: "Important precautions, warnings, or contraindications.",
    },
];

pub static PRODUCT_LABEL_SCHEMA: ExtractionSchema = ExtractionSchema {
    name: "product_label_analysis",
    fields: &[FieldSpec {
        name: "ingredients",
        presence: FieldPresence::Optional,
        shape: FieldShape::ObjectList(INGREDIENT_FIELDS),
        description: "Ingredients identified on the product label, with details for each.",
    }],
};

pub static PRESCRIPTION_SCHEMA: ExtractionSchema = ExtractionSchema {
    name: "prescription_analysis",
    fields: &[FieldSpec {
        name: "medicines",
        presence: FieldPresence::Optional,
        shape: FieldShape::ObjectList(MEDICINE_FIELDS),
        description: "Each medicine identified in the prescription.",
    }],
};

pub static MEDICAL_REPORT_SCHEMA: ExtractionSchema = ExtractionSchema {
    name: "medical_report_summary",
    fields: &[
        FieldSpec {
            name: "summary",
            presence: FieldPresence::Required,
            shape: FieldShape::Scalar,
            description: "A clear, concise summary of the key findings in the report.",
        },
        FieldSpec {
            name: "keyFindings",
            presence: FieldPresence::Optional,
            shape: FieldShape::ScalarList,
            description: "The most important specific findings or measurements.",
        },
        FieldSpec {
            name: "abnormalResults",
            presence: FieldPresence::Optional,
            shape: FieldShape::ScalarList,
            description: "Results flagged as abnormal, with reference ranges when present.",
        },
        FieldSpec {
            name: "recommendations",
            presence: FieldPresence::Optional,
            shape: FieldShape::ScalarList,
            description: "Recommendations or next steps mentioned in the report itself.",
        },
        FieldSpec {
            name: "possibleCauses",
            presence: FieldPresence::Optional,
            shape: FieldShape::ScalarList,
            description: "[Blood reports only] General potential causes, informational only.",
        },
        FieldSpec {
            name: "dietaryRecommendations",
            presence: FieldPresence::Optional,
            shape: FieldShape::ScalarList,
            description: "[Blood reports only] General dietary suggestions, not medical advice.",
        },
        FieldSpec {
            name: "commonMedications",
            presence: FieldPresence::Optional,
            shape: FieldShape::ScalarList,
            description: "[Blood reports only] Example medication classes, not prescription advice.",
        },
        FieldSpec {
            name: "disclaimer",
            presence: FieldPresence::Required,
            shape: FieldShape::Scalar,
            description: "Mandatory disclaimer: AI-generated, informational only.",
        },
    ],
};

/// The fixed schema for a task. Defined at process start, never mutated.
pub fn schema_for(task: TaskKind) -> &'static ExtractionSchema {
    match task {
        TaskKind::ProductLabel => &PRODUCT_LABEL_SCHEMA,
        TaskKind::Prescription => &PRESCRIPTION_SCHEMA,
        TaskKind::MedicalReport => &MEDICAL_REPORT_SCHEMA,
    }
}

impl ExtractionSchema {
    /// Render the field table as a JSON schema suitable for a structured
    /// output `response_format`.
    pub fn to_json_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": properties_of(self.fields),
            "required": required_of(self.fields),
            "additionalProperties": false,
        })
    }
}

fn properties_of(fields: &[FieldSpec]) -> Value {
    let mut props = Map::new();
    for field in fields {
        let prop = match field.shape {
            FieldShape::Scalar => json!({
                "type": "string",
                "description": field.description,
            }),
            FieldShape::ScalarList => json!({
                "type": "array",
                "items": { "type": "string" },
                "description": field.description,
            }),
            FieldShape::ObjectList(item_fields) => json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": properties_of(item_fields),
                    "required": required_of(item_fields),
                    "additionalProperties": false,
                },
                "description": field.description,
            }),
        };
        props.insert(field.name.to_string(), prop);
    }
    Value::Object(props)
}

fn required_of(fields: &[FieldSpec]) -> Value {
    Value::Array(
        fields
            .iter()
            .filter(|f| f.presence == FieldPresence::Required)
            .map(|f| Value::String(f.name.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_schema_per_task() {
        assert_eq!(schema_for(TaskKind::ProductLabel).name, "product_label_analysis");
        assert_eq!(schema_for(TaskKind::Prescription).name, "prescription_analysis");
        assert_eq!(schema_for(TaskKind::MedicalReport).name, "medical_report_summary");
    }

    #[test]
    fn medical_report_json_schema_requires_summary_and_disclaimer() {
        let schema = MEDICAL_REPORT_SCHEMA.to_json_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert!(required.contains(&Value::String("summary".into())));
        assert!(required.contains(&Value::String("disclaimer".into())));
        assert_eq!(schema["properties"]["keyFindings"]["type"], "array");
    }

    #[test]
    fn medicine_items_require_all_detail_fields() {
        let schema = PRESCRIPTION_SCHEMA.to_json_schema();
        let required = schema["properties"]["medicines"]["items"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 4);
    }

    #[test]
    fn ingredient_items_require_only_the_name() {
        let schema = PRODUCT_LABEL_SCHEMA.to_json_schema();
        let required = schema["properties"]["ingredients"]["items"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required, &vec![Value::String("name".into())]);
    }
}
