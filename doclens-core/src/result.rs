use serde::{Deserialize, Serialize};

/// One ingredient identified on a product label. Only the name is
/// guaranteed; every detail field is absent (not empty) when the model
/// had nothing to say about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pros_cons: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects_allergens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings_regulatory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAnalysis {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

/// One medicine identified on a prescription. All detail fields are
/// mandatory; output missing any of them fails normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub name: String,
    pub description: String,
    pub side_effects: String,
    pub precautions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionAnalysis {
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

/// Summarized medical report. `summary` and `disclaimer` are mandatory;
/// every list field is always present, at least as an empty vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub summary: String,
    #[serde(default)]
    pub key_findings: Vec<String>,
    #[serde(default)]
    pub abnormal_results: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub possible_causes: Vec<String>,
    #[serde(default)]
    pub dietary_recommendations: Vec<String>,
    #[serde(default)]
    pub common_medications: Vec<String>,
    pub disclaimer: String,
}

/// The validated, defaulted output of one extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Label(LabelAnalysis),
    Prescription(PrescriptionAnalysis),
    Report(ReportSummary),
}
