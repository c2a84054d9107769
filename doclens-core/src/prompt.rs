//! Prompt templates for the three extraction tasks.
//!
//! These are declarative configuration, not logic: one fixed instruction per
//! task, with a single branch on the report kind for medical reports. The
//! document itself travels as an attached media block, so the templates
//! refer to "the provided image/document".

use crate::task::{ReportKind, TaskKind};

pub const DISCLAIMER_TEXT: &str = "This analysis is AI-generated and for informational purposes \
only. It is NOT a substitute for professional medical advice. Consult with a qualified \
healthcare provider for any health concerns, diagnosis, or treatment decisions.";

const PRODUCT_LABEL_PROMPT: &str = r#"You are an expert product analyst specializing in ingredient labels.
Analyze the provided product label image.

1. Identify all ingredients listed on the label. Ignore marketing text, instructions, barcodes, or company information.
2. For each identified ingredient, provide the following details based on your knowledge:
   - name: The ingredient name as accurately as possible from the label.
   - description: A brief description of what the ingredient is.
   - commonUses: Common applications or functions of this ingredient in consumer products.
   - prosCons: Potential benefits and drawbacks or things to consider about this ingredient.
   - sideEffectsAllergens: Any known potential side effects or common allergen concerns.
   - warningsRegulatory: Any notable warnings, safety guidelines, or regulatory status (like FDA GRAS).

Return the results strictly in the specified JSON output format. If information for a field
is not available, omit the field entirely rather than inventing content. Ensure the 'name'
field always contains the ingredient name found on the label."#;

const PRESCRIPTION_PROMPT: &str = r#"You are a helpful assistant knowledgeable about medications.
Analyze the provided prescription image.

1. Identify each distinct medicine listed on the prescription. Include the dosage (e.g., 10mg, 500mg) if specified.
2. For each identified medicine, provide the following information based on your knowledge:
   - name: The full name of the medicine, including dosage (e.g., "Lisinopril 10mg").
   - description: Briefly explain what the medicine is used for or its drug class.
   - sideEffects: List common and important potential side effects.
   - precautions: Mention key warnings, precautions, or things to be aware of when taking this medication.

Focus solely on extracting medication information. Ignore patient names, doctor names, dates,
and pharmacy details unless they are part of the medication instruction itself.

Return the results strictly in the specified JSON output format. If multiple medicines are
found, include each as an object in the 'medicines' array. If no medicines can be clearly
identified, return an empty 'medicines' array."#;

const BLOOD_REPORT_EXTRA: &str = r#"
Because this is a blood report, additionally:
5. Provide Possible Causes: based on the abnormal results or key findings, list some general
   potential causes. Preface with "General potential causes could include..." and keep it
   informational, not diagnostic.
6. Suggest Dietary Recommendations: provide general dietary suggestions that might be relevant.
   State clearly these are general suggestions, not personalized advice.
7. Mention Common Medications: briefly mention examples of types of medications that are
   sometimes used for conditions related to the findings. State this is informational only
   and NOT a prescription or medical advice."#;

const NON_BLOOD_REPORT_NOTE: &str = r#"
Leave the 'possibleCauses', 'dietaryRecommendations', and 'commonMedications' fields as
empty arrays; they apply to blood reports only."#;

/// Render the instruction text for a task. `report_kind` is only consulted
/// for the medical-report task.
pub fn render_prompt(task: TaskKind, report_kind: Option<ReportKind>) -> String {
    match task {
        TaskKind::ProductLabel => PRODUCT_LABEL_PROMPT.to_string(),
        TaskKind::Prescription => PRESCRIPTION_PROMPT.to_string(),
        TaskKind::MedicalReport => {
            let kind = report_kind.unwrap_or(ReportKind::Other);
            let extra = if kind == ReportKind::Blood {
                BLOOD_REPORT_EXTRA
            } else {
                NON_BLOOD_REPORT_NOTE
            };
            format!(
                r#"You are an expert medical assistant skilled at interpreting and summarizing medical reports.
Analyze the provided medical report, which is stated to be a '{kind}' report.

Your tasks are:
1. Summarize: generate a clear, concise summary of the overall report in simple terms,
   focusing on the main conclusions or status.
2. Extract Key Findings: identify and list the most important specific measurements,
   observations, or findings mentioned.
3. Highlight Abnormal Results: list any results explicitly flagged as abnormal, high, low,
   or outside the normal range. Include the value and reference range if available in the report.
4. Extract Recommendations: list any specific recommendations, follow-up actions, or next
   steps mentioned within the report text. Do not add your own suggestions.
{extra}

Always populate the 'disclaimer' field with exactly: "{disclaimer}"

Be objective: report only what is present in the document for tasks 1-4. Ignore headers,
footers, and patient/doctor identifiers unless crucial for context. If a section has no
relevant information in the report, return an empty array for that field. The 'summary'
and 'disclaimer' fields must always be populated.

Return the results strictly in the specified JSON output format."#,
                kind = kind.as_str(),
                extra = extra,
                disclaimer = DISCLAIMER_TEXT,
            )
        }
    }
}
