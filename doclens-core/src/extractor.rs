//! The extraction invoker: one validated request in, one model call, one
//! normalized result out.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ExtractionError, Result};
use crate::model::ModelClient;
use crate::normalize::normalize;
use crate::prompt::render_prompt;
use crate::result::{ExtractionResult, PrescriptionAnalysis};
use crate::schema::schema_for;
use crate::task::{ExtractionRequest, TaskKind};

pub struct Extractor {
    client: Arc<dyn ModelClient>,
}

impl Extractor {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Run one extraction: render the task prompt, issue exactly one model
    /// call with the task schema as the required response shape, and
    /// normalize the output. No retry, no caching; a failed call surfaces
    /// as `ModelFailure` with the underlying message preserved.
    pub async fn run(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        let prompt = render_prompt(request.task, request.report_kind);
        let schema = schema_for(request.task);

        info!(task = request.task.as_str(), "invoking extraction");

        let raw = self
            .client
            .extract(&prompt, &request.payload, schema)
            .await
            .map_err(|e| ExtractionError::ModelFailure(e.to_string()))?;

        match raw {
            Some(value) => normalize(request.task, request.report_kind, value),
            None => self.handle_empty_output(request),
        }
    }

    // The model produced no structured output at all. Prescriptions treat
    // this as "no medicines identified"; medical reports fail the mandatory
    // summary/disclaimer check; product labels surface it as EmptyResponse.
    // The asymmetry is inherited from the documented contract.
    fn handle_empty_output(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        warn!(task = request.task.as_str(), "model returned no structured output");
        match request.task {
            TaskKind::Prescription => Ok(ExtractionResult::Prescription(PrescriptionAnalysis {
                medicines: Vec::new(),
            })),
            TaskKind::MedicalReport => {
                normalize(request.task, request.report_kind, Value::Null)
            }
            TaskKind::ProductLabel => Err(ExtractionError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaPayload;
    use crate::schema::ExtractionSchema;
    use crate::task::ReportKind;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    /// Scripted model client: returns a fixed outcome and counts calls.
    struct MockClient {
        outcome: std::result::Result<Option<Value>, String>,
        calls: AtomicUsize,
    }

    impl MockClient {
        fn returning(value: Value) -> Self {
            Self {
                outcome: Ok(Some(value)),
                calls: AtomicUsize::new(0),
            }
        }

        fn returning_nothing() -> Self {
            Self {
                outcome: Ok(None),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for MockClient {
        async fn extract(
            &self,
            _prompt: &str,
            _media: &MediaPayload,
            _schema: &ExtractionSchema,
        ) -> anyhow::Result<Option<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(value) => Ok(value.clone()),
                Err(message) => Err(anyhow!("{}", message)),
            }
        }
    }

    #[tokio::test]
    async fn product_label_single_ingredient() {
        let client = Arc::new(MockClient::returning(json!({
            "ingredients": [{ "name": "Water" }]
        })));
        let extractor = Extractor::new(client.clone());
        let request = ExtractionRequest::new(IMAGE, TaskKind::ProductLabel, None).unwrap();

        let ExtractionResult::Label(analysis) = extractor.run(&request).await.unwrap() else {
            panic!("expected label analysis");
        };
        assert_eq!(analysis.ingredients.len(), 1);
        assert_eq!(analysis.ingredients[0].name, "Water");
        assert!(analysis.ingredients[0].description.is_none());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn prescription_with_no_medicines_is_not_an_error() {
        let client = Arc::new(MockClient::returning(json!({ "medicines": [] })));
        let extractor = Extractor::new(client);
        let request = ExtractionRequest::new(IMAGE, TaskKind::Prescription, None).unwrap();

        let ExtractionResult::Prescription(analysis) = extractor.run(&request).await.unwrap()
        else {
            panic!("expected prescription analysis");
        };
        assert!(analysis.medicines.is_empty());
    }

    #[tokio::test]
    async fn xray_report_with_only_mandatory_fields() {
        let client = Arc::new(MockClient::returning(json!({
            "summary": "Normal",
            "disclaimer": "AI-generated, informational only."
        })));
        let extractor = Extractor::new(client);
        let request =
            ExtractionRequest::new(IMAGE, TaskKind::MedicalReport, Some(ReportKind::Xray)).unwrap();

        let ExtractionResult::Report(summary) = extractor.run(&request).await.unwrap() else {
            panic!("expected report summary");
        };
        assert_eq!(summary.summary, "Normal");
        assert!(summary.key_findings.is_empty());
        assert!(summary.abnormal_results.is_empty());
        assert!(summary.recommendations.is_empty());
        assert!(summary.possible_causes.is_empty());
        assert!(summary.dietary_recommendations.is_empty());
        assert!(summary.common_medications.is_empty());
    }

    #[tokio::test]
    async fn report_without_summary_fails_with_invalid_shape() {
        let client = Arc::new(MockClient::returning(json!({
            "disclaimer": "AI-generated."
        })));
        let extractor = Extractor::new(client);
        let request =
            ExtractionRequest::new(IMAGE, TaskKind::MedicalReport, Some(ReportKind::Blood)).unwrap();

        let err = extractor.run(&request).await.unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidShape(field) if field == "summary"));
    }

    #[tokio::test]
    async fn rejected_input_never_reaches_the_model() {
        // Validation happens at request construction, before the extractor
        // (and thus the model client) is ever involved.
        let err = ExtractionRequest::new("not-a-data-uri", TaskKind::ProductLabel, None)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::RejectedInput(_)));

        let client = Arc::new(MockClient::returning(json!({})));
        let _extractor = Extractor::new(client.clone());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn model_error_surfaces_as_model_failure_with_message() {
        let client = Arc::new(MockClient::failing("quota exceeded"));
        let extractor = Extractor::new(client.clone());
        let request = ExtractionRequest::new(IMAGE, TaskKind::Prescription, None).unwrap();

        let err = extractor.run(&request).await.unwrap_err();
        match err {
            ExtractionError::ModelFailure(message) => assert!(message.contains("quota exceeded")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_output_fails_product_label() {
        let client = Arc::new(MockClient::returning_nothing());
        let extractor = Extractor::new(client);
        let request = ExtractionRequest::new(IMAGE, TaskKind::ProductLabel, None).unwrap();

        let err = extractor.run(&request).await.unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyResponse));
    }

    #[tokio::test]
    async fn empty_output_means_no_medicines_for_prescription() {
        let client = Arc::new(MockClient::returning_nothing());
        let extractor = Extractor::new(client);
        let request = ExtractionRequest::new(IMAGE, TaskKind::Prescription, None).unwrap();

        let ExtractionResult::Prescription(analysis) = extractor.run(&request).await.unwrap()
        else {
            panic!("expected prescription analysis");
        };
        assert!(analysis.medicines.is_empty());
    }

    #[tokio::test]
    async fn empty_output_fails_medical_report_on_missing_summary() {
        let client = Arc::new(MockClient::returning_nothing());
        let extractor = Extractor::new(client);
        let request =
            ExtractionRequest::new(IMAGE, TaskKind::MedicalReport, Some(ReportKind::Mri)).unwrap();

        let err = extractor.run(&request).await.unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidShape(_)));
    }
}
