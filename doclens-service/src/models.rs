use doclens_core::ReportKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeLabelRequest {
    /// Product label photo as a base64 data URI.
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzePrescriptionRequest {
    /// Prescription photo as a base64 data URI.
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeReportRequest {
    /// Medical report (photo or PDF) as a base64 data URI.
    pub document: String,
    /// Report type selector. Optional on the wire so the pipeline's own
    /// validation can reject its absence with a clear message.
    #[serde(default)]
    pub report_type: Option<ReportKind>,
}
