use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};
use crate::media::MediaPayload;

/// The three analysis flows the pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    ProductLabel,
    Prescription,
    MedicalReport,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::ProductLabel => "product-label",
            TaskKind::Prescription => "prescription",
            TaskKind::MedicalReport => "medical-report",
        }
    }
}

/// Report type selector for the medical-report task. `Blood` additionally
/// gates the informational possible-causes / dietary / medication fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Blood,
    Ecg,
    Xray,
    Mri,
    Other,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Blood => "blood",
            ReportKind::Ecg => "ecg",
            ReportKind::Xray => "xray",
            ReportKind::Mri => "mri",
            ReportKind::Other => "other",
        }
    }
}

/// A fully validated request: payload, task, and (for medical reports) the
/// report type. Construction is the pre-flight validation gate; a request
/// that fails to construct never reaches the model.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub payload: MediaPayload,
    pub task: TaskKind,
    pub report_kind: Option<ReportKind>,
}

impl ExtractionRequest {
    pub fn new(raw_payload: &str, task: TaskKind, report_kind: Option<ReportKind>) -> Result<Self> {
        let payload = MediaPayload::parse(raw_payload)?;

        if task == TaskKind::MedicalReport && report_kind.is_none() {
            return Err(ExtractionError::RejectedInput(
                "medical report analysis requires a report type (blood, ecg, xray, mri or other)"
                    .to_string(),
            ));
        }

        Ok(Self {
            payload,
            task,
            report_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn label_and_prescription_need_no_report_kind() {
        assert!(ExtractionRequest::new(IMAGE, TaskKind::ProductLabel, None).is_ok());
        assert!(ExtractionRequest::new(IMAGE, TaskKind::Prescription, None).is_ok());
    }

    #[test]
    fn medical_report_requires_report_kind() {
        let err = ExtractionRequest::new(IMAGE, TaskKind::MedicalReport, None).unwrap_err();
        assert!(matches!(err, ExtractionError::RejectedInput(_)));
    }

    #[test]
    fn medical_report_accepts_every_report_kind() {
        for kind in [
            ReportKind::Blood,
            ReportKind::Ecg,
            ReportKind::Xray,
            ReportKind::Mri,
            ReportKind::Other,
        ] {
            assert!(ExtractionRequest::new(IMAGE, TaskKind::MedicalReport, Some(kind)).is_ok());
        }
    }

    #[test]
    fn invalid_payload_rejected_for_every_task() {
        for task in [
            TaskKind::ProductLabel,
            TaskKind::Prescription,
            TaskKind::MedicalReport,
        ] {
            let err =
                ExtractionRequest::new("not-a-data-uri", task, Some(ReportKind::Other)).unwrap_err();
            assert!(matches!(err, ExtractionError::RejectedInput(_)));
        }
    }

    #[test]
    fn wire_names_are_kebab_and_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskKind::MedicalReport).unwrap(),
            "\"medical-report\""
        );
        assert_eq!(serde_json::to_string(&ReportKind::Xray).unwrap(), "\"xray\"");
        let parsed: ReportKind = serde_json::from_str("\"blood\"").unwrap();
        assert_eq!(parsed, ReportKind::Blood);
    }
}
