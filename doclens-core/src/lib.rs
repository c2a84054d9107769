//! Schema-validated, single-shot AI extraction pipeline.
//!
//! One validated document in, one multimodal model call, one normalized
//! typed result out. Three tasks are supported: product-label ingredient
//! analysis, prescription medicine analysis, and medical-report
//! summarization. Each request is independent and stateless; nothing is
//! retried, cached or shared between requests.

pub mod error;
pub mod extractor;
pub mod media;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod result;
pub mod schema;
pub mod task;

// Re-export commonly used types
pub use error::{ExtractionError, Result};
pub use extractor::Extractor;
pub use media::{MediaKind, MediaPayload};
pub use model::{ModelClient, ModelConfig, OpenRouterClient};
pub use normalize::normalize;
pub use prompt::render_prompt;
pub use result::{
    ExtractionResult, Ingredient, LabelAnalysis, Medicine, PrescriptionAnalysis, ReportSummary,
};
pub use schema::{ExtractionSchema, FieldPresence, FieldShape, FieldSpec, schema_for};
pub use task::{ExtractionRequest, ReportKind, TaskKind};
