use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};

/// Media kinds the pipeline accepts. Anything else declared in a data URI
/// is rejected before a model call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Pdf,
}

/// A user-supplied document encoded as a `data:<media-type>;base64,<body>`
/// string. Constructed once at the input boundary, consumed exactly once by
/// the extractor, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPayload {
    kind: MediaKind,
    uri: String,
}

impl MediaPayload {
    /// Parse and validate a data URI.
    ///
    /// Rejects inputs that do not start with `data:`, declare a media type
    /// other than `image/*` or `application/pdf`, lack the `;base64,`
    /// marker, or carry an empty encoded body. The check is on the declared
    /// kind: a syntactically valid data URI carrying `text/plain` is still
    /// rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let rest = raw.strip_prefix("data:").ok_or_else(|| {
            ExtractionError::RejectedInput(
                "document must be a base64 data URI (data:<media-type>;base64,...)".to_string(),
            )
        })?;

        let media_type_end = rest.find([';', ',']).ok_or_else(|| {
            ExtractionError::RejectedInput("malformed data URI: no media type delimiter".to_string())
        })?;
        let media_type = &rest[..media_type_end];

        let kind = if media_type.starts_with("image/") {
            MediaKind::Image
        } else if media_type == "application/pdf" {
            MediaKind::Pdf
        } else {
            return Err(ExtractionError::RejectedInput(format!(
                "unsupported media type '{}': expected an image or a PDF",
                media_type
            )));
        };

        let body = rest[media_type_end..]
            .strip_prefix(";base64,")
            .ok_or_else(|| {
                ExtractionError::RejectedInput(
                    "data URI must be base64 encoded (missing ';base64,' marker)".to_string(),
                )
            })?;

        if body.is_empty() {
            return Err(ExtractionError::RejectedInput(
                "data URI carries an empty document body".to_string(),
            ));
        }

        Ok(Self {
            kind,
            uri: raw.to_string(),
        })
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The full data URI, passed through verbatim to the model transport.
    pub fn as_uri(&self) -> &str {
        &self.uri
    }
}
