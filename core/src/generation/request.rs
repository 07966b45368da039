//! Generation request and result types

use crate::error::{Error, GenerationError, Result};
use crate::schema::SchemaSpec;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// MIME type assumed for generated images
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Which backend endpoint a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Text,
    Image,
}

/// One backend invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    kind: GenerationKind,
    prompt: String,
    schema: Option<SchemaSpec>,
    image_input: Option<InlineImage>,
    sample_count: u32,
}

impl GenerationRequest {
    /// A text request; unstructured unless a schema is attached
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            kind: GenerationKind::Text,
            prompt: prompt.into(),
            schema: None,
            image_input: None,
            sample_count: 1,
        }
    }

    /// An image request for `sample_count` variants (at least one)
    pub fn image(prompt: impl Into<String>, sample_count: u32) -> Self {
        Self {
            kind: GenerationKind::Image,
            prompt: prompt.into(),
            schema: None,
            image_input: None,
            sample_count: sample_count.max(1),
        }
    }

    /// Constrain the output shape of a text request
    pub fn with_schema(mut self, schema: SchemaSpec) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Condition a text request on an input image
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image_input = Some(image);
        self
    }

    pub fn kind(&self) -> GenerationKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn schema(&self) -> Option<&SchemaSpec> {
        self.schema.as_ref()
    }

    pub fn image_input(&self) -> Option<&InlineImage> {
        self.image_input.as_ref()
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }
}

/// Decoded outcome of one backend invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Structured value that satisfied the request schema
    Decoded(Value),
    /// Unstructured text (text request without a schema)
    RawText(String),
    /// Generated images in backend order
    Images(Vec<ImageBlob>),
}

impl GenerationResult {
    pub fn as_decoded(&self) -> Option<&Value> {
        match self {
            GenerationResult::Decoded(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            GenerationResult::RawText(text) => Some(text),
            _ => None,
        }
    }

    pub fn images(&self) -> Option<&[ImageBlob]> {
        match self {
            GenerationResult::Images(images) => Some(images),
            _ => None,
        }
    }

    /// Read a string field of a decoded value by JSON pointer (e.g. `/avatarPrompt`)
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.as_decoded()?.pointer(pointer)?.as_str()
    }

    /// Short name used in logs and error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            GenerationResult::Decoded(_) => "decoded value",
            GenerationResult::RawText(_) => "raw text",
            GenerationResult::Images(_) => "images",
        }
    }
}

/// A base64 image attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    mime_type: String,
    data: String,
}

impl InlineImage {
    /// Wrap already base64-encoded data
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let mime_type = validate_image_mime(&mime_type.into())?;
        let data = data.into();
        if data.trim().is_empty() {
            return Err(GenerationError::MissingInput {
                input: "image".to_string(),
            }
            .into());
        }
        Ok(Self { mime_type, data })
    }

    /// Encode raw image bytes
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self> {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let invalid = |message: &str| -> Error {
            GenerationError::InvalidInput {
                input: "image".to_string(),
                message: message.to_string(),
            }
            .into()
        };

        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| invalid("not a data URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("data URI has no payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("data URI is not base64 encoded"))?;

        Self::new(mime_type, payload)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

fn validate_image_mime(raw: &str) -> Result<String> {
    let parsed: mime::Mime = raw.parse().map_err(|_| GenerationError::InvalidInput {
        input: "image".to_string(),
        message: format!("unparseable MIME type '{}'", raw),
    })?;

    if parsed.type_() != mime::IMAGE {
        return Err(GenerationError::InvalidInput {
            input: "image".to_string(),
            message: format!("'{}' is not an image type", raw),
        }
        .into());
    }

    Ok(parsed.essence_str().to_string())
}

/// One generated image, base64 encoded as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    data: String,
    mime_type: String,
}

impl ImageBlob {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: DEFAULT_IMAGE_MIME.to_string(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn base64(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Renderable `data:` URI
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| Error::decode(format!("invalid base64 image data: {}", e)))
    }
}

impl Serialize for ImageBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data_uri())
    }
}
