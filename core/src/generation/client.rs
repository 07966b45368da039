//! Generation client trait

use super::request::{GenerationRequest, GenerationResult, ImageBlob, InlineImage};
use crate::error::{Error, Result};
use crate::schema::SchemaSpec;
use async_trait::async_trait;
use serde_json::Value;

/// Transport-level contract for text and image generation.
///
/// Implementations perform exactly one backend call per [`generate`] and never
/// retry; retrying is the caller's decision.
///
/// [`generate`]: GenerationClient::generate
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one request and decode its response
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    /// Get the backend name
    fn backend_name(&self) -> &str;

    /// Schema-constrained text generation
    async fn generate_text(&self, prompt: &str, schema: &SchemaSpec) -> Result<Value> {
        let request = GenerationRequest::text(prompt).with_schema(schema.clone());
        match self.generate(&request).await? {
            GenerationResult::Decoded(value) => Ok(value),
            other => Err(Error::decode(format!(
                "expected a decoded value, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Image generation with `sample_count` requested variants
    async fn generate_images(&self, prompt: &str, sample_count: u32) -> Result<Vec<ImageBlob>> {
        let request = GenerationRequest::image(prompt, sample_count);
        match self.generate(&request).await? {
            GenerationResult::Images(images) => Ok(images),
            other => Err(Error::decode(format!(
                "expected images, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Text generation conditioned on an input image. Without a schema the
    /// result is [`GenerationResult::RawText`].
    async fn generate_text_with_image(
        &self,
        prompt: &str,
        image: &InlineImage,
        schema: Option<&SchemaSpec>,
    ) -> Result<GenerationResult> {
        let mut request = GenerationRequest::text(prompt).with_image(image.clone());
        if let Some(schema) = schema {
            request = request.with_schema(schema.clone());
        }
        self.generate(&request).await
    }
}
