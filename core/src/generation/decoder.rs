//! Envelope validation and payload extraction
//!
//! Text calls carry their payload as a serialized value inside
//! `candidates[0].content.parts[0].text`, so structured results are decoded
//! twice: once for the envelope, once for the embedded value. Image calls
//! carry an ordered list of base64 records under `predictions`.

use super::request::{GenerationResult, ImageBlob};
use super::wire::{GenerateContentResponse, PredictResponse};
use crate::error::{Error, Result};
use crate::schema::SchemaSpec;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tracing::debug;

/// Normalizes raw backend bodies into [`GenerationResult`]s
pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Decode a `generateContent` body. With a schema the embedded text must
    /// parse as JSON and satisfy it; without one the text is returned as is.
    pub fn decode_text(body: &str, schema: Option<&SchemaSpec>) -> Result<GenerationResult> {
        let envelope: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("malformed response envelope: {}", e)))?;

        let text = Self::first_text(envelope)?;

        match schema {
            Some(schema) => Self::decode_structured(&text, schema).map(GenerationResult::Decoded),
            None => Ok(GenerationResult::RawText(text.trim().to_string())),
        }
    }

    /// Second decode step: parse the embedded text and check it against `schema`
    pub fn decode_structured(text: &str, schema: &SchemaSpec) -> Result<Value> {
        let payload = strip_code_fence(text);
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| Error::decode(format!("model output is not valid JSON: {}", e)))?;

        schema.check(&value).map_err(|violation| {
            debug!("Schema violation in model output: {}", violation);
            Error::decode(format!("model output does not match schema {}", violation))
        })?;

        Ok(value)
    }

    /// Decode a `predict` body into images, preserving backend order
    pub fn decode_images(body: &str) -> Result<GenerationResult> {
        let envelope: PredictResponse = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("malformed response envelope: {}", e)))?;

        let predictions = envelope.predictions.unwrap_or_default();
        if predictions.is_empty() {
            return Err(Error::empty("no images were generated"));
        }

        let images = predictions
            .into_iter()
            .enumerate()
            .map(|(index, prediction)| -> Result<ImageBlob> {
                let data = prediction
                    .bytes_base64_encoded
                    .filter(|data| !data.trim().is_empty())
                    .ok_or_else(|| {
                        Error::decode(format!("prediction {} has no image data", index))
                    })?;
                if STANDARD.decode(data.as_bytes()).is_err() {
                    return Err(Error::decode(format!(
                        "prediction {} is not valid base64",
                        index
                    )));
                }
                let blob = ImageBlob::new(data);
                Ok(match prediction.mime_type {
                    Some(mime_type) => blob.with_mime_type(mime_type),
                    None => blob,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GenerationResult::Images(images))
    }

    fn first_text(envelope: GenerateContentResponse) -> Result<String> {
        let block_reason = envelope
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = envelope.candidates.unwrap_or_default().into_iter().next() else {
            return Err(Error::empty(match block_reason {
                Some(reason) => format!("prompt was blocked ({})", reason),
                None => "response has no candidates".to_string(),
            }));
        };

        let finish_reason = candidate.finish_reason;
        let text = candidate
            .content
            .and_then(|content| content.parts.unwrap_or_default().into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty());

        text.ok_or_else(|| {
            Error::empty(match finish_reason {
                Some(reason) => format!("candidate has no text (finish reason {})", reason),
                None => "candidate has no text".to_string(),
            })
        })
    }
}

/// Drop a single surrounding Markdown code fence, if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (e.g. "json") on the opening fence line. A
    // one-line fence has no newline, so the info word ends at the first
    // whitespace instead.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => match rest.find(|c: char| c.is_whitespace()) {
            Some(end) if rest[..end].chars().all(|c| c.is_ascii_alphanumeric()) => {
                &rest[end..]
            }
            _ => rest,
        },
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
