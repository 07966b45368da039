//! Request and response envelopes of the Generative Language API

use super::request::GenerationRequest;
use crate::schema::SchemaSpec;
use serde::{Deserialize, Serialize};

pub(crate) const JSON_MIME: &str = "application/json";

// -- generateContent --------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig<'a> {
    pub response_mime_type: &'a str,
    pub response_schema: &'a SchemaSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

// -- predict ----------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub instances: Vec<Instance<'a>>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct Instance<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictParameters {
    pub sample_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    pub predictions: Option<Vec<Prediction>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}

/// Build the `generateContent` body for a text request
pub(crate) fn text_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    let mut parts = vec![Part::Text {
        text: request.prompt(),
    }];
    if let Some(image) = request.image_input() {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type(),
                data: image.data(),
            },
        });
    }

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: request.schema().map(|schema| GenerationConfig {
            response_mime_type: JSON_MIME,
            response_schema: schema,
        }),
    }
}

/// Build the `predict` body for an image request
pub(crate) fn image_body(request: &GenerationRequest) -> PredictRequest<'_> {
    PredictRequest {
        instances: vec![Instance {
            prompt: request.prompt(),
        }],
        parameters: PredictParameters {
            sample_count: request.sample_count(),
        },
    }
}
