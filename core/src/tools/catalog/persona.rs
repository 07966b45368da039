//! User persona with a generated avatar.
//!
//! Two steps: the persona text, then an avatar image whose prompt is the
//! persona's `avatarPrompt` field. A failed avatar falls back to a
//! placeholder URL so the persona itself is never discarded.

use crate::chain::{Chain, ChainOutputs, ChainStep};
use crate::error::{Error, Result};
use crate::generation::{GenerationRequest, GenerationResult};
use crate::schema::SchemaSpec;
use crate::tools::prompt::render_prompt;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const PERSONA_STEP: &str = "persona";
pub const AVATAR_STEP: &str = "avatar";

/// Shown in place of an avatar that could not be generated
pub const PLACEHOLDER_AVATAR_URL: &str = "https://placehold.co/128x128/e0e7ff/3730a3?text=:)";

const PROMPT: &str = "Generate a detailed user persona based on the description: \
\"{{prompt}}\". Create a realistic name, age, occupation, a short bio, a list of goals, and a \
list of frustrations. Also, create a detailed text prompt for an image generator to create a \
photorealistic avatar for this person (e.g., \"Photorealistic headshot of a 28-year-old woman \
with brown hair, smiling, in a bright, modern office setting\").";

const INPUTS: [InputField; 1] = [InputField::new(
    "prompt",
    "Audience description",
    "Urban millennial, eco-conscious, uses public transport",
)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub name: String,
    pub age: f64,
    pub occupation: String,
    pub bio: String,
    pub goals: Vec<String>,
    pub frustrations: Vec<String>,
    pub avatar_prompt: String,
}

pub fn schema() -> SchemaSpec {
    SchemaSpec::object()
        .field("name", SchemaSpec::string())
        .field("age", SchemaSpec::number())
        .field("occupation", SchemaSpec::string())
        .field("bio", SchemaSpec::string())
        .field("goals", SchemaSpec::array(SchemaSpec::string()))
        .field("frustrations", SchemaSpec::array(SchemaSpec::string()))
        .field("avatarPrompt", SchemaSpec::string())
        .into()
}

/// Renderable avatar source: the generated image as a data URI, or the placeholder
pub fn avatar_src(outputs: &ChainOutputs) -> String {
    outputs
        .get(AVATAR_STEP)
        .and_then(GenerationResult::images)
        .and_then(|images| images.first())
        .map(|image| image.data_uri())
        .unwrap_or_else(|| PLACEHOLDER_AVATAR_URL.to_string())
}

fn avatar_request(outputs: &ChainOutputs) -> Result<GenerationRequest> {
    let prompt = outputs
        .require(PERSONA_STEP)?
        .str_at("/avatarPrompt")
        .ok_or_else(|| Error::decode("persona has no avatarPrompt"))?;

    Ok(GenerationRequest::image(prompt, 1))
}

/// PersonaGen AI
pub struct PersonaTool;

impl DesignTool for PersonaTool {
    fn name(&self) -> &str {
        "persona"
    }

    fn title(&self) -> &str {
        "PersonaGen AI"
    }

    fn description(&self) -> &str {
        "Instantly create detailed user personas from a simple description."
    }

    fn failure_message(&self) -> &str {
        "Sorry, I couldn't create a persona. Please try a different prompt."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        let prompt = render_prompt(PROMPT, &input.resolve(&INPUTS))?;
        let persona = GenerationRequest::text(prompt).with_schema(schema());

        Ok(Chain::new()
            .step(ChainStep::fixed(PERSONA_STEP, persona))
            .step(
                ChainStep::new(AVATAR_STEP, avatar_request).with_fallback(
                    GenerationResult::RawText(PLACEHOLDER_AVATAR_URL.to_string()),
                ),
            ))
    }
}
