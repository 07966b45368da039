//! The design-tool catalog

pub mod critique;
pub mod flow;
pub mod icons;
pub mod layout;
pub mod microcopy;
pub mod moodboard;
pub mod palette;
pub mod persona;
pub mod spec_check;
pub mod typography;
pub mod usability;

pub use critique::DesignCritiqueTool;
pub use flow::UserFlowTool;
pub use icons::IconForgeTool;
pub use layout::LayoutTool;
pub use microcopy::MicrocopyTool;
pub use moodboard::MoodboardTool;
pub use palette::ColorPaletteTool;
pub use persona::PersonaTool;
pub use spec_check::SpecCheckTool;
pub use typography::FontPairingTool;
pub use usability::UsabilityScriptTool;

use super::base::{InputField, ToolInput};
use super::prompt::render_prompt;
use crate::chain::{Chain, ChainStep};
use crate::error::Result;
use crate::generation::GenerationRequest;
use crate::schema::SchemaSpec;

/// One schema-constrained text step named `step`
pub(crate) fn structured_chain(
    step: &str,
    template: &str,
    fields: &[InputField],
    input: &ToolInput,
    schema: SchemaSpec,
) -> Result<Chain> {
    let prompt = render_prompt(template, &input.resolve(fields))?;
    let request = GenerationRequest::text(prompt).with_schema(schema);
    Ok(Chain::single(ChainStep::fixed(step, request)))
}

/// One image step producing `sample_count` variants
pub(crate) fn image_chain(
    step: &str,
    template: &str,
    fields: &[InputField],
    input: &ToolInput,
    sample_count: u32,
) -> Result<Chain> {
    let prompt = render_prompt(template, &input.resolve(fields))?;
    let request = GenerationRequest::image(prompt, sample_count);
    Ok(Chain::single(ChainStep::fixed(step, request)))
}

/// One text step conditioned on the uploaded image
pub(crate) fn image_analysis_chain(
    step: &str,
    prompt: &str,
    input: &ToolInput,
    schema: Option<SchemaSpec>,
) -> Result<Chain> {
    let mut request = GenerationRequest::text(prompt).with_image(input.require_image()?.clone());
    if let Some(schema) = schema {
        request = request.with_schema(schema);
    }
    Ok(Chain::single(ChainStep::fixed(step, request)))
}
