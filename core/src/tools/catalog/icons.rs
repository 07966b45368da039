//! Icon image generation

use super::image_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::tools::{DesignTool, InputField, ToolInput};

pub const STEP: &str = "icons";
pub const SAMPLE_COUNT: u32 = 4;

const PROMPT: &str = "A single, clean, vector-style icon for \"{{prompt}}\". The icon should \
be on a pure white background, minimal, and suitable for a modern UI. Line art, single color.";

const INPUTS: [InputField; 1] = [InputField::new(
    "prompt",
    "Icon description",
    "A simple, bold \"home\" icon, line art style",
)];

/// IconForge AI
pub struct IconForgeTool;

impl DesignTool for IconForgeTool {
    fn name(&self) -> &str {
        "icon-forge"
    }

    fn title(&self) -> &str {
        "IconForge AI"
    }

    fn description(&self) -> &str {
        "Design unique, SVG-style icons with a text prompt."
    }

    fn failure_message(&self) -> &str {
        "Sorry, I couldn't forge any icons at this time."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        image_chain(STEP, PROMPT, &INPUTS, input, SAMPLE_COUNT)
    }
}
