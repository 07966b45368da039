//! Microcopy suggestions for UI components

use super::structured_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "suggestions";

const PROMPT: &str = "Generate 3 microcopy options for a UI component: \"{{component}}\". The \
desired tone is \"{{tone}}\". For each option, provide a headline, body text, and a primary \
button label.";

const INPUTS: [InputField; 2] = [
    InputField::new("component", "UI component", "Confirmation Modal"),
    InputField::new("tone", "Tone of voice", "Friendly and reassuring"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopySuggestions {
    #[serde(default)]
    pub suggestions: Vec<CopySuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopySuggestion {
    pub headline: String,
    pub body: String,
    pub primary_button: String,
}

pub fn schema() -> SchemaSpec {
    let suggestion = SchemaSpec::object()
        .field("headline", SchemaSpec::string())
        .field("body", SchemaSpec::string())
        .field("primary_button", SchemaSpec::string());

    SchemaSpec::object()
        .property("suggestions", SchemaSpec::array(suggestion))
        .into()
}

/// Copy AI
pub struct MicrocopyTool;

impl DesignTool for MicrocopyTool {
    fn name(&self) -> &str {
        "microcopy"
    }

    fn title(&self) -> &str {
        "Copy AI"
    }

    fn description(&self) -> &str {
        "Generate compelling microcopy for buttons, modals, and more."
    }

    fn failure_message(&self) -> &str {
        "Could not generate copy. Please try again."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        structured_chain(STEP, PROMPT, &INPUTS, input, schema())
    }
}
