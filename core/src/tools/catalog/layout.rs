//! Wireframe layout suggestions

use super::structured_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "layouts";

const PROMPT: &str = "Suggest 3 different wireframe layouts for a UI component containing: \
{{prompt}}. Describe each layout with a name and a list of components in their visual order.";

const INPUTS: [InputField; 1] = [InputField::new(
    "prompt",
    "Components",
    "A landing page hero with a title, a short paragraph, and two buttons",
)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layouts {
    #[serde(default)]
    pub layouts: Vec<Wireframe>,
}

/// Components listed top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wireframe {
    pub name: String,
    pub components: Vec<String>,
}

pub fn schema() -> SchemaSpec {
    let layout = SchemaSpec::object()
        .field("name", SchemaSpec::string())
        .field("components", SchemaSpec::array(SchemaSpec::string()));

    SchemaSpec::object()
        .property("layouts", SchemaSpec::array(layout))
        .into()
}

/// Layout AI
pub struct LayoutTool;

impl DesignTool for LayoutTool {
    fn name(&self) -> &str {
        "layout"
    }

    fn title(&self) -> &str {
        "Layout AI"
    }

    fn description(&self) -> &str {
        "Explore different wireframe layouts for your screen components."
    }

    fn failure_message(&self) -> &str {
        "Could not generate layouts. Please try again."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        structured_chain(STEP, PROMPT, &INPUTS, input, schema())
    }
}
