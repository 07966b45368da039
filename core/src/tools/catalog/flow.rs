//! User flow breakdown

use super::structured_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "flow";

const PROMPT: &str = "Based on the user process \"{{prompt}}\", break it down into a sequence \
of steps. For each step, provide a short title and a one-sentence description.";

const INPUTS: [InputField; 1] = [InputField::new(
    "prompt",
    "User process",
    "User signs up, confirms email, and logs in for the first time.",
)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFlow {
    #[serde(default)]
    pub flow_name: String,
    #[serde(default)]
    pub steps: Vec<FlowStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    pub title: String,
    pub description: String,
}

pub fn schema() -> SchemaSpec {
    let step = SchemaSpec::object()
        .field("title", SchemaSpec::string())
        .field("description", SchemaSpec::string());

    SchemaSpec::object()
        .property("flowName", SchemaSpec::string())
        .property("steps", SchemaSpec::array(step))
        .into()
}

/// Flow Architect
pub struct UserFlowTool;

impl DesignTool for UserFlowTool {
    fn name(&self) -> &str {
        "user-flow"
    }

    fn title(&self) -> &str {
        "Flow Architect"
    }

    fn description(&self) -> &str {
        "Visualize user flows and information architecture automatically."
    }

    fn failure_message(&self) -> &str {
        "Could not generate user flow. Please try again."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        structured_chain(STEP, PROMPT, &INPUTS, input, schema())
    }
}
