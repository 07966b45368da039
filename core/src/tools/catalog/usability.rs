//! Usability testing scripts

use super::structured_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "script";

const PROMPT: &str = "Generate a usability testing script to test \"{{feature}}\" with a user \
who is \"{{persona}}\". The script should include a friendly introduction, 3-4 pre-test \
warm-up questions, 3-4 specific user tasks, and 3-4 post-test wrap-up questions.";

const INPUTS: [InputField; 2] = [
    InputField::new("feature", "Feature under test", "the new checkout process"),
    InputField::new("persona", "Participant", "a first-time online shopper"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsabilityScript {
    #[serde(default)]
    pub script_title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub pre_test_questions: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<ScriptTask>,
    #[serde(default)]
    pub post_test_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptTask {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub prompt: String,
}

pub fn schema() -> SchemaSpec {
    let task = SchemaSpec::object()
        .property("task", SchemaSpec::string())
        .property("prompt", SchemaSpec::string());

    SchemaSpec::object()
        .property("scriptTitle", SchemaSpec::string())
        .property("introduction", SchemaSpec::string())
        .property("preTestQuestions", SchemaSpec::array(SchemaSpec::string()))
        .property("tasks", SchemaSpec::array(task))
        .property("postTestQuestions", SchemaSpec::array(SchemaSpec::string()))
        .into()
}

/// Usability Script AI
pub struct UsabilityScriptTool;

impl DesignTool for UsabilityScriptTool {
    fn name(&self) -> &str {
        "usability-script"
    }

    fn title(&self) -> &str {
        "Usability Script AI"
    }

    fn description(&self) -> &str {
        "Draft a moderated usability test script for a feature and participant."
    }

    fn failure_message(&self) -> &str {
        "Could not generate script. Please try again."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        structured_chain(STEP, PROMPT, &INPUTS, input, schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_decodes_camel_case_sections() {
        let script: UsabilityScript = serde_json::from_value(json!({
            "scriptTitle": "Checkout test",
            "introduction": "Thanks for joining.",
            "preTestQuestions": ["How often do you shop online?"],
            "tasks": [{ "task": "Buy a mug", "prompt": "Find a mug and check out." }],
            "postTestQuestions": ["What was hardest?"]
        }))
        .unwrap();

        assert_eq!(script.pre_test_questions.len(), 1);
        assert_eq!(script.tasks[0].task, "Buy a mug");
    }
}
