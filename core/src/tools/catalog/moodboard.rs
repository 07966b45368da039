//! Moodboard image generation

use super::image_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::tools::{DesignTool, InputField, ToolInput};

pub const STEP: &str = "images";
pub const SAMPLE_COUNT: u32 = 4;

const PROMPT: &str = "A moodboard for a website with the theme \"{{prompt}}\". Generate 4 \
images representing this theme. Focus on UI elements, color palettes, textures, and overall \
feeling.";

const INPUTS: [InputField; 1] = [InputField::new(
    "prompt",
    "Theme",
    "Minimalist tech e-commerce",
)];

/// Inspo AI
pub struct MoodboardTool;

impl DesignTool for MoodboardTool {
    fn name(&self) -> &str {
        "moodboard"
    }

    fn title(&self) -> &str {
        "Inspo AI"
    }

    fn description(&self) -> &str {
        "Create inspiring mood boards from a single keyword or theme."
    }

    fn failure_message(&self) -> &str {
        "Sorry, I couldn't create a moodboard at this time."
    }

    fn inputs(&self) -> Vec<InputField> {
        INPUTS.to_vec()
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        image_chain(STEP, PROMPT, &INPUTS, input, SAMPLE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainOrchestrator;
    use crate::testing::ScriptedClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fewer_images_than_requested_is_success() {
        let client = Arc::new(ScriptedClient::new().reply_images(2));
        let chain = MoodboardTool
            .build_chain(&ToolInput::new().with("prompt", "Brutalist bakery"))
            .unwrap();

        let outputs = ChainOrchestrator::new(client.clone())
            .execute(&chain)
            .await
            .unwrap();

        let requests = client.requests();
        let request = &requests[0];
        assert_eq!(request.sample_count(), 4);
        assert!(request.prompt().contains("\"Brutalist bakery\""));
        assert_eq!(outputs.get(STEP).and_then(|r| r.images()).map(<[_]>::len), Some(2));
    }
}
