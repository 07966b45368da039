//! UX critique of an uploaded screenshot

use super::image_analysis_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::tools::{DesignTool, ToolInput};

pub const STEP: &str = "critique";

const PROMPT: &str = "Analyze this UI screenshot. Provide a UX critique covering these areas: \
Visual Hierarchy, Color Contrast & Accessibility, Layout & Spacing, and Clarity of \
Information. Format the response as a list of bullet points for each area.";

/// Critique AI
pub struct DesignCritiqueTool;

impl DesignTool for DesignCritiqueTool {
    fn name(&self) -> &str {
        "design-critique"
    }

    fn title(&self) -> &str {
        "Critique AI"
    }

    fn description(&self) -> &str {
        "Get instant feedback and analysis on your UI/UX designs."
    }

    fn failure_message(&self) -> &str {
        "Sorry, I couldn't analyze the design right now."
    }

    fn requires_image(&self) -> bool {
        true
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        image_analysis_chain(STEP, PROMPT, input, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::generation::InlineImage;

    #[test]
    fn test_chain_requires_image() {
        let err = DesignCritiqueTool.build_chain(&ToolInput::new()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingInput);

        let image = InlineImage::from_data_uri("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        let chain = DesignCritiqueTool
            .build_chain(&ToolInput::new().with_image(image))
            .unwrap();
        let request = chain.steps()[0].build_request(&Default::default()).unwrap();

        assert!(request.schema().is_none());
        assert_eq!(request.image_input().map(|i| i.mime_type()), Some("image/jpeg"));
    }
}
