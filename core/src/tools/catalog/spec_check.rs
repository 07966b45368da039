//! Design spec extraction from a screenshot

use super::image_analysis_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "specs";

const PROMPT: &str = "Analyze this UI screenshot and extract design specifications. Identify \
the primary colors (with hex codes), secondary colors, and typography (font family guesses, \
estimated font sizes and weights). Present this as a structured summary.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSpecs {
    #[serde(default)]
    pub colors: Vec<ColorSpec>,
    #[serde(default)]
    pub typography: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub font: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub weight: String,
}

pub fn schema() -> SchemaSpec {
    let color = SchemaSpec::object()
        .property("role", SchemaSpec::string())
        .property("hex", SchemaSpec::string());
    let typography = SchemaSpec::object()
        .property("type", SchemaSpec::string())
        .property("font", SchemaSpec::string())
        .property("size", SchemaSpec::string())
        .property("weight", SchemaSpec::string());

    SchemaSpec::object()
        .property("colors", SchemaSpec::array(color))
        .property("typography", SchemaSpec::array(typography))
        .into()
}

/// SpecCheck AI
pub struct SpecCheckTool;

impl DesignTool for SpecCheckTool {
    fn name(&self) -> &str {
        "spec-check"
    }

    fn title(&self) -> &str {
        "SpecCheck AI"
    }

    fn description(&self) -> &str {
        "Extract colors and typography specs from a UI screenshot."
    }

    fn failure_message(&self) -> &str {
        "Sorry, I couldn't extract the design specs right now."
    }

    fn requires_image(&self) -> bool {
        true
    }

    fn build_chain(&self, input: &ToolInput) -> Result<Chain> {
        image_analysis_chain(STEP, PROMPT, input, Some(schema()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::InlineImage;
    use serde_json::json;

    #[test]
    fn test_structured_request_with_image() {
        let image = InlineImage::from_bytes("image/png", b"\x89PNG").unwrap();
        let chain = SpecCheckTool
            .build_chain(&ToolInput::new().with_image(image))
            .unwrap();
        let request = chain.steps()[0].build_request(&Default::default()).unwrap();

        assert_eq!(request.schema(), Some(&schema()));
        assert!(request.image_input().is_some());
    }

    #[test]
    fn test_type_field_is_renamed() {
        let specs: DesignSpecs = serde_json::from_value(json!({
            "typography": [{ "type": "Heading 1", "font": "Inter", "size": "32px", "weight": "700" }]
        }))
        .unwrap();

        assert_eq!(specs.typography[0].kind, "Heading 1");
        assert!(specs.colors.is_empty());
    }
}
