//! Color palette generation

use super::structured_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "palettes";

const PROMPT: &str = "Generate 3 distinct color palettes based on the theme: \"{{prompt}}\". \
Each palette should be visually harmonious and suitable for a modern UI. Provide a creative \
name for each palette. For each color, provide the hex code and a brief description of its \
role (e.g., Primary, Accent, Background).";

const INPUTS: [InputField; 1] = [InputField::new(
    "prompt",
    "Theme",
    "Vibrant sunset over a city",
)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSet {
    #[serde(default)]
    pub palettes: Vec<Palette>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<PaletteColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub hex: String,
    pub role: String,
}

pub fn schema() -> SchemaSpec {
    let color = SchemaSpec::object()
        .field("hex", SchemaSpec::string())
        .field("role", SchemaSpec::string());
    let palette = SchemaSpec::object()
        .field("name", SchemaSpec::string())
        .field("colors", SchemaSpec::array(color));

    SchemaSpec::object()
        .property("palettes", SchemaSpec::array(palette))
        .into()
}

/// Chroma AI
pub struct ColorPaletteTool;

impl DesignTool for ColorPaletteTool {
    fn name(&self) -> &str {
        "color-palette"
    }

    fn title(&self) -> &str {
        "Chroma AI"
    }

    fn description(&self) -> &str {
        "Generate accessible color palettes from a word, color, or image."
    }

    fn failure_message(&self) -> &str {
        "Sorry, I couldn't generate palettes at this time. Please try a different prompt."
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
    use crate::chain::ChainOrchestrator;
    use crate::error::FailureKind;
    use crate::generation::{GenerationKind, GenerationResult, ResponseDecoder};
    use crate::testing::ScriptedClient;
    use regex::Regex;
    use serde_json::json;
    use std::sync::Arc;

    fn sample_palettes() -> serde_json::Value {
        let hexes = [
            ["#FF5E5B", "#D8D8D8", "#FFFFEA", "#00CECB", "#FFED66", "#1B1B1E"],
            ["#2E294E", "#541388", "#F1E9DA", "#FFD400", "#D90368", "#FFFFFF"],
            ["#0B3954", "#087E8B", "#BFD7EA", "#FF5A5F", "#C81D25", "#F2F2F2"],
        ];
        let roles = ["Primary", "Secondary", "Background", "Accent", "Highlight", "Text"];

        let palettes: Vec<_> = hexes
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let colors: Vec<_> = row
                    .iter()
                    .zip(roles)
                    .map(|(hex, role)| json!({ "hex": hex, "role": role }))
                    .collect();
                json!({ "name": format!("Palette {}", i + 1), "colors": colors })
            })
            .collect();

        json!({ "palettes": palettes })
    }

    #[test]
    fn test_prompt_embeds_theme() {
        let chain = ColorPaletteTool
            .build_chain(&ToolInput::new().with("prompt", "Forest at dawn"))
            .unwrap();
        let request = chain.steps()[0]
            .build_request(&Default::default())
            .unwrap();

        assert_eq!(request.kind(), GenerationKind::Text);
        assert!(request.prompt().contains("theme: \"Forest at dawn\""));
        assert_eq!(request.schema(), Some(&schema()));
    }

    #[tokio::test]
    async fn test_three_palettes_of_six_colors_decode() {
        let client = Arc::new(ScriptedClient::new().reply_decoded(sample_palettes()));
        let chain = ColorPaletteTool.build_chain(&ToolInput::new()).unwrap();

        let outputs = ChainOrchestrator::new(client.clone())
            .execute(&chain)
            .await
            .unwrap();
        let set: PaletteSet = outputs.decode(STEP).unwrap();

        let hex = Regex::new(r"^#?[0-9A-Fa-f]{6}$").unwrap();
        assert_eq!(set.palettes.len(), 3);
        for palette in &set.palettes {
            assert_eq!(palette.colors.len(), 6);
            assert!(palette.colors.iter().all(|c| hex.is_match(&c.hex)));
        }
        assert!(client.requests()[0]
            .prompt()
            .contains("Vibrant sunset over a city"));
    }

    #[test]
    fn test_color_without_role_fails_decoding() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{
                "text": r##"{"palettes":[{"name":"Dusk","colors":[{"hex":"#112233"}]}]}"##
            }]}}]
        })
        .to_string();

        let err = ResponseDecoder::decode_text(&body, Some(&schema())).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);

        let ok = ResponseDecoder::decode_text(
            &json!({ "candidates": [{ "content": { "parts": [{ "text": sample_palettes().to_string() }]}}]})
                .to_string(),
            Some(&schema()),
        )
        .unwrap();
        assert!(matches!(ok, GenerationResult::Decoded(_)));
    }
}
