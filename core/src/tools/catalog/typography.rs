//! Font pairing suggestions

use super::structured_chain;
use crate::chain::Chain;
use crate::error::Result;
use crate::schema::SchemaSpec;
use crate::tools::{DesignTool, InputField, ToolInput};
use serde::{Deserialize, Serialize};

pub const STEP: &str = "pairings";

const PROMPT: &str = "Generate 3 diverse font pairings suitable for a website with a \
\"{{theme}}\" theme. For each pairing, provide a heading font and a body font from Google \
Fonts. Include a short rationale for why the pairing works.";

const INPUTS: [InputField; 1] = [InputField::new("theme", "Website theme", "technology")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontPairings {
    #[serde(default)]
    pub pairings: Vec<FontPairing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPairing {
    pub heading_font: String,
    pub body_font: String,
    pub rationale: String,
}

pub fn schema() -> SchemaSpec {
    let pairing = SchemaSpec::object()
        .field("headingFont", SchemaSpec::string())
        .field("bodyFont", SchemaSpec::string())
        .field("rationale", SchemaSpec::string());

    SchemaSpec::object()
        .property("pairings", SchemaSpec::array(pairing))
        .into()
}

/// Typograph AI
pub struct FontPairingTool;

impl DesignTool for FontPairingTool {
    fn name(&self) -> &str {
        "font-pairing"
    }

    fn title(&self) -> &str {
        "Typograph AI"
    }

    fn description(&self) -> &str {
        "Discover and preview perfect font pairings for your projects."
    }

    fn failure_message(&self) -> &str {
        "Could not fetch font pairings. Please try again."
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
    fn test_pairing_fields_are_camel_case() {
        let pairing: FontPairing = serde_json::from_value(json!({
            "headingFont": "Space Grotesk",
            "bodyFont": "Inter",
            "rationale": "Geometric display with a neutral text face."
        }))
        .unwrap();

        assert_eq!(pairing.heading_font, "Space Grotesk");
        assert!(schema().validate(&json!({ "pairings": [pairing] })));
    }
}
