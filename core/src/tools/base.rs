//! Base design-tool trait and invocation input

use crate::chain::Chain;
use crate::error::{GenerationError, Result};
use crate::generation::InlineImage;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Message shown when an image-only tool is invoked without an upload
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image first.";

/// Trait for all design tools.
///
/// A tool only declares its prompt, schema and chain shape; calling the
/// backend and tracking state is left to [`ToolSession`](crate::session::ToolSession).
pub trait DesignTool: Send + Sync {
    /// Get the name of the tool (used for lookup)
    fn name(&self) -> &str;

    /// Get the display title of the tool
    fn title(&self) -> &str;

    /// Get the description of the tool
    fn description(&self) -> &str;

    /// The single user-facing message shown for any failure
    fn failure_message(&self) -> &str;

    /// Named text inputs with their defaults
    fn inputs(&self) -> Vec<InputField> {
        Vec::new()
    }

    /// Whether an uploaded image must be present before calling the backend
    fn requires_image(&self) -> bool {
        false
    }

    fn missing_image_message(&self) -> &str {
        MISSING_IMAGE_MESSAGE
    }

    /// Build the chain for one invocation
    fn build_chain(&self, input: &ToolInput) -> Result<Chain>;
}

/// One named text input of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    pub label: &'static str,
    pub default: &'static str,
}

impl InputField {
    pub const fn new(name: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            name,
            label,
            default,
        }
    }
}

/// Values supplied for one invocation
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    values: HashMap<String, String>,
    image: Option<InlineImage>,
}

impl ToolInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text input
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Attach an uploaded image
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn image(&self) -> Option<&InlineImage> {
        self.image.as_ref()
    }

    /// The uploaded image, or `MissingInput`
    pub fn require_image(&self) -> Result<&InlineImage> {
        self.image.as_ref().ok_or_else(|| {
            GenerationError::MissingInput {
                input: "image".to_string(),
            }
            .into()
        })
    }

    /// Supplied values for `fields`, falling back to each field's default.
    ///
    /// An explicitly supplied empty value is kept as is.
    pub fn resolve(&self, fields: &[InputField]) -> BTreeMap<&'static str, String> {
        fields
            .iter()
            .map(|field| {
                let value = self
                    .get(field.name)
                    .map(str::to_string)
                    .unwrap_or_else(|| field.default.to_string());
                (field.name, value)
            })
            .collect()
    }

    /// Reject keys that none of `fields` declares
    pub fn check_known(&self, fields: &[InputField]) -> Result<()> {
        let mut unknown: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|key| !fields.iter().any(|field| field.name == *key))
            .collect();

        if unknown.is_empty() {
            return Ok(());
        }

        unknown.sort_unstable();
        let accepted: Vec<&str> = fields.iter().map(|field| field.name).collect();
        Err(GenerationError::InvalidInput {
            input: unknown.join(", "),
            message: format!("unknown input; accepted: [{}]", accepted.join(", ")),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    const FIELDS: [InputField; 2] = [
        InputField::new("component", "Component", "Confirmation Modal"),
        InputField::new("tone", "Tone", "Friendly and reassuring"),
    ];

    #[test]
    fn test_resolve_uses_defaults_for_absent_values() {
        let input = ToolInput::new().with("tone", "");
        let values = input.resolve(&FIELDS);

        assert_eq!(values["component"], "Confirmation Modal");
        assert_eq!(values["tone"], "");
    }

    #[test]
    fn test_check_known_lists_unknown_keys() {
        let input = ToolInput::new().with("tone", "dry").with("colour", "red");
        let err = input.check_known(&FIELDS).unwrap_err();

        assert_eq!(err.kind(), FailureKind::InvalidInput);
        assert!(err.to_string().contains("colour"));
        assert!(ToolInput::new().with("tone", "dry").check_known(&FIELDS).is_ok());
    }

    #[test]
    fn test_require_image() {
        let err = ToolInput::new().require_image().unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingInput);

        let image = InlineImage::new("image/png", "iVBORw0KGgo=").unwrap();
        assert!(ToolInput::new().with_image(image).require_image().is_ok());
    }
}
