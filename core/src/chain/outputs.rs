//! Accumulated results of a chain run

use crate::error::{ChainError, Error, Result};
use crate::generation::GenerationResult;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Step results keyed by step name, in completion order.
///
/// Steps that failed under a fallback policy hold their fallback value and are
/// listed in [`fallbacks`](ChainOutputs::fallbacks).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChainOutputs {
    #[serde(serialize_with = "serialize_ordered")]
    outputs: Vec<(String, GenerationResult)>,
    fallbacks: Vec<String>,
}

impl ChainOutputs {
    pub fn get(&self, step: &str) -> Option<&GenerationResult> {
        self.outputs
            .iter()
            .find(|(name, _)| name == step)
            .map(|(_, result)| result)
    }

    /// Like [`get`](Self::get), failing with `MissingOutput` when absent
    pub fn require(&self, step: &str) -> Result<&GenerationResult> {
        self.get(step).ok_or_else(|| {
            ChainError::MissingOutput {
                step: step.to_string(),
            }
            .into()
        })
    }

    /// Deserialize a step's decoded value into a typed record
    pub fn decode<T: DeserializeOwned>(&self, step: &str) -> Result<T> {
        match self.require(step)? {
            GenerationResult::Decoded(value) => {
                serde_json::from_value(value.clone()).map_err(|e| {
                    Error::decode(format!("step '{}' does not match its record: {}", step, e))
                })
            }
            other => Err(Error::decode(format!(
                "step '{}' produced {}, not a decoded value",
                step,
                other.kind_name()
            ))),
        }
    }

    /// Names of steps whose value came from a fallback
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    pub fn is_fallback(&self, step: &str) -> bool {
        self.fallbacks.iter().any(|name| name == step)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenerationResult)> {
        self.outputs
            .iter()
            .map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub(crate) fn insert(&mut self, step: &str, result: GenerationResult) {
        self.outputs.push((step.to_string(), result));
    }

    pub(crate) fn insert_fallback(&mut self, step: &str, result: GenerationResult) {
        self.insert(step, result);
        self.fallbacks.push(step.to_string());
    }
}

fn serialize_ordered<S: Serializer>(
    outputs: &[(String, GenerationResult)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(outputs.len()))?;
    for (name, result) in outputs {
        map.serialize_entry(name, result)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_decode_typed_record() {
        let mut outputs = ChainOutputs::default();
        outputs.insert("profile", GenerationResult::Decoded(json!({ "name": "Maya" })));

        let named: Named = outputs.decode("profile").unwrap();
        assert_eq!(named.name, "Maya");

        let missing = outputs.decode::<Named>("avatar").unwrap_err();
        assert!(missing.to_string().contains("No output recorded for step 'avatar'"));
    }

    #[test]
    fn test_decode_rejects_non_decoded_results() {
        let mut outputs = ChainOutputs::default();
        outputs.insert("critique", GenerationResult::RawText("Looks fine".into()));

        let err = outputs.decode::<Named>("critique").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn test_serializes_in_step_order() {
        let mut outputs = ChainOutputs::default();
        outputs.insert("b", GenerationResult::RawText("first".into()));
        outputs.insert_fallback("a", GenerationResult::RawText("second".into()));

        let rendered = serde_json::to_string(&outputs).unwrap();
        assert!(rendered.find("\"b\"").unwrap() < rendered.find("\"a\"").unwrap());
        assert_eq!(outputs.fallbacks(), ["a".to_string()]);
        assert!(outputs.is_fallback("a"));
        assert!(!outputs.is_fallback("b"));
    }
}
