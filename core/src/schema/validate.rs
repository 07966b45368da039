//! Structural validation of decoded values against a [`SchemaSpec`]

use super::spec::{ObjectSpec, SchemaSpec};
use serde_json::Value;
use std::fmt;

/// First mismatch found while checking a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON path of the offending value, rooted at `$`
    pub path: String,
    /// What the schema expected at that path
    pub expected: String,
    /// What was actually found
    pub found: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at {}: expected {}, found {}",
            self.path, self.expected, self.found
        )
    }
}

impl std::error::Error for SchemaViolation {}

impl SchemaSpec {
    /// Whether `value` structurally matches this schema
    pub fn validate(&self, value: &Value) -> bool {
        self.check(value).is_ok()
    }

    /// Check `value`, reporting the first violation
    pub fn check(&self, value: &Value) -> Result<(), SchemaViolation> {
        check_at(self, value, "$")
    }
}

fn check_at(spec: &SchemaSpec, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let matches = match spec {
        SchemaSpec::String => value.is_string(),
        SchemaSpec::Number => value.is_number(),
        SchemaSpec::Integer => is_integral(value),
        SchemaSpec::Boolean => value.is_boolean(),
        SchemaSpec::Array(items) => {
            let Some(elements) = value.as_array() else {
                return Err(mismatch(spec, value, path));
            };
            for (index, element) in elements.iter().enumerate() {
                check_at(items, element, &format!("{}[{}]", path, index))?;
            }
            true
        }
        SchemaSpec::Object(object) => {
            let Some(fields) = value.as_object() else {
                return Err(mismatch(spec, value, path));
            };
            return check_object(object, fields, path);
        }
    };

    if matches {
        Ok(())
    } else {
        Err(mismatch(spec, value, path))
    }
}

fn check_object(
    object: &ObjectSpec,
    fields: &serde_json::Map<String, Value>,
    path: &str,
) -> Result<(), SchemaViolation> {
    for name in &object.required {
        match fields.get(name) {
            None => {
                return Err(SchemaViolation {
                    path: format!("{}.{}", path, name),
                    expected: "required property".to_string(),
                    found: "nothing".to_string(),
                })
            }
            Some(Value::Null) => {
                return Err(SchemaViolation {
                    path: format!("{}.{}", path, name),
                    expected: "required property".to_string(),
                    found: "null".to_string(),
                })
            }
            Some(_) => {}
        }
    }

    for (name, spec) in &object.properties {
        match fields.get(name) {
            // Optional properties may be omitted or explicitly null
            None | Some(Value::Null) => {}
            Some(field) => check_at(spec, field, &format!("{}.{}", path, name))?,
        }
    }

    Ok(())
}

fn is_integral(value: &Value) -> bool {
    if value.is_i64() || value.is_u64() {
        return true;
    }
    value.as_f64().map(|n| n.fract() == 0.0).unwrap_or(false)
}

fn mismatch(spec: &SchemaSpec, value: &Value, path: &str) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        expected: spec.type_name().to_string(),
        found: json_type_name(value).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
