//! Declarative output shapes and their wire encoding

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Expected shape of a structured generation result
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSpec {
    String,
    Number,
    Integer,
    Boolean,
    Array(Box<SchemaSpec>),
    Object(ObjectSpec),
}

/// Field declarations of an OBJECT schema, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSpec {
    pub(crate) properties: Vec<(String, SchemaSpec)>,
    pub(crate) required: Vec<String>,
}

impl SchemaSpec {
    pub fn string() -> Self {
        SchemaSpec::String
    }

    pub fn number() -> Self {
        SchemaSpec::Number
    }

    pub fn integer() -> Self {
        SchemaSpec::Integer
    }

    pub fn boolean() -> Self {
        SchemaSpec::Boolean
    }

    /// An ARRAY whose every element matches `items`
    pub fn array(items: impl Into<SchemaSpec>) -> Self {
        SchemaSpec::Array(Box::new(items.into()))
    }

    /// Start an OBJECT declaration
    pub fn object() -> ObjectSpec {
        ObjectSpec::default()
    }

    /// Upper-case type name used by the backend
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaSpec::String => "STRING",
            SchemaSpec::Number => "NUMBER",
            SchemaSpec::Integer => "INTEGER",
            SchemaSpec::Boolean => "BOOLEAN",
            SchemaSpec::Array(_) => "ARRAY",
            SchemaSpec::Object(_) => "OBJECT",
        }
    }

    /// Encoding sent as `generationConfig.responseSchema`
    pub fn to_wire(&self) -> serde_json::Value {
        // Serializing plain data into a Value cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl ObjectSpec {
    /// Declare an optional property
    pub fn property(mut self, name: impl Into<String>, spec: impl Into<SchemaSpec>) -> Self {
        let name = name.into();
        let spec = spec.into();
        match self.properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = spec,
            None => self.properties.push((name, spec)),
        }
        self
    }

    /// Declare a property and mark it required
    pub fn field(self, name: impl Into<String>, spec: impl Into<SchemaSpec>) -> Self {
        let name = name.into();
        self.property(name.clone(), spec).require(name)
    }

    /// Mark a property as required
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Mark several properties as required
    pub fn required<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |spec, name| spec.require(name))
    }

    /// Declared property names, in order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a property declaration
    pub fn get(&self, name: &str) -> Option<&SchemaSpec> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl From<ObjectSpec> for SchemaSpec {
    fn from(object: ObjectSpec) -> Self {
        SchemaSpec::Object(object)
    }
}

impl Serialize for SchemaSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SchemaSpec::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.type_name())?;
                map.serialize_entry("items", items.as_ref())?;
                map.end()
            }
            SchemaSpec::Object(object) => {
                let len = if object.required.is_empty() { 2 } else { 3 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("type", self.type_name())?;
                map.serialize_entry("properties", &Properties(&object.properties))?;
                if !object.required.is_empty() {
                    map.serialize_entry("required", &object.required)?;
                }
                map.end()
            }
            _ => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", self.type_name())?;
                map.end()
            }
        }
    }
}

/// Keeps declaration order in the serialized `properties` map
struct Properties<'a>(&'a [(String, SchemaSpec)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, spec) in self.0 {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_encoding_matches_backend_format() {
        let schema: SchemaSpec = SchemaSpec::object()
            .property(
                "pairings",
                SchemaSpec::array(
                    SchemaSpec::object()
                        .field("headingFont", SchemaSpec::string())
                        .field("bodyFont", SchemaSpec::string()),
                ),
            )
            .into();

        assert_eq!(
            schema.to_wire(),
            json!({
                "type": "OBJECT",
                "properties": {
                    "pairings": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "headingFont": { "type": "STRING" },
                                "bodyFont": { "type": "STRING" }
                            },
                            "required": ["headingFont", "bodyFont"]
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_serialized_properties_keep_declaration_order() {
        let schema: SchemaSpec = SchemaSpec::object()
            .property("zeta", SchemaSpec::string())
            .property("alpha", SchemaSpec::number())
            .into();

        let text = serde_json::to_string(&schema).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_redeclaring_property_replaces_it() {
        let object = SchemaSpec::object()
            .field("age", SchemaSpec::string())
            .property("age", SchemaSpec::number())
            .require("age");

        assert_eq!(object.property_names().count(), 1);
        assert_eq!(object.get("age"), Some(&SchemaSpec::Number));
        assert_eq!(object.required, vec!["age".to_string()]);
    }
}
