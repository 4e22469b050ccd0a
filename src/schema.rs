use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Prefix of every definition reference
pub const REF_DEFINITION_PREFIX: &str = "#/definitions/";

/// Swagger schema object.
///
/// The registry keeps canonical definitions (no `$ref`); every use site of a named
/// type gets a reference stub produced by [`SchemaObj::export`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaObj {
    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaObj>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaObj>,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<SchemaObj>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Definition name; never rendered
    #[serde(skip)]
    pub type_name: String,
    /// `x-` extension fields, rendered verbatim
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl SchemaObj {
    pub fn new(schema_type: &str, type_name: &str) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            type_name: type_name.to_string(),
            ..Default::default()
        }
    }

    pub fn object(type_name: &str) -> Self {
        Self::new("object", type_name)
    }

    pub fn primitive(schema_type: &str, format: &str) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            format: format.to_string(),
            ..Default::default()
        }
    }

    /// A reference stub pointing at the definition `name`
    pub fn reference_to(name: &str) -> Self {
        Self {
            reference: format!("{}{}", REF_DEFINITION_PREFIX, name),
            type_name: name.to_string(),
            ..Default::default()
        }
    }

    /// The reference stub for this definition
    pub fn export(&self) -> Self {
        Self::reference_to(&self.type_name)
    }

    pub fn is_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// True when the schema carries no shape at all
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
            && self.schema_type.is_empty()
            && self.properties.is_empty()
            && self.items.is_none()
            && self.additional_properties.is_none()
    }

    pub fn add_extended_field(&mut self, key: &str, value: impl Into<Value>) {
        self.extensions.insert(key.to_string(), value.into());
    }
}

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    #[default]
    Query,
    Path,
    FormData,
    Body,
    Header,
}

impl FromStr for ParamLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(ParamLocation::Query),
            "path" => Ok(ParamLocation::Path),
            "form" | "formData" => Ok(ParamLocation::FormData),
            "body" => Ok(ParamLocation::Body),
            "header" => Ok(ParamLocation::Header),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamLocation::Query => "query",
            ParamLocation::Path => "path",
            ParamLocation::FormData => "formData",
            ParamLocation::Body => "body",
            ParamLocation::Header => "header",
        };
        f.write_str(s)
    }
}

/// Item type of a multi-value parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamItemObj {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
}

/// Legal values of a parameter with optional display names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumObj {
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
    #[serde(rename = "x-enum-names", default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
}

/// Swagger parameter object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamObj {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub param_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ParamItemObj>,
    #[serde(
        rename = "collectionFormat",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub collection_format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub enumeration: EnumObj,
    /// Body parameters only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<SchemaObj>>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl ParamObj {
    pub fn add_extended_field(&mut self, key: &str, value: impl Into<Value>) {
        self.extensions.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_reference_stub_serialization() {
        let mut definition = SchemaObj::object("Pet");
        definition
            .properties
            .insert("id".to_string(), SchemaObj::primitive("integer", "int64"));

        let stub = definition.export();
        assert!(stub.is_reference());
        assert_eq!(stub.type_name, "Pet");
        assert_eq!(
            serde_json::to_value(&stub).unwrap(),
            json!({"$ref": "#/definitions/Pet"})
        );
        assert_eq!(
            serde_json::to_value(&definition).unwrap(),
            json!({"type": "object", "properties": {"id": {"type": "integer", "format": "int64"}}})
        );
    }

    #[test]
    fn test_extensions_are_flattened() {
        let mut schema = SchemaObj::primitive("string", "");
        schema.add_extended_field("x-rust-type", "String");
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "string", "x-rust-type": "String"})
        );
    }

    #[test]
    fn test_empty_schema() {
        assert!(SchemaObj::default().is_empty());
        assert!(!SchemaObj::object("").is_empty());
        assert!(!SchemaObj::reference_to("Pet").is_empty());
    }

    #[test]
    fn test_param_serialization_omits_defaults() {
        let param = ParamObj {
            name: "tags".to_string(),
            location: ParamLocation::Query,
            param_type: "array".to_string(),
            items: Some(ParamItemObj {
                item_type: "string".to_string(),
                format: String::new(),
            }),
            collection_format: "multi".to_string(),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "name": "tags",
                "in": "query",
                "type": "array",
                "items": {"type": "string"},
                "collectionFormat": "multi"
            })
        );
    }

    #[test]
    fn test_location_parsing() {
        assert_eq!("form".parse::<ParamLocation>(), Ok(ParamLocation::FormData));
        assert_eq!("path".parse::<ParamLocation>(), Ok(ParamLocation::Path));
        assert!("cookie".parse::<ParamLocation>().is_err());
        assert_eq!(ParamLocation::FormData.to_string(), "formData");
    }
}
