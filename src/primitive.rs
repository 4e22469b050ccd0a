//! Mapping from scalar kinds and common type names to Swagger primitives.

use crate::schema::SchemaObj;
use crate::types::Kind;

/// The portable primitive vocabulary of the Swagger data-type table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonName {
    Integer,
    Long,
    Float,
    Double,
    String,
    Byte,
    Binary,
    Boolean,
    Date,
    DateTime,
    Password,
}

impl CommonName {
    /// Resolves a type-hint alias. Unknown aliases are treated as plain strings.
    pub fn from_alias(alias: &str) -> Self {
        match alias.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "int32" => CommonName::Integer,
            "long" | "int64" => CommonName::Long,
            "float" => CommonName::Float,
            "double" | "number" => CommonName::Double,
            "byte" => CommonName::Byte,
            "binary" => CommonName::Binary,
            "boolean" | "bool" => CommonName::Boolean,
            "date" => CommonName::Date,
            "date-time" | "datetime" => CommonName::DateTime,
            "password" => CommonName::Password,
            _ => CommonName::String,
        }
    }

    /// Schema type and format for this name
    pub fn type_and_format(self) -> (&'static str, Option<&'static str>) {
        match self {
            CommonName::Integer => ("integer", Some("int32")),
            CommonName::Long => ("integer", Some("int64")),
            CommonName::Float => ("number", Some("float")),
            CommonName::Double => ("number", Some("double")),
            CommonName::String => ("string", None),
            CommonName::Byte => ("string", Some("byte")),
            CommonName::Binary => ("string", Some("binary")),
            CommonName::Boolean => ("boolean", None),
            CommonName::Date => ("string", Some("date")),
            CommonName::DateTime => ("string", Some("date-time")),
            CommonName::Password => ("string", Some("password")),
        }
    }
}

/// Maps a scalar kind to its common name, `None` for anything that is not a scalar
pub fn common_name_for(kind: &Kind) -> Option<CommonName> {
    let name = match kind {
        Kind::Bool => CommonName::Boolean,
        Kind::Int(bits) if *bits <= 32 => CommonName::Integer,
        Kind::Int(_) => CommonName::Long,
        Kind::Uint(bits) if *bits <= 16 => CommonName::Integer,
        Kind::Uint(_) => CommonName::Long,
        Kind::Float32 => CommonName::Float,
        Kind::Float64 => CommonName::Double,
        Kind::String => CommonName::String,
        Kind::DateTime => CommonName::DateTime,
        _ => return None,
    };
    Some(name)
}

/// Schema type and format for a scalar kind
pub fn map_primitive(kind: &Kind) -> Option<(&'static str, Option<&'static str>)> {
    common_name_for(kind).map(CommonName::type_and_format)
}

pub fn schema_from_common_name(name: CommonName) -> SchemaObj {
    let (schema_type, format) = name.type_and_format();
    SchemaObj::primitive(schema_type, format.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths() {
        assert_eq!(map_primitive(&Kind::Int(8)), Some(("integer", Some("int32"))));
        assert_eq!(map_primitive(&Kind::Int(32)), Some(("integer", Some("int32"))));
        assert_eq!(map_primitive(&Kind::Int(64)), Some(("integer", Some("int64"))));
        assert_eq!(map_primitive(&Kind::Uint(16)), Some(("integer", Some("int32"))));
        assert_eq!(map_primitive(&Kind::Uint(32)), Some(("integer", Some("int64"))));
        assert_eq!(map_primitive(&Kind::Uint(64)), Some(("integer", Some("int64"))));
    }

    #[test]
    fn test_floats_strings_and_booleans() {
        assert_eq!(map_primitive(&Kind::Float32), Some(("number", Some("float"))));
        assert_eq!(map_primitive(&Kind::Float64), Some(("number", Some("double"))));
        assert_eq!(map_primitive(&Kind::String), Some(("string", None)));
        assert_eq!(map_primitive(&Kind::Bool), Some(("boolean", None)));
        assert_eq!(map_primitive(&Kind::DateTime), Some(("string", Some("date-time"))));
    }

    #[test]
    fn test_non_scalars_are_not_mapped() {
        assert_eq!(map_primitive(&Kind::Bytes), None);
        assert_eq!(map_primitive(&Kind::Func), None);
        assert_eq!(map_primitive(&Kind::Any(None)), None);
    }

    #[test]
    fn test_common_name_aliases() {
        let schema = schema_from_common_name(CommonName::from_alias("date"));
        assert_eq!(schema.schema_type, "string");
        assert_eq!(schema.format, "date");

        let schema = schema_from_common_name(CommonName::from_alias("Long"));
        assert_eq!(schema.schema_type, "integer");
        assert_eq!(schema.format, "int64");

        let schema = schema_from_common_name(CommonName::from_alias("uuid"));
        assert_eq!(schema.schema_type, "string");
        assert!(schema.format.is_empty());
    }
}
