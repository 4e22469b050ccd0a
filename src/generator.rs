//! Type-to-schema synthesis.
//!
//! [`Generator::gen_schema_for_type`] turns a descriptor into an inline schema or a
//! reference. Struct types are never expanded in place: the first encounter
//! registers a placeholder under the struct's final name and queues the type, every
//! later encounter (including ones from inside its own fields) only gets a
//! reference. [`Generator::parse_definition`] drains the queue before returning, so
//! self-referential and mutually-referential types terminate.

use crate::config::GeneratorOptions;
use crate::document::DocumentState;
use crate::error::{Error, Result};
use crate::primitive::{map_primitive, schema_from_common_name, CommonName};
use crate::registry::DefinitionRegistry;
use crate::schema::SchemaObj;
use crate::types::{Kind, SchemaHook, StructDef, TypeDef, TypeKey};
use log::{debug, warn};
use serde_json::{Number, Value};
use std::collections::{BTreeMap, HashMap};

/// Schema and document generator for one generation session.
///
/// Not meant to be shared between threads; callers serialize access.
pub struct Generator {
    pub(crate) options: GeneratorOptions,
    pub(crate) registry: DefinitionRegistry,
    type_map: HashMap<TypeKey, TypeDef>,
    pub(crate) document: DocumentState,
}

impl Generator {
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        debug!("Initializing Generator with {:?}", options);
        Self {
            options,
            registry: DefinitionRegistry::new(),
            type_map: HashMap::new(),
            document: DocumentState::default(),
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// Describes `from` with `to` wherever `from` is given to
    /// [`Generator::parse_definition`] or [`Generator::parse_parameter`], or appears as
    /// a parameter field.
    pub fn add_type_map(&mut self, from: &TypeDef, to: TypeDef) -> &mut Self {
        self.type_map.insert(from.key(), to);
        self
    }

    pub(crate) fn mapped_type(&self, ty: &TypeDef) -> Option<TypeDef> {
        self.type_map.get(&ty.key()).cloned()
    }

    /// Removes all definitions and starts a fresh session
    pub fn reset_definitions(&mut self) {
        debug!("Resetting definitions");
        self.registry.reset();
    }

    /// Named definitions produced so far, keyed by definition name
    pub fn definitions(&self) -> BTreeMap<String, SchemaObj> {
        self.registry.definitions()
    }

    /// Schema for a top-level type.
    ///
    /// Structs, named collections and hook-described types are registered and
    /// returned as references. Anonymous collections and primitives are returned
    /// inline. Every type discovered on the way is fully expanded before returning.
    ///
    /// On failure nothing registered by this call is kept, so repeating the call
    /// fails the same way.
    pub fn parse_definition(&mut self, ty: &TypeDef) -> Result<SchemaObj> {
        let (ty, fallback_name) = match self.mapped_type(ty) {
            Some(mapped) => (mapped, ty.name().unwrap_or_default().to_string()),
            None => (ty.clone(), String::new()),
        };
        debug!("Parsing definition for {}", ty.key());

        self.registry.checkpoint();
        let result = self
            .define(&ty, &fallback_name)
            .and_then(|schema| self.drain().map(|()| schema));
        if result.is_err() {
            self.registry.rollback();
        }
        result
    }

    fn define(&mut self, ty: &TypeDef, fallback_name: &str) -> Result<SchemaObj> {
        let ty = ty.deref();

        if let Some(hook) = ty.hooks().schema.clone() {
            return self.define_from_hook(ty, hook.as_ref(), fallback_name);
        }

        // An anonymous replacement keeps the name of the type it stands in for
        let mut name = if ty.name().is_none() && !fallback_name.is_empty() {
            fallback_name.to_string()
        } else {
            ty.reliable_name()
        };
        if name.is_empty() {
            name = fallback_name.to_string();
        }

        let definition = match ty.kind() {
            Kind::Struct(_) => return self.reference_struct(ty, &name),
            Kind::Slice(elem) | Kind::Array(elem, _) => {
                if let Some(existing) = self.registry.lookup(ty) {
                    return Ok(existing.export());
                }
                let mut definition = SchemaObj::new("array", &name);
                definition.items = Some(Box::new(self.gen_schema_for_type(elem)?));
                definition
            }
            Kind::Map(_, value) => {
                if let Some(existing) = self.registry.lookup(ty) {
                    return Ok(existing.export());
                }
                let mut definition = SchemaObj::object(&name);
                definition.additional_properties = Some(Box::new(self.gen_schema_for_type(value)?));
                definition
            }
            _ => {
                let mut schema = self.gen_schema_for_type(ty)?;
                schema.type_name = schema.schema_type.clone();
                return Ok(schema);
            }
        };

        if definition.type_name.is_empty() {
            return Ok(definition);
        }
        Ok(self.register(ty, definition))
    }

    fn register(&mut self, ty: &TypeDef, mut definition: SchemaObj) -> SchemaObj {
        if self.options.reflect_types {
            definition.add_extended_field("x-rust-type", ty.key().to_string());
        }
        match self.registry.add(ty, definition.clone()) {
            Some(name) => SchemaObj::reference_to(&name),
            None => definition,
        }
    }

    fn define_from_hook(
        &mut self,
        ty: &TypeDef,
        hook: &dyn SchemaHook,
        fallback_name: &str,
    ) -> Result<SchemaObj> {
        if let Some(existing) = self.registry.lookup(ty) {
            return Ok(existing.export());
        }

        let (mut name, mut definition) = hook.swgen_definition()?;
        if name.is_empty() {
            name = ty.reliable_name();
        }
        if name.is_empty() {
            name = fallback_name.to_string();
        }
        debug!("Type {} describes itself as {}", ty.key(), name);

        definition.type_name = name;
        if definition.type_name.is_empty() {
            return Ok(definition);
        }
        Ok(self.register(ty, definition))
    }

    /// Schema for `ty` as it appears inside another schema
    pub fn gen_schema_for_type(&mut self, ty: &TypeDef) -> Result<SchemaObj> {
        let ty = ty.deref();

        if let Some(hook) = ty.hooks().schema.clone() {
            return self.define_from_hook(ty, hook.as_ref(), "");
        }

        let mut schema = match ty.kind() {
            Kind::Bool
            | Kind::Int(_)
            | Kind::Uint(_)
            | Kind::Float32
            | Kind::Float64
            | Kind::String
            | Kind::DateTime => {
                let (schema_type, format) = map_primitive(ty.kind()).unwrap_or(("string", None));
                SchemaObj::primitive(schema_type, format.unwrap_or_default())
            }
            Kind::Bytes | Kind::Text => {
                let mut schema = SchemaObj::primitive("string", "");
                schema.type_name = ty.reliable_name();
                schema
            }
            Kind::Slice(elem) | Kind::Array(elem, _) => {
                let mut schema = SchemaObj::new("array", &ty.reliable_name());
                schema.items = Some(Box::new(self.gen_schema_for_type(elem)?));
                schema
            }
            Kind::Map(_, value) => {
                let mut schema = SchemaObj::object(&ty.reliable_name());
                schema.additional_properties = Some(Box::new(self.gen_schema_for_type(value)?));
                schema
            }
            Kind::Struct(_) => return self.reference_struct(ty, &ty.reliable_name()),
            Kind::Any(_) => SchemaObj::default(),
            Kind::Trait(name) => {
                return Err(Error::unsupported(
                    ty.key().to_string(),
                    format!("trait object {} has methods and no schema representation", name),
                ))
            }
            Kind::Func | Kind::Chan | Kind::UnsafePointer => {
                return Err(Error::unsupported(
                    ty.key().to_string(),
                    "no schema representation exists for this kind",
                ))
            }
            Kind::Pointer(_) => unreachable!("pointers are stripped above"),
        };

        if self.options.reflect_types {
            schema.add_extended_field("x-rust-type", ty.key().to_string());
        }
        Ok(schema)
    }

    /// Reference to a struct definition, registering a placeholder and queueing the
    /// struct for expansion on first encounter
    fn reference_struct(&mut self, ty: &TypeDef, name: &str) -> Result<SchemaObj> {
        if let Some(existing) = self.registry.lookup(ty) {
            return Ok(existing.export());
        }

        let mut placeholder = SchemaObj::object(name);
        if self.options.reflect_types {
            placeholder.add_extended_field("x-rust-type", ty.key().to_string());
        }

        let Some(name) = self.registry.add(ty, placeholder) else {
            return Err(Error::unsupported(
                ty.key().to_string(),
                "struct has no usable definition name",
            ));
        };
        self.registry.enqueue(ty);
        debug!("Queued {} for expansion as {}", ty.key(), name);

        Ok(SchemaObj::reference_to(&name))
    }

    /// Expands queued structs until nothing is left. Expanding one struct may
    /// queue others. The caller rolls the registry back on failure.
    pub(crate) fn drain(&mut self) -> Result<()> {
        while let Some(ty) = self.registry.pop() {
            if let Err(err) = self.expand(&ty) {
                warn!("Failed to expand definition {}: {}", ty.key(), err);
                return Err(err);
            }
        }
        Ok(())
    }

    fn expand(&mut self, ty: &TypeDef) -> Result<()> {
        let Kind::Struct(def) = ty.kind() else {
            return Ok(());
        };
        debug!("Expanding fields of {}", ty.key());

        let mut visiting = vec![ty.key()];
        let properties = self.parse_definition_properties(def, &mut visiting)?;

        if let Some(slot) = self.registry.get_mut(ty) {
            slot.properties = properties;
        }
        Ok(())
    }

    fn parse_definition_properties(
        &mut self,
        def: &StructDef,
        visiting: &mut Vec<TypeKey>,
    ) -> Result<BTreeMap<String, SchemaObj>> {
        let mut properties = BTreeMap::new();

        for field in def.fields() {
            if !field.exported {
                continue;
            }

            if field.embedded {
                let embedded = field.ty.deref();
                if let Kind::Struct(inner) = embedded.kind() {
                    let key = embedded.key();
                    if visiting.contains(&key) {
                        debug!("Skipping recursive embedding of {}", key);
                        continue;
                    }
                    visiting.push(key);
                    let merged = self.parse_definition_properties(inner, visiting)?;
                    visiting.pop();
                    properties.extend(merged);
                    continue;
                }
            }

            let Some(tag) = field.tags.value("json") else {
                continue;
            };
            let prop_name = match tag.split(',').next() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => field.name.clone(),
            };

            let mut obj = if let Some(hint) = field.tags.value("swgen_type") {
                schema_from_common_name(CommonName::from_alias(hint))
            } else if let Kind::Any(Some(concrete)) = field.ty.deref().kind() {
                self.gen_schema_for_type(concrete)?
            } else {
                self.gen_schema_for_type(&field.ty)?
            };

            if let Some(raw) = field.tags.get("default").filter(|d| !d.is_empty()) {
                match case_default_value(&field.ty, raw) {
                    Ok(value) => obj.default = Some(value),
                    Err(err) => debug!(
                        "Ignoring default {:?} of field {}: {}",
                        raw, field.name, err
                    ),
                }
            }

            if !obj.is_reference() {
                if let Some(description) = field.tags.value("description") {
                    obj.description = description.to_string();
                }
            }

            properties.insert(prop_name, obj);
        }

        Ok(properties)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a default literal according to the field's underlying scalar kind.
/// Anything that is not a scalar is read as a JSON literal.
pub(crate) fn case_default_value(ty: &TypeDef, raw: &str) -> std::result::Result<Value, String> {
    match ty.deref().kind() {
        Kind::Int(_) => raw.parse::<i64>().map(Value::from).map_err(|e| e.to_string()),
        Kind::Uint(_) => raw.parse::<u64>().map(Value::from).map_err(|e| e.to_string()),
        Kind::Float32 | Kind::Float64 => {
            let parsed = raw.parse::<f64>().map_err(|e| e.to_string())?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| format!("{} is not a finite number", raw))
        }
        Kind::String => Ok(Value::String(raw.to_string())),
        Kind::Bool => raw.parse::<bool>().map(Value::Bool).map_err(|e| e.to_string()),
        _ => serde_json::from_str(raw).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Describe, FieldDef};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::rc::Rc;

    fn pet() -> TypeDef {
        TypeDef::structure("petstore", "Pet", || {
            vec![
                FieldDef::of::<i64>("ID").tags(r#"json:"id""#),
                FieldDef::of::<String>("Name").tags(r#"json:"name""#),
            ]
        })
    }

    fn node() -> TypeDef {
        TypeDef::structure("tree", "Node", || {
            vec![
                FieldDef::of::<String>("Value").tags(r#"json:"value""#),
                FieldDef::new("Parent", TypeDef::pointer(node())).tags(r#"json:"parent""#),
                FieldDef::new("Children", TypeDef::slice(node())).tags(r#"json:"children""#),
            ]
        })
    }

    fn rendered(generator: &Generator) -> Value {
        serde_json::to_value(generator.definitions()).unwrap()
    }

    #[test]
    fn test_struct_definition() {
        let mut generator = Generator::new();
        let schema = generator.parse_definition(&pet()).unwrap();

        assert_eq!(schema.reference, "#/definitions/Pet");
        assert_eq!(
            rendered(&generator),
            json!({
                "Pet": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_same_type_twice_yields_one_definition() {
        let mut generator = Generator::new();
        let first = generator.parse_definition(&pet()).unwrap();
        let second = generator.parse_definition(&TypeDef::pointer(pet())).unwrap();

        assert_eq!(first, second);
        assert_eq!(generator.definitions().len(), 1);
    }

    #[test]
    fn test_name_collision_keeps_first_name() {
        let other_pet = TypeDef::structure("zoo", "Pet", || {
            vec![FieldDef::of::<bool>("Wild").tags(r#"json:"wild""#)]
        });

        let mut generator = Generator::new();
        let first = generator.parse_definition(&pet()).unwrap();
        let second = generator.parse_definition(&other_pet).unwrap();

        assert_eq!(first.reference, "#/definitions/Pet");
        assert_eq!(second.reference, "#/definitions/PetType2");

        let definitions = generator.definitions();
        assert!(definitions["Pet"].properties.contains_key("id"));
        assert!(definitions["PetType2"].properties.contains_key("wild"));
    }

    #[test]
    fn test_self_reference() {
        let mut generator = Generator::new();
        let schema = generator.parse_definition(&node()).unwrap();

        assert_eq!(schema.reference, "#/definitions/Node");
        assert_eq!(
            rendered(&generator),
            json!({
                "Node": {
                    "type": "object",
                    "properties": {
                        "value": {"type": "string"},
                        "parent": {"$ref": "#/definitions/Node"},
                        "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_self_reference_follows_collision_rename() {
        let first_node = TypeDef::structure("graph", "Node", Vec::new);

        let mut generator = Generator::new();
        generator.parse_definition(&first_node).unwrap();
        let schema = generator.parse_definition(&node()).unwrap();

        assert_eq!(schema.reference, "#/definitions/NodeType2");
        let definitions = generator.definitions();
        assert_eq!(
            definitions["NodeType2"].properties["parent"].reference,
            "#/definitions/NodeType2"
        );
    }

    #[test]
    fn test_mutual_recursion() {
        fn owner() -> TypeDef {
            TypeDef::structure("people", "Owner", || {
                vec![FieldDef::new("Pets", TypeDef::slice(animal())).tags(r#"json:"pets""#)]
            })
        }
        fn animal() -> TypeDef {
            TypeDef::structure("people", "Animal", || {
                vec![FieldDef::new("Owner", TypeDef::pointer(owner())).tags(r#"json:"owner""#)]
            })
        }

        let mut generator = Generator::new();
        generator.parse_definition(&owner()).unwrap();

        let definitions = generator.definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(
            definitions["Animal"].properties["owner"].reference,
            "#/definitions/Owner"
        );
        assert_eq!(generator.registry().pending(), 0);
    }

    #[test]
    fn test_bytes_are_strings() {
        let blob = TypeDef::structure("files", "Blob", || {
            vec![FieldDef::new("Data", TypeDef::bytes()).tags(r#"json:"data""#)]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&blob).unwrap();

        let data = &generator.definitions()["Blob"].properties["data"];
        assert_eq!(data.schema_type, "string");
        assert!(data.items.is_none());
    }

    #[test]
    fn test_embedded_fields_are_flattened() {
        fn audit() -> TypeDef {
            TypeDef::structure("common", "Audit", || {
                vec![
                    FieldDef::of::<std::time::SystemTime>("CreatedAt").tags(r#"json:"created_at""#),
                    FieldDef::of::<String>("CreatedBy").tags(r#"json:"created_by""#),
                ]
            })
        }
        let order = TypeDef::structure("shop", "Order", || {
            vec![
                FieldDef::embed(TypeDef::pointer(audit())),
                FieldDef::of::<u32>("Total").tags(r#"json:"total""#),
            ]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&order).unwrap();

        let definitions = generator.definitions();
        let properties = &definitions["Order"].properties;
        let names: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["created_at", "created_by", "total"]);
        assert_eq!(properties["created_at"].format, "date-time");
        assert!(!definitions.contains_key("Audit"));
    }

    #[test]
    fn test_skipped_and_private_fields() {
        let user = TypeDef::structure("auth", "User", || {
            vec![
                FieldDef::of::<String>("Login").tags(r#"json:"login,omitempty""#),
                FieldDef::of::<String>("Password").tags(r#"json:"-""#),
                FieldDef::of::<String>("Untagged"),
                FieldDef::of::<String>("salt").tags(r#"json:"salt""#).private(),
            ]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&user).unwrap();

        let definitions = generator.definitions();
        let names: Vec<&str> = definitions["User"].properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["login"]);
    }

    #[test]
    fn test_type_hint_default_and_description() {
        let query = TypeDef::structure("search", "Query", || {
            vec![
                FieldDef::of::<String>("Since").tags(r#"json:"since" swgen_type:"date""#),
                FieldDef::of::<i32>("Limit").tags(r#"json:"limit" default:"20" description:"page size""#),
                FieldDef::of::<f64>("Ratio").tags(r#"json:"ratio" default:"0.5""#),
                FieldDef::of::<bool>("Exact").tags(r#"json:"exact" default:"true""#),
                FieldDef::of::<u8>("Broken").tags(r#"json:"broken" default:"many""#),
                FieldDef::of::<Vec<String>>("Fields")
                    .tags(r#"json:"fields""#)
                    .tag("default", r#"["id"]"#),
            ]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&query).unwrap();

        let definitions = generator.definitions();
        let properties = &definitions["Query"].properties;
        assert_eq!(properties["since"].format, "date");
        assert_eq!(properties["limit"].default, Some(json!(20)));
        assert_eq!(properties["limit"].description, "page size");
        assert_eq!(properties["ratio"].default, Some(json!(0.5)));
        assert_eq!(properties["exact"].default, Some(json!(true)));
        assert_eq!(properties["broken"].default, None);
        assert_eq!(properties["fields"].default, Some(json!(["id"])));
    }

    #[test]
    fn test_any_field_uses_concrete_type() {
        let envelope = TypeDef::structure("api", "Envelope", || {
            vec![
                FieldDef::new("Data", TypeDef::any_holding(pet())).tags(r#"json:"data""#),
                FieldDef::of::<Value>("Meta").tags(r#"json:"meta""#),
            ]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&envelope).unwrap();

        let definitions = generator.definitions();
        assert_eq!(
            definitions["Envelope"].properties["data"].reference,
            "#/definitions/Pet"
        );
        assert!(definitions["Envelope"].properties["meta"].is_empty());
        assert!(definitions.contains_key("Pet"));
    }

    #[test]
    fn test_anonymous_collections_are_inline() {
        let mut generator = Generator::new();

        let list = generator.parse_definition(&TypeDef::slice(pet())).unwrap();
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({"type": "array", "items": {"$ref": "#/definitions/Pet"}})
        );

        let map = generator
            .parse_definition(&<std::collections::HashMap<String, i32>>::describe())
            .unwrap();
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"type": "object", "additionalProperties": {"type": "integer", "format": "int32"}})
        );

        let names: Vec<String> = generator.definitions().into_keys().collect();
        assert_eq!(names, vec!["Pet"]);
    }

    #[test]
    fn test_named_collection_is_registered() {
        let pets = TypeDef::named("petstore", "Pets", Kind::Slice(Box::new(pet())));

        let mut generator = Generator::new();
        let schema = generator.parse_definition(&pets).unwrap();

        assert_eq!(schema.reference, "#/definitions/Pets");
        let definitions = generator.definitions();
        assert_eq!(definitions["Pets"].schema_type, "array");
        assert_eq!(
            definitions["Pets"].items.as_ref().unwrap().reference,
            "#/definitions/Pet"
        );
    }

    #[test]
    fn test_primitive_top_level() {
        let mut generator = Generator::new();
        let schema = generator.parse_definition(&i64::describe()).unwrap();

        assert_eq!(schema.schema_type, "integer");
        assert_eq!(schema.format, "int64");
        assert_eq!(schema.type_name, "integer");
        assert!(generator.definitions().is_empty());
    }

    #[test]
    fn test_unsupported_kinds() {
        let mut generator = Generator::new();
        for kind in [
            Kind::Func,
            Kind::Chan,
            Kind::UnsafePointer,
            Kind::Trait("Display".to_string()),
        ] {
            let result = generator.gen_schema_for_type(&TypeDef::new(kind));
            assert!(matches!(result, Err(Error::UnsupportedType { .. })));
        }
    }

    #[test]
    fn test_failed_expansion_keeps_completed_definitions() {
        let broken = TypeDef::structure("jobs", "Job", || {
            vec![
                FieldDef::new("Owner", pet()).tags(r#"json:"owner""#),
                FieldDef::new("Run", TypeDef::new(Kind::Func)).tags(r#"json:"run""#),
            ]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&pet()).unwrap();
        let result = generator.parse_definition(&broken);

        assert!(matches!(result, Err(Error::UnsupportedType { .. })));
        let names: Vec<String> = generator.definitions().into_keys().collect();
        assert_eq!(names, vec!["Pet"]);
        assert_eq!(generator.registry().pending(), 0);
    }

    fn collect_references(schema: &SchemaObj, out: &mut Vec<String>) {
        if let Some(name) = schema.reference.strip_prefix("#/definitions/") {
            out.push(name.to_string());
        }
        let nested = schema
            .properties
            .values()
            .chain(schema.items.as_deref())
            .chain(schema.additional_properties.as_deref());
        for child in nested {
            collect_references(child, out);
        }
    }

    fn dangling_references(generator: &Generator) -> Vec<String> {
        let definitions = generator.definitions();
        let mut references = Vec::new();
        for schema in definitions.values() {
            collect_references(schema, &mut references);
        }
        references.retain(|name| !definitions.contains_key(name));
        references
    }

    #[test]
    fn test_nested_expansion_failure_rolls_back_whole_call() {
        fn inner() -> TypeDef {
            TypeDef::structure("jobs", "Inner", || {
                vec![FieldDef::new("Run", TypeDef::new(Kind::Func)).tags(r#"json:"run""#)]
            })
        }
        let outer = TypeDef::structure("jobs", "Outer", || {
            vec![
                FieldDef::of::<i64>("ID").tags(r#"json:"id""#),
                FieldDef::new("Inner", inner()).tags(r#"json:"inner""#),
                FieldDef::new("Pet", pet()).tags(r#"json:"pet""#),
            ]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&pet()).unwrap();

        let first = generator.parse_definition(&outer);
        assert!(matches!(first, Err(Error::UnsupportedType { .. })));
        let names: Vec<String> = generator.definitions().into_keys().collect();
        assert_eq!(names, vec!["Pet"]);
        assert!(dangling_references(&generator).is_empty());

        let second = generator.parse_definition(&outer);
        assert!(matches!(second, Err(Error::UnsupportedType { .. })));
        let names: Vec<String> = generator.definitions().into_keys().collect();
        assert_eq!(names, vec!["Pet"]);
        assert_eq!(generator.registry().pending(), 0);

        let retried = generator.parse_definition(&TypeDef::pointer(outer)).unwrap_err();
        assert!(matches!(retried, Error::UnsupportedType { .. }));
        assert!(dangling_references(&generator).is_empty());
    }

    struct Money;

    impl SchemaHook for Money {
        fn swgen_definition(&self) -> Result<(String, SchemaObj)> {
            let mut schema = SchemaObj::primitive("string", "decimal");
            schema.description = "amount with currency".to_string();
            Ok((String::new(), schema))
        }
    }

    #[test]
    fn test_schema_hook() {
        let money = TypeDef::structure("billing", "Money", Vec::new).with_schema_hook(Rc::new(Money));
        let invoice = TypeDef::structure("billing", "Invoice", move || {
            vec![FieldDef::new("Total", money.clone()).tags(r#"json:"total""#)]
        });

        let mut generator = Generator::new();
        generator.parse_definition(&invoice).unwrap();

        let definitions = generator.definitions();
        assert_eq!(
            definitions["Invoice"].properties["total"].reference,
            "#/definitions/Money"
        );
        assert_eq!(definitions["Money"].format, "decimal");
        assert!(definitions["Money"].properties.is_empty());
    }

    #[test]
    fn test_type_map() {
        let legacy = TypeDef::structure("legacy", "Timestamp", || {
            vec![FieldDef::of::<i64>("Seconds").tags(r#"json:"seconds""#)]
        });
        let wire = TypeDef::anonymous_struct(|| {
            vec![FieldDef::of::<String>("Iso").tags(r#"json:"iso""#)]
        });

        let mut generator = Generator::new();
        generator.add_type_map(&legacy, <Vec<String>>::describe());
        let schema = generator.parse_definition(&legacy).unwrap();
        assert_eq!(schema.reference, "#/definitions/Timestamp");
        assert_eq!(generator.definitions()["Timestamp"].schema_type, "array");

        generator.reset_definitions();
        generator.add_type_map(&legacy, wire);
        let schema = generator.parse_definition(&legacy).unwrap();
        assert_eq!(schema.reference, "#/definitions/Timestamp");
        assert!(generator.definitions()["Timestamp"].properties.contains_key("iso"));
    }

    #[test]
    fn test_reflect_types_annotates_schemas() {
        let mut generator = Generator::with_options(GeneratorOptions {
            reflect_types: true,
        });
        generator.parse_definition(&pet()).unwrap();

        let definitions = generator.definitions();
        assert_eq!(
            definitions["Pet"].extensions.get("x-rust-type"),
            Some(&json!("petstore::Pet"))
        );
        assert_eq!(
            definitions["Pet"].properties["id"].extensions.get("x-rust-type"),
            Some(&json!("i64"))
        );
    }

    #[test]
    fn test_reset_definitions() {
        let mut generator = Generator::new();
        generator.parse_definition(&pet()).unwrap();
        generator.reset_definitions();
        assert!(generator.definitions().is_empty());

        let schema = generator
            .parse_definition(&TypeDef::structure("zoo", "Pet", Vec::new))
            .unwrap();
        assert_eq!(schema.reference, "#/definitions/Pet");
    }
}
