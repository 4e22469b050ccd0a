//! Request parameter extraction.
//!
//! A parameter struct is flattened into one parameter per tagged field. Fields of
//! struct or pointer-to-struct type are walked before the field itself, so
//! embedded request structs contribute their own parameters.

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::primitive::{schema_from_common_name, CommonName};
use crate::schema::{EnumObj, ParamItemObj, ParamLocation, ParamObj, SchemaObj};
use crate::types::{FieldDef, Kind, TypeDef, TypeKey};
use log::debug;
use std::ops::ControlFlow;

/// Collection format of every multi-value parameter
const COLLECTION_FORMAT: &str = "multi";

/// Visits the exported fields of a struct in declaration order.
///
/// A field whose type is a struct, or a pointer to one, has its own fields
/// visited first. Returning [`ControlFlow::Break`] from `f` stops the whole walk,
/// nested levels included, and the break value is returned.
pub fn for_each_field<B, F>(ty: &TypeDef, f: &mut F) -> ControlFlow<B>
where
    F: FnMut(&FieldDef) -> ControlFlow<B>,
{
    let mut visiting = Vec::new();
    walk_fields(ty, f, &mut visiting)
}

fn walk_fields<B, F>(ty: &TypeDef, f: &mut F, visiting: &mut Vec<TypeKey>) -> ControlFlow<B>
where
    F: FnMut(&FieldDef) -> ControlFlow<B>,
{
    let ty = ty.deref();
    let Kind::Struct(def) = ty.kind() else {
        return ControlFlow::Continue(());
    };

    let key = ty.key();
    if visiting.contains(&key) {
        return ControlFlow::Continue(());
    }
    visiting.push(key);

    for field in def.fields() {
        if !field.exported {
            continue;
        }
        if field.ty.deref().is_struct() {
            walk_fields(&field.ty, f, visiting)?;
        }
        f(&field)?;
    }

    visiting.pop();
    ControlFlow::Continue(())
}

/// Location tags in priority order. `path` is only consulted when the others
/// are absent.
fn location_tag(field: &FieldDef) -> Option<(&str, bool)> {
    for key in ["query", "form", "schema"] {
        if let Some(tag) = field.tags.value(key) {
            return Some((tag, false));
        }
    }
    field.tags.value("path").map(|tag| (tag, true))
}

impl Generator {
    /// Parameter list of a request struct.
    ///
    /// Returns the struct's name and one parameter per field carrying a `query`,
    /// `form`, `schema` or `path` tag. A type with a parameter hook produces its
    /// own list. Every parameter must resolve to a scalar or a flat array of
    /// scalars.
    pub fn parse_parameter(&mut self, ty: &TypeDef) -> Result<(String, Vec<ParamObj>)> {
        if let Some(hook) = ty.hooks().parameters.as_ref().or(ty.deref().hooks().parameters.as_ref()) {
            debug!("Type {} describes its own parameters", ty.key());
            return hook.swgen_parameter();
        }

        let target = ty.deref();
        if let Some(mapped) = self.mapped_type(target) {
            return self.parse_parameter(&mapped);
        }
        if !target.is_struct() {
            return Err(Error::NotAStruct(ty.key().to_string()));
        }

        let parent = target.reliable_name();
        let mut params = Vec::new();
        debug!("Extracting parameters from {}", target.key());

        self.registry.checkpoint();
        let walk = for_each_field(target, &mut |field: &FieldDef| {
            match self.field_parameter(&parent, field) {
                Ok(Some(param)) => {
                    params.push(param);
                    ControlFlow::Continue(())
                }
                Ok(None) => ControlFlow::Continue(()),
                Err(err) => ControlFlow::Break(err),
            }
        });

        let drained = match walk {
            ControlFlow::Break(err) => Err(err),
            ControlFlow::Continue(()) => self.drain(),
        };
        if let Err(err) = drained {
            self.registry.rollback();
            return Err(err);
        }

        Ok((parent, params))
    }

    fn field_parameter(&mut self, parent: &str, field: &FieldDef) -> Result<Option<ParamObj>> {
        let Some((name_tag, in_path)) = location_tag(field) else {
            return Ok(None);
        };

        let mut param = ParamObj {
            name: name_tag.split(',').next().unwrap_or_default().to_string(),
            ..Default::default()
        };
        if self.options.reflect_types {
            param.add_extended_field("x-rust-name", field.name.clone());
            param.add_extended_field("x-rust-type", field.ty.key().to_string());
        }

        let enumer = field
            .ty
            .hooks()
            .enumer
            .as_ref()
            .or(field.ty.deref().hooks().enumer.as_ref());
        if let Some(enumer) = enumer {
            let (values, names) = enumer.enum_slices();
            param.enumeration = EnumObj { values, names };
        }

        if let Some(description) = field.tags.value("description") {
            param.description = description.to_string();
        }

        param.required = field
            .tags
            .get("binding")
            .is_some_and(|binding| binding.split(';').any(|rule| rule == "required"));

        param.location = match field.tags.value("in") {
            Some(location) => location.parse().map_err(|_| Error::InvalidLocation {
                field: field.name.clone(),
                location: location.to_string(),
            })?,
            None if in_path => ParamLocation::Path,
            None => ParamLocation::Query,
        };

        let schema = self.parameter_schema(field)?;
        if schema.schema_type.is_empty() {
            return Err(Error::UnsupportedParameter {
                parent: parent.to_string(),
                field: field.name.clone(),
                reason: "parameters must resolve to a scalar or an array of scalars".to_string(),
            });
        }

        if schema.schema_type == "array" {
            if let Some(items) = &schema.items {
                if items.is_reference() || items.schema_type == "array" {
                    return Err(Error::UnsupportedParameter {
                        parent: parent.to_string(),
                        field: field.name.clone(),
                        reason: "arrays of structs and nested arrays are not supported".to_string(),
                    });
                }
                param.items = Some(ParamItemObj {
                    item_type: items.schema_type.clone(),
                    format: items.format.clone(),
                });
                param.collection_format = COLLECTION_FORMAT.to_string();
            }
        }

        param.param_type = schema.schema_type;
        param.format = schema.format;
        Ok(Some(param))
    }

    fn parameter_schema(&mut self, field: &FieldDef) -> Result<SchemaObj> {
        if let Some(hint) = field.tags.value("swgen_type") {
            return Ok(schema_from_common_name(CommonName::from_alias(hint)));
        }
        match self.mapped_type(&field.ty) {
            Some(mapped) => self.gen_schema_for_type(&mapped),
            None => self.gen_schema_for_type(&field.ty),
        }
    }
}
