//! Type descriptors.
//!
//! A [`TypeDef`] is the explicit metadata the generator walks instead of live
//! introspection: the structural [`Kind`] of a type, its declared name and module,
//! and the optional capability hooks that let a type describe itself.
//!
//! Descriptors come from two places: the [`Describe`] trait (implemented here for
//! the std and serde types most APIs use, and by hand for application types), and
//! the [`source`](crate::source) front end, which builds them from annotated Rust
//! declarations.
//!
//! Struct fields are produced lazily so a struct may refer to itself, directly or
//! through other structs, without building an infinite descriptor.

use crate::error::Result;
use crate::schema::{ParamObj, SchemaObj};
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

/// Identity of a type inside one generation session.
///
/// Two descriptors with the same key map to the same definition. `Pet`, `*Pet`
/// and `[]Pet` all have different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A type that produces its own definition, bypassing field reflection.
pub trait SchemaHook {
    /// Returns the definition name (empty keeps the type's own name) and its schema.
    fn swgen_definition(&self) -> Result<(String, SchemaObj)>;
}

/// A type that produces its own parameter list.
pub trait ParameterHook {
    fn swgen_parameter(&self) -> Result<(String, Vec<ParamObj>)>;
}

/// A type that can enumerate its legal values.
pub trait Enumer {
    /// Parallel lists of values and display names. The names list may be empty.
    fn enum_slices(&self) -> (Vec<Value>, Vec<String>);
}

/// Capability hooks attached to a descriptor
#[derive(Clone, Default)]
pub struct Hooks {
    pub schema: Option<Rc<dyn SchemaHook>>,
    pub parameters: Option<Rc<dyn ParameterHook>>,
    pub enumer: Option<Rc<dyn Enumer>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("schema", &self.schema.is_some())
            .field("parameters", &self.parameters.is_some())
            .field("enumer", &self.enumer.is_some())
            .finish()
    }
}

/// Structural kind of a type
#[derive(Debug, Clone)]
pub enum Kind {
    Bool,
    /// Signed integer with its width in bits
    Int(u8),
    /// Unsigned integer with its width in bits
    Uint(u8),
    Float32,
    Float64,
    String,
    /// Opaque raw bytes, never expanded into an array of integers
    Bytes,
    DateTime,
    /// A type that parses itself from text; its structure is opaque
    Text,
    Pointer(Box<TypeDef>),
    Slice(Box<TypeDef>),
    Array(Box<TypeDef>, usize),
    /// Map from key type to value type. Keys are assumed to serialize as strings.
    Map(Box<TypeDef>, Box<TypeDef>),
    Struct(StructDef),
    /// Empty interface, optionally holding a value of a known concrete type
    Any(Option<Box<TypeDef>>),
    /// Interface with methods
    Trait(String),
    Func,
    Chan,
    UnsafePointer,
}

/// Lazily produced field list of a struct
#[derive(Clone)]
pub struct StructDef {
    fields: Rc<dyn Fn() -> Vec<FieldDef>>,
}

impl StructDef {
    pub fn new(fields: impl Fn() -> Vec<FieldDef> + 'static) -> Self {
        Self {
            fields: Rc::new(fields),
        }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> Vec<FieldDef> {
        (self.fields)()
    }
}

impl fmt::Debug for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StructDef { .. }")
    }
}

/// Descriptor of one type
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: Option<String>,
    module: Option<String>,
    kind: Kind,
    hooks: Hooks,
}

impl TypeDef {
    /// An anonymous type of the given kind
    pub fn new(kind: Kind) -> Self {
        Self {
            name: None,
            module: None,
            kind,
            hooks: Hooks::default(),
        }
    }

    /// A named type. `module` qualifies the identity so that equally named types
    /// declared in different modules stay distinct.
    pub fn named(module: &str, name: &str, kind: Kind) -> Self {
        Self {
            name: Some(name.to_string()),
            module: (!module.is_empty()).then(|| module.to_string()),
            kind,
            hooks: Hooks::default(),
        }
    }

    /// A named struct whose fields are produced by `fields`
    pub fn structure(
        module: &str,
        name: &str,
        fields: impl Fn() -> Vec<FieldDef> + 'static,
    ) -> Self {
        Self::named(module, name, Kind::Struct(StructDef::new(fields)))
    }

    pub fn anonymous_struct(fields: impl Fn() -> Vec<FieldDef> + 'static) -> Self {
        Self::new(Kind::Struct(StructDef::new(fields)))
    }

    pub fn pointer(inner: TypeDef) -> Self {
        Self::new(Kind::Pointer(Box::new(inner)))
    }

    pub fn slice(elem: TypeDef) -> Self {
        Self::new(Kind::Slice(Box::new(elem)))
    }

    pub fn array(elem: TypeDef, len: usize) -> Self {
        Self::new(Kind::Array(Box::new(elem), len))
    }

    pub fn map(key: TypeDef, value: TypeDef) -> Self {
        Self::new(Kind::Map(Box::new(key), Box::new(value)))
    }

    pub fn bytes() -> Self {
        Self::new(Kind::Bytes)
    }

    pub fn any() -> Self {
        Self::new(Kind::Any(None))
    }

    /// An empty interface currently holding a value of type `concrete`
    pub fn any_holding(concrete: TypeDef) -> Self {
        Self::new(Kind::Any(Some(Box::new(concrete))))
    }

    pub fn with_schema_hook(mut self, hook: Rc<dyn SchemaHook>) -> Self {
        self.hooks.schema = Some(hook);
        self
    }

    pub fn with_parameter_hook(mut self, hook: Rc<dyn ParameterHook>) -> Self {
        self.hooks.parameters = Some(hook);
        self
    }

    pub fn with_enumer(mut self, enumer: Rc<dyn Enumer>) -> Self {
        self.hooks.enumer = Some(enumer);
        self
    }

    /// The same kind and hooks under another name
    pub fn renamed(&self, module: &str, name: &str) -> Self {
        let mut renamed = Self::named(module, name, self.kind.clone());
        renamed.hooks = self.hooks.clone();
        renamed
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Strips every level of pointer indirection
    pub fn deref(&self) -> &TypeDef {
        let mut ty = self;
        while let Kind::Pointer(inner) = &ty.kind {
            ty = inner;
        }
        ty
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, Kind::Struct(_))
    }

    pub fn key(&self) -> TypeKey {
        TypeKey(self.key_string())
    }

    fn key_string(&self) -> String {
        if let Some(name) = &self.name {
            return match &self.module {
                Some(module) => format!("{}::{}", module, name),
                None => name.clone(),
            };
        }

        match &self.kind {
            Kind::Bool => "bool".to_string(),
            Kind::Int(bits) => format!("i{}", bits),
            Kind::Uint(bits) => format!("u{}", bits),
            Kind::Float32 => "f32".to_string(),
            Kind::Float64 => "f64".to_string(),
            Kind::String => "string".to_string(),
            Kind::Bytes => "bytes".to_string(),
            Kind::DateTime => "datetime".to_string(),
            Kind::Text => "text".to_string(),
            Kind::Pointer(inner) => format!("*{}", inner.key_string()),
            Kind::Slice(elem) => format!("[]{}", elem.key_string()),
            Kind::Array(elem, len) => format!("[{}]{}", len, elem.key_string()),
            Kind::Map(key, value) => format!("map[{}]{}", key.key_string(), value.key_string()),
            Kind::Struct(def) => {
                let fields: Vec<String> = def
                    .fields()
                    .iter()
                    .map(|f| format!("{} {} {}", f.name, f.ty.key_string(), f.tags))
                    .collect();
                format!("struct{{{}}}", fields.join("; "))
            }
            Kind::Any(_) => "any".to_string(),
            Kind::Trait(name) => format!("dyn {}", name),
            Kind::Func => "fn".to_string(),
            Kind::Chan => "chan".to_string(),
            Kind::UnsafePointer => "unsafe pointer".to_string(),
        }
    }

    /// Display name used for definitions.
    ///
    /// Named types drop module qualifiers and generic punctuation (`Page<models::User>`
    /// becomes `PageUser`). Anonymous structs fall back to a structural name built from
    /// their exported fields. Other anonymous types have no name.
    pub fn reliable_name(&self) -> String {
        if let Some(name) = &self.name {
            let sanitized = sanitize_name(name);
            if !sanitized.is_empty() {
                return sanitized;
            }
        }

        match &self.kind {
            Kind::Struct(def) => {
                let mut name = String::from("Anonymous");
                for field in def.fields().iter().filter(|f| f.exported) {
                    name.push_str(&capitalize(&sanitize_name(&field.name)));
                }
                name
            }
            _ => String::new(),
        }
    }
}

/// Reads a quoted value up to its closing quote, resolving escapes. Returns the
/// value and the number of bytes consumed, closing quote included.
fn unquote(body: &str) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut chars = body.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Some((value, i + 1)),
            '\\' => match chars.next()?.1 {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                escaped => value.push(escaped),
            },
            _ => value.push(ch),
        }
    }
    None
}

fn sanitize_name(raw: &str) -> String {
    raw.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .filter_map(|segment| segment.rsplit("::").next())
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Field tags, the key/value annotations a field carries.
///
/// Recognized keys: `json`, `swgen_type`, `default`, `description`, `query`,
/// `form`, `schema`, `path`, `in`, `binding`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the conventional `key:"value" key2:"value2"` tag notation.
    ///
    /// Values may contain backslash escapes (`\"`, `\\`, `\n`, `\t`). Parsing stops
    /// at the first malformed pair.
    pub fn parse(raw: &str) -> Self {
        let mut tags = Tags::new();
        let mut rest = raw.trim_start();

        while !rest.is_empty() {
            let pair = rest.find(':').and_then(|colon| {
                let key = &rest[..colon];
                if key.is_empty() || key.contains(char::is_whitespace) || key.contains('"') {
                    return None;
                }
                let body = rest[colon + 1..].strip_prefix('"')?;
                let (value, consumed) = unquote(body)?;
                Some((key, value, &body[consumed..]))
            });
            let Some((key, value, remaining)) = pair else {
                debug!("Ignoring malformed tag text {:?} in {:?}", rest, raw);
                break;
            };
            tags.set(key, &value);
            rest = remaining.trim_start();
        }

        tags
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Tags::get`], but treats empty values and `-` as absent
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty() && *v != "-")
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.0.push((key.to_string(), value.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| format!("{}:{:?}", k, v))
            .collect();
        f.write_str(&pairs.join(" "))
    }
}

/// One struct field
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Declared field name
    pub name: String,
    /// Fields that are not exported are invisible to the generator
    pub exported: bool,
    /// Embedded fields have their own fields merged into the parent
    pub embedded: bool,
    pub ty: TypeDef,
    pub tags: Tags,
}

impl FieldDef {
    pub fn new(name: &str, ty: TypeDef) -> Self {
        Self {
            name: name.to_string(),
            exported: true,
            embedded: false,
            ty,
            tags: Tags::new(),
        }
    }

    pub fn of<T: Describe + ?Sized>(name: &str) -> Self {
        Self::new(name, T::describe())
    }

    /// An embedded field, named after its type
    pub fn embed(ty: TypeDef) -> Self {
        let mut field = Self::new(&ty.deref().reliable_name(), ty);
        field.embedded = true;
        field
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.set(key, value);
        self
    }

    /// Replaces all tags with the parsed `key:"value"` notation
    pub fn tags(mut self, raw: &str) -> Self {
        self.tags = Tags::parse(raw);
        self
    }
}

/// Compile-time source of descriptors
pub trait Describe {
    fn describe() -> TypeDef;
}

macro_rules! describe_as {
    ($kind:expr => $($ty:ty),+) => {
        $(impl Describe for $ty {
            fn describe() -> TypeDef {
                TypeDef::new($kind)
            }
        })+
    };
}

describe_as!(Kind::Bool => bool);
describe_as!(Kind::Int(8) => i8);
describe_as!(Kind::Int(16) => i16);
describe_as!(Kind::Int(32) => i32);
describe_as!(Kind::Int(64) => i64, isize);
describe_as!(Kind::Int(128) => i128);
describe_as!(Kind::Uint(8) => u8);
describe_as!(Kind::Uint(16) => u16);
describe_as!(Kind::Uint(32) => u32);
describe_as!(Kind::Uint(64) => u64, usize);
describe_as!(Kind::Uint(128) => u128);
describe_as!(Kind::Float32 => f32);
describe_as!(Kind::Float64 => f64);
describe_as!(Kind::String => String, str, char);
describe_as!(Kind::DateTime => SystemTime);
describe_as!(Kind::Any(None) => Value);

macro_rules! describe_text {
    ($($ty:ident),+) => {
        $(impl Describe for $ty {
            fn describe() -> TypeDef {
                TypeDef::named("std", stringify!($ty), Kind::Text)
            }
        })+
    };
}

describe_text!(PathBuf, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

macro_rules! describe_pointer {
    ($($ty:ident),+) => {
        $(impl<T: Describe + ?Sized> Describe for $ty<T> {
            fn describe() -> TypeDef {
                TypeDef::pointer(T::describe())
            }
        })+
    };
}

describe_pointer!(Box, Rc, Arc);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDef {
        TypeDef::pointer(T::describe())
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDef {
        TypeDef::pointer(T::describe())
    }
}

macro_rules! describe_sequence {
    ($($ty:ident),+) => {
        $(impl<T: Describe> Describe for $ty<T> {
            fn describe() -> TypeDef {
                TypeDef::slice(T::describe())
            }
        })+
    };
}

describe_sequence!(Vec, VecDeque, HashSet, BTreeSet);

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDef {
        TypeDef::slice(T::describe())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDef {
        TypeDef::array(T::describe(), N)
    }
}

impl<K: Describe, V: Describe> Describe for HashMap<K, V> {
    fn describe() -> TypeDef {
        TypeDef::map(K::describe(), V::describe())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDef {
        TypeDef::map(K::describe(), V::describe())
    }
}
