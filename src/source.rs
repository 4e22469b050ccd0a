//! Descriptors built from Rust source declarations.
//!
//! [`SourceIndex`] records every struct, enum and type alias of a parsed project
//! by name. Type expressions are resolved against it into [`TypeDef`]s: std and
//! well-known ecosystem types map to their scalar or container kinds, declared
//! structs become lazily expanded struct descriptors, and `#[serde(...)]` and
//! `#[swgen(...)]` attributes become field tags.
//!
//! Recognized `swgen` keys: `type`, `default`, `description`, `query`, `form`,
//! `schema`, `path`, `in`, `binding`, and the `required` flag.

use crate::error::{Error, Result};
use crate::parser::{ParsedFile, ROOT_MODULE};
use crate::types::{Enumer, FieldDef, Kind, Tags, TypeDef};
use log::{debug, warn};
use quote::ToTokens;
use serde_json::Value;
use std::collections::HashMap;
use std::mem;
use std::path::PathBuf;
use std::rc::Rc;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Fields, GenericArgument, Lit, Meta, PathArguments, Token};

/// Leading path segments that name crates outside the scanned project
const EXTERNAL_CRATES: &[&str] = &[
    "std", "core", "alloc", "serde", "serde_json", "serde_bytes", "chrono", "time", "uuid",
    "url", "bytes", "tokio", "crossbeam", "rust_decimal", "http",
];

const DATE_TIME_TYPES: &[&str] = &[
    "DateTime",
    "NaiveDateTime",
    "NaiveDate",
    "NaiveTime",
    "OffsetDateTime",
    "PrimitiveDateTime",
    "SystemTime",
    "Timestamp",
];

/// Types that serialize through their text form, with the module they live in
const TEXT_TYPES: &[(&str, &str)] = &[
    ("Uuid", "uuid"),
    ("Url", "url"),
    ("Uri", "http"),
    ("Decimal", "rust_decimal"),
    ("IpAddr", "std"),
    ("Ipv4Addr", "std"),
    ("Ipv6Addr", "std"),
    ("SocketAddr", "std"),
    ("PathBuf", "std"),
    ("Path", "std"),
];

#[derive(Debug)]
enum DeclItem {
    Struct(Rc<syn::ItemStruct>),
    Enum(syn::ItemEnum),
    Alias(syn::ItemType),
}

#[derive(Debug)]
struct Decl {
    module: String,
    item: DeclItem,
}

impl Decl {
    fn key(&self, name: &str) -> String {
        format!("{}::{}", self.module, name)
    }
}

/// Declarations of a project, indexed by type name
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    decls: Rc<HashMap<String, Vec<Rc<Decl>>>>,
}

impl SourceIndex {
    pub fn new(files: &[ParsedFile]) -> Self {
        let mut decls: HashMap<String, Vec<Rc<Decl>>> = HashMap::new();
        for file in files {
            collect_items(&file.syntax_tree.items, &file.module, &mut decls);
        }
        debug!(
            "Indexed {} type names from {} files",
            decls.len(),
            files.len()
        );
        Self {
            decls: Rc::new(decls),
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    /// Resolves `ty` as written inside module `module`
    pub fn resolve(&self, ty: &syn::Type, module: &str) -> TypeDef {
        Resolver::new(self, module, HashMap::new()).resolve(ty)
    }

    /// Parses and resolves a type expression such as `Vec<models::Pet>`.
    ///
    /// Unlike [`SourceIndex::resolve`], a name that is neither declared in the
    /// project nor a known std or ecosystem type is an error.
    pub fn describe_str(&self, expr: &str) -> Result<TypeDef> {
        let ty: syn::Type = syn::parse_str(expr).map_err(|e| Error::Parse {
            file: PathBuf::from("<type expression>"),
            message: format!("{}: {}", expr, e),
        })?;

        let mut resolver = Resolver::new(self, ROOT_MODULE, HashMap::new());
        let described = resolver.resolve(&ty);
        match resolver.unknown.into_iter().next() {
            Some(name) => Err(Error::UnknownType(name)),
            None => Ok(described),
        }
    }

    /// Finds the declaration `name`, preferring one whose module matches the
    /// written path prefix, then one in the referencing module.
    fn find(&self, name: &str, prefix: &[String], module: &str) -> Option<Rc<Decl>> {
        let candidates = self.decls.get(name)?;

        if !prefix.is_empty() {
            let wanted = prefix.join("::");
            let matched = candidates.iter().find(|d| {
                d.module == wanted
                    || d.module.ends_with(&format!("::{}", wanted))
                    || d.module.starts_with(&format!("{}::", wanted))
            });
            if let Some(decl) = matched {
                return Some(decl.clone());
            }
        }

        candidates
            .iter()
            .find(|d| d.module == module)
            .or_else(|| candidates.first())
            .cloned()
    }
}

fn collect_items(items: &[syn::Item], module: &str, decls: &mut HashMap<String, Vec<Rc<Decl>>>) {
    for item in items {
        let (name, decl_item) = match item {
            syn::Item::Struct(s) => (s.ident.to_string(), DeclItem::Struct(Rc::new(s.clone()))),
            syn::Item::Enum(e) => (e.ident.to_string(), DeclItem::Enum(e.clone())),
            syn::Item::Type(t) => (t.ident.to_string(), DeclItem::Alias(t.clone())),
            syn::Item::Mod(m) => {
                if let Some((_, content)) = &m.content {
                    let nested = if module == ROOT_MODULE {
                        m.ident.to_string()
                    } else {
                        format!("{}::{}", module, m.ident)
                    };
                    collect_items(content, &nested, decls);
                }
                continue;
            }
            _ => continue,
        };
        decls.entry(name).or_default().push(Rc::new(Decl {
            module: module.to_string(),
            item: decl_item,
        }));
    }
}

/// Unit enum variants as serialized values and declared names
struct VariantList {
    values: Vec<Value>,
    names: Vec<String>,
}

impl Enumer for VariantList {
    fn enum_slices(&self) -> (Vec<Value>, Vec<String>) {
        (self.values.clone(), self.names.clone())
    }
}

struct Resolver<'a> {
    index: &'a SourceIndex,
    module: String,
    generics: HashMap<String, TypeDef>,
    /// Newtypes and aliases being resolved, to cut cycles
    expanding: Vec<String>,
    /// Paths that resolved to nothing
    unknown: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(index: &'a SourceIndex, module: &str, generics: HashMap<String, TypeDef>) -> Self {
        Self {
            index,
            module: module.to_string(),
            generics,
            expanding: Vec::new(),
            unknown: Vec::new(),
        }
    }

    fn resolve(&mut self, ty: &syn::Type) -> TypeDef {
        match ty {
            syn::Type::Path(type_path) => self.resolve_path(&type_path.path),
            syn::Type::Reference(r) => TypeDef::pointer(self.resolve(&r.elem)),
            syn::Type::Slice(s) if is_u8(&s.elem) => TypeDef::bytes(),
            syn::Type::Slice(s) => TypeDef::slice(self.resolve(&s.elem)),
            syn::Type::Array(a) => TypeDef::array(self.resolve(&a.elem), array_len(&a.len)),
            syn::Type::Paren(p) => self.resolve(&p.elem),
            syn::Type::Group(g) => self.resolve(&g.elem),
            syn::Type::TraitObject(t) => trait_type(&t.bounds),
            syn::Type::ImplTrait(t) => trait_type(&t.bounds),
            syn::Type::BareFn(_) => TypeDef::new(Kind::Func),
            syn::Type::Ptr(_) => TypeDef::new(Kind::UnsafePointer),
            other => {
                debug!(
                    "No descriptor for {}, described as any",
                    other.to_token_stream()
                );
                TypeDef::any()
            }
        }
    }

    fn resolve_path(&mut self, path: &syn::Path) -> TypeDef {
        let Some(last) = path.segments.last() else {
            return TypeDef::any();
        };
        let name = last.ident.to_string();
        let args = type_args(&last.arguments);

        if path.segments.len() == 1 && args.is_empty() {
            if let Some(bound) = self.generics.get(&name) {
                return bound.clone();
            }
        }

        let prefix: Vec<String> = path
            .segments
            .iter()
            .take(path.segments.len() - 1)
            .map(|s| s.ident.to_string())
            .filter(|s| !matches!(s.as_str(), "crate" | "self" | "super"))
            .collect();
        let external = prefix
            .first()
            .is_some_and(|p| EXTERNAL_CRATES.contains(&p.as_str()));

        if !external {
            if let Some(decl) = self.index.find(&name, &prefix, &self.module) {
                let args: Vec<TypeDef> = args.iter().map(|a| self.resolve(a)).collect();
                return self.declared(&decl, &name, args);
            }
        }
        if let Some(builtin) = self.builtin(&name, &args) {
            return builtin;
        }

        let written = path.to_token_stream().to_string().replace(' ', "");
        warn!("Unknown type {}, described as any", written);
        self.unknown.push(written);
        TypeDef::any()
    }

    fn arg(&mut self, args: &[&syn::Type], index: usize) -> TypeDef {
        match args.get(index) {
            Some(ty) => self.resolve(ty),
            None => TypeDef::any(),
        }
    }

    fn builtin(&mut self, name: &str, args: &[&syn::Type]) -> Option<TypeDef> {
        let kind = match name {
            "bool" => Kind::Bool,
            "i8" => Kind::Int(8),
            "i16" => Kind::Int(16),
            "i32" => Kind::Int(32),
            "i64" | "isize" => Kind::Int(64),
            "i128" => Kind::Int(128),
            "u8" => Kind::Uint(8),
            "u16" => Kind::Uint(16),
            "u32" => Kind::Uint(32),
            "u64" | "usize" => Kind::Uint(64),
            "u128" => Kind::Uint(128),
            "f32" => Kind::Float32,
            "f64" => Kind::Float64,
            "String" | "str" | "char" => Kind::String,
            "Option" | "Box" | "Rc" | "Arc" | "Cow" => {
                return Some(TypeDef::pointer(self.arg(args, 0)));
            }
            "Vec" if args.first().is_some_and(|a| is_u8(a)) => Kind::Bytes,
            "Vec" | "VecDeque" | "LinkedList" | "HashSet" | "BTreeSet" | "IndexSet" => {
                return Some(TypeDef::slice(self.arg(args, 0)));
            }
            "HashMap" | "BTreeMap" | "IndexMap" => {
                let key = self.arg(args, 0);
                return Some(TypeDef::map(key, self.arg(args, 1)));
            }
            "Bytes" | "BytesMut" | "ByteBuf" | "RawValue" => Kind::Bytes,
            "Value" => Kind::Any(None),
            "Sender" | "Receiver" | "SyncSender" | "UnboundedSender" | "UnboundedReceiver" => {
                Kind::Chan
            }
            _ if DATE_TIME_TYPES.contains(&name) => Kind::DateTime,
            _ => {
                let (_, module) = TEXT_TYPES.iter().find(|(text, _)| *text == name)?;
                return Some(TypeDef::named(module, name, Kind::Text));
            }
        };
        Some(TypeDef::new(kind))
    }

    fn declared(&mut self, decl: &Rc<Decl>, name: &str, args: Vec<TypeDef>) -> TypeDef {
        match &decl.item {
            DeclItem::Struct(item) => self.struct_type(decl, item, args),
            DeclItem::Enum(item) => enum_type(&decl.module, item),
            DeclItem::Alias(item) => {
                let generics = bind_generics(&item.generics, &args);
                let Some(target) = self.expand(decl, name, generics, &item.ty) else {
                    return TypeDef::any();
                };
                match target.kind() {
                    Kind::Slice(_) | Kind::Array(..) | Kind::Map(..) if target.name().is_none() => {
                        target.renamed(&decl.module, name)
                    }
                    _ => target,
                }
            }
        }
    }

    /// Resolves the body of a newtype or alias in the scope of its declaration
    fn expand(
        &mut self,
        decl: &Decl,
        name: &str,
        generics: HashMap<String, TypeDef>,
        ty: &syn::Type,
    ) -> Option<TypeDef> {
        let key = decl.key(name);
        if self.expanding.contains(&key) {
            warn!("Type {} is defined through itself, described as any", key);
            return None;
        }

        self.expanding.push(key);
        let saved_module = mem::replace(&mut self.module, decl.module.clone());
        let saved_generics = mem::replace(&mut self.generics, generics);
        let resolved = self.resolve(ty);
        self.generics = saved_generics;
        self.module = saved_module;
        self.expanding.pop();

        Some(resolved)
    }

    fn struct_type(&mut self, decl: &Rc<Decl>, item: &Rc<syn::ItemStruct>, args: Vec<TypeDef>) -> TypeDef {
        let name = instance_name(&item.ident.to_string(), &args);
        let generics = bind_generics(&item.generics, &args);
        let container = SerdeContainer::parse(&item.attrs);

        let newtype = match &item.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => fields.unnamed.first(),
            Fields::Named(fields) if container.transparent => fields.named.first(),
            _ => None,
        };
        if let Some(inner) = newtype {
            return match self.expand(decl, &name, generics, &inner.ty) {
                Some(target) => target.renamed(&decl.module, &name),
                None => TypeDef::any(),
            };
        }

        match &item.fields {
            Fields::Unnamed(_) => {
                TypeDef::named(&decl.module, &name, Kind::Slice(Box::new(TypeDef::any())))
            }
            Fields::Unit => TypeDef::structure(&decl.module, &name, Vec::new),
            Fields::Named(_) => {
                let index = self.index.clone();
                let module = decl.module.clone();
                let item = item.clone();
                TypeDef::structure(&decl.module, &name, move || {
                    Resolver::new(&index, &module, generics.clone()).struct_fields(&item, &container)
                })
            }
        }
    }

    fn struct_fields(&mut self, item: &syn::ItemStruct, container: &SerdeContainer) -> Vec<FieldDef> {
        item.fields
            .iter()
            .enumerate()
            .map(|(position, field)| self.field_def(field, position, container.rename_all.as_deref()))
            .collect()
    }

    fn field_def(&mut self, field: &syn::Field, position: usize, rename_all: Option<&str>) -> FieldDef {
        let ident = match &field.ident {
            Some(ident) => ident.unraw().to_string(),
            None => position.to_string(),
        };
        let serde = SerdeField::parse(&field.attrs);

        let mut def = FieldDef::new(&ident, self.resolve(&field.ty));
        def.exported = !matches!(field.vis, syn::Visibility::Inherited);
        def.embedded = serde.flatten;

        let json = if serde.skip {
            "-".to_string()
        } else {
            serde
                .rename
                .unwrap_or_else(|| rename_field(rename_all, &ident))
        };
        def.tags.set("json", &json);

        apply_swgen(&field.attrs, &mut def.tags);
        if def.tags.get("description").is_none() {
            if let Some(doc) = doc_comment(&field.attrs) {
                def.tags.set("description", &doc);
            }
        }
        def
    }
}

fn enum_type(module: &str, item: &syn::ItemEnum) -> TypeDef {
    let name = item.ident.to_string();
    let container = SerdeContainer::parse(&item.attrs);
    let unit_only = item.variants.iter().all(|v| matches!(v.fields, Fields::Unit));

    if !unit_only || container.untagged {
        debug!("Enum {} carries data, described as any", name);
        return TypeDef::named(module, &name, Kind::Any(None));
    }

    let mut values = Vec::new();
    let mut names = Vec::new();
    for variant in &item.variants {
        let serde = SerdeField::parse(&variant.attrs);
        if serde.skip {
            continue;
        }
        let ident = variant.ident.unraw().to_string();
        let value = serde
            .rename
            .unwrap_or_else(|| rename_variant(container.rename_all.as_deref(), &ident));
        values.push(Value::String(value));
        names.push(ident);
    }

    TypeDef::named(module, &name, Kind::String).with_enumer(Rc::new(VariantList { values, names }))
}

fn trait_type(bounds: &syn::punctuated::Punctuated<syn::TypeParamBound, Token![+]>) -> TypeDef {
    let name = bounds.iter().find_map(|bound| match bound {
        syn::TypeParamBound::Trait(t) => t.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    });
    match name.as_deref() {
        Some("Any") => TypeDef::any(),
        Some(name) => TypeDef::new(Kind::Trait(name.to_string())),
        None => TypeDef::any(),
    }
}

fn type_args(arguments: &PathArguments) -> Vec<&syn::Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn bind_generics(generics: &syn::Generics, args: &[TypeDef]) -> HashMap<String, TypeDef> {
    generics
        .type_params()
        .enumerate()
        .map(|(i, param)| {
            let bound = args.get(i).cloned().unwrap_or_else(TypeDef::any);
            (param.ident.to_string(), bound)
        })
        .collect()
}

/// `Page<models::User>` for an instantiation, the bare name otherwise
fn instance_name(ident: &str, args: &[TypeDef]) -> String {
    if args.is_empty() {
        return ident.to_string();
    }
    let args: Vec<String> = args.iter().map(|a| a.key().to_string()).collect();
    format!("{}<{}>", ident, args.join(", "))
}

fn is_u8(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(p) if p.path.is_ident("u8"))
}

fn array_len(expr: &Expr) -> usize {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse().unwrap_or(0),
        _ => 0,
    }
}

/// First paragraph of the `///` comments
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect();

    (!lines.is_empty()).then(|| lines.join(" "))
}

/// Consumes the value of a meta item we do not interpret
fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_meta(&nested))?;
    }
    Ok(())
}

/// `key = "value"` or the `serialize` half of `key(serialize = "..", deserialize = "..")`
fn serialize_value(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        let lit: syn::LitStr = meta.value()?.parse()?;
        return Ok(Some(lit.value()));
    }
    let mut value = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            let lit: syn::LitStr = nested.value()?.parse()?;
            value = Some(lit.value());
            Ok(())
        } else {
            skip_meta(&nested)
        }
    })?;
    Ok(value)
}

fn lit_value(meta: &ParseNestedMeta) -> syn::Result<String> {
    let lit: Lit = meta.value()?.parse()?;
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new_spanned(other, "expected a string, number or bool")),
    }
}

#[derive(Debug, Clone, Default)]
struct SerdeContainer {
    rename_all: Option<String>,
    transparent: bool,
    untagged: bool,
}

impl SerdeContainer {
    fn parse(attrs: &[Attribute]) -> Self {
        let mut container = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    container.rename_all = serialize_value(&meta)?;
                } else if meta.path.is_ident("transparent") {
                    container.transparent = true;
                } else if meta.path.is_ident("untagged") {
                    container.untagged = true;
                } else {
                    skip_meta(&meta)?;
                }
                Ok(())
            });
            if let Err(e) = parsed {
                warn!("Ignoring malformed serde attribute: {}", e);
            }
        }
        container
    }
}

#[derive(Debug, Default)]
struct SerdeField {
    rename: Option<String>,
    skip: bool,
    flatten: bool,
}

impl SerdeField {
    fn parse(attrs: &[Attribute]) -> Self {
        let mut field = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(rename) = serialize_value(&meta)? {
                        field.rename = Some(rename);
                    }
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    field.skip = true;
                } else if meta.path.is_ident("flatten") {
                    field.flatten = true;
                } else {
                    skip_meta(&meta)?;
                }
                Ok(())
            });
            if let Err(e) = parsed {
                warn!("Ignoring malformed serde attribute: {}", e);
            }
        }
        field
    }
}

/// Copies `#[swgen(...)]` entries into the tag bag
fn apply_swgen(attrs: &[Attribute], tags: &mut Tags) {
    for attr in attrs.iter().filter(|a| a.path().is_ident("swgen")) {
        let parsed = attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(|ident| ident.to_string())
                .unwrap_or_default();

            let tag = match key.as_str() {
                "required" => {
                    let binding = match tags.get("binding") {
                        Some(existing) if !existing.is_empty() => format!("{};required", existing),
                        _ => "required".to_string(),
                    };
                    tags.set("binding", &binding);
                    return Ok(());
                }
                "type" => "swgen_type",
                "default" | "description" | "query" | "form" | "schema" | "path" | "in"
                | "binding" => key.as_str(),
                _ => return Err(meta.error(format!("unknown swgen key `{}`", key))),
            };
            let value = lit_value(&meta)?;
            tags.set(tag, &value);
            Ok(())
        });
        if let Err(e) = parsed {
            warn!("Ignoring malformed swgen attribute: {}", e);
        }
    }
}

/// serde's `rename_all` applied to a snake_case field name
fn rename_field(rule: Option<&str>, field: &str) -> String {
    match rule {
        Some("UPPERCASE") | Some("SCREAMING_SNAKE_CASE") => field.to_ascii_uppercase(),
        Some("PascalCase") => pascal_from_snake(field),
        Some("camelCase") => lower_first(&pascal_from_snake(field)),
        Some("kebab-case") => field.replace('_', "-"),
        Some("SCREAMING-KEBAB-CASE") => field.to_ascii_uppercase().replace('_', "-"),
        _ => field.to_string(),
    }
}

/// serde's `rename_all` applied to a PascalCase variant name
fn rename_variant(rule: Option<&str>, variant: &str) -> String {
    match rule {
        Some("lowercase") => variant.to_ascii_lowercase(),
        Some("UPPERCASE") => variant.to_ascii_uppercase(),
        Some("camelCase") => lower_first(variant),
        Some("snake_case") => snake_from_pascal(variant),
        Some("SCREAMING_SNAKE_CASE") => snake_from_pascal(variant).to_ascii_uppercase(),
        Some("kebab-case") => snake_from_pascal(variant).replace('_', "-"),
        Some("SCREAMING-KEBAB-CASE") => snake_from_pascal(variant)
            .to_ascii_uppercase()
            .replace('_', "-"),
        _ => variant.to_string(),
    }
}

fn pascal_from_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize = true;
    for ch in s.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn snake_from_pascal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.char_indices() {
        if i > 0 && ch.is_uppercase() {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
