//! Swagger 2.0 document model and operation assembly.
//!
//! Operations are registered with [`Generator::set_path_item`], which stitches the
//! parameter list, body and response schemas of one endpoint together and stores
//! the result under its path and method. [`Generator::gen_document`] collects the
//! paths and every named definition into the final [`Document`].

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::schema::{ParamLocation, ParamObj, SchemaObj};
use crate::types::TypeDef;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches `{name}` and router-style `{name:pattern}` path parameters
static PATH_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}:]+)(:[^/]+)?\}").expect("valid path parameter regex"));

/// API info block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub terms_of_service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityType {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "apiKey")]
    ApiKey,
    #[serde(rename = "oauth2")]
    OAuth2,
}

/// Security scheme declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDef {
    #[serde(rename = "type")]
    pub security_type: SecurityType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Header or query parameter name of an API key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flow: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub authorization_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, String>,
}

impl SecurityDef {
    pub fn new(security_type: SecurityType) -> Self {
        Self {
            security_type,
            description: String::new(),
            name: String::new(),
            location: String::new(),
            flow: String::new(),
            authorization_url: String::new(),
            token_url: String::new(),
            scopes: BTreeMap::new(),
        }
    }
}

/// HTTP methods an operation can be registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        };
        f.write_str(s)
    }
}

/// Everything about one endpoint except its types
#[derive(Debug, Clone, Default)]
pub struct PathItemInfo {
    pub path: String,
    pub method: String,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub deprecated: bool,
    /// Required security schemes without scopes
    pub security: Vec<String>,
    /// Required OAuth2 schemes with their scopes
    pub security_oauth2: BTreeMap<String, Vec<String>>,
    pub extensions: BTreeMap<String, Value>,
}

impl PathItemInfo {
    pub fn new(path: &str, method: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            ..Default::default()
        }
    }

    pub fn add_extended_field(&mut self, key: &str, value: impl Into<Value>) {
        self.extensions.insert(key.to_string(), value.into());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObj {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObj>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationObj {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParamObj>,
    pub responses: BTreeMap<String, ResponseObj>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OperationObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<OperationObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<OperationObj>,
}

impl PathItem {
    fn slot(&mut self, method: HttpMethod) -> &mut Option<OperationObj> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
        }
    }

    pub fn operation(&self, method: HttpMethod) -> Option<&OperationObj> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }

    pub fn has_method(&self, method: HttpMethod) -> bool {
        self.operation(method).is_some()
    }
}

/// Complete Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub swagger: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, SchemaObj>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_definitions: BTreeMap<String, SecurityDef>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Document-level state kept by the generator between operations
#[derive(Debug, Clone)]
pub(crate) struct DocumentState {
    info: Info,
    host: String,
    base_path: String,
    schemes: Vec<String>,
    security_definitions: BTreeMap<String, SecurityDef>,
    paths: BTreeMap<String, PathItem>,
    extensions: BTreeMap<String, Value>,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            info: Info::default(),
            host: String::new(),
            base_path: String::new(),
            schemes: vec!["http".to_string(), "https".to_string()],
            security_definitions: BTreeMap::new(),
            paths: BTreeMap::new(),
            extensions: BTreeMap::new(),
        }
    }
}

/// Rewrites `{id:[0-9]+}` style parameters to plain `{id}`
pub fn normalize_path(path: &str) -> String {
    PATH_PARAMETER.replace_all(path, "{$1}").into_owned()
}

impl Generator {
    pub fn set_info(
        &mut self,
        title: &str,
        description: &str,
        terms_of_service: &str,
        version: &str,
    ) -> &mut Self {
        let info = &mut self.document.info;
        info.title = title.to_string();
        info.description = description.to_string();
        info.terms_of_service = terms_of_service.to_string();
        info.version = version.to_string();
        self
    }

    /// Replaces the whole info block, contact and license included
    pub fn set_full_info(&mut self, info: Info) -> &mut Self {
        self.document.info = info;
        self
    }

    pub fn set_contact(&mut self, name: &str, url: &str, email: &str) -> &mut Self {
        self.document.info.contact = Some(Contact {
            name: name.to_string(),
            url: url.to_string(),
            email: email.to_string(),
        });
        self
    }

    pub fn set_license(&mut self, name: &str, url: &str) -> &mut Self {
        self.document.info.license = Some(License {
            name: name.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub fn set_host(&mut self, host: &str) -> &mut Self {
        self.document.host = host.to_string();
        self
    }

    pub fn set_base_path(&mut self, base_path: &str) -> &mut Self {
        self.document.base_path = base_path.to_string();
        self
    }

    pub fn set_schemes(&mut self, schemes: Vec<String>) -> &mut Self {
        self.document.schemes = schemes;
        self
    }

    pub fn add_security_definition(&mut self, name: &str, definition: SecurityDef) -> &mut Self {
        self.document
            .security_definitions
            .insert(name.to_string(), definition);
        self
    }

    /// Adds an `x-` extension field at document level
    pub fn add_extended_field(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.document.extensions.insert(key.to_string(), value.into());
        self
    }

    /// Removes every registered operation
    pub fn reset_paths(&mut self) {
        self.document.paths.clear();
    }

    pub fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.document.paths.get(path)
    }

    /// Registers one operation.
    ///
    /// `params` must describe a struct (see [`Generator::parse_parameter`]), `body`
    /// becomes an `in: body` parameter and `response` the `200` response schema.
    /// An operation already registered under the same path and method is kept as is.
    /// Nothing is registered when a security scheme is undeclared or a type cannot
    /// be described.
    pub fn set_path_item(
        &mut self,
        info: PathItemInfo,
        params: Option<&TypeDef>,
        body: Option<&TypeDef>,
        response: Option<&TypeDef>,
    ) -> Result<()> {
        let method: HttpMethod = info.method.parse()?;
        let path = normalize_path(&info.path);
        debug!("Registering operation {} {}", method, path);

        if self
            .document
            .paths
            .get(&path)
            .is_some_and(|item| item.has_method(method))
        {
            debug!("Operation {} {} already registered, skipping", method, path);
            return Ok(());
        }

        let mut operation = OperationObj {
            summary: info.title,
            description: info.description,
            deprecated: info.deprecated,
            extensions: info.extensions,
            ..Default::default()
        };
        if !info.tag.is_empty() {
            operation.tags.push(info.tag);
        }

        for scheme in &info.security {
            self.require_security(scheme)?;
            operation
                .security
                .push(BTreeMap::from([(scheme.clone(), Vec::new())]));
        }
        for (scheme, scopes) in &info.security_oauth2 {
            self.require_security(scheme)?;
            operation
                .security
                .push(BTreeMap::from([(scheme.clone(), scopes.clone())]));
        }

        if let Some(params) = params {
            if self.options.reflect_types {
                operation.add_extended_field("x-request-rust-type", params.key().to_string());
            }
            let (_, parameters) = self.parse_parameter(params)?;
            operation.parameters = parameters;
        }

        operation
            .responses
            .insert("200".to_string(), self.parse_response(response)?);

        if let Some(body) = body {
            if self.options.reflect_types {
                operation.add_extended_field("x-request-rust-type", body.key().to_string());
            }
            let schema = self.parse_definition(body)?;
            if schema.is_empty() {
                debug!("Body of {} {} has no schema, dropping it", method, path);
                self.registry.remove(body);
            } else {
                operation.parameters.push(ParamObj {
                    name: "body".to_string(),
                    location: ParamLocation::Body,
                    required: true,
                    schema: Some(Box::new(schema)),
                    ..Default::default()
                });
            }
        }

        info!("Registered operation {} {}", method, path);
        *self.document.paths.entry(path).or_default().slot(method) = Some(operation);
        Ok(())
    }

    fn require_security(&self, scheme: &str) -> Result<()> {
        if self.document.security_definitions.contains_key(scheme) {
            Ok(())
        } else {
            Err(Error::UndefinedSecurity(scheme.to_string()))
        }
    }

    fn parse_response(&mut self, response: Option<&TypeDef>) -> Result<ResponseObj> {
        let schema = match response {
            Some(ty) => self.parse_definition(ty)?,
            None => SchemaObj::primitive("null", ""),
        };
        Ok(ResponseObj {
            description: "request success".to_string(),
            schema: Some(schema),
        })
    }

    /// Assembles the document from the registered operations and definitions
    pub fn gen_document(&self) -> Document {
        let state = &self.document;
        Document {
            swagger: "2.0".to_string(),
            info: state.info.clone(),
            host: state.host.clone(),
            base_path: state.base_path.clone(),
            schemes: state.schemes.clone(),
            paths: state.paths.clone(),
            definitions: self.registry.definitions(),
            security_definitions: state.security_definitions.clone(),
            extensions: state.extensions.clone(),
        }
    }
}

impl OperationObj {
    pub fn add_extended_field(&mut self, key: &str, value: impl Into<Value>) {
        self.extensions.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Describe, FieldDef};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pet() -> TypeDef {
        TypeDef::structure("petstore", "Pet", || {
            vec![
                FieldDef::of::<i64>("ID").tags(r#"json:"id""#),
                FieldDef::of::<String>("Name").tags(r#"json:"name""#),
                FieldDef::of::<String>("Tag").tags(r#"json:"tag""#),
            ]
        })
    }

    fn pets_request() -> TypeDef {
        TypeDef::structure("petstore", "PetsRequest", || {
            vec![
                FieldDef::of::<Vec<String>>("Tags").tags(
                    r#"schema:"tags" in:"query" required:"-" description:"tags to filter by""#,
                ),
                FieldDef::of::<i32>("Limit").tags(
                    r#"schema:"limit" in:"query" required:"-" description:"maximum number of results to return""#,
                ),
            ]
        })
    }

    fn petstore() -> Generator {
        let mut generator = Generator::new();
        generator
            .set_host("petstore.swagger.io")
            .set_base_path("/api")
            .set_info(
                "Swagger Petstore (Simple)",
                "A sample API that uses a petstore as an example",
                "http://helloreverb.com/terms/",
                "2.0",
            )
            .set_license("MIT", "http://opensource.org/licenses/MIT")
            .set_contact("Swagger API team", "http://swagger.io", "foo@example.com")
            .add_security_definition("BasicAuth", SecurityDef::new(SecurityType::Basic));
        generator
    }

    #[test]
    fn test_petstore_document() {
        let mut generator = petstore();
        let mut info = PathItemInfo::new("/pets", "GET");
        info.title = "findPets".to_string();
        info.tag = "v1".to_string();
        info.security = vec!["BasicAuth".to_string()];
        info.add_extended_field("x-example", "example");

        generator
            .set_path_item(info, Some(&pets_request()), None, Some(&TypeDef::slice(pet())))
            .unwrap();
        generator.add_extended_field("x-uppercase-version", true);

        let document = serde_json::to_value(generator.gen_document()).unwrap();
        assert_eq!(
            document,
            json!({
                "swagger": "2.0",
                "info": {
                    "title": "Swagger Petstore (Simple)",
                    "description": "A sample API that uses a petstore as an example",
                    "termsOfService": "http://helloreverb.com/terms/",
                    "contact": {"name": "Swagger API team", "url": "http://swagger.io", "email": "foo@example.com"},
                    "license": {"name": "MIT", "url": "http://opensource.org/licenses/MIT"},
                    "version": "2.0"
                },
                "host": "petstore.swagger.io",
                "basePath": "/api",
                "schemes": ["http", "https"],
                "paths": {
                    "/pets": {
                        "get": {
                            "tags": ["v1"],
                            "summary": "findPets",
                            "parameters": [
                                {
                                    "name": "tags",
                                    "in": "query",
                                    "type": "array",
                                    "items": {"type": "string"},
                                    "collectionFormat": "multi",
                                    "description": "tags to filter by"
                                },
                                {
                                    "name": "limit",
                                    "in": "query",
                                    "type": "integer",
                                    "format": "int32",
                                    "description": "maximum number of results to return"
                                }
                            ],
                            "responses": {
                                "200": {
                                    "description": "request success",
                                    "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                                }
                            },
                            "security": [{"BasicAuth": []}],
                            "x-example": "example"
                        }
                    }
                },
                "definitions": {
                    "Pet": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "integer", "format": "int64"},
                            "name": {"type": "string"},
                            "tag": {"type": "string"}
                        }
                    }
                },
                "securityDefinitions": {"BasicAuth": {"type": "basic"}},
                "x-uppercase-version": true
            })
        );
    }

    #[test]
    fn test_undefined_security_leaves_paths_unchanged() {
        let mut generator = petstore();
        let mut info = PathItemInfo::new("/pets", "POST");
        info.security = vec!["ApiKeyAuth".to_string()];

        let result = generator.set_path_item(info, None, Some(&pet()), None);

        assert!(matches!(result, Err(Error::UndefinedSecurity(name)) if name == "ApiKeyAuth"));
        assert!(generator.path_item("/pets").is_none());
        assert!(generator.definitions().is_empty());
    }

    #[test]
    fn test_undefined_oauth2_scheme() {
        let mut generator = petstore();
        let mut info = PathItemInfo::new("/pets", "GET");
        info.security_oauth2
            .insert("petstore_auth".to_string(), vec!["read:pets".to_string()]);

        assert!(generator.set_path_item(info, None, None, None).is_err());

        let mut oauth = SecurityDef::new(SecurityType::OAuth2);
        oauth.flow = "implicit".to_string();
        generator.add_security_definition("petstore_auth", oauth);
        let mut info = PathItemInfo::new("/pets", "GET");
        info.security_oauth2
            .insert("petstore_auth".to_string(), vec!["read:pets".to_string()]);
        generator.set_path_item(info, None, None, None).unwrap();

        let operation = generator.path_item("/pets").unwrap().get.as_ref().unwrap();
        assert_eq!(
            operation.security,
            vec![BTreeMap::from([(
                "petstore_auth".to_string(),
                vec!["read:pets".to_string()]
            )])]
        );
    }

    #[test]
    fn test_body_parameter_and_null_response() {
        let mut generator = petstore();
        generator
            .set_path_item(PathItemInfo::new("/pets", "post"), None, Some(&pet()), None)
            .unwrap();

        let item = generator.path_item("/pets").unwrap();
        let operation = item.post.as_ref().unwrap();
        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].location, ParamLocation::Body);
        assert!(operation.parameters[0].required);
        assert_eq!(
            operation.parameters[0].schema.as_ref().unwrap().reference,
            "#/definitions/Pet"
        );
        assert_eq!(
            operation.responses["200"].schema.as_ref().unwrap().schema_type,
            "null"
        );
    }

    #[test]
    fn test_empty_body_is_dropped() {
        let mut generator = petstore();
        generator
            .set_path_item(PathItemInfo::new("/ping", "POST"), None, Some(&TypeDef::any()), None)
            .unwrap();

        let operation = generator.path_item("/ping").unwrap().post.as_ref().unwrap();
        assert!(operation.parameters.is_empty());
    }

    #[test]
    fn test_existing_operation_is_kept() {
        let mut generator = petstore();
        let mut first = PathItemInfo::new("/pets", "GET");
        first.title = "first".to_string();
        let mut second = PathItemInfo::new("/pets", "GET");
        second.title = "second".to_string();

        generator.set_path_item(first, None, None, None).unwrap();
        generator.set_path_item(second, None, None, None).unwrap();
        generator
            .set_path_item(PathItemInfo::new("/pets", "DELETE"), None, None, None)
            .unwrap();

        let item = generator.path_item("/pets").unwrap();
        assert_eq!(item.get.as_ref().unwrap().summary, "first");
        assert!(item.has_method(HttpMethod::Delete));
    }

    #[test]
    fn test_router_patterns_are_stripped() {
        assert_eq!(normalize_path("/pets/{id:[0-9]+}"), "/pets/{id}");
        assert_eq!(
            normalize_path("/users/{user}/pets/{id:[a-z]+}"),
            "/users/{user}/pets/{id}"
        );

        let mut generator = petstore();
        generator
            .set_path_item(PathItemInfo::new("/pets/{id:[0-9]+}", "GET"), None, None, None)
            .unwrap();
        assert!(generator.path_item("/pets/{id}").is_some());
    }

    #[test]
    fn test_invalid_method() {
        let mut generator = petstore();
        let result = generator.set_path_item(PathItemInfo::new("/pets", "FETCH"), None, None, None);
        assert!(matches!(result, Err(Error::InvalidMethod(_))));
    }

    #[test]
    fn test_failed_parameters_leave_paths_unchanged() {
        let request = TypeDef::structure("petstore", "BadRequest", || {
            vec![FieldDef::of::<Vec<Vec<String>>>("Matrix").tags(r#"query:"matrix""#)]
        });

        let mut generator = petstore();
        let result = generator.set_path_item(
            PathItemInfo::new("/pets", "GET"),
            Some(&request),
            None,
            Some(&i32::describe()),
        );

        assert!(matches!(result, Err(Error::UnsupportedParameter { .. })));
        assert!(generator.path_item("/pets").is_none());
    }

    #[test]
    fn test_reset_paths() {
        let mut generator = petstore();
        generator
            .set_path_item(PathItemInfo::new("/pets", "GET"), None, None, None)
            .unwrap();
        generator.reset_paths();
        assert!(generator.gen_document().paths.is_empty());
    }
}
