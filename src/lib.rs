//! Swagger 2.0 documents from Rust type descriptions.
//!
//! The core turns type descriptors into deduplicated, reference-linked schema
//! definitions and request parameter lists. Types that refer to themselves,
//! directly or through other types, are handled by registering a struct before
//! its fields are expanded. Equally named types from different modules get
//! distinct definition names.
//!
//! # Architecture
//!
//! 1. [`types`] - type descriptors, field tags and capability hooks
//! 2. [`primitive`] - scalar kinds to Swagger types and formats
//! 3. [`registry`] - canonical definitions, name uniqueness, expansion queue
//! 4. [`generator`] - schema synthesis
//! 5. [`parameters`] - request parameter extraction
//! 6. [`document`] - operations, paths and the final document
//! 7. [`scanner`], [`parser`], [`source`] - descriptors from project sources
//! 8. [`config`], [`serializer`], [`cli`] - manifest, output and the command line
//!
//! # Example
//!
//! ```
//! use swagger_reflect::document::{PathItemInfo, SecurityDef, SecurityType};
//! use swagger_reflect::generator::Generator;
//! use swagger_reflect::types::{FieldDef, TypeDef};
//!
//! let pet = TypeDef::structure("petstore", "Pet", || {
//!     vec![
//!         FieldDef::of::<i64>("ID").tags(r#"json:"id""#),
//!         FieldDef::of::<String>("Name").tags(r#"json:"name""#),
//!     ]
//! });
//! let request = TypeDef::structure("petstore", "PetsRequest", || {
//!     vec![FieldDef::of::<Vec<String>>("Tags").tags(r#"schema:"tags" in:"query""#)]
//! });
//!
//! let mut generator = Generator::new();
//! generator
//!     .set_info("Petstore", "", "", "1.0")
//!     .add_security_definition("BasicAuth", SecurityDef::new(SecurityType::Basic));
//!
//! let mut info = PathItemInfo::new("/pets", "GET");
//! info.security = vec!["BasicAuth".to_string()];
//! generator
//!     .set_path_item(info, Some(&request), None, Some(&TypeDef::slice(pet)))
//!     .unwrap();
//!
//! let document = generator.gen_document();
//! assert!(document.definitions.contains_key("Pet"));
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod parameters;
pub mod parser;
pub mod primitive;
pub mod registry;
pub mod scanner;
pub mod schema;
pub mod serializer;
pub mod source;
pub mod types;
