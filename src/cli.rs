use crate::config::{ApiManifest, GeneratorOptions, OperationManifest};
use crate::document::{Document, PathItemInfo};
use crate::generator::Generator;
use crate::parser::{AstParser, ParsedFile};
use crate::scanner::FileScanner;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::source::SourceIndex;
use crate::types::TypeDef;
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Generate a Swagger 2.0 document from the types of a Rust project
#[derive(Parser, Debug)]
#[command(name = "swagger-reflect")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Rust project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// API manifest listing document metadata and operations (YAML or JSON)
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (stdout when absent)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Annotate schemas and parameters with their Rust types
    #[arg(long = "reflect-types")]
    pub reflect_types: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Checks the paths named on the command line
pub fn validate_args(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.is_dir() {
        bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }
    if !args.manifest.is_file() {
        bail!("Manifest file does not exist: {}", args.manifest.display());
    }

    info!("Project path: {}", args.project_path.display());
    info!("Manifest: {}", args.manifest.display());
    Ok(args)
}

/// Scans and parses the project, keeping the files that parse
pub fn index_project(project_path: &Path) -> Result<SourceIndex> {
    let scan_result = FileScanner::new(project_path.to_path_buf()).scan()?;
    info!("Found {} Rust files", scan_result.rust_files.len());
    if scan_result.rust_files.is_empty() {
        bail!("No Rust files found in {}", project_path.display());
    }

    let parsed_files: Vec<ParsedFile> =
        AstParser::parse_files(project_path, &scan_result.rust_files)
            .into_iter()
            .filter_map(Result::ok)
            .collect();
    if parsed_files.is_empty() {
        bail!("No files could be parsed successfully");
    }
    info!("Parsed {} files", parsed_files.len());

    Ok(SourceIndex::new(&parsed_files))
}

fn describe(index: &SourceIndex, expr: Option<&str>) -> Result<Option<TypeDef>> {
    expr.map(|expr| {
        index
            .describe_str(expr)
            .with_context(|| format!("Cannot describe type `{}`", expr))
    })
    .transpose()
}

fn register_operation(
    generator: &mut Generator,
    index: &SourceIndex,
    operation: &OperationManifest,
) -> Result<()> {
    let params = describe(index, operation.params.as_deref())?;
    let body = describe(index, operation.body.as_deref())?;
    let response = describe(index, operation.response.as_deref())?;

    let info = PathItemInfo {
        path: operation.path.clone(),
        method: operation.method.clone(),
        title: operation.title.clone(),
        description: operation.description.clone(),
        tag: operation.tag.clone(),
        deprecated: operation.deprecated,
        security: operation.security.clone(),
        security_oauth2: operation.oauth2.clone(),
        extensions: operation.extensions.clone(),
    };
    generator.set_path_item(info, params.as_ref(), body.as_ref(), response.as_ref())?;
    Ok(())
}

/// Builds the document described by `manifest` from the types of `index`.
///
/// An operation that cannot be registered is logged and left out; the rest of
/// the document is still produced.
pub fn build_document(
    index: &SourceIndex,
    manifest: &ApiManifest,
    options: GeneratorOptions,
) -> Result<Document> {
    let mut generator = Generator::with_options(options);
    generator
        .set_full_info(manifest.info.clone())
        .set_host(&manifest.host)
        .set_base_path(&manifest.base_path);
    if let Some(schemes) = &manifest.schemes {
        generator.set_schemes(schemes.clone());
    }
    for (name, definition) in &manifest.security_definitions {
        generator.add_security_definition(name, definition.clone());
    }
    for (key, value) in &manifest.extensions {
        generator.add_extended_field(key, value.clone());
    }

    for (from, to) in &manifest.type_map {
        let from_ty = index
            .describe_str(from)
            .with_context(|| format!("Cannot describe mapped type `{}`", from))?;
        let to_ty = index
            .describe_str(to)
            .with_context(|| format!("Cannot describe replacement type `{}`", to))?;
        debug!("Mapping {} to {}", from_ty.key(), to_ty.key());
        generator.add_type_map(&from_ty, to_ty);
    }

    let mut skipped = 0;
    for operation in &manifest.operations {
        if let Err(e) = register_operation(&mut generator, index, operation) {
            warn!(
                "Skipping operation {} {}: {:#}",
                operation.method, operation.path, e
            );
            skipped += 1;
        }
    }

    info!(
        "Registered {} of {} operations, {} definitions",
        manifest.operations.len() - skipped,
        manifest.operations.len(),
        generator.definitions().len()
    );
    Ok(generator.gen_document())
}

/// Runs the whole workflow: index, build, serialize, write
pub fn run(args: CliArgs) -> Result<()> {
    let index = index_project(&args.project_path)?;
    let manifest = ApiManifest::load(&args.manifest)?;
    let options = GeneratorOptions {
        reflect_types: args.reflect_types,
    };

    let document = build_document(&index, &manifest, options)?;

    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    match &args.output_path {
        Some(output_path) => {
            write_to_file(&content, output_path)?;
            info!("Wrote Swagger document to {}", output_path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
