//! Command-line front end: scans a Rust project, resolves the types named in an
//! API manifest and writes the resulting Swagger 2.0 document.
//!
//! ```bash
//! swagger-reflect ./my-api -m api.yaml -o swagger.yaml
//! swagger-reflect ./my-api -m api.yaml -f json --reflect-types
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_reflect::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("swagger-reflect starting...");
    let args = cli::validate_args(args)?;
    cli::run(args)?;
    info!("Swagger document generation completed");

    Ok(())
}
