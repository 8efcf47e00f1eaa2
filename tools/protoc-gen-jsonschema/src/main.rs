mod plugin;

use std::{
    io::{self, Read, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use plugin::{Invocation, Overrides, error_response};
use prost::Message;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// protoc plugin converting .proto message and enum types to JSON Schema.
///
/// Usage: protoc --jsonschema_out=path/to/outdir foo.proto
#[derive(Parser)]
#[command(name = "protoc-gen-jsonschema", version)]
struct Cli {
    /// Reject properties not declared in the schema (overrides the plugin parameter)
    #[arg(long)]
    disallow_additional_properties: bool,

    /// Log filter written to stderr, e.g. `debug` (defaults to RUST_LOG, then `info`)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut input = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut input)
        .context("failed to read code generator request")?;

    let invocation = Invocation::decode(&input);
    let debug_requested = invocation
        .as_ref()
        .is_ok_and(|inv| inv.parameters.debug);
    init_logging(cli.log_level.as_deref(), debug_requested);

    debug!("processing code generator request");
    let response = match &invocation {
        Ok(inv) => inv.respond(&Overrides {
            disallow_additional_properties: cli.disallow_additional_properties,
        }),
        Err(e) => error_response(e),
    };

    debug!("serializing code generator response");
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .context("failed to write code generator response")?;
    stdout.flush().context("failed to flush code generator response")?;

    if response.error.is_some() {
        warn!("failed to process code generator request but sent the error to protoc");
        return Ok(ExitCode::FAILURE);
    }
    debug!("processed code generator request");
    Ok(ExitCode::SUCCESS)
}

/// Log to stderr; stdout carries the protobuf response.
fn init_logging(level: Option<&str>, debug_requested: bool) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None if debug_requested => EnvFilter::new("debug"),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
