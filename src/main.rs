//! Board configuration generator.
//!
//! Builds YAML configuration documents for hardware test benches from a
//! declarative question template, either interactively or from inventory
//! records, and reads or edits single fields of existing documents.
mod boards;
mod callbacks;
mod cli;
mod devices;
mod document;
mod error;
mod inventory;
mod resources;
mod session;
mod settings;
mod template;
mod value;
mod workflow;

use anyhow::Result;
use clap::Parser;
use cli::{Command, GlobalArgs, RootArgs};
use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_SPEC: &str = "boardcfg=warn";
const VERBOSE_LOG_SPEC: &str = "boardcfg=debug";

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_logging(&args.global);
    let settings = settings::load_settings(args.global.settings.as_deref())?;

    match &args.command {
        Command::Boards(cmd) => workflow::run_boards(cmd),
        Command::Interactive(cmd) => workflow::run_interactive(cmd, &settings),
        Command::Generate(cmd) => workflow::run_generate(cmd, &settings),
        Command::Field(cmd) => workflow::run_field(cmd),
    }
}

/// Pick the filter spec: explicit flag, then `--verbose`, then `RUST_LOG`.
fn log_spec(global: &GlobalArgs) -> String {
    if let Some(spec) = &global.log_filter {
        return spec.clone();
    }
    if global.verbose {
        return VERBOSE_LOG_SPEC.to_string();
    }
    env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_SPEC.to_string())
}

fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::new(log_spec(global));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}
