//! CLI argument parsing for the board configuration tool.
//!
//! The CLI only maps flags onto workflow inputs; template interpretation and
//! document editing live in the library modules.
use crate::inventory::RecordFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "boardcfg",
    version,
    about = "Template-driven board configuration generator",
    after_help = "Commands:\n  boards [--filter TEXT]                       List supported hardware profiles\n  interactive [--out PATH]                     Answer template questions to build a config\n  generate --records FILE --out PATH           Build a config from inventory records\n  field --config PATH --section S --field F    Read (or update with --value) one field\n\nExamples:\n  boardcfg boards --filter zcu102\n  boardcfg interactive --out /tmp/bench.yaml\n  boardcfg generate --records inventory.yaml --device boardA --out /tmp/boardA.yaml\n  boardcfg generate --records inventory.yaml --filter status=active --out /tmp/bench.yaml\n  boardcfg field --config /tmp/bench.yaml --section uart-config --field address",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Settings file (defaults to <config dir>/boardcfg/settings.json when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Explicit tracing filter directive (overrides --verbose and RUST_LOG)
    #[arg(long, global = true, value_name = "SPEC")]
    pub log_filter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Boards(BoardsArgs),
    Interactive(InteractiveArgs),
    Generate(GenerateArgs),
    Field(FieldArgs),
}

#[derive(Parser, Debug)]
#[command(about = "List supported hardware profiles")]
pub struct BoardsArgs {
    /// Only show boards whose name contains this text
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Build a configuration by answering template questions")]
pub struct InteractiveArgs {
    /// Template overriding the built-in one
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Output document; asked for at the end when omitted
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Build a configuration from inventory records")]
pub struct GenerateArgs {
    /// YAML or JSON file mapping device ids to records
    #[arg(long, value_name = "PATH", conflicts_with = "records_url", required_unless_present = "records_url")]
    pub records: Option<PathBuf>,

    /// HTTP endpoint returning the record set as JSON
    #[arg(long, value_name = "URL")]
    pub records_url: Option<String>,

    /// API token sent with --records-url
    #[arg(long, value_name = "TOKEN", requires = "records_url")]
    pub token: Option<String>,

    /// Keep only records whose field matches (repeatable; `section.field=value` scopes the key)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<RecordFilter>,

    /// Generate a single-device document for this device id or board name
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Template overriding the built-in one
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Output document
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Read or update one field of an existing configuration")]
pub struct FieldArgs {
    /// Existing configuration document
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    #[arg(long, value_name = "SECTION")]
    pub section: String,

    #[arg(long, value_name = "FIELD")]
    pub field: String,

    /// New value; the field is only read when omitted
    #[arg(long, value_name = "VALUE")]
    pub value: Option<String>,

    /// Board to edit in a multi-device document
    #[arg(long, value_name = "NAME")]
    pub board_name: Option<String>,
}
