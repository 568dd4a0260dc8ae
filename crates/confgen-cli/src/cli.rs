use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "confgen",
    about = "Merge user overrides into generated database config files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge an override file into a config file
    Merge(MergeArgs),
    /// Show what a merge would change
    Diff(DiffArgs),
    /// List the available dialects
    Dialects(DialectsArgs),
}

#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Previously generated config; a missing file counts as empty
    #[arg(short, long)]
    pub current: Option<PathBuf>,
    /// Override file, or `-` to read stdin
    #[arg(short, long)]
    pub requested: String,
    /// Dialect supplying the divider and separators
    #[arg(short, long)]
    pub dialect: Option<String>,
    /// Block divider, overriding the dialect's
    #[arg(long)]
    pub divider: Option<String>,
    /// Separator in priority order, overriding the dialect's (repeatable)
    #[arg(short, long = "separator")]
    pub separators: Vec<String>,
    /// TOML file with additional dialects
    #[arg(long)]
    pub dialects_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fail if the merge would change the current config
    #[arg(long)]
    pub check: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct DialectsArgs {
    #[arg(long)]
    pub dialects_file: Option<PathBuf>,
}
