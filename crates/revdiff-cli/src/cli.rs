use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use revdiff_render::Layout;
use revdiff_types::RevisionRef;

#[derive(Parser)]
#[command(
    name = "revdiff",
    about = "Line diffs between wiki page revisions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ./revdiff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable ANSI colours
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the lines a document flattens to
    Flatten(FlattenArgs),
    /// Compare two documents
    Diff(DiffArgs),
    /// Show grouped hunks between two documents
    Hunks(HunksArgs),
    /// Render a remote hunk response
    Adapt(AdaptArgs),
    /// Compare two revisions from a page history file
    Compare(CompareArgs),
}

#[derive(Args)]
pub struct FlattenArgs {
    /// Revision, document or node array (JSON)
    pub path: PathBuf,
}

/// Presentation flags shared by the rendering commands.
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    #[arg(short, long)]
    pub layout: Option<Layout>,
    #[arg(long)]
    pub left_label: Option<String>,
    #[arg(long)]
    pub right_label: Option<String>,
    /// Print the +/-/= summary
    #[arg(long, conflicts_with = "no_stats")]
    pub stats: bool,
    #[arg(long)]
    pub no_stats: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct HunksArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// Context lines around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
}

#[derive(Args)]
pub struct AdaptArgs {
    /// Remote response body (JSON)
    pub response: PathBuf,
    /// Left revision used to fill the lines between hunks
    #[arg(long)]
    pub base: Option<PathBuf>,
    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    /// JSON array of page revisions
    pub history: PathBuf,
    #[arg(short, long)]
    pub title: String,
    #[arg(long)]
    pub left: RevisionRef,
    #[arg(long, default_value = "current")]
    pub right: RevisionRef,
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    /// Only show the hunk windows instead of both full revisions
    #[arg(long)]
    pub hunks_only: bool,
    #[command(flatten)]
    pub view: ViewArgs,
}
