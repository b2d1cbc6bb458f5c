use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::{
    self, lint::LintArgs, next::NextArgs, visibility::VisibilityArgs, walk::WalkArgs,
};
use crate::config::CliConfig;
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "survey-rules",
    about = "Preview and lint survey display and branching rules",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Engine and logging settings (defaults to ./survey-rules.toml when present)
    #[arg(long = "config", value_name = "survey-rules.toml", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which questions are visible for a response snapshot
    Visibility(VisibilityArgs),
    /// Resolve the question that follows the current one
    Next(NextArgs),
    /// Follow branching rules from the first visible question to the end
    Walk(WalkArgs),
    /// Report broken references and suspicious rule configuration
    Lint(LintArgs),
    /// Print the JSON Schema of survey documents
    Schema,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    logging::init(config.log.filter.as_deref())?;
    let options = config.engine;

    match cli.command {
        Commands::Visibility(args) => cmd::visibility::run(&args, &options),
        Commands::Next(args) => cmd::next::run(&args, &options),
        Commands::Walk(args) => cmd::walk::run(&args, &options),
        Commands::Lint(args) => cmd::lint::run(&args),
        Commands::Schema => cmd::schema::run(),
    }
}
