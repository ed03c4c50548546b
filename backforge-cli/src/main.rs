//! backforge CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use backforge_cli_lib::commands::{print_help_hint, Command};
use backforge_cli_lib::{
    logging, DialoguerPrompter, Installer, PackageManager, TemplateStore, Workspace,
};

#[derive(Parser)]
#[command(name = "backforge")]
#[command(version)]
#[command(about = "Scaffold TypeScript API, GraphQL and web backends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Project directory to act on
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Package manager used to install dependencies
    #[arg(
        long,
        global = true,
        value_enum,
        env = "BACKFORGE_PACKAGE_MANAGER",
        default_value_t
    )]
    package_manager: PackageManager,

    /// Read templates from this directory instead of the built-in set
    #[arg(long, global = true, env = "BACKFORGE_TEMPLATES")]
    templates: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        print_help_hint();
        return Ok(());
    };

    let store = match cli.templates {
        Some(dir) => TemplateStore::from_dir(dir)?,
        None => TemplateStore::builtin(),
    };
    let workspace = Workspace::new(cli.dir, store, Installer::shell(cli.package_manager));
    let mut prompter = DialoguerPrompter::new();

    command.execute(&workspace, &mut prompter)
}
