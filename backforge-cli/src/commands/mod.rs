//! CLI command implementations
//!
//! Each command gathers missing parameters through a [`Prompter`] and then
//! runs exactly one generator operation. An empty or cancelled answer ends the
//! command without touching the workspace.

pub mod init;
pub mod install;
pub mod make;

pub use init::InitCommand;
pub use install::{InstallCommand, InstallTarget};
pub use make::{MakeCommand, MakeTarget};

use anyhow::Result;
use clap::Subcommand;
use console::style;
use tracing::debug;

use crate::generators::Addon;
use crate::project::{DatabaseKind, ProjectKind};
use crate::prompt::Prompter;
use crate::workspace::Workspace;

/// Printed for unknown or missing commands
pub const HELP_HINT: &str = "Please enter --help to see a list of commands";

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scaffold a new project in the working directory
    Init {
        /// Project kind (prompted when omitted)
        #[arg(long, value_enum)]
        project: Option<ProjectKind>,
        /// Database for API and web projects (prompted when omitted)
        #[arg(long, value_enum)]
        database: Option<DatabaseKind>,
    },
    /// Generate a module (routes, controller, service or resolvers)
    #[command(name = "make:module")]
    MakeModule {
        /// Module name, used verbatim
        name: Option<String>,
        /// Module family for web projects: `api` or `web` (prompted when omitted)
        #[arg(long, value_enum)]
        family: Option<ProjectKind>,
    },
    /// Generate an entity for the configured database
    #[command(name = "make:entity")]
    MakeEntity {
        /// Entity name, used verbatim
        name: Option<String>,
    },
    /// Generate a database seeder
    #[command(name = "make:seeder")]
    MakeSeeder {
        /// Seeder name, used verbatim
        name: Option<String>,
    },
    /// Add or switch the project's database integration
    #[command(name = "install:database")]
    InstallDatabase {
        /// Database to install (prompted when omitted)
        #[arg(long, value_enum)]
        database: Option<DatabaseKind>,
    },
    /// Add JWT authentication
    #[command(name = "install:auth")]
    InstallAuth,
    /// Add a mailer
    #[command(name = "install:mailer")]
    InstallMailer,
    /// Add a Socket.IO server (replaces src/index.ts)
    #[command(name = "install:socket")]
    InstallSocket {
        /// Skip the overwrite confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Add Prettier
    #[command(name = "install:prettier")]
    InstallPrettier,
    /// Add ESLint
    #[command(name = "install:eslint")]
    InstallEslint,
    /// Anything else
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Run the command against `workspace`
    ///
    /// # Errors
    ///
    /// Returns an error if the project config is missing (for every command
    /// but `init`), a required database is not configured, or files cannot
    /// be written.
    pub fn execute(self, workspace: &Workspace, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            Self::Init { project, database } => {
                InitCommand::new(project, database).execute(workspace, prompter)
            }
            Self::MakeModule { name, family } => {
                MakeCommand::new(MakeTarget::Module { family }, name).execute(workspace, prompter)
            }
            Self::MakeEntity { name } => {
                MakeCommand::new(MakeTarget::Entity, name).execute(workspace, prompter)
            }
            Self::MakeSeeder { name } => {
                MakeCommand::new(MakeTarget::Seeder, name).execute(workspace, prompter)
            }
            Self::InstallDatabase { database } => {
                InstallCommand::new(InstallTarget::Database(database)).execute(workspace, prompter)
            }
            Self::InstallAuth => {
                InstallCommand::addon(Addon::Auth).execute(workspace, prompter)
            }
            Self::InstallMailer => {
                InstallCommand::addon(Addon::Mailer).execute(workspace, prompter)
            }
            Self::InstallSocket { yes } => InstallCommand::addon(Addon::Socket)
                .assume_yes(yes)
                .execute(workspace, prompter),
            Self::InstallPrettier => {
                InstallCommand::addon(Addon::Prettier).execute(workspace, prompter)
            }
            Self::InstallEslint => {
                InstallCommand::addon(Addon::Eslint).execute(workspace, prompter)
            }
            Self::Unknown(args) => {
                debug!(?args, "unrecognized command");
                print_help_hint();
                Ok(())
            }
        }
    }
}

/// Print the hint shown when no known command was given
pub fn print_help_hint() {
    println!("{}", style(HELP_HINT).yellow());
}

/// Ask for one of `options`, returning `None` when cancelled
fn choose<T: Copy>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    options: &[T],
    label: impl Fn(T) -> &'static str,
) -> Result<Option<T>> {
    let labels: Vec<&str> = options.iter().map(|&option| label(option)).collect();
    Ok(prompter
        .select(prompt, &labels)?
        .and_then(|index| options.get(index).copied()))
}
