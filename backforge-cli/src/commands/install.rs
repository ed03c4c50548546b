//! Add-on and database install commands

use anyhow::Result;
use console::style;
use similar::{ChangeTag, TextDiff};
use std::fs;

use super::choose;
use crate::config::ProjectConfig;
use crate::generators::{install_addon, install_database, plan_addon, Addon, ENTRY_FILE};
use crate::materialize::CopyPlan;
use crate::project::DatabaseKind;
use crate::prompt::Prompter;
use crate::workspace::{GenerationReport, Workspace};

const DATABASE_PROMPT: &str = "Choose an ORM";

/// What an `install:*` command installs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallTarget {
    /// `install:database`, prompted for when `None`
    Database(Option<DatabaseKind>),
    /// One of the add-ons
    Addon(Addon),
}

/// Layer an add-on or a database onto an existing project
#[derive(Debug, Clone, Copy)]
pub struct InstallCommand {
    target: InstallTarget,
    assume_yes: bool,
}

impl InstallCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(target: InstallTarget) -> Self {
        Self {
            target,
            assume_yes: false,
        }
    }

    /// Shorthand for installing an add-on
    #[must_use]
    pub const fn addon(addon: Addon) -> Self {
        Self::new(InstallTarget::Addon(addon))
    }

    /// Skip the confirmation for destructive add-ons
    #[must_use]
    pub const fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the config is missing, the add-on needs a database
    /// that is not configured, or the files cannot be written.
    pub fn execute(&self, workspace: &Workspace, prompter: &mut dyn Prompter) -> Result<()> {
        let config = workspace.load_config()?;

        match self.target {
            InstallTarget::Database(database) => {
                let database = match database {
                    Some(database) => database,
                    None => match choose(
                        prompter,
                        DATABASE_PROMPT,
                        &DatabaseKind::ALL,
                        DatabaseKind::label,
                    )? {
                        Some(database) => database,
                        None => return Ok(()),
                    },
                };

                let (_, report) = install_database(workspace, config, database)?;
                print_installed(database.label(), &report);
            }
            InstallTarget::Addon(addon) => {
                if addon.is_destructive()
                    && !self.assume_yes
                    && !confirm_overwrite(workspace, &config, addon, prompter)?
                {
                    println!("{}", style("Nothing changed.").dim());
                    return Ok(());
                }

                let report = install_addon(workspace, &config, addon)?;
                print_installed(addon.name(), &report);
            }
        }

        Ok(())
    }
}

/// Show what the add-on would replace and ask before going ahead
fn confirm_overwrite(
    workspace: &Workspace,
    config: &ProjectConfig,
    addon: Addon,
    prompter: &mut dyn Prompter,
) -> Result<bool> {
    let plan = plan_addon(workspace, config, addon)?;
    print_overwrites(workspace, &plan);

    prompter.confirm(&format!(
        "Are you sure? This action will replace all your code in {ENTRY_FILE}"
    ))
}

/// Print a line diff for every existing text file the plan would change
fn print_overwrites(workspace: &Workspace, plan: &CopyPlan) {
    for file in plan.files() {
        let Ok(current) = fs::read_to_string(workspace.root().join(&file.destination)) else {
            continue;
        };
        let Ok(incoming) = std::str::from_utf8(&file.contents) else {
            continue;
        };
        if current == incoming {
            continue;
        }

        println!("{}", style(file.destination.display()).bold());
        let diff = TextDiff::from_lines(current.as_str(), incoming);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
                ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
                ChangeTag::Equal => print!(" {change}"),
            }
        }
        println!();
    }
}

fn print_installed(what: &str, report: &GenerationReport) {
    println!(
        "\n{} {}",
        style("Installed").green().bold(),
        style(what).cyan().bold()
    );
    for file in &report.files {
        println!("  {} {}", style("✓").green(), style(file.display()).dim());
    }
}
