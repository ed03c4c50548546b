//! Project scaffolding command

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::choose;
use crate::generators::ProjectGenerator;
use crate::project::{DatabaseKind, ProjectKind};
use crate::prompt::Prompter;
use crate::workspace::{GenerationReport, Workspace};

const PROJECT_PROMPT: &str = "Choose type of project";
const DATABASE_PROMPT: &str = "Choose an ORM";

/// Create a new project in the workspace root
#[derive(Debug, Clone, Copy, Default)]
pub struct InitCommand {
    project: Option<ProjectKind>,
    database: Option<DatabaseKind>,
}

impl InitCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `project` - Project kind; prompted for when `None`
    /// * `database` - Database for API and web projects; prompted for when `None`
    #[must_use]
    pub const fn new(project: Option<ProjectKind>, database: Option<DatabaseKind>) -> Self {
        Self { project, database }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if prompts fail or project files cannot be written.
    pub fn execute(&self, workspace: &Workspace, prompter: &mut dyn Prompter) -> Result<()> {
        let Some(generator) = self.resolve(prompter)? else {
            return Ok(());
        };

        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style(generator.kind().label()).cyan().bold(),
            style("project").bold()
        );
        println!();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Creating project structure...");
        let scaffolded = generator.scaffold(workspace);
        spinner.finish_and_clear();
        let files = scaffolded?;

        println!(
            "{}",
            style("================= Installing dependencies =================").yellow()
        );
        let report = generator.finish(workspace, files)?;
        print_success(&generator, &report);
        Ok(())
    }

    /// Fill in the project kind and database, asking where needed
    ///
    /// Returns `None` if any prompt was cancelled.
    fn resolve(&self, prompter: &mut dyn Prompter) -> Result<Option<ProjectGenerator>> {
        let kind = match self.project {
            Some(kind) => kind,
            None => match choose(prompter, PROJECT_PROMPT, &ProjectKind::ALL, ProjectKind::label)? {
                Some(kind) => kind,
                None => return Ok(None),
            },
        };

        let database = if kind.uses_database() {
            match self.database {
                Some(orm) => Some(orm),
                None => match choose(
                    prompter,
                    DATABASE_PROMPT,
                    &DatabaseKind::ALL,
                    DatabaseKind::label,
                )? {
                    Some(orm) => Some(orm),
                    None => return Ok(None),
                },
            }
        } else {
            self.database
        };

        Ok(Some(ProjectGenerator::new(kind, database)))
    }
}

/// Print success message with next steps
fn print_success(generator: &ProjectGenerator, report: &GenerationReport) {
    println!();
    println!(
        "{} ({} files)",
        style("✓ Project created successfully!").green().bold(),
        report.files.len()
    );
    println!();
    println!("{}", style("Next steps:").bold());
    println!();
    println!("  {} Create your environment file:", style("1.").cyan());
    println!("     {} {}", style("$").dim(), style("cp .env.example .env").cyan());
    println!();
    let step = if generator.database().is_some() {
        println!(
            "  {} Point the database settings in .env at your server",
            style("2.").cyan()
        );
        println!();
        "3."
    } else {
        "2."
    };
    println!("  {} Start the development server:", style(step).cyan());
    println!("     {} {}", style("$").dim(), style("npm run dev").cyan());
    println!();
}
