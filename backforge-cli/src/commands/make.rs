//! Module, entity and seeder generation commands

use anyhow::Result;
use console::style;

use super::choose;
use crate::generators::{make_entity, make_module, make_seeder};
use crate::project::ProjectKind;
use crate::prompt::Prompter;
use crate::store::ModuleTemplate;
use crate::workspace::{GenerationReport, Workspace};

const FAMILY_PROMPT: &str = "Choose type of module";
const WEB_FAMILIES: [ProjectKind; 2] = [ProjectKind::Api, ProjectKind::Web];

/// What a `make:*` command generates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakeTarget {
    /// `make:module`, with the module family for web projects
    Module {
        /// Family chosen on the command line
        family: Option<ProjectKind>,
    },
    /// `make:entity`
    Entity,
    /// `make:seeder`
    Seeder,
}

impl MakeTarget {
    const fn noun(self) -> &'static str {
        match self {
            Self::Module { .. } => "module",
            Self::Entity => "entity",
            Self::Seeder => "seeder",
        }
    }
}

/// Generate a named fragment inside an existing project
#[derive(Debug, Clone)]
pub struct MakeCommand {
    target: MakeTarget,
    name: Option<String>,
}

impl MakeCommand {
    /// Create a new command instance; `name` is prompted for when `None`
    #[must_use]
    pub const fn new(target: MakeTarget, name: Option<String>) -> Self {
        Self { target, name }
    }

    /// Execute the command
    ///
    /// The project config is loaded before anything is asked, so running
    /// outside an initialized project fails straight away.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is missing, the target needs a
    /// database that is not configured, or the files cannot be written.
    pub fn execute(&self, workspace: &Workspace, prompter: &mut dyn Prompter) -> Result<()> {
        let config = workspace.load_config()?;
        let noun = self.target.noun();

        let name = match &self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            Some(_) => return Ok(()),
            None => match prompter.input(&format!("Name of {noun}:"))? {
                Some(name) => name,
                None => return Ok(()),
            },
        };

        let report = match self.target {
            MakeTarget::Module { family } => {
                let family = match (config.project, family) {
                    (ProjectKind::Web, None) => {
                        match choose(prompter, FAMILY_PROMPT, &WEB_FAMILIES, ProjectKind::label)?
                        {
                            Some(family) => Some(family),
                            None => return Ok(()),
                        }
                    }
                    (_, family) => family,
                };
                let template = ModuleTemplate::resolve(&config, family)?;
                make_module(workspace, &name, template)?
            }
            MakeTarget::Entity => make_entity(workspace, &config, &name)?,
            MakeTarget::Seeder => make_seeder(workspace, &name)?,
        };

        print_created(noun, &name, &report);
        Ok(())
    }
}

fn print_created(noun: &str, name: &str, report: &GenerationReport) {
    println!(
        "\n{} {} {}",
        style("Generated").green().bold(),
        noun,
        style(name).cyan().bold()
    );
    for file in &report.files {
        println!("  {} {}", style("✓").green(), style(file.display()).dim());
    }
}
