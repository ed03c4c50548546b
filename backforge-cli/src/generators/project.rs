//! Project initialization

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use super::blueprint;
use crate::config::ProjectConfig;
use crate::installer::Invocation;
use crate::materialize::Substitutions;
use crate::project::{DatabaseKind, ProjectKind};
use crate::store::FragmentKey;
use crate::workspace::{GenerationReport, Workspace};

/// Creates a project of one kind in a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectGenerator {
    kind: ProjectKind,
    database: Option<DatabaseKind>,
}

impl ProjectGenerator {
    /// Generator for `kind`, optionally wired to a database
    ///
    /// GraphQL projects ship without a database layer, so a database passed
    /// for them is dropped.
    #[must_use]
    pub fn new(kind: ProjectKind, database: Option<DatabaseKind>) -> Self {
        let database = if kind.uses_database() {
            database
        } else {
            if let Some(orm) = database {
                warn!(%kind, %orm, "project kind has no database layer, ignoring database");
            }
            None
        };

        Self { kind, database }
    }

    /// Project kind being generated
    #[must_use]
    pub const fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Database the project is wired to
    #[must_use]
    pub const fn database(&self) -> Option<DatabaseKind> {
        self.database
    }

    /// Config persisted once generation finishes
    #[must_use]
    pub fn config(&self) -> ProjectConfig {
        ProjectConfig::new(self.kind, self.database)
    }

    /// Lay out the skeleton and copy the template tree
    ///
    /// Existing files at colliding paths are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written.
    pub fn scaffold(&self, workspace: &Workspace) -> Result<Vec<PathBuf>> {
        self.create_structure(workspace)?;
        self.copy_code(workspace)
    }

    /// Full `init`: skeleton, template tree, dependencies, then config
    ///
    /// # Errors
    ///
    /// Returns an error if the files or the config cannot be written. The
    /// package manager's exit status is not checked.
    pub fn init(&self, workspace: &Workspace) -> Result<GenerationReport> {
        let files = self.scaffold(workspace)?;
        self.finish(workspace, files)
    }

    /// Install dependencies and persist the config for a scaffolded project
    ///
    /// `files` are the paths [`Self::scaffold`] wrote.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be written.
    pub fn finish(&self, workspace: &Workspace, files: Vec<PathBuf>) -> Result<GenerationReport> {
        let invocations = self.install_dependencies(workspace)?;
        self.config().save(workspace.root())?;

        info!(kind = %self.kind, database = ?self.database, "project initialized");
        Ok(GenerationReport { files, invocations })
    }

    /// Create the fixed directory skeleton
    fn create_structure(&self, workspace: &Workspace) -> Result<()> {
        for dir in blueprint(self.kind).directories {
            let path = workspace.root().join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }

        Ok(())
    }

    /// Copy the project fragment, then the database fragment on top
    fn copy_code(&self, workspace: &Workspace) -> Result<Vec<PathBuf>> {
        let substitutions = Substitutions::none();
        let mut files = workspace.copy(FragmentKey::Project(self.kind), &substitutions)?;

        if let Some(orm) = self.database {
            files.extend(workspace.copy(FragmentKey::Database(orm), &substitutions)?);
        }

        Ok(files)
    }

    /// Install the kind's packages plus the database driver packages
    fn install_dependencies(&self, workspace: &Workspace) -> Result<Vec<Invocation>> {
        let mut deps = blueprint(self.kind).dependency_set();
        if let Some(orm) = self.database {
            deps = deps.with(orm.dependencies());
        }

        workspace.install(&deps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_drops_database() {
        let generator = ProjectGenerator::new(ProjectKind::GraphQl, Some(DatabaseKind::TypeOrm));
        assert_eq!(generator.database(), None);
        assert_eq!(generator.config().orm, None);
    }

    #[test]
    fn test_api_keeps_database() {
        let generator = ProjectGenerator::new(ProjectKind::Api, Some(DatabaseKind::Mongoose));
        assert_eq!(generator.database(), Some(DatabaseKind::Mongoose));
        assert_eq!(generator.kind(), ProjectKind::Api);
    }
}
