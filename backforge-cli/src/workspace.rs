//! The directory a command acts on, with its template store and installer

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, ProjectConfig};
use crate::installer::{DependencySet, Installer, Invocation};
use crate::materialize::{CopyPlan, Substitutions};
use crate::store::{FragmentKey, TemplateStore};

/// Files written and commands run by one generator operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Written paths, relative to the workspace root
    pub files: Vec<PathBuf>,
    /// Package manager calls issued
    pub invocations: Vec<Invocation>,
}

/// Working directory plus the collaborators every generator needs
pub struct Workspace {
    root: PathBuf,
    store: TemplateStore,
    installer: Installer,
}

impl Workspace {
    /// Create a workspace rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, store: TemplateStore, installer: Installer) -> Self {
        Self {
            root: root.into(),
            store,
            installer,
        }
    }

    /// Root directory of the generated project
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the persisted project config
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] before `init` has run.
    pub fn load_config(&self) -> Result<ProjectConfig, ConfigError> {
        ProjectConfig::load(&self.root)
    }

    /// Build the copy plan for a fragment without writing anything
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment cannot be loaded.
    pub fn plan(&self, key: FragmentKey, substitutions: &Substitutions) -> Result<CopyPlan> {
        let fragment = self.store.fragment(key)?;
        Ok(CopyPlan::new(&fragment, substitutions))
    }

    /// Copy a fragment into the workspace
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment cannot be loaded or written.
    pub fn copy(&self, key: FragmentKey, substitutions: &Substitutions) -> Result<Vec<PathBuf>> {
        self.plan(key, substitutions)?.apply(&self.root)
    }

    /// Install packages in the workspace
    ///
    /// # Errors
    ///
    /// Returns an error only if the command runner fails internally.
    pub fn install(&self, deps: &DependencySet) -> Result<Vec<Invocation>> {
        self.installer.install(&self.root, deps)
    }
}
