//! Package manager invocation
//!
//! Installs are fire-and-forget: the exit status of the package manager is
//! logged but never turned into an error, and a missing binary only produces a
//! warning.

use anyhow::Result;
use console::style;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::{info, warn};

/// Package manager used for dependency installs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PackageManager {
    /// `yarn add`
    #[default]
    Yarn,
    /// `npm install`
    Npm,
    /// `pnpm add`
    Pnpm,
}

impl PackageManager {
    /// Executable name
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
        }
    }

    /// Leading arguments for adding runtime or dev packages
    #[must_use]
    pub const fn add_args(self, dev: bool) -> &'static [&'static str] {
        match (self, dev) {
            (Self::Yarn | Self::Pnpm, false) => &["add"],
            (Self::Yarn | Self::Pnpm, true) => &["add", "-D"],
            (Self::Npm, false) => &["install"],
            (Self::Npm, true) => &["install", "--save-dev"],
        }
    }
}

/// Runtime and dev packages for one install action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    /// Packages added as runtime dependencies
    pub runtime: Vec<&'static str>,
    /// Packages added as dev dependencies
    pub dev: Vec<&'static str>,
}

impl DependencySet {
    /// Build a set from two package lists
    #[must_use]
    pub fn new(runtime: &[&'static str], dev: &[&'static str]) -> Self {
        Self {
            runtime: runtime.to_vec(),
            dev: dev.to_vec(),
        }
    }

    /// Append another set's packages after this one's
    #[must_use]
    pub fn with(mut self, other: Self) -> Self {
        self.runtime.extend(other.runtime);
        self.dev.extend(other.dev);
        self
    }

    /// Whether there is nothing to install
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.dev.is_empty()
    }
}

/// One package manager call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to run
    pub program: String,
    /// Arguments, packages included
    pub args: Vec<String>,
    /// Directory the command runs in
    pub cwd: PathBuf,
}

impl Invocation {
    /// The invocation as a shell-like command line, for display
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Executes package manager invocations
pub trait CommandRunner {
    /// Run a single invocation to completion
    ///
    /// # Errors
    ///
    /// Implementations only fail on internal errors; a failing child process
    /// is not an error.
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Runs invocations as child processes with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(command = %invocation.command_line(), %status, "package manager exited with failure");
            }
            Err(e) => {
                warn!(command = %invocation.command_line(), error = %e, "failed to start package manager");
            }
        }

        Ok(())
    }
}

/// Records invocations instead of running them
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    log: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingRunner {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every invocation recorded so far
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.log.lock().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.log.lock().push(invocation.clone());
        Ok(())
    }
}

/// Turns dependency sets into package manager invocations
pub struct Installer {
    manager: PackageManager,
    runner: Box<dyn CommandRunner>,
}

impl Installer {
    /// Create an installer backed by the given runner
    #[must_use]
    pub fn new(manager: PackageManager, runner: Box<dyn CommandRunner>) -> Self {
        Self { manager, runner }
    }

    /// Installer that spawns real processes
    #[must_use]
    pub fn shell(manager: PackageManager) -> Self {
        Self::new(manager, Box::new(ShellRunner))
    }

    /// Build the invocations for a dependency set without running them
    #[must_use]
    pub fn plan(&self, cwd: &Path, deps: &DependencySet) -> Vec<Invocation> {
        [(false, &deps.runtime), (true, &deps.dev)]
            .into_iter()
            .filter(|(_, packages)| !packages.is_empty())
            .map(|(dev, packages)| Invocation {
                program: self.manager.program().to_string(),
                args: self
                    .manager
                    .add_args(dev)
                    .iter()
                    .chain(packages.iter())
                    .map(|arg| (*arg).to_string())
                    .collect(),
                cwd: cwd.to_path_buf(),
            })
            .collect()
    }

    /// Install a dependency set in `cwd`: runtime packages first, then dev
    ///
    /// # Errors
    ///
    /// Returns an error only if the runner itself fails.
    pub fn install(&self, cwd: &Path, deps: &DependencySet) -> Result<Vec<Invocation>> {
        let invocations = self.plan(cwd, deps);

        for invocation in &invocations {
            info!(command = %invocation.command_line(), "installing dependencies");
            println!(
                "{} {}",
                style("Running").yellow().bold(),
                style(invocation.command_line()).dim()
            );
            self.runner.run(invocation)?;
        }

        Ok(invocations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_args_per_manager() {
        assert_eq!(PackageManager::Yarn.add_args(true), &["add", "-D"]);
        assert_eq!(PackageManager::Npm.add_args(false), &["install"]);
        assert_eq!(PackageManager::Npm.add_args(true), &["install", "--save-dev"]);
        assert_eq!(PackageManager::Pnpm.add_args(false), &["add"]);
    }

    #[test]
    fn test_install_runs_runtime_then_dev() {
        let runner = RecordingRunner::new();
        let installer = Installer::new(PackageManager::Yarn, Box::new(runner.clone()));
        let deps = DependencySet::new(&["express"], &["typescript"]);

        installer.install(Path::new("/tmp/app"), &deps).unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].command_line(), "yarn add express");
        assert_eq!(calls[1].command_line(), "yarn add -D typescript");
        assert_eq!(calls[1].cwd, PathBuf::from("/tmp/app"));
    }

    #[test]
    fn test_empty_lists_are_skipped() {
        let installer = Installer::new(PackageManager::Npm, Box::new(RecordingRunner::new()));
        let plan = installer.plan(Path::new("."), &DependencySet::new(&[], &["prettier"]));

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].command_line(), "npm install --save-dev prettier");
    }

    #[test]
    fn test_missing_binary_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = Invocation {
            program: "backforge-no-such-package-manager".to_string(),
            args: vec!["add".to_string(), "express".to_string()],
            cwd: dir.path().to_path_buf(),
        };

        assert!(ShellRunner.run(&invocation).is_ok());
    }

    #[test]
    fn test_with_appends_in_order() {
        let deps = DependencySet::new(&["express"], &[]).with(DependencySet::new(&["pg"], &[]));
        assert_eq!(deps.runtime, vec!["express", "pg"]);
        assert!(!deps.is_empty());
    }
}
