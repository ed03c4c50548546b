//! Add-on installers and database integration
//!
//! Every add-on is a fragment plus a dependency set. Re-running an add-on
//! copies its files again and re-issues the install.

use anyhow::Result;
use tracing::info;

use crate::config::ProjectConfig;
use crate::installer::DependencySet;
use crate::materialize::{CopyPlan, Substitutions};
use crate::project::DatabaseKind;
use crate::store::FragmentKey;
use crate::workspace::{GenerationReport, Workspace};

/// Entry file replaced by the socket add-on
pub const ENTRY_FILE: &str = "src/index.ts";

/// Optional feature layered onto a generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addon {
    /// JWT authentication (signup, login, token refresh)
    Auth,
    /// Nodemailer transport and templates
    Mailer,
    /// Socket.IO server; replaces the entry file
    Socket,
    /// Prettier configuration
    Prettier,
    /// ESLint configuration
    Eslint,
}

impl Addon {
    /// Command-line name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Mailer => "mailer",
            Self::Socket => "socket",
            Self::Prettier => "prettier",
            Self::Eslint => "eslint",
        }
    }

    /// Whether installing overwrites user code and needs confirmation
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Socket)
    }

    /// Fragment to copy for this add-on
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MissingDatabase`] for `auth` when no ORM
    /// is configured.
    pub fn fragment(self, config: &ProjectConfig) -> Result<FragmentKey> {
        let key = match self {
            Self::Auth => FragmentKey::Auth(config.require_database()?),
            Self::Mailer => FragmentKey::Mailer,
            Self::Socket => FragmentKey::Socket,
            Self::Prettier => FragmentKey::Prettier,
            Self::Eslint => FragmentKey::Eslint,
        };

        Ok(key)
    }

    /// Packages installed with this add-on
    #[must_use]
    pub fn dependencies(self) -> DependencySet {
        match self {
            Self::Auth => DependencySet::new(
                &["jsonwebtoken", "bcrypt"],
                &["@types/jsonwebtoken", "@types/bcrypt"],
            ),
            Self::Mailer => DependencySet::new(&["nodemailer"], &["@types/nodemailer"]),
            Self::Socket => DependencySet::new(&["socket.io"], &[]),
            Self::Prettier => DependencySet::new(&[], &["prettier"]),
            Self::Eslint => DependencySet::new(
                &[],
                &[
                    "eslint",
                    "@typescript-eslint/parser",
                    "@typescript-eslint/eslint-plugin",
                ],
            ),
        }
    }
}

/// Compute what an add-on would write, without touching the workspace
///
/// # Errors
///
/// Returns an error if the add-on needs a database that is not configured or
/// its fragment cannot be loaded.
pub fn plan_addon(workspace: &Workspace, config: &ProjectConfig, addon: Addon) -> Result<CopyPlan> {
    workspace.plan(addon.fragment(config)?, &Substitutions::none())
}

/// Copy an add-on's fragment and install its packages
///
/// # Errors
///
/// Returns an error if the add-on needs a database that is not configured or
/// its files cannot be written.
pub fn install_addon(
    workspace: &Workspace,
    config: &ProjectConfig,
    addon: Addon,
) -> Result<GenerationReport> {
    let files = plan_addon(workspace, config, addon)?.apply(workspace.root())?;
    let invocations = workspace.install(&addon.dependencies())?;

    info!(addon = addon.name(), "add-on installed");
    Ok(GenerationReport { files, invocations })
}

/// Switch the project to `database`: update the config, copy the integration
/// fragment, and install the driver packages
///
/// Returns the updated config alongside the report.
///
/// # Errors
///
/// Returns an error if the config or the fragment cannot be written.
pub fn install_database(
    workspace: &Workspace,
    mut config: ProjectConfig,
    database: DatabaseKind,
) -> Result<(ProjectConfig, GenerationReport)> {
    config.orm = Some(database);
    config.save(workspace.root())?;

    let files = workspace.copy(FragmentKey::Database(database), &Substitutions::none())?;
    let invocations = workspace.install(&database.dependencies())?;

    info!(%database, "database installed");
    Ok((config, GenerationReport { files, invocations }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectKind;

    #[test]
    fn test_only_socket_is_destructive() {
        for addon in [Addon::Auth, Addon::Mailer, Addon::Prettier, Addon::Eslint] {
            assert!(!addon.is_destructive(), "{}", addon.name());
        }
        assert!(Addon::Socket.is_destructive());
    }

    #[test]
    fn test_auth_fragment_follows_orm() {
        let config = ProjectConfig::new(ProjectKind::Api, Some(DatabaseKind::Mongoose));
        assert_eq!(
            Addon::Auth.fragment(&config).unwrap(),
            FragmentKey::Auth(DatabaseKind::Mongoose)
        );

        let config = ProjectConfig::new(ProjectKind::Api, None);
        assert!(Addon::Auth.fragment(&config).is_err());
        assert_eq!(Addon::Mailer.fragment(&config).unwrap(), FragmentKey::Mailer);
    }

    #[test]
    fn test_linters_are_dev_only() {
        assert!(Addon::Prettier.dependencies().runtime.is_empty());
        assert!(Addon::Eslint.dependencies().runtime.is_empty());
        assert!(Addon::Eslint.dependencies().dev.contains(&"eslint"));
    }
}
