//! Named fragments: modules, entities and seeders
//!
//! The name is substituted verbatim for `__name__`. Nothing checks whether
//! the generated files already exist.

use anyhow::{bail, Result};
use tracing::info;

use crate::config::ProjectConfig;
use crate::materialize::Substitutions;
use crate::project::ProjectKind;
use crate::store::{FragmentKey, ModuleTemplate};
use crate::workspace::{GenerationReport, Workspace};

/// Check a user-supplied name before it is used in paths
///
/// Names are taken verbatim; only blank names and names that would leave the
/// fragment's directory are refused.
///
/// # Errors
///
/// Returns an error for blank names and names containing path separators or `..`.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Name must not be empty");
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        bail!("Invalid name '{name}': path separators and '..' are not allowed");
    }

    Ok(())
}

impl ModuleTemplate {
    /// Pick the module template for a project
    ///
    /// Web projects can host both REST modules and page modules; `family`
    /// chooses between them and defaults to a page module.
    ///
    /// # Errors
    ///
    /// Returns an error if a REST module is needed and no database is
    /// configured, or if `family` is GraphQL for a web project.
    pub fn resolve(config: &ProjectConfig, family: Option<ProjectKind>) -> Result<Self> {
        let template = match (config.project, family) {
            (ProjectKind::GraphQl, _) => Self::GraphQl,
            (ProjectKind::Api, _) | (ProjectKind::Web, Some(ProjectKind::Api)) => {
                Self::Rest(config.require_database()?)
            }
            (ProjectKind::Web, Some(ProjectKind::Web) | None) => Self::Page,
            (ProjectKind::Web, Some(ProjectKind::GraphQl)) => {
                bail!("Web projects cannot host GraphQL modules")
            }
        };

        Ok(template)
    }
}

/// Copy a module fragment named `name`
///
/// # Errors
///
/// Returns an error for invalid names or if the fragment cannot be copied.
pub fn make_module(
    workspace: &Workspace,
    name: &str,
    template: ModuleTemplate,
) -> Result<GenerationReport> {
    generate(workspace, FragmentKey::Module(template), name)
}

/// Copy the entity fragment for the configured ORM
///
/// # Errors
///
/// Returns [`crate::ConfigError::MissingDatabase`] if no ORM is configured,
/// or an error if the fragment cannot be copied.
pub fn make_entity(
    workspace: &Workspace,
    config: &ProjectConfig,
    name: &str,
) -> Result<GenerationReport> {
    let orm = config.require_database()?;
    generate(workspace, FragmentKey::Entity(orm), name)
}

/// Copy the seeder fragment
///
/// # Errors
///
/// Returns an error for invalid names or if the fragment cannot be copied.
pub fn make_seeder(workspace: &Workspace, name: &str) -> Result<GenerationReport> {
    generate(workspace, FragmentKey::Seeder, name)
}

fn generate(workspace: &Workspace, key: FragmentKey, name: &str) -> Result<GenerationReport> {
    validate_name(name)?;

    let files = workspace.copy(key, &Substitutions::name(name))?;
    info!(fragment = %key, name, "generated fragment");

    Ok(GenerationReport {
        files,
        invocations: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::DatabaseKind;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Order").is_ok());
        assert!(validate_name("order_item").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn test_resolve_api_needs_database() {
        let config = ProjectConfig::new(ProjectKind::Api, None);
        assert!(ModuleTemplate::resolve(&config, None).is_err());

        let config = ProjectConfig::new(ProjectKind::Api, Some(DatabaseKind::TypeOrm));
        assert_eq!(
            ModuleTemplate::resolve(&config, None).unwrap(),
            ModuleTemplate::Rest(DatabaseKind::TypeOrm)
        );
    }

    #[test]
    fn test_resolve_graphql_ignores_database() {
        let config = ProjectConfig::new(ProjectKind::GraphQl, None);
        assert_eq!(
            ModuleTemplate::resolve(&config, None).unwrap(),
            ModuleTemplate::GraphQl
        );
    }

    #[test]
    fn test_resolve_web_families() {
        let config = ProjectConfig::new(ProjectKind::Web, Some(DatabaseKind::Mongoose));
        assert_eq!(
            ModuleTemplate::resolve(&config, Some(ProjectKind::Web)).unwrap(),
            ModuleTemplate::Page
        );
        assert_eq!(
            ModuleTemplate::resolve(&config, Some(ProjectKind::Api)).unwrap(),
            ModuleTemplate::Rest(DatabaseKind::Mongoose)
        );
        assert!(ModuleTemplate::resolve(&config, Some(ProjectKind::GraphQl)).is_err());
    }
}
