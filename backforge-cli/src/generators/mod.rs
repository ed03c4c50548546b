//! Generators: project skeletons, named fragments and add-ons
//!
//! Each project kind is described by a constant [`Blueprint`]; the generators
//! pick one by matching on [`ProjectKind`] and never dispatch dynamically.

pub mod addons;
pub mod api;
pub mod fragment;
pub mod graphql;
pub mod project;
pub mod web;

pub use addons::{install_addon, install_database, plan_addon, Addon, ENTRY_FILE};
pub use fragment::{make_entity, make_module, make_seeder, validate_name};
pub use project::ProjectGenerator;

use crate::installer::DependencySet;
use crate::project::ProjectKind;

/// Fixed shape of a project kind
#[derive(Debug)]
pub struct Blueprint {
    /// Directories created before any file is copied
    pub directories: &'static [&'static str],
    /// Runtime packages
    pub dependencies: &'static [&'static str],
    /// Dev packages
    pub dev_dependencies: &'static [&'static str],
}

impl Blueprint {
    /// Runtime and dev packages as an installable set
    #[must_use]
    pub fn dependency_set(&self) -> DependencySet {
        DependencySet::new(self.dependencies, self.dev_dependencies)
    }
}

/// Blueprint for a project kind
#[must_use]
pub const fn blueprint(kind: ProjectKind) -> &'static Blueprint {
    match kind {
        ProjectKind::Api => &api::BLUEPRINT,
        ProjectKind::GraphQl => &graphql::BLUEPRINT,
        ProjectKind::Web => &web::BLUEPRINT,
    }
}
