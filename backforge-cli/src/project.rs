//! Project and database kinds
//!
//! Both are closed sets: every generator picks its blueprint and fragments by
//! matching on these enums.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::installer::DependencySet;

/// High-level application style being scaffolded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum ProjectKind {
    /// REST API on Express
    #[serde(rename = "API")]
    #[value(name = "api")]
    Api,
    /// GraphQL API on Apollo Server
    #[serde(rename = "GraphQL")]
    #[value(name = "graphql")]
    GraphQl,
    /// Server-rendered web application
    #[serde(rename = "Web")]
    #[value(name = "web")]
    Web,
}

impl ProjectKind {
    /// Every project kind, in menu order
    pub const ALL: [Self; 3] = [Self::Api, Self::GraphQl, Self::Web];

    /// Label shown in menus and persisted in `cli.config.json`
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::GraphQl => "GraphQL",
            Self::Web => "Web",
        }
    }

    /// Directory name used for this kind inside the template store
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::GraphQl => "graphql",
            Self::Web => "web",
        }
    }

    /// Whether `init` asks for a database for this kind
    #[must_use]
    pub const fn uses_database(self) -> bool {
        matches!(self, Self::Api | Self::Web)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Persistence technology family for a scaffolded project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum DatabaseKind {
    /// Relational database through TypeORM
    #[serde(rename = "TypeOrm")]
    #[value(name = "typeorm")]
    TypeOrm,
    /// Document store through Mongoose
    #[serde(rename = "Mongoose")]
    #[value(name = "mongoose")]
    Mongoose,
}

impl DatabaseKind {
    /// Every database kind, in menu order
    pub const ALL: [Self; 2] = [Self::TypeOrm, Self::Mongoose];

    /// Label shown in menus and persisted in `cli.config.json`
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TypeOrm => "TypeOrm",
            Self::Mongoose => "Mongoose",
        }
    }

    /// Directory name used for this kind inside the template store
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TypeOrm => "typeorm",
            Self::Mongoose => "mongoose",
        }
    }

    /// Driver packages appended to a project's install list
    #[must_use]
    pub fn dependencies(self) -> DependencySet {
        match self {
            Self::TypeOrm => DependencySet::new(&["typeorm", "reflect-metadata", "pg"], &[]),
            Self::Mongoose => DependencySet::new(&["mongoose"], &[]),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_kind_serializes_to_label() {
        for kind in ProjectKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.label()));
        }
    }

    #[test]
    fn test_database_kind_round_trips_through_label() {
        let parsed: DatabaseKind = serde_json::from_str("\"TypeOrm\"").unwrap();
        assert_eq!(parsed, DatabaseKind::TypeOrm);
        assert!(serde_json::from_str::<DatabaseKind>("\"Sequelize\"").is_err());
    }

    #[test]
    fn test_only_graphql_skips_database() {
        assert!(ProjectKind::Api.uses_database());
        assert!(ProjectKind::Web.uses_database());
        assert!(!ProjectKind::GraphQl.uses_database());
    }

    #[test]
    fn test_database_dependencies() {
        assert!(DatabaseKind::TypeOrm.dependencies().runtime.contains(&"typeorm"));
        assert_eq!(DatabaseKind::Mongoose.dependencies().runtime, vec!["mongoose"]);
    }
}
