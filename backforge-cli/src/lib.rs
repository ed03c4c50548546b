//! backforge CLI library
//!
//! Scaffolds TypeScript backends (REST API, GraphQL, server-rendered web)
//! from an embedded template tree and layers modules, entities, seeders and
//! add-ons onto them. The binary is a thin clap front end over [`Command`].

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod generators;
pub mod installer;
pub mod logging;
pub mod materialize;
pub mod project;
pub mod prompt;
pub mod store;
pub mod workspace;

pub use commands::Command;
pub use config::{ConfigError, ProjectConfig, CONFIG_FILE};
pub use generators::{Addon, ProjectGenerator};
pub use installer::{CommandRunner, Installer, Invocation, PackageManager, RecordingRunner};
pub use project::{DatabaseKind, ProjectKind};
pub use prompt::{DialoguerPrompter, Prompter};
pub use store::{FragmentKey, TemplateStore};
pub use workspace::{GenerationReport, Workspace};
