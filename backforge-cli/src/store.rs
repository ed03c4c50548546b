//! Template store
//!
//! Fragments are read either from the tree embedded at build time or from a
//! directory on disk with the same layout. A fragment is addressed by a
//! [`FragmentKey`] and always read whole.

use anyhow::{bail, Context, Result};
use include_dir::{include_dir, Dir, DirEntry};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::project::{DatabaseKind, ProjectKind};

static BUILTIN_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Module template family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleTemplate {
    /// Express router, controller and service for the given ORM
    Rest(DatabaseKind),
    /// GraphQL type definitions and resolvers
    GraphQl,
    /// Server-rendered page controller and view
    Page,
}

/// Address of a fragment inside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKey {
    /// Root tree copied by `init`
    Project(ProjectKind),
    /// Database integration layered onto a project
    Database(DatabaseKind),
    /// Module generated by `make:module`
    Module(ModuleTemplate),
    /// Entity generated by `make:entity`
    Entity(DatabaseKind),
    /// Seeder generated by `make:seeder`
    Seeder,
    /// Authentication add-on
    Auth(DatabaseKind),
    /// Mailer add-on
    Mailer,
    /// Socket add-on
    Socket,
    /// Prettier add-on
    Prettier,
    /// ESLint add-on
    Eslint,
}

impl FragmentKey {
    /// Relative directory of this fragment in the store
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Project(kind) => format!("project/{}", kind.slug()),
            Self::Database(orm) => format!("database/{}", orm.slug()),
            Self::Module(ModuleTemplate::Rest(orm)) => format!("module/rest/{}", orm.slug()),
            Self::Module(ModuleTemplate::GraphQl) => "module/graphql".to_string(),
            Self::Module(ModuleTemplate::Page) => "module/page".to_string(),
            Self::Entity(orm) => format!("entity/{}", orm.slug()),
            Self::Seeder => "seeder".to_string(),
            Self::Auth(orm) => format!("addon/auth/{}", orm.slug()),
            Self::Mailer => "addon/mailer".to_string(),
            Self::Socket => "addon/socket".to_string(),
            Self::Prettier => "addon/prettier".to_string(),
            Self::Eslint => "addon/eslint".to_string(),
        }
    }

    /// Every key the store is expected to serve
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut keys: Vec<Self> = ProjectKind::ALL.into_iter().map(Self::Project).collect();
        for orm in DatabaseKind::ALL {
            keys.extend([
                Self::Database(orm),
                Self::Module(ModuleTemplate::Rest(orm)),
                Self::Entity(orm),
                Self::Auth(orm),
            ]);
        }
        keys.extend([
            Self::Module(ModuleTemplate::GraphQl),
            Self::Module(ModuleTemplate::Page),
            Self::Seeder,
            Self::Mailer,
            Self::Socket,
            Self::Prettier,
            Self::Eslint,
        ]);
        keys
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A single file of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
    /// Path relative to the fragment root
    pub path: PathBuf,
    /// Raw file contents
    pub contents: Vec<u8>,
}

/// The files of one fragment, sorted by path
#[derive(Debug, Clone)]
pub struct Fragment {
    key: FragmentKey,
    files: Vec<FragmentFile>,
}

impl Fragment {
    /// Key this fragment was loaded from
    #[must_use]
    pub const fn key(&self) -> FragmentKey {
        self.key
    }

    /// Files in path order
    #[must_use]
    pub fn files(&self) -> &[FragmentFile] {
        &self.files
    }
}

/// Where fragments come from
#[derive(Debug, Clone)]
enum TemplateSource {
    Builtin,
    Directory(PathBuf),
}

/// Read-only store of template fragments
#[derive(Debug, Clone)]
pub struct TemplateStore {
    source: TemplateSource,
}

impl TemplateStore {
    /// The store compiled into the binary
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            source: TemplateSource::Builtin,
        }
    }

    /// A store rooted at a directory laid out like the builtin one
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory.
    pub fn from_dir(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            bail!("Template directory not found: {}", root.display());
        }

        Ok(Self {
            source: TemplateSource::Directory(root),
        })
    }

    /// Load every file of a fragment
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment does not exist, is empty, or one of
    /// its files cannot be read.
    pub fn fragment(&self, key: FragmentKey) -> Result<Fragment> {
        let relative = key.path();
        let mut files = match &self.source {
            TemplateSource::Builtin => {
                let dir = BUILTIN_TEMPLATES
                    .get_dir(&relative)
                    .with_context(|| format!("Template fragment not found: {relative}"))?;
                let mut files = Vec::new();
                collect_embedded(dir, dir.path(), &mut files)?;
                files
            }
            TemplateSource::Directory(root) => read_directory(&root.join(&relative))
                .with_context(|| format!("Template fragment not found: {relative}"))?,
        };

        if files.is_empty() {
            bail!("Template fragment is empty: {relative}");
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Fragment { key, files })
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn collect_embedded(dir: &Dir<'_>, base: &Path, files: &mut Vec<FragmentFile>) -> Result<()> {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, base, files)?,
            DirEntry::File(file) => {
                let path = file
                    .path()
                    .strip_prefix(base)
                    .with_context(|| {
                        format!("Embedded template outside fragment: {}", file.path().display())
                    })?
                    .to_path_buf();
                files.push(FragmentFile {
                    path,
                    contents: file.contents().to_vec(),
                });
            }
        }
    }

    Ok(())
}

fn read_directory(root: &Path) -> Result<Vec<FragmentFile>> {
    if !root.is_dir() {
        bail!("Directory not found: {}", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let contents = fs::read(entry.path())
            .with_context(|| format!("Failed to read template: {}", entry.path().display()))?;
        let path = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Template outside fragment: {}", entry.path().display()))?
            .to_path_buf();

        files.push(FragmentFile { path, contents });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_store_serves_every_key() {
        let store = TemplateStore::builtin();
        for key in FragmentKey::all() {
            let fragment = store.fragment(key).unwrap();
            assert!(!fragment.files().is_empty(), "{key} has no files");
        }
    }

    #[test]
    fn test_builtin_paths_are_relative_to_fragment() {
        let fragment = TemplateStore::builtin()
            .fragment(FragmentKey::Project(ProjectKind::GraphQl))
            .unwrap();

        assert!(fragment
            .files()
            .iter()
            .any(|f| f.path == Path::new("src/index.ts")));
        assert!(fragment.files().iter().all(|f| !f.path.starts_with("project")));
    }

    #[test]
    fn test_directory_store() {
        let dir = TempDir::new().unwrap();
        let seeder = dir.path().join("seeder/src");
        fs::create_dir_all(&seeder).unwrap();
        fs::write(seeder.join("b.ts"), "b").unwrap();
        fs::write(seeder.join("a.ts"), "a").unwrap();

        let store = TemplateStore::from_dir(dir.path()).unwrap();
        let fragment = store.fragment(FragmentKey::Seeder).unwrap();

        let paths: Vec<_> = fragment.files().iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("src/a.ts"), PathBuf::from("src/b.ts")]);
        assert_eq!(fragment.files()[0].contents, b"a");
    }

    #[test]
    fn test_unknown_fragment_in_directory_store() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::from_dir(dir.path()).unwrap();
        assert!(store.fragment(FragmentKey::Mailer).is_err());
    }

    #[test]
    fn test_from_dir_rejects_missing_directory() {
        assert!(TemplateStore::from_dir("/definitely/not/here").is_err());
    }

    #[test]
    fn test_fragment_keys_are_unique() {
        let mut paths: Vec<_> = FragmentKey::all().into_iter().map(FragmentKey::path).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }
}
