//! Copy plans: fragment files mapped to project paths
//!
//! A plan is computed up front (destination paths and final contents) and then
//! written in order. Writing never checks for existing files.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::store::{Fragment, FragmentKey};

/// Token replaced by the user-supplied name in generator fragments
pub const NAME_PLACEHOLDER: &str = "__name__";

/// Root-level template files that are written as dotfiles
///
/// Templates keep these without the leading dot so packaging tools do not
/// drop or interpret them.
pub const DOTFILE_TEMPLATES: &[&str] = &[
    "gitignore",
    "env.example",
    "prettierrc",
    "prettierignore",
    "eslintrc.json",
    "eslintignore",
];

/// Ordered token replacements applied to paths and text contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pairs: Vec<(String, String)>,
}

impl Substitutions {
    /// No replacements: files are copied byte for byte
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace [`NAME_PLACEHOLDER`] with `name`
    #[must_use]
    pub fn name(name: &str) -> Self {
        Self {
            pairs: vec![(NAME_PLACEHOLDER.to_string(), name.to_string())],
        }
    }

    /// Apply every replacement to `text`
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .fold(text.to_string(), |acc, (token, value)| acc.replace(token, value))
    }

    fn apply_bytes(&self, contents: &[u8]) -> Vec<u8> {
        if self.pairs.is_empty() || is_binary(contents) {
            return contents.to_vec();
        }

        match std::str::from_utf8(contents) {
            Ok(text) => self.apply(text).into_bytes(),
            Err(_) => contents.to_vec(),
        }
    }

    fn apply_path(&self, path: &Path) -> PathBuf {
        path.iter()
            .map(|part| match part.to_str() {
                Some(text) => OsString::from(self.apply(text)),
                None => part.to_os_string(),
            })
            .collect()
    }
}

/// Whether contents look binary (NUL byte in the first 8 KiB)
#[must_use]
pub fn is_binary(contents: &[u8]) -> bool {
    let check_len = contents.len().min(8192);
    contents[..check_len].contains(&0)
}

/// One file to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path inside the fragment
    pub source: PathBuf,
    /// Path relative to the project root
    pub destination: PathBuf,
    /// Final contents after substitution
    pub contents: Vec<u8>,
}

/// Ordered list of files to write for one fragment
#[derive(Debug, Clone)]
pub struct CopyPlan {
    key: FragmentKey,
    files: Vec<PlannedFile>,
}

impl CopyPlan {
    /// Map every fragment file to its destination and final contents
    #[must_use]
    pub fn new(fragment: &Fragment, substitutions: &Substitutions) -> Self {
        let files = fragment
            .files()
            .iter()
            .map(|file| PlannedFile {
                source: file.path.clone(),
                destination: dotfile_name(&substitutions.apply_path(&file.path)),
                contents: substitutions.apply_bytes(&file.contents),
            })
            .collect();

        Self {
            key: fragment.key(),
            files,
        }
    }

    /// Planned files, in write order
    #[must_use]
    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    /// Write every planned file under `root`, creating parent directories
    ///
    /// Existing files are overwritten. Returns the destinations written.
    ///
    /// # Errors
    ///
    /// Returns an error if a destination would escape `root` or a file or
    /// directory cannot be written.
    pub fn apply(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());

        for file in &self.files {
            if !is_contained(&file.destination) {
                anyhow::bail!(
                    "Refusing to write outside the project: {}",
                    file.destination.display()
                );
            }

            let path = root.join(&file.destination);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            fs::write(&path, &file.contents)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;

            debug!(source = %file.source.display(), destination = %file.destination.display(), "copied template file");
            written.push(file.destination.clone());
        }

        info!(fragment = %self.key, files = written.len(), "materialized fragment");
        Ok(written)
    }
}

/// Rename a root-level dotfile template to its hidden name
fn dotfile_name(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(name) if DOTFILE_TEMPLATES.contains(&name) => PathBuf::from(format!(".{name}")),
        _ => path.to_path_buf(),
    }
}

fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FragmentFile, TemplateStore};
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn seeder_fragment(dir: &TempDir, files: &[(&str, &[u8])]) -> Fragment {
        for (path, contents) in files {
            let full = dir.path().join("seeder").join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        TemplateStore::from_dir(dir.path())
            .unwrap()
            .fragment(FragmentKey::Seeder)
            .unwrap()
    }

    #[test]
    fn test_name_is_substituted_in_paths_and_contents() {
        let dir = TempDir::new().unwrap();
        let fragment = seeder_fragment(
            &dir,
            &[("src/__name__/__name__.seeder.ts", b"export class __name__Seeder {}")],
        );

        let plan = CopyPlan::new(&fragment, &Substitutions::name("Order"));
        let file = &plan.files()[0];

        assert_eq!(file.destination, PathBuf::from("src/Order/Order.seeder.ts"));
        assert_eq!(file.contents, b"export class OrderSeeder {}");
    }

    #[test]
    fn test_root_dotfiles_are_renamed() {
        let dir = TempDir::new().unwrap();
        let fragment = seeder_fragment(
            &dir,
            &[("gitignore", b"node_modules\n"), ("src/gitignore", b"keep\n")],
        );

        let plan = CopyPlan::new(&fragment, &Substitutions::none());
        let destinations: Vec<_> = plan.files().iter().map(|f| f.destination.clone()).collect();

        assert!(destinations.contains(&PathBuf::from(".gitignore")));
        assert!(destinations.contains(&PathBuf::from("src/gitignore")));
    }

    #[test]
    fn test_binary_files_are_untouched() {
        let dir = TempDir::new().unwrap();
        let fragment = seeder_fragment(&dir, &[("logo.png", b"\x89PNG\0__name__")]);

        let plan = CopyPlan::new(&fragment, &Substitutions::name("Order"));
        assert_eq!(plan.files()[0].contents, b"\x89PNG\0__name__");
    }

    #[test]
    fn test_apply_overwrites_existing_files() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let fragment = seeder_fragment(&dir, &[("src/a.ts", b"fresh")]);
        fs::create_dir_all(out.path().join("src")).unwrap();
        fs::write(out.path().join("src/a.ts"), "stale").unwrap();

        let written = CopyPlan::new(&fragment, &Substitutions::none())
            .apply(out.path())
            .unwrap();

        assert_eq!(written, vec![PathBuf::from("src/a.ts")]);
        assert_eq!(fs::read_to_string(out.path().join("src/a.ts")).unwrap(), "fresh");
    }

    #[test]
    fn test_apply_rejects_escaping_destination() {
        let out = TempDir::new().unwrap();
        let fragment_dir = TempDir::new().unwrap();
        let fragment = seeder_fragment(&fragment_dir, &[("__name__/x.ts", b"x")]);

        let plan = CopyPlan::new(&fragment, &Substitutions::name(".."));
        assert!(plan.apply(out.path()).is_err());
    }

    #[test]
    fn test_is_binary() {
        assert!(is_binary(b"ab\0cd"));
        assert!(!is_binary(b"plain text"));
        assert!(!is_binary(b""));
    }

    proptest! {
        #[test]
        fn prop_substituted_text_has_no_placeholder(
            prefix in "[a-z ]{0,12}",
            suffix in "[a-z ]{0,12}",
            name in "[A-Z][a-zA-Z]{0,10}",
        ) {
            let text = format!("{prefix}{NAME_PLACEHOLDER}{suffix}{NAME_PLACEHOLDER}");
            let out = Substitutions::name(&name).apply(&text);

            prop_assert!(!out.contains(NAME_PLACEHOLDER));
            prop_assert_eq!(out, format!("{prefix}{name}{suffix}{name}"));
        }

        #[test]
        fn prop_no_substitutions_is_identity(contents in proptest::collection::vec(any::<u8>(), 0..256)) {
            let file = FragmentFile { path: PathBuf::from("a.bin"), contents: contents.clone() };
            let planned = Substitutions::none().apply_bytes(&file.contents);
            prop_assert_eq!(planned, contents);
        }
    }
}
