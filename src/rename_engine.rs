use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Files,
    Folders,
}

impl ItemKind {
    fn matches(self, file_type: fs::FileType) -> bool {
        match self {
            ItemKind::Files => file_type.is_file(),
            ItemKind::Folders => file_type.is_dir(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Files => write!(f, "files"),
            ItemKind::Folders => write!(f, "folders"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Date,
    Size,
}

/// Naming transformation for a batch. Prefix and Suffix carry their term
/// inside the variant, so a half-configured pattern cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Prefix { term: String },
    Suffix { term: String },
    Numbering,
}

#[derive(Debug, Clone)]
pub struct RenameConfig {
    pub directory: PathBuf,
    pub item_kind: ItemKind,
}

pub struct ConfigBuilder {
    directory: Option<PathBuf>,
    item_kind: ItemKind,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            directory: None,
            item_kind: ItemKind::Files,
        }
    }

    pub fn directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.directory = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn item_kind(mut self, kind: ItemKind) -> Self {
        self.item_kind = kind;
        self
    }

    pub fn build(self) -> Result<RenameConfig> {
        let directory = self
            .directory
            .ok_or_else(|| anyhow::anyhow!("Directory is required"))?;

        Ok(RenameConfig {
            directory,
            item_kind: self.item_kind,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of listing a directory. `Empty` is a normal outcome, not an
/// error; the caller decides whether it ends the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Found(Vec<String>),
    Empty,
}

/// Entry names in the order the user picked them. Numbering assigns
/// indices from this order, so it travels as its own type rather than a
/// bare Vec that could be reordered on the way through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSelection(Vec<String>);

impl OrderedSelection {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub op: RenameOp,
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Debug)]
pub struct RenameEngine {
    config: RenameConfig,
}

impl RenameEngine {
    pub fn new(config: RenameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Lists the immediate entries of the configured directory, keeping
    /// only those matching the configured kind. Enumeration order is
    /// whatever the filesystem returns.
    pub fn list_items(&self) -> Result<ListOutcome> {
        let entries = fs::read_dir(&self.config.directory).with_context(|| {
            format!("failed to read directory {}", self.config.directory.display())
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("failed to read an entry of {}", self.config.directory.display())
            })?;
            let file_type = entry
                .file_type()
                .with_context(|| format!("failed to stat {}", entry.path().display()))?;

            if self.config.item_kind.matches(file_type) {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        debug!(
            "listed {} {} in {}",
            names.len(),
            self.config.item_kind,
            self.config.directory.display()
        );

        if names.is_empty() {
            Ok(ListOutcome::Empty)
        } else {
            Ok(ListOutcome::Found(names))
        }
    }

    /// Returns a sorted copy of `names`; the input is left untouched.
    /// No key means enumeration order passes through unchanged.
    pub fn sort_entries(&self, key: Option<SortKey>, names: &[String]) -> Vec<String> {
        let mut sorted = names.to_vec();

        match key {
            None => {}
            Some(SortKey::Name) => {
                sorted.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
            }
            Some(SortKey::Date) => {
                sorted.sort_by(|a, b| self.compare_by_stat(a, b, |meta| meta.modified().ok()));
            }
            Some(SortKey::Size) => {
                sorted.sort_by(|a, b| self.compare_by_stat(a, b, |meta| Some(meta.len())));
            }
        }

        sorted
    }

    // An entry that cannot be stat'ed anymore compares as equal, keeping
    // the sort total instead of aborting mid-run.
    fn compare_by_stat<K, F>(&self, a: &str, b: &str, key: F) -> Ordering
    where
        K: Ord,
        F: Fn(&fs::Metadata) -> Option<K>,
    {
        match (self.stat_key(a, &key), self.stat_key(b, &key)) {
            (Some(key_a), Some(key_b)) => key_a.cmp(&key_b),
            _ => Ordering::Equal,
        }
    }

    fn stat_key<K, F>(&self, name: &str, key: &F) -> Option<K>
    where
        F: Fn(&fs::Metadata) -> Option<K>,
    {
        let path = self.config.directory.join(name);
        match fs::metadata(&path) {
            Ok(metadata) => key(&metadata),
            Err(e) => {
                warn!("could not stat {} while sorting: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn apply_rename(&self, op: &RenameOp) -> RenameOutcome {
        let old_path = self.config.directory.join(&op.old_name);
        let new_path = self.config.directory.join(&op.new_name);

        match tokio::fs::rename(&old_path, &new_path).await {
            Ok(()) => RenameOutcome {
                op: op.clone(),
                success: true,
                error_message: None,
            },
            Err(e) => {
                warn!(
                    "rename {} -> {} failed: {}",
                    old_path.display(),
                    new_path.display(),
                    e
                );
                RenameOutcome {
                    op: op.clone(),
                    success: false,
                    error_message: Some(e.to_string()),
                }
            }
        }
    }

    /// Applies the ops one at a time, in input order. Numbering targets
    /// can collide with not-yet-renamed sources, so the order is
    /// load-bearing. A failed op is recorded and the batch keeps going;
    /// nothing is retried or rolled back.
    pub async fn apply_renames(&self, ops: &[RenameOp]) -> Vec<RenameOutcome> {
        let mut outcomes = Vec::with_capacity(ops.len());

        for op in ops {
            outcomes.push(self.apply_rename(op).await);
        }

        outcomes
    }
}

/// Computes the new name for every selected entry. Pure: the same
/// selection and pattern always produce the same ops, in the selection's
/// order.
pub fn generate_ops(selection: &OrderedSelection, pattern: &Pattern) -> Vec<RenameOp> {
    selection
        .names()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let (base, ext) = split_name(name);
            let new_name = match pattern {
                Pattern::Numbering => format!("{}{}", index + 1, ext),
                Pattern::Prefix { term } => format!("{}{}{}", term, base, ext),
                Pattern::Suffix { term } => format!("{}{}{}", base, term, ext),
            };

            RenameOp {
                old_name: name.clone(),
                new_name,
            }
        })
        .collect()
}

/// Splits a name into (base, extension-with-dot). A name without a dot
/// has an empty extension, and a leading dot is not an extension
/// separator, so dotfiles keep their full name as the base.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("file.txt"), ("file", ".txt"));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_name("README"), ("README", ""));
        assert_eq!(split_name(".gitignore"), (".gitignore", ""));
        assert_eq!(split_name("trailing."), ("trailing", "."));
    }

    #[test]
    fn test_numbering_follows_selection_order() {
        let selection = OrderedSelection::new(vec![
            "b.txt".to_string(),
            "a.md".to_string(),
            "notes".to_string(),
        ]);

        let ops = generate_ops(&selection, &Pattern::Numbering);

        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].new_name, "1.txt");
        assert_eq!(ops[1].new_name, "2.md");
        assert_eq!(ops[2].new_name, "3");

        let mut new_names: Vec<_> = ops.iter().map(|op| op.new_name.clone()).collect();
        new_names.sort();
        new_names.dedup();
        assert_eq!(new_names.len(), ops.len());
    }

    #[test]
    fn test_prefix_pattern() {
        let selection = OrderedSelection::new(vec!["report.pdf".to_string()]);
        let pattern = Pattern::Prefix {
            term: "final_".to_string(),
        };

        let ops = generate_ops(&selection, &pattern);

        assert_eq!(ops[0].old_name, "report.pdf");
        assert_eq!(ops[0].new_name, "final_report.pdf");
    }

    #[test]
    fn test_suffix_pattern() {
        let selection = OrderedSelection::new(vec!["photo.png".to_string()]);
        let pattern = Pattern::Suffix {
            term: "_v2".to_string(),
        };

        let ops = generate_ops(&selection, &pattern);

        assert_eq!(ops[0].new_name, "photo_v2.png");
    }

    #[test]
    fn test_empty_term_is_a_noop_rename() {
        let selection = OrderedSelection::new(vec!["keep.txt".to_string()]);
        let pattern = Pattern::Suffix {
            term: String::new(),
        };

        let ops = generate_ops(&selection, &pattern);

        assert_eq!(ops[0].new_name, ops[0].old_name);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let selection = OrderedSelection::new(vec!["a.txt".to_string(), "b.txt".to_string()]);
        let pattern = Pattern::Prefix {
            term: "x".to_string(),
        };

        assert_eq!(
            generate_ops(&selection, &pattern),
            generate_ops(&selection, &pattern)
        );
    }

    #[test]
    fn test_sort_without_key_is_identity() {
        let engine = RenameEngine::new(RenameConfig {
            directory: PathBuf::from("/nonexistent"),
            item_kind: ItemKind::Files,
        });
        let names = vec!["c".to_string(), "a".to_string(), "b".to_string()];

        let sorted = engine.sort_entries(None, &names);

        assert_eq!(sorted, names);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive_and_idempotent() {
        let engine = RenameEngine::new(RenameConfig {
            directory: PathBuf::from("/nonexistent"),
            item_kind: ItemKind::Files,
        });
        let names = vec![
            "Banana.txt".to_string(),
            "apple.txt".to_string(),
            "cherry.txt".to_string(),
        ];

        let sorted = engine.sort_entries(Some(SortKey::Name), &names);

        assert_eq!(sorted, vec!["apple.txt", "Banana.txt", "cherry.txt"]);
        assert_eq!(engine.sort_entries(Some(SortKey::Name), &sorted), sorted);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .directory("/some/dir")
            .item_kind(ItemKind::Folders)
            .build()
            .unwrap();

        assert_eq!(config.directory, PathBuf::from("/some/dir"));
        assert_eq!(config.item_kind, ItemKind::Folders);
    }

    #[test]
    fn test_config_builder_requires_directory() {
        assert!(ConfigBuilder::new().build().is_err());
    }
}
