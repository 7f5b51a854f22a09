use std::path::PathBuf;

use crate::rename_engine::ItemKind;

#[derive(Debug, Clone)]
pub struct EntryItem {
    pub name: String,
    pub new_name: Option<String>,
    pub status: ProcessingStatus,
    pub error_message: Option<String>,
}

impl EntryItem {
    pub fn pending(name: String) -> Self {
        Self {
            name,
            new_name: None,
            status: ProcessingStatus::Pending,
            error_message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Directory,
    ItemKind,
    SortChoice,
    Pattern,
    Term,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternChoice {
    Prefix,
    Suffix,
    Numbering,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}

/// What the shell wants the process to do once the terminal is restored.
/// The engine never exits the process itself; this is the only channel
/// through which a run ends.
#[derive(Debug)]
pub enum ExitIntent {
    Quit,
    EmptyListing {
        item_kind: ItemKind,
        directory: PathBuf,
    },
    Fatal(String),
}
